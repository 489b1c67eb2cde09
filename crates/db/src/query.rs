//! The listing query contract: filter, sort order and page window.
//!
//! Everything here is plain data plus translation into `QueryBuilder`
//! statements. Stores decide how to execute it; see
//! [`crate::repository::JobPostingStore`].

use sqlx::{Postgres, QueryBuilder};

/// Page used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest page size a caller may ask for.
pub const MAX_LIMIT: i64 = 50;

/// Columns selected for every listing, in `JobPostingRow` order.
const JOB_POSTING_COLUMNS: &str =
    "id, title, ministry, job_type, application_period_end, created_at, is_urgent, is_new";

// ---------------------------------------------------------------------------
// JobFilter
// ---------------------------------------------------------------------------

/// Optional predicates applied to a listing. All present predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring matched against title, ministry or job type.
    pub search: Option<String>,
    /// Exact ministry name.
    pub ministry: Option<String>,
}

impl JobFilter {
    /// Search term, if one was given and is non-empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Ministry to match exactly, if one was given and is non-empty.
    pub fn ministry_name(&self) -> Option<&str> {
        self.ministry.as_deref().filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.ministry_name().is_none()
    }

    /// Append the `WHERE` clause (if any) with bound parameters.
    pub fn push_where<'args>(&self, qb: &mut QueryBuilder<'args, Postgres>) {
        if self.is_empty() {
            return;
        }

        let mut keyword = " WHERE ";

        if let Some(term) = self.search_term() {
            let pattern = format!("%{}%", escape_like(term));
            qb.push(keyword)
                .push("(title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR ministry ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR job_type ILIKE ")
                .push_bind(pattern)
                .push(")");
            keyword = " AND ";
        }

        if let Some(ministry) = self.ministry_name() {
            qb.push(keyword)
                .push("ministry = ")
                .push_bind(ministry.to_owned());
        }
    }
}

/// Escape `LIKE` metacharacters so `term` only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ---------------------------------------------------------------------------
// SortBy
// ---------------------------------------------------------------------------

/// Listing order. Rows with equal sort keys come back in whatever order the
/// store yields them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Newest first by creation time.
    #[default]
    Latest,
    /// Earliest application deadline first.
    Deadline,
    /// Ministry name, ascending.
    Ministry,
}

impl SortBy {
    /// Parse a `sortBy` value. Unknown values mean [`SortBy::Latest`].
    pub fn parse(value: &str) -> Self {
        match value {
            "deadline" => Self::Deadline,
            "ministry" => Self::Ministry,
            _ => Self::Latest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Deadline => "deadline",
            Self::Ministry => "ministry",
        }
    }

    fn order_by(&self) -> &'static str {
        match self {
            Self::Latest => "created_at DESC",
            Self::Deadline => "application_period_end ASC",
            Self::Ministry => "ministry ASC",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A normalised, 1-based page window.
///
/// Always satisfies `page >= 1` and `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Build a window from raw caller input. Missing or non-positive values
    /// fall back to the defaults; `limit` is clamped to [`MAX_LIMIT`].
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        Self { page, limit }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages needed to show `total` rows at this page size.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total - 1) / self.limit + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// ---------------------------------------------------------------------------
// ListQuery + statement builders
// ---------------------------------------------------------------------------

/// Everything needed to fetch one page of job postings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: JobFilter,
    pub sort: SortBy,
    pub page: PageRequest,
}

/// `SELECT` for one page of postings matching `query`.
pub fn build_list_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {JOB_POSTING_COLUMNS} FROM job_postings"));
    query.filter.push_where(&mut qb);
    qb.push(" ORDER BY ").push(query.sort.order_by());
    qb.push(" LIMIT ").push_bind(query.page.limit());
    qb.push(" OFFSET ").push_bind(query.page.offset());
    qb
}

/// `SELECT count(*)` over the same rows as [`build_list_query`], ignoring the
/// page window.
pub fn build_count_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT count(*) FROM job_postings");
    filter.push_where(&mut qb);
    qb
}

/// Single-row aggregate over the whole table.
pub fn build_statistics_query() -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(
        "SELECT count(*) AS total_jobs, \
         count(*) FILTER (WHERE is_urgent = true) AS urgent_jobs, \
         count(*) FILTER (WHERE is_new = true) AS new_jobs, \
         count(DISTINCT ministry) AS ministries \
         FROM job_postings",
    )
}
