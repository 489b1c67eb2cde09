//! `InMemoryJobStore` — a test double for [`JobPostingStore`].
//!
//! Applies the same filter, sort and page rules as the SQL statements in
//! [`crate::query`], over a fixed set of rows. Useful wherever a live
//! Postgres is unavailable or irrelevant.

use std::cmp::Ordering;
use std::collections::HashSet;

use async_trait::async_trait;

use crate::{
    DbError, JobPostingStore,
    models::{JobPostingRow, JobStatistics},
    query::{JobFilter, ListQuery, SortBy},
};

/// An in-memory store seeded with rows at construction time.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    rows: Vec<JobPostingRow>,
    unavailable: bool,
}

impl InMemoryJobStore {
    /// Create a store holding `rows`.
    pub fn new(rows: Vec<JobPostingRow>) -> Self {
        Self { rows, unavailable: false }
    }

    /// Create a store whose every call fails as if the database were down.
    pub fn unavailable() -> Self {
        Self { rows: Vec::new(), unavailable: true }
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.unavailable {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn matching<'a>(&'a self, filter: &'a JobFilter) -> impl Iterator<Item = &'a JobPostingRow> {
        let needle = filter.search_term().map(str::to_lowercase);
        self.rows.iter().filter(move |row| {
            let search_ok = needle.as_deref().map_or(true, |n| {
                [&row.title, &row.ministry, &row.job_type]
                    .iter()
                    .any(|field| field.to_lowercase().contains(n))
            });
            let ministry_ok = filter.ministry_name().map_or(true, |m| row.ministry == m);
            search_ok && ministry_ok
        })
    }
}

/// Row ordering matching the SQL `ORDER BY` for `sort`. Ascending date
/// sorts put missing deadlines last, as Postgres does.
fn compare(sort: SortBy, a: &JobPostingRow, b: &JobPostingRow) -> Ordering {
    match sort {
        SortBy::Latest => b.created_at.cmp(&a.created_at),
        SortBy::Ministry => a.ministry.cmp(&b.ministry),
        SortBy::Deadline => match (a.application_period_end, b.application_period_end) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[async_trait]
impl JobPostingStore for InMemoryJobStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<JobPostingRow>, DbError> {
        self.check_available()?;

        let mut rows: Vec<JobPostingRow> = self.matching(&query.filter).cloned().collect();
        rows.sort_by(|a, b| compare(query.sort, a, b));

        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64, DbError> {
        self.check_available()?;
        Ok(self.matching(filter).count() as i64)
    }

    async fn statistics(&self) -> Result<JobStatistics, DbError> {
        self.check_available()?;

        let ministries: HashSet<&str> = self.rows.iter().map(|r| r.ministry.as_str()).collect();
        Ok(JobStatistics {
            total_jobs: self.rows.len() as i64,
            urgent_jobs: self.rows.iter().filter(|r| r.is_urgent).count() as i64,
            new_jobs: self.rows.iter().filter(|r| r.is_new).count() as i64,
            ministries: ministries.len() as i64,
        })
    }
}
