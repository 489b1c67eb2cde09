//! Query-string parameters for `GET /api/jobs`.
//!
//! Every field arrives as raw text so that bad numbers never reject the
//! request; they are normalised into a [`ListQuery`] instead.

use db::query::{JobFilter, ListQuery, PageRequest, SortBy};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub ministry: Option<String>,
    pub sort_by: Option<String>,
}

impl ListParams {
    pub fn into_list_query(self) -> ListQuery {
        let page = self.page.as_deref().and_then(parse_int);
        let limit = self.limit.as_deref().and_then(parse_int);
        let sort = self
            .sort_by
            .as_deref()
            .map(SortBy::parse)
            .unwrap_or_default();

        ListQuery {
            filter: JobFilter {
                search: self.search,
                ministry: self.ministry,
            },
            sort,
            page: PageRequest::new(page, limit),
        }
    }
}

/// Lenient integer parse: leading whitespace, an optional sign, then the
/// longest run of ASCII digits. Trailing text is ignored (`"2abc"` is 2,
/// `"2.9"` is 2). Returns `None` when there are no digits. Values too large
/// for `i64` saturate.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
