use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use db::{models::JobPostingRow, query::PageRequest};
use serde::Serialize;
use tracing::debug;

use super::AppState;
use crate::{params::ListParams, ApiError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(window: &PageRequest, total: i64) -> Self {
        Self {
            page: window.page(),
            limit: window.limit(),
            total,
            total_pages: window.total_pages(total),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub job_postings: Vec<JobPostingRow>,
    pub pagination: Pagination,
}

/// `GET /api/jobs` — one page of postings plus paging metadata.
///
/// The page is fetched first, then the unpaged count for the same filter.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<JobListResponse>, ApiError> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            debug!(%rejection, "ignoring malformed query string");
            ListParams::default()
        }
    };
    let query = params.into_list_query();
    debug!(?query, "fetching job postings");

    let job_postings = state.store.list(&query).await.map_err(ApiError::JobPostings)?;
    let total = state
        .store
        .count(&query.filter)
        .await
        .map_err(ApiError::JobPostings)?;

    Ok(Json(JobListResponse {
        job_postings,
        pagination: Pagination::new(&query.page, total),
    }))
}
