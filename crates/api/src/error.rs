//! HTTP-facing error type.
//!
//! Clients only ever see a fixed message; the underlying cause is logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use db::DbError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Listing or counting job postings failed.
    #[error("Failed to fetch job postings")]
    JobPostings(#[source] DbError),

    /// The statistics aggregate failed.
    #[error("Failed to fetch statistics")]
    Statistics(#[source] DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::JobPostings(_) | Self::Statistics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::JobPostings(e) => error!(error = %e, "Error fetching jobs"),
            Self::Statistics(e) => error!(error = %e, "Error fetching statistics"),
            Self::MethodNotAllowed => {}
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
