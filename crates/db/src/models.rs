//! Row structs that map 1-to-1 onto database tables.
//!
//! Field names follow the column names; the JSON form is camelCase.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// job_postings
// ---------------------------------------------------------------------------

/// A persisted job posting row. Read-only from this service's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingRow {
    pub id: i32,
    pub title: String,
    /// Issuing ministry (organisational unit).
    pub ministry: String,
    pub job_type: String,
    /// Last day of the application period, when published.
    pub application_period_end: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub is_urgent: bool,
    pub is_new: bool,
}

// ---------------------------------------------------------------------------
// aggregates
// ---------------------------------------------------------------------------

/// Aggregate counts over every row of `job_postings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics {
    pub total_jobs: i64,
    pub urgent_jobs: i64,
    pub new_jobs: i64,
    /// Number of distinct ministry values.
    pub ministries: i64,
}
