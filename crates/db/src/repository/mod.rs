//! Repository layer — the [`JobPostingStore`] seam and its Postgres backing.
//!
//! Every method returns a `Result<T, DbError>`.
//! No request handling, no response shaping — pure reads.

pub mod job_postings;

use async_trait::async_trait;

use crate::{
    DbError,
    models::{JobPostingRow, JobStatistics},
    query::{JobFilter, ListQuery},
};

pub use job_postings::PgJobPostingStore;

/// Read access to the `job_postings` table.
///
/// Handlers receive an implementation through application state, so tests
/// can swap in [`crate::mock::InMemoryJobStore`].
#[async_trait]
pub trait JobPostingStore: Send + Sync {
    /// One page of postings matching `query.filter`, in `query.sort` order.
    async fn list(&self, query: &ListQuery) -> Result<Vec<JobPostingRow>, DbError>;

    /// Number of postings matching `filter`, regardless of paging.
    async fn count(&self, filter: &JobFilter) -> Result<i64, DbError>;

    /// Aggregate counts over all postings.
    async fn statistics(&self) -> Result<JobStatistics, DbError>;
}
