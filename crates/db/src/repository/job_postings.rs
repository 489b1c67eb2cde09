//! Postgres-backed job posting reads.

use async_trait::async_trait;
use tracing::debug;

use crate::{
    DbError, DbPool,
    models::{JobPostingRow, JobStatistics},
    query::{build_count_query, build_list_query, build_statistics_query, JobFilter, ListQuery},
};

use super::JobPostingStore;

/// [`JobPostingStore`] over a shared Postgres pool.
#[derive(Debug, Clone)]
pub struct PgJobPostingStore {
    pool: DbPool,
}

impl PgJobPostingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobPostingStore for PgJobPostingStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<JobPostingRow>, DbError> {
        let mut qb = build_list_query(query);
        debug!(sql = qb.sql(), sort = %query.sort, "listing job postings");

        let rows = qb
            .build_query_as::<JobPostingRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64, DbError> {
        let mut qb = build_count_query(filter);

        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn statistics(&self) -> Result<JobStatistics, DbError> {
        let mut qb = build_statistics_query();

        let stats = qb
            .build_query_as::<JobStatistics>()
            .fetch_one(&self.pool)
            .await?;

        Ok(stats)
    }
}
