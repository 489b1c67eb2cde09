use axum::{extract::State, Json};
use db::models::JobStatistics;

use super::AppState;
use crate::ApiError;

/// `GET /api/statistics`
pub async fn get(State(state): State<AppState>) -> Result<Json<JobStatistics>, ApiError> {
    let stats = state.store.statistics().await.map_err(ApiError::Statistics)?;
    Ok(Json(stats))
}
