pub mod jobs;
pub mod statistics;

use std::sync::Arc;

use db::JobPostingStore;

use crate::ApiError;

/// Shared handler state: the store every request reads through.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobPostingStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn JobPostingStore>) -> Self {
        Self { store }
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
