use std::sync::Arc;

use crate::cache::EstimateCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Memoization layer for cost breakdowns and ranked quotes, shared with
    /// the periodic sweeper task.
    pub cache: Arc<EstimateCache>,
}
