//! Application state for the HTTP server.

use crate::db::repository::QueryRepository;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only query capability shared by concurrent renders
    pub repository: Arc<dyn QueryRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn QueryRepository>) -> Self {
        Self { repository }
    }
}
