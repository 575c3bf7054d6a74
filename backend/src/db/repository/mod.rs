//! Repository trait: the one read-only query capability the dashboard needs.
//!
//! The pipeline never reaches for an ambient database session; it receives a
//! `&dyn QueryRepository` and executes parameterized queries through it. This
//! keeps every section testable against the in-memory implementation.

use async_trait::async_trait;

use crate::api::QueryResult;
use crate::db::query::SqlQuery;

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Read-only query execution.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single instance can be shared
/// by concurrent renders behind an `Arc`.
#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// Execute a query template with its bound parameters.
    ///
    /// # Returns
    /// * `Ok(QueryResult)` - Columns and rows in the order the template defines
    /// * `Err(RepositoryError)` - If the query fails or the relation is missing
    async fn execute(&self, query: &SqlQuery) -> RepositoryResult<QueryResult>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
