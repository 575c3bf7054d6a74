//! Database module: read-only access to the event_intelligence views.
//!
//! The dashboard never writes. Everything it needs is one capability,
//! [`QueryRepository::execute`], which runs a [`SqlQuery`] template with its
//! bound parameters and returns a [`QueryResult`](crate::api::QueryResult).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service layer (services::dashboard)                    │
//! │  - filter resolution, section pipeline, fallbacks       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  QueryRepository trait (repository/mod.rs)              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │                              │
//! ┌───▼──────────────┐   ┌───────────▼──────────┐
//! │ PostgresRepository│   │   LocalRepository    │
//! │ (diesel + r2d2)   │   │ (in-memory dataset)  │
//! └──────────────────┘   └──────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use event_intel::db;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let repo = db::create_repository().await?;
//!     assert!(repo.health_check().await?);
//!     Ok(())
//! }
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod models;
pub mod query;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod sample_data;

// Postgres config is colocated with the repository implementation; the
// stand-in lets factory signatures compile without the feature.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use query::{EqualityFilter, QueryKind, SqlQuery};
pub use models::EventDataset;
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, QueryRepository, RepositoryError, RepositoryResult,
};

use std::sync::Arc;

/// Environment variable naming a `repository.toml` to configure from.
pub const CONFIG_PATH_ENV: &str = "EVENT_INTEL_CONFIG";

/// Create the repository selected by the process configuration.
///
/// Uses the file named by `EVENT_INTEL_CONFIG` when set, otherwise
/// `REPOSITORY_TYPE` and the database URL variables.
pub async fn create_repository() -> RepositoryResult<Arc<dyn QueryRepository>> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => {
            log::info!("Loading repository configuration from {}", path);
            RepositoryFactory::from_config_file(path).await
        }
        _ => RepositoryFactory::from_env().await,
    }
}
