//! Postgres repository implementation using Diesel.
//!
//! Executes the dashboard's query templates against the `event_intelligence`
//! schema. Every pooled connection is switched to read-only on checkout, so
//! the dashboard cannot modify the warehouse even by mistake.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Read-only sessions
//! - Bound text parameters for every user-selected filter
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use diesel::sql_types::Text;
use std::time::Duration;
use tokio::task;

use crate::api::QueryResult;
use crate::db::query::{QueryKind, SqlQuery};
use crate::db::repository::{ErrorContext, QueryRepository, RepositoryError, RepositoryResult};

mod models;

use models::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
    /// - `PG_POOL_MAX`: Maximum pool size (default: 10)
    /// - `PG_POOL_MIN`: Minimum pool size (default: 1)
    /// - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();

        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Puts each new pooled connection into read-only mode.
#[derive(Debug)]
struct ReadOnlySession;

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for ReadOnlySession {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        sql_query("SET default_transaction_read_only = on")
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Diesel-backed read-only repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and open the connection pool.
    ///
    /// # Arguments
    /// * `config` - Database configuration
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if the pool cannot be built
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .connection_customizer(Box::new(ReadOnlySession))
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        log::info!(
            "Postgres pool ready (max_size={}, min_idle={})",
            config.max_pool_size,
            config.min_pool_size
        );

        Ok(Self { pool })
    }

    /// Run a blocking Diesel operation on a pooled connection.
    ///
    /// Failures are reported once; nothing is retried.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection").retryable(),
                )
            })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

/// Bind the query's parameters in order and decode every row as `R`.
fn load_table<R: TabularRow>(
    conn: &mut PgConnection,
    query: &SqlQuery,
) -> RepositoryResult<QueryResult> {
    let mut statement = sql_query(query.sql()).into_boxed::<Pg>();
    for param in query.params() {
        statement = statement.bind::<Text, _>(param.to_string());
    }

    let rows: Vec<R> = statement.load(conn).map_err(map_diesel_error)?;

    let mut result = QueryResult::new(R::COLUMNS.iter().copied());
    for row in rows {
        result.push_row(row.into_cells());
    }
    Ok(result)
}

#[async_trait]
impl QueryRepository for PostgresRepository {
    async fn execute(&self, query: &SqlQuery) -> RepositoryResult<QueryResult> {
        let kind = query.kind();
        log::debug!("Executing {} query: {}", kind, query.sql());

        let query = query.clone();
        self.with_conn(move |conn| match query.kind() {
            QueryKind::DistinctTracks => load_table::<TrackRow>(conn, &query),
            QueryKind::LiveMetrics => load_table::<LiveMetricsRow>(conn, &query),
            QueryKind::TopSessions => load_table::<TopSessionRow>(conn, &query),
            QueryKind::RatingDistribution => load_table::<RatingBucketRow>(conn, &query),
            QueryKind::SponsorPerformance => load_table::<SponsorRow>(conn, &query),
            QueryKind::EngagementTiers => load_table::<EngagementTierRow>(conn, &query),
            QueryKind::TopSpecialties => load_table::<SpecialtyCountRow>(conn, &query),
            QueryKind::TopOrganizations => load_table::<OrganizationCountRow>(conn, &query),
            QueryKind::FeedbackSentiment => load_table::<SentimentRow>(conn, &query),
        })
        .await
        .map_err(|e| e.with_operation("execute").with_entity(kind.as_str()))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }
}
