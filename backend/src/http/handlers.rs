//! HTTP handlers.
//!
//! Each handler corresponds to an endpoint and delegates to the service
//! layer for everything but request parsing.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

use super::dto::{DashboardQuery, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::api::{DashboardPage, FilterOptions};
use crate::render::render_page;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and the database is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// Resolve the request's filters and run every section.
async fn build_page(state: &AppState, query: &DashboardQuery) -> Result<DashboardPage, AppError> {
    let repo = state.repository.as_ref();
    let (options, selection) = services::resolve_selection(
        repo,
        query.date.as_deref(),
        query.track.as_deref(),
        query.tier.as_deref(),
    )
    .await?;
    let selection = selection.map_err(AppError::BadRequest)?;

    Ok(services::render_dashboard(repo, &options, &selection).await?)
}

/// GET /?date=&track=&tier=
///
/// The dashboard as an HTML page.
pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let page = build_page(&state, &query).await?;
    Ok(Html(render_page(&page)))
}

/// GET /v1/dashboard?date=&track=&tier=
///
/// The rendered page model as JSON.
pub async fn dashboard_json(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> HandlerResult<DashboardPage> {
    Ok(Json(build_page(&state, &query).await?))
}

/// GET /v1/filters
///
/// Choices currently offered by the three filter controls.
pub async fn filter_options(State(state): State<AppState>) -> HandlerResult<FilterOptions> {
    let options = services::load_filter_options(state.repository.as_ref()).await?;
    Ok(Json(options))
}
