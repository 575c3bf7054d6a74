//! Data Transfer Objects for the HTTP API.
//!
//! The page model itself (`DashboardPage`) and the filter types already
//! derive Serialize/Deserialize and are re-exported here.

use serde::{Deserialize, Serialize};

pub use crate::api::{DashboardPage, FilterOptions, FilterSelection};

/// Query string accepted by `/` and `/v1/dashboard`.
///
/// Values are filter labels exactly as offered by `/v1/filters`; absent
/// values mean the "all" sentinel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
    pub track: Option<String>,
    pub tier: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
