//! # Event Intelligence Dashboard
//!
//! Read-only operations dashboard for the International Wound Care Symposium.
//!
//! Each render runs one pipeline per section: **filter capture → query
//! construction → execution → render**. Aggregation happens upstream in the
//! `event_intelligence` views; this crate requests rows, formats them and
//! lays out widgets.
//!
//! ## Architecture
//!
//! - [`api`]: Shared types (query results, filters, page model)
//! - [`db`]: Query builder, repository trait and its Postgres/in-memory backends
//! - [`routes`]: One query template and widget builder per dashboard section
//! - [`services`]: The section pipeline and filter option loading
//! - [`render`]: Widgets, number formatting, gradients and HTML output
//! - [`http`]: Axum server exposing the page and its JSON model

#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;

pub mod render;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
