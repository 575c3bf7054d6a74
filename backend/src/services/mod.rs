//! Service layer: orchestrates the section pipeline over a repository.
//!
//! Services receive the repository explicitly and never hold state between
//! renders.

pub mod dashboard;
pub mod filters;

pub use dashboard::{render_dashboard, FOOTER_LINES, SIDEBAR_CAPTIONS};
pub use filters::{load_filter_options, resolve_selection};
