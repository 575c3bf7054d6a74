//! Render layer: turns query results into widgets and widgets into HTML.
//!
//! - [`widgets`]: the page model (sections, metrics, bar charts, tables)
//! - [`format`]: number and rating display rules
//! - [`gradient`]: value-based background colors for table columns
//! - [`html`]: self-contained HTML page output

pub mod format;
pub mod gradient;
pub mod html;
pub mod widgets;

pub use html::render_page;
pub use widgets::{
    Bar, BarChart, DashboardPage, FilterPanel, MetricTile, PageHeader, RenderError, Section,
    TableCellStyle, TableWidget, Widget,
};
