//! Page model: everything one render produces, before it becomes HTML.
//!
//! The same model is served as JSON by `/v1/dashboard`, and it is what the
//! idempotence tests compare.

use serde::{Deserialize, Serialize};

use super::format::NOT_AVAILABLE;
use super::gradient;
use crate::api::{Cell, FilterOptions, FilterSelection, QueryResult};
use crate::db::repository::{ErrorContext, RepositoryError};

pub const PAGE_TITLE: &str = "Event Intelligence Dashboard";
pub const PAGE_SUBTITLE: &str = "International Wound Care Symposium | December 15-17, 2025";

/// A query result did not have the shape its widget needs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("result has no column '{column}'")]
    MissingColumn { column: String },
    #[error("result has no rows")]
    EmptyResult,
}

impl From<RenderError> for RepositoryError {
    fn from(err: RenderError) -> Self {
        RepositoryError::validation_with_context(err.to_string(), ErrorContext::new("render"))
    }
}

/// Bar label for a category cell; a NULL group (rows missing the value) is
/// shown as `N/A`.
fn category_label(cell: &Cell) -> String {
    match cell {
        Cell::Null => NOT_AVAILABLE.to_string(),
        other => other.to_string(),
    }
}

fn column_index(result: &QueryResult, column: &str) -> Result<usize, RenderError> {
    result
        .column_index(column)
        .ok_or_else(|| RenderError::MissingColumn {
            column: column.to_string(),
        })
}

/// One formatted number, optionally with a delta beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

impl MetricTile {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            delta: None,
        }
    }

    pub fn with_delta(mut self, delta: impl Into<String>) -> Self {
        self.delta = Some(delta.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Categorical bar chart: one bar per row, in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: Option<String>,
    pub category_column: String,
    pub value_column: String,
    pub bars: Vec<Bar>,
    /// Plot height in pixels; `None` lets the layout decide.
    pub height: Option<u32>,
}

impl BarChart {
    /// Index `result` by `category` and plot `value`. NULL values plot as zero.
    pub fn from_result(
        result: &QueryResult,
        category: &str,
        value: &str,
    ) -> Result<Self, RenderError> {
        let category_idx = column_index(result, category)?;
        let value_idx = column_index(result, value)?;

        let bars = result
            .rows
            .iter()
            .map(|row| Bar {
                label: category_label(&row[category_idx]),
                value: row[value_idx].as_f64().unwrap_or(0.0),
            })
            .collect();

        Ok(Self {
            title: None,
            category_column: category.to_string(),
            value_column: value.to_string(),
            bars,
            height: None,
        })
    }

    /// Build a chart from already aggregated `(label, value)` pairs.
    pub fn from_pairs<I>(category: &str, value: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            title: None,
            category_column: category.to_string(),
            value_column: value.to_string(),
            bars: pairs
                .into_iter()
                .map(|(label, value)| Bar { label, value })
                .collect(),
            height: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

/// Inline style for one table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCellStyle {
    pub background: String,
    pub color: String,
}

/// All rows and columns of a result, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableWidget {
    pub title: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Column carrying the background gradient, if any.
    pub gradient_column: Option<String>,
    /// One entry per row for `gradient_column`; empty without a gradient.
    pub gradient_styles: Vec<Option<TableCellStyle>>,
}

impl TableWidget {
    pub fn from_result(result: &QueryResult) -> Self {
        Self {
            title: None,
            columns: result.columns.clone(),
            rows: result.rows.clone(),
            gradient_column: None,
            gradient_styles: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Shade `column` with the green gradient.
    pub fn with_gradient(mut self, column: &str) -> Result<Self, RenderError> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .ok_or_else(|| RenderError::MissingColumn {
                column: column.to_string(),
            })?;
        let values: Vec<Option<f64>> = self.rows.iter().map(|row| row[idx].as_f64()).collect();
        self.gradient_styles = gradient::column_styles(&values);
        self.gradient_column = Some(self.columns[idx].clone());
        Ok(self)
    }

    /// Style of the cell at `(row, column)`, if that column is shaded.
    pub fn style_at(&self, row: usize, column: usize) -> Option<&TableCellStyle> {
        let gradient_column = self.gradient_column.as_deref()?;
        if self.columns.get(column).map(String::as_str) != Some(gradient_column) {
            return None;
        }
        self.gradient_styles.get(row)?.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    Metric(MetricTile),
    BarChart(BarChart),
    Table(TableWidget),
    /// Informational notice shown in place of a section's data.
    Info { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub widgets: Vec<Widget>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, widgets: Vec<Widget>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            widgets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageHeader {
    pub title: String,
    pub subtitle: String,
}

impl Default for PageHeader {
    fn default() -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            subtitle: PAGE_SUBTITLE.to_string(),
        }
    }
}

/// Sidebar state: the active selection, the offered choices and captions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPanel {
    pub selection: FilterSelection,
    pub options: FilterOptions,
    pub captions: Vec<String>,
}

/// One fully rendered dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardPage {
    pub header: PageHeader,
    pub filters: FilterPanel,
    pub sections: Vec<Section>,
    pub footer: Vec<String>,
}

impl DashboardPage {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> QueryResult {
        QueryResult::new(["specialty", "count"])
            .with_row(vec!["Wound Care".into(), 12i64.into()])
            .with_row(vec!["Dermatology".into(), Cell::Null])
    }

    #[test]
    fn test_bar_chart_keeps_row_order() {
        let chart = BarChart::from_result(&counts(), "specialty", "count").unwrap();
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0].label, "Wound Care");
        assert_eq!(chart.bars[0].value, 12.0);
        assert_eq!(chart.bars[1].value, 0.0);
        assert_eq!(chart.max_value(), 12.0);
    }

    #[test]
    fn test_bar_chart_labels_null_category() {
        let result = QueryResult::new(["specialty", "count"])
            .with_row(vec!["Podiatry".into(), 4i64.into()])
            .with_row(vec![Cell::Null, 3i64.into()]);
        let chart = BarChart::from_result(&result, "specialty", "count").unwrap();
        assert_eq!(chart.bars[1].label, "N/A");
        assert_eq!(chart.bars[1].value, 3.0);
    }

    #[test]
    fn test_bar_chart_missing_column() {
        let err = BarChart::from_result(&counts(), "organization", "count").unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingColumn {
                column: "organization".to_string()
            }
        );
    }

    #[test]
    fn test_table_gradient_styles_only_its_column() {
        let result = QueryResult::new(["sponsor_name", "roi_score"])
            .with_row(vec!["A".into(), 3.0.into()])
            .with_row(vec!["B".into(), 1.0.into()]);
        let table = TableWidget::from_result(&result)
            .with_gradient("roi_score")
            .unwrap();
        assert!(table.style_at(0, 0).is_none());
        assert_eq!(table.style_at(0, 1).unwrap().background, "#00441b");
        assert_eq!(table.style_at(1, 1).unwrap().background, "#f7fcf5");
    }

    #[test]
    fn test_widget_json_is_tagged() {
        let widget = Widget::Info {
            message: "hello".to_string(),
        };
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["type"], "info");
        assert_eq!(json["message"], "hello");

        let metric = Widget::Metric(MetricTile::new("Registered", "500"));
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["type"], "metric");
        assert_eq!(json["label"], "Registered");
    }
}
