//! Dashboard sections.
//!
//! Each module owns the fixed query template of one or more sections and the
//! function that turns its result into widgets. The order of [`SECTION_IDS`]
//! is the order of the page.

pub mod engagement;
pub mod filters;
pub mod metrics;
pub mod ratings;
pub mod sentiment;
pub mod sessions;
pub mod sponsors;

use crate::api::QueryResult;
use crate::render::RenderError;

/// Section identifiers in layout order.
pub const SECTION_IDS: [&str; 8] = [
    metrics::SECTION_ID,
    sessions::SECTION_ID,
    ratings::SECTION_ID,
    sponsors::SECTION_ID,
    engagement::TIERS_SECTION_ID,
    engagement::SPECIALTIES_SECTION_ID,
    engagement::ORGANIZATIONS_SECTION_ID,
    sentiment::SECTION_ID,
];

/// Integer value of `column` in the first row; NULL counts as zero.
pub(crate) fn first_row_int(result: &QueryResult, column: &str) -> Result<i64, RenderError> {
    first_row_cell(result, column).map(|cell| cell.as_i64().unwrap_or(0))
}

/// Float value of `column` in the first row; NULL stays `None`.
pub(crate) fn first_row_float(
    result: &QueryResult,
    column: &str,
) -> Result<Option<f64>, RenderError> {
    first_row_cell(result, column).map(|cell| cell.as_f64())
}

fn first_row_cell<'a>(
    result: &'a QueryResult,
    column: &str,
) -> Result<&'a crate::api::Cell, RenderError> {
    if result.column_index(column).is_none() {
        return Err(RenderError::MissingColumn {
            column: column.to_string(),
        });
    }
    result.scalar(column).ok_or(RenderError::EmptyResult)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order() {
        assert_eq!(
            SECTION_IDS,
            [
                "live_metrics",
                "top_sessions",
                "rating_distribution",
                "sponsor_performance",
                "engagement_tiers",
                "top_specialties",
                "top_organizations",
                "feedback_sentiment",
            ]
        );
    }

    #[test]
    fn test_first_row_helpers() {
        let result = QueryResult::new(["a", "b"]).with_row(vec![5i64.into(), crate::api::Cell::Null]);
        assert_eq!(first_row_int(&result, "a").unwrap(), 5);
        assert_eq!(first_row_int(&result, "b").unwrap(), 0);
        assert_eq!(first_row_float(&result, "b").unwrap(), None);
        assert!(first_row_int(&result, "c").is_err());
        assert_eq!(
            first_row_int(&QueryResult::new(["a"]), "a").unwrap_err(),
            RenderError::EmptyResult
        );
    }
}
