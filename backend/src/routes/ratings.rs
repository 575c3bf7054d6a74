//! Distribution of sessions over their rounded average rating.

use crate::api::QueryResult;
use crate::db::query::{QueryKind, SqlQuery};
use crate::render::{BarChart, RenderError, Widget};

pub const SECTION_ID: &str = "rating_distribution";
pub const TITLE: &str = "Session Ratings Distribution";

pub const CHART_HEIGHT: u32 = 300;

const RATING_DISTRIBUTION_SQL: &str = "SELECT
    ROUND(avg_rating::numeric)::int8 AS rating_bucket,
    COUNT(*)::int8 AS session_count
FROM event_intelligence.dt_session_analytics";

pub fn query() -> SqlQuery {
    SqlQuery::new(QueryKind::RatingDistribution, RATING_DISTRIBUTION_SQL)
        .where_static("avg_rating > 0")
        .group_by("rating_bucket")
        .order_by("rating_bucket")
}

pub fn widgets(result: &QueryResult) -> Result<Vec<Widget>, RenderError> {
    let chart = BarChart::from_result(result, "rating_bucket", "session_count")?
        .with_height(CHART_HEIGHT);
    Ok(vec![Widget::BarChart(chart)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_shape() {
        let sql = query().sql();
        assert!(sql.contains("WHERE avg_rating > 0\nGROUP BY rating_bucket\nORDER BY rating_bucket"));
        assert!(query().params().is_empty());
    }

    #[test]
    fn test_buckets_become_bar_labels() {
        let result = QueryResult::new(["rating_bucket", "session_count"])
            .with_row(vec![4i64.into(), 12i64.into()])
            .with_row(vec![5i64.into(), 3i64.into()]);
        let widgets = widgets(&result).unwrap();
        let Widget::BarChart(chart) = &widgets[0] else {
            panic!("expected chart");
        };
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["4", "5"]);
    }
}
