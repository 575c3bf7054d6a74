//! Feedback sentiment, produced by the optional AI sentiment step.
//!
//! The backing view may not exist yet. Any failure of this section is
//! replaced by an informational notice instead of failing the page.

use crate::api::QueryResult;
use crate::db::query::{QueryKind, SqlQuery};
use crate::render::{BarChart, RenderError, TableWidget, Widget};

pub const SECTION_ID: &str = "feedback_sentiment";
pub const TITLE: &str = "AI-Powered Feedback Sentiment";

pub const SENTIMENT_UNAVAILABLE: &str =
    "💡 Run the Cortex AI scripts (sql/04_cortex/) to enable sentiment analysis.";

const FEEDBACK_SENTIMENT_SQL: &str = "SELECT
    sentiment_category::text AS sentiment_category,
    COUNT(*)::int8 AS count,
    ROUND(AVG(rating)::numeric, 2)::float8 AS avg_rating
FROM event_intelligence.feedback_with_sentiment";

pub fn query() -> SqlQuery {
    SqlQuery::new(QueryKind::FeedbackSentiment, FEEDBACK_SENTIMENT_SQL)
        .group_by("sentiment_category")
        .order_by("count DESC, sentiment_category")
}

pub fn widgets(result: &QueryResult) -> Result<Vec<Widget>, RenderError> {
    let chart = BarChart::from_result(result, "sentiment_category", "count")?;
    let table = TableWidget::from_result(result);
    Ok(vec![Widget::BarChart(chart), Widget::Table(table)])
}

/// What the section shows when sentiment data cannot be read.
pub fn unavailable_widgets() -> Vec<Widget> {
    vec![Widget::Info {
        message: SENTIMENT_UNAVAILABLE.to_string(),
    }]
}
