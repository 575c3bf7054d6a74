//! Live event metrics: five headline numbers from the raw tables.

use crate::api::QueryResult;
use crate::db::query::{QueryKind, SqlQuery};
use crate::render::format::{format_percentage, format_rating, format_thousands};
use crate::render::{MetricTile, RenderError, Widget};

use super::{first_row_float, first_row_int};

pub const SECTION_ID: &str = "live_metrics";
pub const TITLE: &str = "Live Event Metrics";

const LIVE_METRICS_SQL: &str = "SELECT
    (SELECT COUNT(*) FROM event_intelligence.raw_attendees)::int8 AS total_registered,
    (SELECT COUNT(DISTINCT attendee_id) FROM event_intelligence.raw_session_checkins)::int8 AS total_checked_in,
    (SELECT COUNT(DISTINCT attendee_id) FROM event_intelligence.raw_booth_visits)::int8 AS booth_visitors,
    (SELECT ROUND(AVG(rating)::numeric, 2)::float8 FROM event_intelligence.raw_feedback) AS avg_rating,
    (SELECT COUNT(*) FROM event_intelligence.raw_feedback)::int8 AS total_feedback";

pub fn query() -> SqlQuery {
    SqlQuery::new(QueryKind::LiveMetrics, LIVE_METRICS_SQL)
}

/// Registered, Checked In (with check-in rate), Booth Visitors, Avg Rating, Feedback.
pub fn widgets(result: &QueryResult) -> Result<Vec<Widget>, RenderError> {
    let registered = first_row_int(result, "total_registered")?;
    let checked_in = first_row_int(result, "total_checked_in")?;
    let booth_visitors = first_row_int(result, "booth_visitors")?;
    let avg_rating = first_row_float(result, "avg_rating")?;
    let feedback = first_row_int(result, "total_feedback")?;

    Ok(vec![
        Widget::Metric(MetricTile::new("Registered", format_thousands(registered))),
        Widget::Metric(
            MetricTile::new("Checked In", format_thousands(checked_in))
                .with_delta(format_percentage(checked_in, registered)),
        ),
        Widget::Metric(MetricTile::new("Booth Visitors", format_thousands(booth_visitors))),
        Widget::Metric(MetricTile::new("Avg Rating", format_rating(avg_rating))),
        Widget::Metric(MetricTile::new("Feedback", format_thousands(feedback))),
    ])
}
