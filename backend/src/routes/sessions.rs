//! Top sessions by attendance, optionally restricted to one track.

use crate::api::{QueryResult, TrackChoice};
use crate::db::query::{QueryKind, SqlQuery};
use crate::render::{BarChart, RenderError, TableWidget, Widget};

use super::filters::TRACK_COLUMN;

pub const SECTION_ID: &str = "top_sessions";
pub const TITLE: &str = "Top Sessions by Attendance";

pub const CHART_HEIGHT: u32 = 300;
pub const TOP_SESSIONS_LIMIT: u32 = 10;

const TOP_SESSIONS_SQL: &str = "SELECT
    session_name::text AS session_name,
    speaker::text AS speaker,
    track::text AS track,
    attendance_count::int8 AS attendance_count,
    capacity::int8 AS capacity,
    ROUND(capacity_utilization_pct::numeric, 1)::float8 AS utilization_pct,
    ROUND(avg_rating::numeric, 2)::float8 AS avg_rating
FROM event_intelligence.dt_session_analytics";

pub fn query(track: &TrackChoice) -> SqlQuery {
    SqlQuery::new(QueryKind::TopSessions, TOP_SESSIONS_SQL)
        .filter_eq(TRACK_COLUMN, track.as_filter_value())
        .order_by("attendance_count DESC, session_name")
        .limit(TOP_SESSIONS_LIMIT)
}

/// Attendance bar chart followed by the full session details table.
pub fn widgets(result: &QueryResult) -> Result<Vec<Widget>, RenderError> {
    let chart = BarChart::from_result(result, "session_name", "attendance_count")?
        .with_height(CHART_HEIGHT);
    let details = TableWidget::from_result(result).with_title("Session Details");
    Ok(vec![Widget::BarChart(chart), Widget::Table(details)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tracks_has_no_restriction() {
        let query = query(&TrackChoice::All);
        assert!(query.params().is_empty());
        assert!(!query.sql().contains("WHERE"));
        assert!(query.sql().ends_with("ORDER BY attendance_count DESC, session_name\nLIMIT 10"));
    }

    #[test]
    fn test_track_is_bound_not_inlined() {
        let query = query(&TrackChoice::from("Wound Debridement"));
        assert_eq!(query.params(), vec!["Wound Debridement"]);
        assert!(query.sql().contains("WHERE track = $1"));
        assert!(!query.sql().contains("Wound Debridement"));
        assert!(query
            .display_sql()
            .contains("track = 'Wound Debridement'"));
    }

    #[test]
    fn test_quotes_in_track_are_doubled_for_display() {
        let query = query(&TrackChoice::from("Surgeon's Corner"));
        assert!(query.display_sql().contains("track = 'Surgeon''s Corner'"));
        assert_eq!(query.params(), vec!["Surgeon's Corner"]);
    }

    #[test]
    fn test_widgets() {
        let result = QueryResult::new(["session_name", "attendance_count"])
            .with_row(vec!["Biofilm Basics".into(), 88i64.into()]);
        let widgets = widgets(&result).unwrap();
        assert_eq!(widgets.len(), 2);
        match &widgets[0] {
            Widget::BarChart(chart) => {
                assert_eq!(chart.height, Some(300));
                assert_eq!(chart.bars[0].label, "Biofilm Basics");
            }
            other => panic!("expected chart, got {:?}", other),
        }
        assert!(matches!(&widgets[1], Widget::Table(t) if t.rows.len() == 1));
    }
}
