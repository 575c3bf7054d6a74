//! Typed rows for the dashboard's read-only queries.
//!
//! Each query template aliases its output columns to the names below and
//! casts them to `int8`, `float8` or `text`, so one `QueryableByName` struct
//! per template decodes the result. Grouping columns are nullable: a `GROUP BY`
//! over a column with missing values yields a NULL group.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};

use crate::api::Cell;

/// A decoded row that flattens into dashboard cells in column order.
pub(super) trait TabularRow: QueryableByName<Pg> + Send + 'static {
    const COLUMNS: &'static [&'static str];

    fn into_cells(self) -> Vec<Cell>;
}

#[derive(Debug, QueryableByName)]
pub(super) struct TrackRow {
    #[diesel(sql_type = Text)]
    pub track: String,
}

impl TabularRow for TrackRow {
    const COLUMNS: &'static [&'static str] = &["track"];

    fn into_cells(self) -> Vec<Cell> {
        vec![self.track.into()]
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct LiveMetricsRow {
    #[diesel(sql_type = BigInt)]
    pub total_registered: i64,
    #[diesel(sql_type = BigInt)]
    pub total_checked_in: i64,
    #[diesel(sql_type = BigInt)]
    pub booth_visitors: i64,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_rating: Option<f64>,
    #[diesel(sql_type = BigInt)]
    pub total_feedback: i64,
}

impl TabularRow for LiveMetricsRow {
    const COLUMNS: &'static [&'static str] = &[
        "total_registered",
        "total_checked_in",
        "booth_visitors",
        "avg_rating",
        "total_feedback",
    ];

    fn into_cells(self) -> Vec<Cell> {
        vec![
            self.total_registered.into(),
            self.total_checked_in.into(),
            self.booth_visitors.into(),
            self.avg_rating.into(),
            self.total_feedback.into(),
        ]
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct TopSessionRow {
    #[diesel(sql_type = Text)]
    pub session_name: String,
    #[diesel(sql_type = Text)]
    pub speaker: String,
    #[diesel(sql_type = Text)]
    pub track: String,
    #[diesel(sql_type = BigInt)]
    pub attendance_count: i64,
    #[diesel(sql_type = BigInt)]
    pub capacity: i64,
    #[diesel(sql_type = Double)]
    pub utilization_pct: f64,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_rating: Option<f64>,
}

impl TabularRow for TopSessionRow {
    const COLUMNS: &'static [&'static str] = &[
        "session_name",
        "speaker",
        "track",
        "attendance_count",
        "capacity",
        "utilization_pct",
        "avg_rating",
    ];

    fn into_cells(self) -> Vec<Cell> {
        vec![
            self.session_name.into(),
            self.speaker.into(),
            self.track.into(),
            self.attendance_count.into(),
            self.capacity.into(),
            self.utilization_pct.into(),
            self.avg_rating.into(),
        ]
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct RatingBucketRow {
    #[diesel(sql_type = BigInt)]
    pub rating_bucket: i64,
    #[diesel(sql_type = BigInt)]
    pub session_count: i64,
}

impl TabularRow for RatingBucketRow {
    const COLUMNS: &'static [&'static str] = &["rating_bucket", "session_count"];

    fn into_cells(self) -> Vec<Cell> {
        vec![self.rating_bucket.into(), self.session_count.into()]
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct SponsorRow {
    #[diesel(sql_type = Text)]
    pub sponsor_name: String,
    #[diesel(sql_type = Text)]
    pub tier: String,
    #[diesel(sql_type = BigInt)]
    pub total_booth_visits: i64,
    #[diesel(sql_type = BigInt)]
    pub unique_visitors: i64,
    #[diesel(sql_type = Double)]
    pub avg_duration_sec: f64,
    #[diesel(sql_type = Nullable<Double>)]
    pub roi_score: Option<f64>,
    #[diesel(sql_type = Double)]
    pub investment_amount: f64,
}

impl TabularRow for SponsorRow {
    const COLUMNS: &'static [&'static str] = &[
        "sponsor_name",
        "tier",
        "total_booth_visits",
        "unique_visitors",
        "avg_duration_sec",
        "roi_score",
        "investment_amount",
    ];

    fn into_cells(self) -> Vec<Cell> {
        vec![
            self.sponsor_name.into(),
            self.tier.into(),
            self.total_booth_visits.into(),
            self.unique_visitors.into(),
            self.avg_duration_sec.into(),
            self.roi_score.into(),
            self.investment_amount.into(),
        ]
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct EngagementTierRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub engagement_tier: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub attendee_count: i64,
}

impl TabularRow for EngagementTierRow {
    const COLUMNS: &'static [&'static str] = &["engagement_tier", "attendee_count"];

    fn into_cells(self) -> Vec<Cell> {
        vec![self.engagement_tier.into(), self.attendee_count.into()]
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct SpecialtyCountRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub specialty: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

impl TabularRow for SpecialtyCountRow {
    const COLUMNS: &'static [&'static str] = &["specialty", "count"];

    fn into_cells(self) -> Vec<Cell> {
        vec![self.specialty.into(), self.count.into()]
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct OrganizationCountRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub organization: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

impl TabularRow for OrganizationCountRow {
    const COLUMNS: &'static [&'static str] = &["organization", "count"];

    fn into_cells(self) -> Vec<Cell> {
        vec![self.organization.into(), self.count.into()]
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct SentimentRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub sentiment_category: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_rating: Option<f64>,
}

impl TabularRow for SentimentRow {
    const COLUMNS: &'static [&'static str] = &["sentiment_category", "count", "avg_rating"];

    fn into_cells(self) -> Vec<Cell> {
        vec![
            self.sentiment_category.into(),
            self.count.into(),
            self.avg_rating.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_groups_flatten_to_null_cells() {
        let specialty = SpecialtyCountRow {
            specialty: None,
            count: 3,
        };
        assert_eq!(specialty.into_cells(), vec![Cell::Null, Cell::Int(3)]);

        let sentiment = SentimentRow {
            sentiment_category: None,
            count: 2,
            avg_rating: Some(3.5),
        };
        assert_eq!(
            sentiment.into_cells(),
            vec![Cell::Null, Cell::Int(2), Cell::Float(3.5)]
        );
    }
}
