//! Row models for the event_intelligence schema.
//!
//! These mirror the raw event tables and the derived views the dashboard
//! reads. The in-memory repository holds them directly; the Postgres
//! repository only ever sees their aggregated projections.

use serde::{Deserialize, Serialize};

use crate::api::Cell;

/// Row of `raw_attendees`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    pub attendee_id: i64,
    pub full_name: String,
    pub specialty: Option<String>,
    pub organization: Option<String>,
}

/// Row of `raw_sessions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: i64,
    pub session_name: String,
    pub track: String,
}

/// Row of `raw_session_checkins`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub attendee_id: i64,
    pub session_id: i64,
}

/// Row of `raw_booth_visits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothVisitRecord {
    pub attendee_id: i64,
    pub sponsor_name: String,
    pub duration_sec: i64,
}

/// Row of `raw_feedback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub attendee_id: i64,
    pub session_id: i64,
    pub rating: i32,
    pub comment: String,
}

/// Row of the `dt_session_analytics` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAnalyticsRow {
    pub session_name: String,
    pub speaker: String,
    pub track: String,
    pub attendance_count: i64,
    pub capacity: i64,
    pub capacity_utilization_pct: f64,
    pub avg_rating: Option<f64>,
}

/// Row of the `dt_sponsor_performance` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsorPerformanceRow {
    pub sponsor_name: String,
    pub tier: String,
    pub total_booth_visits: i64,
    pub unique_visitors: i64,
    pub avg_visit_duration_sec: f64,
    pub roi_score: Option<f64>,
    pub investment_amount: f64,
}

/// Row of the `dt_attendee_engagement` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeEngagementRow {
    pub attendee_id: i64,
    pub engagement_tier: String,
}

/// Row of `feedback_with_sentiment`, produced by the AI sentiment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentFeedbackRow {
    pub attendee_id: i64,
    pub rating: i32,
    pub sentiment_category: String,
}

/// Everything the in-memory repository can answer queries from.
///
/// `feedback_sentiment` is `None` until the sentiment step has run; queries
/// against it then fail the way a missing relation does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDataset {
    pub attendees: Vec<AttendeeRecord>,
    pub sessions: Vec<SessionRecord>,
    pub checkins: Vec<CheckinRecord>,
    pub booth_visits: Vec<BoothVisitRecord>,
    pub feedback: Vec<FeedbackRecord>,
    pub session_analytics: Vec<SessionAnalyticsRow>,
    pub sponsor_performance: Vec<SponsorPerformanceRow>,
    pub attendee_engagement: Vec<AttendeeEngagementRow>,
    pub feedback_sentiment: Option<Vec<SentimentFeedbackRow>>,
}

/// Column access by name, used to apply equality restrictions in memory.
pub trait FilterableRow {
    fn field(&self, column: &str) -> Option<Cell>;
}

impl FilterableRow for SessionRecord {
    fn field(&self, column: &str) -> Option<Cell> {
        match column {
            "session_id" => Some(self.session_id.into()),
            "session_name" => Some(self.session_name.as_str().into()),
            "track" => Some(self.track.as_str().into()),
            _ => None,
        }
    }
}

impl FilterableRow for AttendeeRecord {
    fn field(&self, column: &str) -> Option<Cell> {
        match column {
            "attendee_id" => Some(self.attendee_id.into()),
            "specialty" => Some(self.specialty.as_deref().into()),
            "organization" => Some(self.organization.as_deref().into()),
            _ => None,
        }
    }
}

impl FilterableRow for SessionAnalyticsRow {
    fn field(&self, column: &str) -> Option<Cell> {
        match column {
            "session_name" => Some(self.session_name.as_str().into()),
            "speaker" => Some(self.speaker.as_str().into()),
            "track" => Some(self.track.as_str().into()),
            "attendance_count" => Some(self.attendance_count.into()),
            "capacity" => Some(self.capacity.into()),
            "capacity_utilization_pct" => Some(self.capacity_utilization_pct.into()),
            "avg_rating" => Some(self.avg_rating.into()),
            _ => None,
        }
    }
}

impl FilterableRow for SponsorPerformanceRow {
    fn field(&self, column: &str) -> Option<Cell> {
        match column {
            "sponsor_name" => Some(self.sponsor_name.as_str().into()),
            "tier" => Some(self.tier.as_str().into()),
            "total_booth_visits" => Some(self.total_booth_visits.into()),
            "unique_visitors" => Some(self.unique_visitors.into()),
            "avg_visit_duration_sec" => Some(self.avg_visit_duration_sec.into()),
            "roi_score" => Some(self.roi_score.into()),
            "investment_amount" => Some(self.investment_amount.into()),
            _ => None,
        }
    }
}

impl FilterableRow for AttendeeEngagementRow {
    fn field(&self, column: &str) -> Option<Cell> {
        match column {
            "attendee_id" => Some(self.attendee_id.into()),
            "engagement_tier" => Some(self.engagement_tier.as_str().into()),
            _ => None,
        }
    }
}

impl FilterableRow for SentimentFeedbackRow {
    fn field(&self, column: &str) -> Option<Cell> {
        match column {
            "attendee_id" => Some(self.attendee_id.into()),
            "rating" => Some(i64::from(self.rating).into()),
            "sentiment_category" => Some(self.sentiment_category.as_str().into()),
            _ => None,
        }
    }
}
