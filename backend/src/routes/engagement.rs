//! Attendee engagement: tier distribution, top specialties, top organizations.

use crate::api::QueryResult;
use crate::db::query::{QueryKind, SqlQuery};
use crate::render::{BarChart, RenderError, Widget};

pub const TIERS_SECTION_ID: &str = "engagement_tiers";
pub const TIERS_TITLE: &str = "Engagement Tier Distribution";

pub const SPECIALTIES_SECTION_ID: &str = "top_specialties";
pub const SPECIALTIES_TITLE: &str = "Top Specialties";

pub const ORGANIZATIONS_SECTION_ID: &str = "top_organizations";
pub const ORGANIZATIONS_TITLE: &str = "Top Organizations";

/// Categories shown by the specialty and organization charts.
pub const TOP_CATEGORY_LIMIT: u32 = 8;

const ENGAGEMENT_TIERS_SQL: &str = "SELECT
    engagement_tier::text AS engagement_tier,
    COUNT(*)::int8 AS attendee_count
FROM event_intelligence.dt_attendee_engagement";

const ENGAGEMENT_ORDER: &str = "CASE engagement_tier
    WHEN 'Highly Engaged' THEN 1
    WHEN 'Engaged' THEN 2
    WHEN 'Participating' THEN 3
    ELSE 4 END, engagement_tier";

const TOP_SPECIALTIES_SQL: &str = "SELECT
    specialty::text AS specialty,
    COUNT(*)::int8 AS count
FROM event_intelligence.raw_attendees";

const TOP_ORGANIZATIONS_SQL: &str = "SELECT
    organization::text AS organization,
    COUNT(*)::int8 AS count
FROM event_intelligence.raw_attendees";

pub fn tiers_query() -> SqlQuery {
    SqlQuery::new(QueryKind::EngagementTiers, ENGAGEMENT_TIERS_SQL)
        .group_by("engagement_tier")
        .order_by(ENGAGEMENT_ORDER)
}

pub fn specialties_query() -> SqlQuery {
    SqlQuery::new(QueryKind::TopSpecialties, TOP_SPECIALTIES_SQL)
        .group_by("specialty")
        .order_by("count DESC, specialty")
        .limit(TOP_CATEGORY_LIMIT)
}

pub fn organizations_query() -> SqlQuery {
    SqlQuery::new(QueryKind::TopOrganizations, TOP_ORGANIZATIONS_SQL)
        .group_by("organization")
        .order_by("count DESC, organization")
        .limit(TOP_CATEGORY_LIMIT)
}

pub fn tiers_widgets(result: &QueryResult) -> Result<Vec<Widget>, RenderError> {
    let chart = BarChart::from_result(result, "engagement_tier", "attendee_count")?;
    Ok(vec![Widget::BarChart(chart)])
}

pub fn specialties_widgets(result: &QueryResult) -> Result<Vec<Widget>, RenderError> {
    let chart = BarChart::from_result(result, "specialty", "count")?;
    Ok(vec![Widget::BarChart(chart)])
}

pub fn organizations_widgets(result: &QueryResult) -> Result<Vec<Widget>, RenderError> {
    let chart = BarChart::from_result(result, "organization", "count")?;
    Ok(vec![Widget::BarChart(chart)])
}
