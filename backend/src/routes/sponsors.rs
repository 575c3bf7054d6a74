//! Sponsor booth performance, optionally restricted to one tier.
//!
//! Rows are ordered by `roi_score DESC NULLS LAST`. A warehouse that puts NULLs
//! first for descending sorts would lead the table with unscored sponsors; here
//! they always trail the scored ones, and the in-memory backend does the same.

use std::collections::BTreeMap;

use crate::api::{QueryResult, SponsorTier};
use crate::db::query::{QueryKind, SqlQuery};
use crate::render::{BarChart, RenderError, TableWidget, Widget};

pub const SECTION_ID: &str = "sponsor_performance";
pub const TITLE: &str = "Sponsor Booth Performance";

pub const TIER_COLUMN: &str = "tier";
pub const GRADIENT_COLUMN: &str = "roi_score";

const SPONSOR_PERFORMANCE_SQL: &str = "SELECT
    sponsor_name::text AS sponsor_name,
    tier::text AS tier,
    total_booth_visits::int8 AS total_booth_visits,
    unique_visitors::int8 AS unique_visitors,
    ROUND(avg_visit_duration_sec::numeric, 0)::float8 AS avg_duration_sec,
    ROUND(roi_score::numeric, 2)::float8 AS roi_score,
    investment_amount::float8 AS investment_amount
FROM event_intelligence.dt_sponsor_performance";

pub fn query(tier: SponsorTier) -> SqlQuery {
    SqlQuery::new(QueryKind::SponsorPerformance, SPONSOR_PERFORMANCE_SQL)
        .filter_eq(TIER_COLUMN, tier.as_filter_value())
        .order_by("roi_score DESC NULLS LAST, sponsor_name")
}

/// ROI-shaded sponsor table plus total booth visits per tier.
pub fn widgets(result: &QueryResult) -> Result<Vec<Widget>, RenderError> {
    let table = TableWidget::from_result(result).with_gradient(GRADIENT_COLUMN)?;
    let chart = visits_by_tier(result)?;
    Ok(vec![Widget::Table(table), Widget::BarChart(chart)])
}

/// Sum of `total_booth_visits` grouped by tier, tiers in ascending order.
pub fn visits_by_tier(result: &QueryResult) -> Result<BarChart, RenderError> {
    let missing = |column: &str| RenderError::MissingColumn {
        column: column.to_string(),
    };
    let tiers = result
        .column_values(TIER_COLUMN)
        .ok_or_else(|| missing(TIER_COLUMN))?;
    let visits = result
        .column_values("total_booth_visits")
        .ok_or_else(|| missing("total_booth_visits"))?;

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (tier, visits) in tiers.into_iter().zip(visits) {
        *totals.entry(tier.to_string()).or_default() += visits.as_f64().unwrap_or(0.0);
    }

    Ok(BarChart::from_pairs(TIER_COLUMN, "total_booth_visits", totals).with_title("Visits by Tier"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Cell;

    fn sponsors() -> QueryResult {
        let mut result = QueryResult::new([
            "sponsor_name",
            "tier",
            "total_booth_visits",
            "unique_visitors",
            "avg_duration_sec",
            "roi_score",
            "investment_amount",
        ]);
        for (name, tier, visits, roi) in [
            ("MediHeal", "Platinum", 120i64, Some(8.5)),
            ("DermaTech", "Gold", 80, Some(6.0)),
            ("CarePlus", "Platinum", 60, Some(4.25)),
            ("WoundWorks", "Bronze", 10, None),
        ] {
            result.push_row(vec![
                name.into(),
                tier.into(),
                visits.into(),
                (visits / 2).into(),
                95.0.into(),
                roi.into(),
                Cell::Float(50000.0),
            ]);
        }
        result
    }

    #[test]
    fn test_all_tiers_has_no_restriction() {
        let query = query(SponsorTier::All);
        assert!(query.filters().is_empty());
        assert!(!query.sql().contains("WHERE"));
    }

    #[test]
    fn test_tier_restriction() {
        let query = query(SponsorTier::Gold);
        assert_eq!(query.params(), vec!["Gold"]);
        assert!(query.sql().contains("WHERE tier = $1"));
        assert!(query.display_sql().contains("tier = 'Gold'"));
    }

    #[test]
    fn test_unscored_sponsors_sort_last() {
        let sql = query(SponsorTier::All).sql();
        assert!(sql.ends_with("ORDER BY roi_score DESC NULLS LAST, sponsor_name"));
    }

    #[test]
    fn test_visits_by_tier_sorted_by_tier() {
        let chart = visits_by_tier(&sponsors()).unwrap();
        let bars: Vec<(&str, f64)> = chart
            .bars
            .iter()
            .map(|b| (b.label.as_str(), b.value))
            .collect();
        assert_eq!(
            bars,
            vec![("Bronze", 10.0), ("Gold", 80.0), ("Platinum", 180.0)]
        );
        assert_eq!(chart.title.as_deref(), Some("Visits by Tier"));
    }

    #[test]
    fn test_roi_gradient() {
        let widgets = widgets(&sponsors()).unwrap();
        let Widget::Table(table) = &widgets[0] else {
            panic!("expected table");
        };
        assert_eq!(table.gradient_column.as_deref(), Some("roi_score"));
        assert_eq!(table.style_at(0, 5).unwrap().background, "#00441b");
        assert_eq!(table.style_at(2, 5).unwrap().background, "#f7fcf5");
        assert!(table.style_at(3, 5).is_none());
    }
}
