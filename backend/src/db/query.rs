//! Parameterized query construction.
//!
//! Every section owns one fixed template. Filter values never reach the SQL
//! text: an equality restriction is appended as `column = $n` and the value is
//! carried as a bound parameter. The "all" sentinel is expressed as `None` and
//! produces no clause at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which fixed template a query was built from.
///
/// Backends use it to pick the row shape to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    DistinctTracks,
    LiveMetrics,
    TopSessions,
    RatingDistribution,
    SponsorPerformance,
    EngagementTiers,
    TopSpecialties,
    TopOrganizations,
    FeedbackSentiment,
}

impl QueryKind {
    pub const ALL: [QueryKind; 9] = [
        QueryKind::DistinctTracks,
        QueryKind::LiveMetrics,
        QueryKind::TopSessions,
        QueryKind::RatingDistribution,
        QueryKind::SponsorPerformance,
        QueryKind::EngagementTiers,
        QueryKind::TopSpecialties,
        QueryKind::TopOrganizations,
        QueryKind::FeedbackSentiment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::DistinctTracks => "distinct_tracks",
            QueryKind::LiveMetrics => "live_metrics",
            QueryKind::TopSessions => "top_sessions",
            QueryKind::RatingDistribution => "rating_distribution",
            QueryKind::SponsorPerformance => "sponsor_performance",
            QueryKind::EngagementTiers => "engagement_tiers",
            QueryKind::TopSpecialties => "top_specialties",
            QueryKind::TopOrganizations => "top_organizations",
            QueryKind::FeedbackSentiment => "feedback_sentiment",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match restriction on one column, bound as a text parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFilter {
    pub column: &'static str,
    pub value: String,
}

/// A fixed SQL template plus the restrictions selected for this render.
///
/// Column names and template fragments are `'static` so only compile-time
/// text ends up in the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    kind: QueryKind,
    select: &'static str,
    conditions: Vec<&'static str>,
    filters: Vec<EqualityFilter>,
    group_by: Option<&'static str>,
    order_by: Option<&'static str>,
    limit: Option<u32>,
}

impl SqlQuery {
    /// Start from a `SELECT ... FROM ...` fragment.
    pub fn new(kind: QueryKind, select: &'static str) -> Self {
        Self {
            kind,
            select,
            conditions: Vec::new(),
            filters: Vec::new(),
            group_by: None,
            order_by: None,
            limit: None,
        }
    }

    /// Add a fixed predicate that is part of the template itself.
    pub fn where_static(mut self, condition: &'static str) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Restrict `column` to `value`; `None` (the "all" sentinel) is a no-op.
    pub fn filter_eq(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.filters.push(EqualityFilter {
                column,
                value: value.to_string(),
            });
        }
        self
    }

    pub fn group_by(mut self, clause: &'static str) -> Self {
        self.group_by = Some(clause);
        self
    }

    pub fn order_by(mut self, clause: &'static str) -> Self {
        self.order_by = Some(clause);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Restrictions derived from user filters, in parameter order.
    pub fn filters(&self) -> &[EqualityFilter] {
        &self.filters
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// Bound parameter values, `$1` first.
    pub fn params(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.value.as_str()).collect()
    }

    /// Statement text with `$n` placeholders, as sent to the database.
    pub fn sql(&self) -> String {
        self.assemble(|i, _| format!("${}", i + 1))
    }

    /// Statement text with the bound values inlined as quoted literals.
    ///
    /// For logs and assertions only; never executed.
    pub fn display_sql(&self) -> String {
        self.assemble(|_, f| format!("'{}'", f.value.replace('\'', "''")))
    }

    fn assemble<F>(&self, placeholder: F) -> String
    where
        F: Fn(usize, &EqualityFilter) -> String,
    {
        let mut predicates: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        predicates.extend(
            self.filters
                .iter()
                .enumerate()
                .map(|(i, f)| format!("{} = {}", f.column, placeholder(i, f))),
        );

        let mut sql = self.select.to_string();
        if !predicates.is_empty() {
            sql.push_str("\nWHERE ");
            sql.push_str(&predicates.join(" AND "));
        }
        if let Some(group_by) = self.group_by {
            sql.push_str("\nGROUP BY ");
            sql.push_str(group_by);
        }
        if let Some(order_by) = self.order_by {
            sql.push_str("\nORDER BY ");
            sql.push_str(order_by);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!("\nLIMIT {}", limit));
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SqlQuery {
        SqlQuery::new(QueryKind::TopSessions, "SELECT * FROM t")
    }

    #[test]
    fn test_sentinel_adds_no_clause() {
        let query = base().filter_eq("track", None);
        assert_eq!(query.sql(), "SELECT * FROM t");
        assert!(query.params().is_empty());
    }

    #[test]
    fn test_filter_uses_placeholder() {
        let query = base().filter_eq("track", Some("Research")).limit(10);
        assert_eq!(query.sql(), "SELECT * FROM t\nWHERE track = $1\nLIMIT 10");
        assert_eq!(query.params(), vec!["Research"]);
    }

    #[test]
    fn test_static_conditions_precede_filters() {
        let query = base()
            .where_static("avg_rating > 0")
            .filter_eq("tier", Some("Gold"))
            .filter_eq("track", Some("Research"));
        assert_eq!(
            query.sql(),
            "SELECT * FROM t\nWHERE avg_rating > 0 AND tier = $1 AND track = $2"
        );
    }

    #[test]
    fn test_display_sql_escapes_quotes() {
        let query = base().filter_eq("track", Some("O'Brien's Lab"));
        assert!(query.display_sql().contains("track = 'O''Brien''s Lab'"));
        // The executable form never carries the value.
        assert!(!query.sql().contains("O'Brien"));
    }

    #[test]
    fn test_clause_order() {
        let query = base()
            .group_by("a")
            .order_by("b DESC")
            .limit(8);
        assert_eq!(query.sql(), "SELECT * FROM t\nGROUP BY a\nORDER BY b DESC\nLIMIT 8");
    }

    #[test]
    fn test_kind_names_are_unique() {
        let mut names: Vec<&str> = QueryKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), QueryKind::ALL.len());
    }
}
