//! In-memory local repository implementation.
//!
//! Answers every dashboard query from an [`EventDataset`] held in memory,
//! evaluating each template's fixed semantics in Rust and applying the
//! query's equality restrictions generically. Suitable for unit testing and
//! for running the dashboard without a database.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use crate::api::{Cell, QueryResult};
use crate::db::models::{EventDataset, FilterableRow};
use crate::db::query::{QueryKind, SqlQuery};
use crate::db::repository::{ErrorContext, QueryRepository, RepositoryError, RepositoryResult};

/// In-memory local repository.
///
/// # Example
/// ```
/// use event_intel::db::repositories::LocalRepository;
/// use event_intel::db::QueryRepository;
/// use event_intel::routes::filters::distinct_tracks_query;
///
/// # tokio_test_block_on(async {
/// let repo = LocalRepository::with_sample_data();
/// let tracks = repo.execute(&distinct_tracks_query()).await.unwrap();
/// assert_eq!(tracks.len(), 5);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    dataset: EventDataset,
    // Queries forced to fail, for exercising error paths
    failing: HashSet<QueryKind>,
    // Every query received, in order; `None` unless recording was requested
    executed: Option<Vec<SqlQuery>>,
    is_healthy: bool,
}

impl LocalRepository {
    /// Create a repository with no rows (the sentiment view is also absent).
    pub fn new() -> Self {
        Self::with_dataset(EventDataset::default())
    }

    /// Create a repository over the given dataset.
    pub fn with_dataset(dataset: EventDataset) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                dataset,
                failing: HashSet::new(),
                executed: None,
                is_healthy: true,
            })),
        }
    }

    /// Create a repository over [`EventDataset::sample`].
    pub fn with_sample_data() -> Self {
        Self::with_dataset(EventDataset::sample())
    }

    /// Keep a log of every executed query, readable with
    /// [`executed_queries`](Self::executed_queries). Off by default so a
    /// long-running server does not accumulate one.
    pub fn recording(self) -> Self {
        self.data.write().executed.get_or_insert_with(Vec::new);
        self
    }

    /// Make every subsequent query of `kind` fail with a query error.
    pub fn fail_query(&self, kind: QueryKind) {
        self.data.write().failing.insert(kind);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Queries executed so far, oldest first. Empty unless recording.
    pub fn executed_queries(&self) -> Vec<SqlQuery> {
        self.data.read().executed.clone().unwrap_or_default()
    }

    fn check_health(&self, kind: QueryKind) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository is unhealthy",
                ErrorContext::new("execute").with_entity(kind.as_str()),
            ))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryRepository for LocalRepository {
    async fn execute(&self, query: &SqlQuery) -> RepositoryResult<QueryResult> {
        let kind = query.kind();
        if let Some(log) = self.data.write().executed.as_mut() {
            log.push(query.clone());
        }
        self.check_health(kind)?;

        let data = self.data.read();
        if data.failing.contains(&kind) {
            return Err(RepositoryError::query_with_context(
                "Injected failure",
                ErrorContext::new("execute").with_entity(kind.as_str()),
            ));
        }

        evaluate(&data.dataset, query).map_err(|e| e.with_entity(kind.as_str()))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}

fn evaluate(data: &EventDataset, query: &SqlQuery) -> RepositoryResult<QueryResult> {
    let limit = query.limit_value().map_or(usize::MAX, |l| l as usize);

    let result = match query.kind() {
        QueryKind::DistinctTracks => {
            let tracks: BTreeSet<&str> = select(&data.sessions, query)?
                .into_iter()
                .map(|s| s.track.as_str())
                .collect();
            let mut result = QueryResult::new(["track"]);
            for track in tracks {
                result.push_row(vec![track.into()]);
            }
            result
        }
        QueryKind::LiveMetrics => {
            let checked_in: HashSet<i64> = data.checkins.iter().map(|c| c.attendee_id).collect();
            let booth: HashSet<i64> = data.booth_visits.iter().map(|v| v.attendee_id).collect();
            let avg_rating = mean(data.feedback.iter().map(|f| f64::from(f.rating)))
                .map(|v| round_to(v, 2));
            QueryResult::new([
                "total_registered",
                "total_checked_in",
                "booth_visitors",
                "avg_rating",
                "total_feedback",
            ])
            .with_row(vec![
                (data.attendees.len() as i64).into(),
                (checked_in.len() as i64).into(),
                (booth.len() as i64).into(),
                avg_rating.into(),
                (data.feedback.len() as i64).into(),
            ])
        }
        QueryKind::TopSessions => {
            let mut rows = select(&data.session_analytics, query)?;
            rows.sort_by(|a, b| {
                b.attendance_count
                    .cmp(&a.attendance_count)
                    .then_with(|| a.session_name.cmp(&b.session_name))
            });
            let mut result = QueryResult::new([
                "session_name",
                "speaker",
                "track",
                "attendance_count",
                "capacity",
                "utilization_pct",
                "avg_rating",
            ]);
            for s in rows.into_iter().take(limit) {
                result.push_row(vec![
                    s.session_name.as_str().into(),
                    s.speaker.as_str().into(),
                    s.track.as_str().into(),
                    s.attendance_count.into(),
                    s.capacity.into(),
                    round_to(s.capacity_utilization_pct, 1).into(),
                    s.avg_rating.map(|r| round_to(r, 2)).into(),
                ]);
            }
            result
        }
        QueryKind::RatingDistribution => {
            let mut buckets: BTreeMap<i64, i64> = BTreeMap::new();
            for s in select(&data.session_analytics, query)? {
                if let Some(rating) = s.avg_rating.filter(|r| *r > 0.0) {
                    *buckets.entry(rating.round() as i64).or_default() += 1;
                }
            }
            let mut result = QueryResult::new(["rating_bucket", "session_count"]);
            for (bucket, count) in buckets {
                result.push_row(vec![bucket.into(), count.into()]);
            }
            result
        }
        QueryKind::SponsorPerformance => {
            let mut rows = select(&data.sponsor_performance, query)?;
            rows.sort_by(|a, b| {
                desc_nulls_last(a.roi_score, b.roi_score)
                    .then_with(|| a.sponsor_name.cmp(&b.sponsor_name))
            });
            let mut result = QueryResult::new([
                "sponsor_name",
                "tier",
                "total_booth_visits",
                "unique_visitors",
                "avg_duration_sec",
                "roi_score",
                "investment_amount",
            ]);
            for s in rows.into_iter().take(limit) {
                result.push_row(vec![
                    s.sponsor_name.as_str().into(),
                    s.tier.as_str().into(),
                    s.total_booth_visits.into(),
                    s.unique_visitors.into(),
                    round_to(s.avg_visit_duration_sec, 0).into(),
                    s.roi_score.map(|r| round_to(r, 2)).into(),
                    s.investment_amount.into(),
                ]);
            }
            result
        }
        QueryKind::EngagementTiers => {
            let counts = count_by(
                select(&data.attendee_engagement, query)?
                    .into_iter()
                    .map(|e| Some(e.engagement_tier.as_str())),
            );
            let mut groups: Vec<(Option<&str>, i64)> = counts.into_iter().collect();
            groups.sort_by(|a, b| {
                engagement_rank(a.0)
                    .cmp(&engagement_rank(b.0))
                    .then_with(|| asc_nulls_last(a.0, b.0))
            });
            grouped_result("engagement_tier", "attendee_count", groups, limit)
        }
        QueryKind::TopSpecialties => {
            let counts = count_by(
                select(&data.attendees, query)?
                    .into_iter()
                    .map(|a| a.specialty.as_deref()),
            );
            grouped_result("specialty", "count", by_count_desc(counts), limit)
        }
        QueryKind::TopOrganizations => {
            let counts = count_by(
                select(&data.attendees, query)?
                    .into_iter()
                    .map(|a| a.organization.as_deref()),
            );
            grouped_result("organization", "count", by_count_desc(counts), limit)
        }
        QueryKind::FeedbackSentiment => {
            let rows = data.feedback_sentiment.as_ref().ok_or_else(|| {
                RepositoryError::query_with_context(
                    "relation \"event_intelligence.feedback_with_sentiment\" does not exist",
                    ErrorContext::new("execute"),
                )
            })?;
            let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
            for r in select(rows, query)? {
                groups
                    .entry(r.sentiment_category.as_str())
                    .or_default()
                    .push(f64::from(r.rating));
            }
            let mut groups: Vec<(&str, Vec<f64>)> = groups.into_iter().collect();
            groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

            let mut result = QueryResult::new(["sentiment_category", "count", "avg_rating"]);
            for (category, ratings) in groups.into_iter().take(limit) {
                let avg = mean(ratings.iter().copied()).map(|v| round_to(v, 2));
                result.push_row(vec![
                    category.into(),
                    (ratings.len() as i64).into(),
                    avg.into(),
                ]);
            }
            result
        }
    };

    Ok(result)
}

/// Rows of `rows` matching every equality restriction of `query`.
fn select<'a, R: FilterableRow>(rows: &'a [R], query: &SqlQuery) -> RepositoryResult<Vec<&'a R>> {
    let mut selected = Vec::with_capacity(rows.len());
    'rows: for row in rows {
        for filter in query.filters() {
            match row.field(filter.column) {
                Some(Cell::Text(value)) if value == filter.value => {}
                Some(_) => continue 'rows,
                None => {
                    return Err(RepositoryError::query_with_context(
                        format!("column \"{}\" does not exist", filter.column),
                        ErrorContext::new("execute"),
                    ))
                }
            }
        }
        selected.push(row);
    }
    Ok(selected)
}

fn count_by<'a>(values: impl Iterator<Item = Option<&'a str>>) -> BTreeMap<Option<&'a str>, i64> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
}

fn by_count_desc(counts: BTreeMap<Option<&str>, i64>) -> Vec<(Option<&str>, i64)> {
    let mut groups: Vec<(Option<&str>, i64)> = counts.into_iter().collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| asc_nulls_last(a.0, b.0)));
    groups
}

/// Ascending text order with NULL after every value, as Postgres sorts.
fn asc_nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn grouped_result(
    label_column: &str,
    count_column: &str,
    groups: Vec<(Option<&str>, i64)>,
    limit: usize,
) -> QueryResult {
    let mut result = QueryResult::new([label_column, count_column]);
    for (label, count) in groups.into_iter().take(limit) {
        result.push_row(vec![label.into(), count.into()]);
    }
    result
}

fn engagement_rank(tier: Option<&str>) -> u8 {
    match tier {
        Some("Highly Engaged") => 1,
        Some("Engaged") => 2,
        Some("Participating") => 3,
        _ => 4,
    }
}

fn desc_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
