//! Filter option loading and request validation.

use crate::api::{FilterOptions, FilterSelection};
use crate::db::repository::{QueryRepository, RepositoryError, RepositoryResult};
use crate::render::RenderError;
use crate::routes::filters::{distinct_tracks_query, TRACK_COLUMN};

/// Load the sidebar choices. The track list comes from the sessions table on
/// every call, so new tracks show up without a restart.
pub async fn load_filter_options(repo: &dyn QueryRepository) -> RepositoryResult<FilterOptions> {
    let query = distinct_tracks_query();
    log::debug!("[{}] {}", query.kind(), query.display_sql());
    let result = repo.execute(&query).await?;

    let tracks: Vec<String> = result
        .column_values(TRACK_COLUMN)
        .ok_or_else(|| {
            RepositoryError::from(RenderError::MissingColumn {
                column: TRACK_COLUMN.to_string(),
            })
        })?
        .into_iter()
        .filter_map(|cell| cell.as_str().map(str::to_string))
        .collect();

    Ok(FilterOptions::new(tracks))
}

/// Load the options and validate the raw request labels against them.
///
/// The outer error is a repository failure; the inner one rejects a label.
pub async fn resolve_selection(
    repo: &dyn QueryRepository,
    date: Option<&str>,
    track: Option<&str>,
    tier: Option<&str>,
) -> RepositoryResult<(FilterOptions, Result<FilterSelection, String>)> {
    let options = load_filter_options(repo).await?;
    let selection = FilterSelection::resolve(date, track, tier, &options);
    Ok((options, selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TrackChoice;
    use crate::api::QueryResult;
    use crate::db::query::SqlQuery;
    use crate::db::repositories::LocalRepository;
    use async_trait::async_trait;

    /// Answers every query with a result that lacks the `track` column.
    struct WrongShapeRepository;

    #[async_trait]
    impl QueryRepository for WrongShapeRepository {
        async fn execute(&self, _query: &SqlQuery) -> RepositoryResult<QueryResult> {
            let mut result = QueryResult::new(["name"]);
            result.push_row(vec!["Wound Debridement".into()]);
            Ok(result)
        }

        async fn health_check(&self) -> RepositoryResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_options_from_sample_data() {
        let repo = LocalRepository::with_sample_data();
        let options = load_filter_options(&repo).await.unwrap();
        assert_eq!(options.tracks[0], "All Tracks");
        assert!(options.contains_track("Wound Debridement"));
        let mut sorted = options.tracks[1..].to_vec();
        sorted.sort();
        assert_eq!(sorted, options.tracks[1..].to_vec());
    }

    #[tokio::test]
    async fn test_empty_sessions_leave_only_the_sentinel() {
        let repo = LocalRepository::new();
        let options = load_filter_options(&repo).await.unwrap();
        assert_eq!(options.tracks, vec!["All Tracks"]);
    }

    #[tokio::test]
    async fn test_resolve_selection() {
        let repo = LocalRepository::with_sample_data();
        let (_, selection) = resolve_selection(&repo, None, Some("Wound Debridement"), Some("Gold"))
            .await
            .unwrap();
        let selection = selection.unwrap();
        assert_eq!(
            selection.track,
            TrackChoice::Track("Wound Debridement".to_string())
        );

        let (_, rejected) = resolve_selection(&repo, Some("Day 9"), None, None)
            .await
            .unwrap();
        assert!(rejected.is_err());
    }

    #[tokio::test]
    async fn test_result_without_track_column_is_an_error() {
        let err = load_filter_options(&WrongShapeRepository).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert!(err.to_string().contains("track"));
    }
}
