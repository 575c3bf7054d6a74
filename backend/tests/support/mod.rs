#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use event_intel::api::{DashboardPage, FilterOptions, FilterSelection, Widget};
use event_intel::db::repositories::LocalRepository;
use event_intel::db::RepositoryResult;
use event_intel::services;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// In-memory repository over the synthetic symposium, recording every query.
pub fn sample_repo() -> LocalRepository {
    LocalRepository::with_sample_data().recording()
}

/// Resolve the given labels against the repository's options and render.
pub async fn render(
    repo: &LocalRepository,
    date: Option<&str>,
    track: Option<&str>,
    tier: Option<&str>,
) -> RepositoryResult<DashboardPage> {
    let options: FilterOptions = services::load_filter_options(repo).await?;
    let selection = FilterSelection::resolve(date, track, tier, &options)
        .map_err(event_intel::db::RepositoryError::validation)?;
    services::render_dashboard(repo, &options, &selection).await
}

/// Render with every filter at its "all" sentinel.
pub async fn render_default(repo: &LocalRepository) -> RepositoryResult<DashboardPage> {
    render(repo, None, None, None).await
}

pub fn widgets<'a>(page: &'a DashboardPage, section_id: &str) -> &'a [Widget] {
    &page
        .section(section_id)
        .unwrap_or_else(|| panic!("missing section {}", section_id))
        .widgets
}
