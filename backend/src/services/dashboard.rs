//! The dashboard pipeline: one query per section, executed in layout order.
//!
//! Required sections propagate any failure and abort the render. The
//! sentiment section never fails: its errors are logged and replaced by an
//! informational notice.

use crate::api::{FilterOptions, FilterSelection, QueryResult};
use crate::db::query::SqlQuery;
use crate::db::repository::{QueryRepository, RepositoryError, RepositoryResult};
use crate::render::{DashboardPage, FilterPanel, PageHeader, RenderError, Section, Widget};
use crate::routes::{engagement, metrics, ratings, sentiment, sessions, sponsors};

pub const SIDEBAR_CAPTIONS: [&str; 2] = [
    "💡 Dashboard auto-refreshes with Dynamic Tables",
    "📊 Powered by event_intelligence views",
];

pub const FOOTER_LINES: [&str; 3] = [
    "Event Intelligence Platform",
    "Data Sources: Real-time event tracking, derived analytics views, AI sentiment",
    "This is a demonstration project. Data shown is synthetic.",
];

type SectionRenderer = fn(&QueryResult) -> Result<Vec<Widget>, RenderError>;

/// Render every section for `selection`.
///
/// The date window is echoed in the sidebar but never reaches a query.
pub async fn render_dashboard(
    repo: &dyn QueryRepository,
    options: &FilterOptions,
    selection: &FilterSelection,
) -> RepositoryResult<DashboardPage> {
    let sections = vec![
        required_section(repo, metrics::SECTION_ID, metrics::TITLE, metrics::query(), metrics::widgets)
            .await?,
        required_section(
            repo,
            sessions::SECTION_ID,
            sessions::TITLE,
            sessions::query(&selection.track),
            sessions::widgets,
        )
        .await?,
        required_section(repo, ratings::SECTION_ID, ratings::TITLE, ratings::query(), ratings::widgets)
            .await?,
        required_section(
            repo,
            sponsors::SECTION_ID,
            sponsors::TITLE,
            sponsors::query(selection.tier),
            sponsors::widgets,
        )
        .await?,
        required_section(
            repo,
            engagement::TIERS_SECTION_ID,
            engagement::TIERS_TITLE,
            engagement::tiers_query(),
            engagement::tiers_widgets,
        )
        .await?,
        required_section(
            repo,
            engagement::SPECIALTIES_SECTION_ID,
            engagement::SPECIALTIES_TITLE,
            engagement::specialties_query(),
            engagement::specialties_widgets,
        )
        .await?,
        required_section(
            repo,
            engagement::ORGANIZATIONS_SECTION_ID,
            engagement::ORGANIZATIONS_TITLE,
            engagement::organizations_query(),
            engagement::organizations_widgets,
        )
        .await?,
        sentiment_section(repo).await,
    ];

    log::info!(
        "Rendered dashboard (date={}, track={}, tier={}, sections={})",
        selection.date,
        selection.track.label(),
        selection.tier,
        sections.len()
    );

    Ok(DashboardPage {
        header: PageHeader::default(),
        filters: FilterPanel {
            selection: selection.clone(),
            options: options.clone(),
            captions: SIDEBAR_CAPTIONS.iter().map(|c| c.to_string()).collect(),
        },
        sections,
        footer: FOOTER_LINES.iter().map(|l| l.to_string()).collect(),
    })
}

async fn execute_logged(repo: &dyn QueryRepository, query: &SqlQuery) -> RepositoryResult<QueryResult> {
    log::debug!("[{}] {}", query.kind(), query.display_sql());
    repo.execute(query).await
}

async fn required_section(
    repo: &dyn QueryRepository,
    id: &str,
    title: &str,
    query: SqlQuery,
    render: SectionRenderer,
) -> RepositoryResult<Section> {
    let result = execute_logged(repo, &query)
        .await
        .map_err(|e| e.with_entity(id))?;
    let widgets = render(&result).map_err(|e| RepositoryError::from(e).with_entity(id))?;
    Ok(Section::new(id, title, widgets))
}

async fn sentiment_section(repo: &dyn QueryRepository) -> Section {
    let widgets = match execute_logged(repo, &sentiment::query()).await {
        Ok(result) => sentiment::widgets(&result).map_err(RepositoryError::from),
        Err(e) => Err(e),
    };

    let widgets = widgets.unwrap_or_else(|e| {
        log::warn!("Sentiment section unavailable: {}", e);
        sentiment::unavailable_widgets()
    });

    Section::new(sentiment::SECTION_ID, sentiment::TITLE, widgets)
}
