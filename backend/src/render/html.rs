//! HTML page generation
//!
//! Produces one self-contained page with embedded CSS. Charts are plain CSS
//! bars, so the page needs no scripts. Every string that came from the
//! database is escaped.

use super::format::format_cell;
use super::widgets::{BarChart, DashboardPage, FilterPanel, MetricTile, Section, TableWidget, Widget};

/// Render a dashboard page as HTML
pub fn render_page(page: &DashboardPage) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="layout">
        {sidebar}
        <main class="container">
            <header>
                <h1>🏥 {title}</h1>
                <p class="meta">{subtitle}</p>
            </header>
            {sections}
            {footer}
        </main>
    </div>
</body>
</html>"#,
        title = html_escape(&page.header.title),
        subtitle = html_escape(&page.header.subtitle),
        css = inline_css(),
        sidebar = render_sidebar(&page.filters),
        sections = page
            .sections
            .iter()
            .map(render_section)
            .collect::<Vec<_>>()
            .join("\n"),
        footer = render_footer(&page.footer),
    )
}

fn render_sidebar(panel: &FilterPanel) -> String {
    let date = panel.selection.date.label();
    let track = panel.selection.track.label();
    let tier = panel.selection.tier.label();

    let captions: String = panel
        .captions
        .iter()
        .map(|c| format!(r#"<p class="caption">{}</p>"#, html_escape(c)))
        .collect();

    format!(
        r#"<aside class="sidebar">
            <h2>🔧 Filters</h2>
            <form method="get" action="/">
                {date}
                {track}
                {tier}
                <button type="submit">Apply</button>
            </form>
            <hr>
            {captions}
        </aside>"#,
        date = render_select("date", "Select Date", &panel.options.dates, date),
        track = render_select("track", "Session Track", &panel.options.tracks, track),
        tier = render_select("tier", "Sponsor Tier", &panel.options.tiers, tier),
        captions = captions,
    )
}

fn render_select(name: &str, label: &str, options: &[String], selected: &str) -> String {
    let options: String = options
        .iter()
        .map(|opt| {
            let escaped = html_escape(opt);
            let marker = if opt == selected { " selected" } else { "" };
            format!(r#"<option value="{escaped}"{marker}>{escaped}</option>"#)
        })
        .collect();

    format!(
        r#"<label for="{name}">{label}</label>
                <select id="{name}" name="{name}">{options}</select>"#
    )
}

fn render_section(section: &Section) -> String {
    let widgets: String = section.widgets.iter().map(render_widget).collect();
    format!(
        r#"<section class="section" id="{id}">
                <h2>{title}</h2>
                <div class="widgets">{widgets}</div>
            </section>"#,
        id = html_escape(&section.id),
        title = html_escape(&section.title),
    )
}

fn render_widget(widget: &Widget) -> String {
    match widget {
        Widget::Metric(tile) => render_metric(tile),
        Widget::BarChart(chart) => render_bar_chart(chart),
        Widget::Table(table) => render_table(table),
        Widget::Info { message } => {
            format!(r#"<div class="info">{}</div>"#, html_escape(message))
        }
    }
}

fn render_metric(tile: &MetricTile) -> String {
    let delta = tile
        .delta
        .as_deref()
        .map(|d| format!(r#"<div class="delta">{}</div>"#, html_escape(d)))
        .unwrap_or_default();

    format!(
        r#"<div class="metric-card"><h3>{label}</h3><div class="value">{value}</div>{delta}</div>"#,
        label = html_escape(&tile.label),
        value = html_escape(&tile.value),
    )
}

fn render_bar_chart(chart: &BarChart) -> String {
    let max = chart.max_value();
    let bars: String = chart
        .bars
        .iter()
        .map(|bar| {
            let width = if max > 0.0 { bar.value / max * 100.0 } else { 0.0 };
            format!(
                r#"<div class="bar-row"><span class="bar-label">{label}</span><span class="bar-track"><span class="bar" style="width: {width:.1}%"></span></span><span class="bar-value">{value}</span></div>"#,
                label = html_escape(&bar.label),
                value = bar.value,
            )
        })
        .collect();

    let title = chart
        .title
        .as_deref()
        .map(|t| format!("<h3>{}</h3>", html_escape(t)))
        .unwrap_or_default();
    let height = chart
        .height
        .map(|h| format!(r#" style="min-height: {h}px""#))
        .unwrap_or_default();

    format!(
        r#"<div class="chart" data-category="{category}" data-value="{value}"{height}>{title}{bars}</div>"#,
        category = html_escape(&chart.category_column),
        value = html_escape(&chart.value_column),
    )
}

fn render_table(table: &TableWidget) -> String {
    let head: String = table
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", html_escape(c)))
        .collect();

    let body: String = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let cells: String = row
                .iter()
                .enumerate()
                .map(|(col_idx, cell)| {
                    let style = table
                        .style_at(row_idx, col_idx)
                        .map(|s| {
                            format!(
                                r#" style="background-color: {}; color: {}""#,
                                html_escape(&s.background),
                                html_escape(&s.color)
                            )
                        })
                        .unwrap_or_default();
                    format!("<td{}>{}</td>", style, html_escape(&format_cell(cell)))
                })
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    let title = table
        .title
        .as_deref()
        .map(|t| format!("<h3>{}</h3>", html_escape(t)))
        .unwrap_or_default();

    format!(
        r#"<div class="table-wrap">{title}<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table></div>"#
    )
}

fn render_footer(lines: &[String]) -> String {
    let lines: String = lines
        .iter()
        .map(|l| format!("<p>{}</p>", html_escape(l)))
        .collect();
    format!(r#"<footer>{}</footer>"#, lines)
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.6;
    color: #111827;
    background: #ffffff;
}

.layout {
    display: flex;
    min-height: 100vh;
}

.sidebar {
    width: 260px;
    flex-shrink: 0;
    padding: 1.5rem;
    background: #f0f2f6;
}

.sidebar h2 {
    font-size: 1.25rem;
    margin-bottom: 1rem;
}

.sidebar label {
    display: block;
    font-size: 0.875rem;
    font-weight: 600;
    margin-top: 0.75rem;
}

.sidebar select,
.sidebar button {
    width: 100%;
    padding: 0.4rem;
    margin-top: 0.25rem;
}

.sidebar button {
    margin-top: 1rem;
    cursor: pointer;
}

.sidebar hr {
    margin: 1rem 0;
}

.caption {
    font-size: 0.8rem;
    color: #6b7280;
}

.container {
    flex: 1;
    max-width: 1400px;
    padding: 2rem;
}

header {
    margin-bottom: 2rem;
    padding-bottom: 1rem;
    border-bottom: 2px solid #e5e7eb;
}

header h1 {
    font-size: 2.5rem;
    font-weight: 700;
    color: #29b5e8;
}

header .meta {
    color: #666666;
    font-size: 1.1rem;
}

.section {
    margin-bottom: 2rem;
    padding-bottom: 1rem;
    border-bottom: 1px solid #e5e7eb;
}

.section h2 {
    font-size: 1.5rem;
    font-weight: 700;
    margin-bottom: 1rem;
}

.widgets {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
    gap: 1rem;
}

.metric-card {
    background: #f8f9fa;
    padding: 1rem;
    border-radius: 8px;
    border-left: 4px solid #29b5e8;
}

.metric-card h3 {
    font-size: 0.875rem;
    font-weight: 600;
    color: #6b7280;
}

.metric-card .value {
    font-size: 1.75rem;
    font-weight: 700;
}

.metric-card .delta {
    color: #15803d;
    font-size: 0.875rem;
}

.chart h3,
.table-wrap h3 {
    font-size: 1rem;
    margin-bottom: 0.5rem;
}

.bar-row {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    font-size: 0.8rem;
    margin-bottom: 0.25rem;
}

.bar-label {
    width: 40%;
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
}

.bar-track {
    flex: 1;
    background: #f3f4f6;
    height: 1rem;
}

.bar {
    display: block;
    height: 100%;
    background: #29b5e8;
}

.bar-value {
    width: 3.5rem;
    text-align: right;
}

.table-wrap {
    grid-column: 1 / -1;
    overflow-x: auto;
}

table {
    width: 100%;
    border-collapse: collapse;
}

th {
    padding: 0.5rem;
    text-align: left;
    font-weight: 600;
    font-size: 0.8rem;
    color: #374151;
    background: #f9fafb;
    border-bottom: 2px solid #e5e7eb;
}

td {
    padding: 0.5rem;
    border-bottom: 1px solid #e5e7eb;
    font-size: 0.8rem;
}

.info {
    grid-column: 1 / -1;
    padding: 1rem;
    border-radius: 8px;
    background: #e8f4fd;
    color: #1c4f7a;
}

footer {
    margin-top: 2rem;
    color: #6b7280;
    font-size: 0.875rem;
}
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
