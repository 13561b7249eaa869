//! Heatmap report rendering
//!
//! Turns a finished `ShowReport` into a self-contained HTML page and writes
//! it to the configured output directory.

use crate::ShowReport;
use crate::analytics::{RatedEpisode, SeasonAverage};
use crate::colorizer::{RatingColor, rating_color};
use crate::config::ReportConfig;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to create the output directory
    #[error("Failed to create output directory {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    /// Failed to write the report file
    #[error("Failed to write report {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },
}

const STYLE: &str = r#"
body { background: #0d1117; color: #c9d1d9; font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem; }
header { display: flex; align-items: center; gap: 1.5rem; margin-bottom: 2rem; }
header img { height: 180px; border-radius: 6px; }
header h1 { margin: 0 0 .5rem 0; }
a { color: #58a6ff; }
.stats { display: flex; flex-wrap: wrap; gap: 1rem; margin-bottom: 2rem; }
.stat { background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: .75rem 1rem; min-width: 10rem; }
.stat .label { font-size: .8rem; color: #8b949e; }
.stat .value { font-size: 1.2rem; font-weight: 600; }
table.heatmap { border-collapse: separate; border-spacing: 3px; }
table.heatmap th { font-size: .8rem; color: #8b949e; font-weight: normal; padding: 0 .3rem; }
table.heatmap td { width: 2.6rem; height: 1.8rem; text-align: center; font-size: .75rem; color: #0d1117; border-radius: 3px; }
table.heatmap td.empty { background: transparent; }
table.heatmap tfoot td { color: #c9d1d9; background: transparent; }
.legend { display: flex; gap: .5rem; margin-top: 1.5rem; font-size: .8rem; align-items: center; }
.legend span.swatch { display: inline-block; width: 1rem; height: 1rem; border-radius: 3px; vertical-align: middle; margin-right: .25rem; }
"#;

/// Renders the complete heatmap page for `report`.
pub fn render_html(report: &ShowReport) -> String {
    let name = escape_html(&report.metadata.name);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{} - Episode Ratings</title>\n", name));
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    if let Some(poster) = &report.metadata.poster_url {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{} poster\">\n",
            escape_html(poster),
            name
        ));
    }
    html.push_str(&format!(
        "<div><h1>{}</h1><a href=\"{}\">{}</a></div>\n",
        name,
        escape_html(&report.page_url),
        report.show_id
    ));
    html.push_str("</header>\n");

    render_stats(&mut html, report);
    render_grid(&mut html, report);
    render_legend(&mut html);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_stats(html: &mut String, report: &ShowReport) {
    let analytics = &report.analytics;

    html.push_str("<section class=\"stats\">\n");
    push_stat(html, "Seasons", &report.seasons.len().to_string());
    push_stat(html, "Rated Episodes", &analytics.total_episodes.to_string());
    push_stat(
        html,
        "Overall Average",
        &analytics
            .overall_average
            .map(|avg| format!("{:.2}/10", avg))
            .unwrap_or_else(|| "–".to_string()),
    );
    push_stat(html, "Best Season", &season_stat(analytics.best_season.as_ref()));
    push_stat(html, "Worst Season", &season_stat(analytics.worst_season.as_ref()));
    push_stat(html, "Highest Rated", &episode_stat(analytics.max_episode.as_ref()));
    push_stat(html, "Lowest Rated", &episode_stat(analytics.min_episode.as_ref()));
    html.push_str("</section>\n");
}

fn push_stat(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<div class=\"stat\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
        label, value
    ));
}

fn season_stat(season: Option<&SeasonAverage>) -> String {
    match season {
        Some(season) => format!("Season {} ({:.2})", season.season_number, season.average),
        None => "–".to_string(),
    }
}

fn episode_stat(episode: Option<&RatedEpisode>) -> String {
    match episode {
        Some(episode) => format!(
            "S{}E{} - {} ({:.1})",
            episode.season_number,
            episode.episode_number,
            escape_html(&episode.title),
            episode.rating
        ),
        None => "–".to_string(),
    }
}

/// One column per season, one row per episode slot
fn render_grid(html: &mut String, report: &ShowReport) {
    html.push_str("<section>\n<table class=\"heatmap\">\n<thead><tr><th></th>");
    for season in &report.seasons {
        html.push_str(&format!("<th>S{}</th>", season.season_number));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for slot in 0..report.max_episodes {
        html.push_str(&format!("<tr><th>E{}</th>", slot + 1));
        for season in &report.seasons {
            match season.episodes.get(slot) {
                Some(episode) => {
                    let color = rating_color(episode.rating);
                    let text = episode
                        .rating
                        .map(|rating| format!("{:.1}", rating))
                        .unwrap_or_else(|| "–".to_string());
                    html.push_str(&format!(
                        "<td style=\"background: {}\" title=\"S{}E{} - {}\">{}</td>",
                        color.hex(),
                        season.season_number,
                        episode.episode_number,
                        escape_html(&episode.title),
                        text
                    ));
                }
                None => html.push_str("<td class=\"empty\"></td>"),
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n<tfoot><tr><th>Avg</th>");

    for season in &report.seasons {
        let average = report
            .analytics
            .season_averages
            .iter()
            .find(|avg| avg.season_number == season.season_number)
            .map(|avg| format!("{:.1}", avg.average))
            .unwrap_or_else(|| "–".to_string());
        html.push_str(&format!("<td>{}</td>", average));
    }
    html.push_str("</tr></tfoot>\n</table>\n</section>\n");
}

fn render_legend(html: &mut String) {
    html.push_str("<section class=\"legend\">");
    for color in std::iter::once(RatingColor::Unknown).chain(RatingColor::SCALE) {
        html.push_str(&format!(
            "<span><span class=\"swatch\" style=\"background: {}\"></span>{}</span>",
            color.hex(),
            color.label()
        ));
    }
    html.push_str("</section>\n");
}

/// Escapes text for use in HTML content and double-quoted attributes
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Converts a show name into a URL and file name friendly slug
///
/// Lowercases, drops everything that is not a word character, whitespace
/// or hyphen, and collapses whitespace/hyphen runs into a single hyphen.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            pending_separator = true;
        } else if c.is_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        }
    }

    slug
}

/// Determines the report file name
///
/// An explicit name gets `.html` appended unless present; otherwise the
/// slugified show name is used, or the show id if the slug is empty.
pub fn output_filename(override_name: Option<&str>, show_name: &str, show_id: &str) -> String {
    if let Some(name) = override_name {
        return if name.ends_with(".html") {
            name.to_string()
        } else {
            format!("{}.html", name)
        };
    }

    let slug = slugify(show_name);
    if slug.is_empty() {
        format!("{}.html", show_id)
    } else {
        format!("{}.html", slug)
    }
}

/// Renders `report` and writes it into the configured output directory.
///
/// Returns the path of the written file.
pub fn write_report(report: &ShowReport, config: &ReportConfig) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(&config.output_dir).map_err(|e| ReportError::DirectoryCreationFailed {
        path: config.output_dir.clone(),
        source: e,
    })?;

    let filename = output_filename(
        config.output_name.as_deref(),
        &report.metadata.name,
        report.show_id.as_str(),
    );
    let path = config.output_dir.join(filename);

    fs::write(&path, render_html(report)).map_err(|e| ReportError::WriteFailed {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}
