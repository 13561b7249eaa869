use clap::Parser;
use episode_heatmap::{
    HeatmapError, HttpPageFetcher, ProgressEvent, ReportConfig, ScraperConfig, ShowReport,
    scrape_show, write_report,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Scrape IMDb episode ratings and generate a heatmap visualization
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// IMDb show URL (e.g., https://www.imdb.com/title/tt0903747/)
    url: String,

    /// Output filename (default: {show-name}.html)
    #[arg(short, long)]
    output: Option<String>,

    /// Directory the report is written to
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Print the scraped data as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Site root to scrape from
    #[arg(long, hide = true, default_value = "https://www.imdb.com")]
    base_url: String,
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Started { show_id } => {
            println!("Scraping IMDb ID: {}", show_id);
        }
        ProgressEvent::FetchingShowInfo { .. } => {
            println!("Fetching show info...");
        }
        ProgressEvent::ShowInfoFetched { name } => {
            println!("Show: {}", name);
        }
        ProgressEvent::FetchingSeasons => {
            println!("Fetching seasons...");
        }
        ProgressEvent::SeasonsFound { count } => {
            println!("Found {} season(s)", count);
        }
        ProgressEvent::FetchingSeason { season_number, .. } => {
            println!("Fetching Season {}...", season_number);
        }
        ProgressEvent::SeasonFetched { episode_count, .. } => {
            println!("  Found {} episode(s)", episode_count);
        }
        ProgressEvent::CalculatingAnalytics => {
            println!("Calculating analytics...");
        }
        ProgressEvent::Complete { .. } => {}
    }
}

fn print_summary(report: &ShowReport) {
    let analytics = &report.analytics;

    println!("\n{}", "=".repeat(50));
    println!("Show: {}", report.metadata.name);
    println!("Seasons: {}", report.seasons.len());
    println!("Total Episodes: {}", analytics.total_episodes);
    if let Some(average) = analytics.overall_average {
        println!("Overall Average: {}/10", average);
    }
    if let Some(max) = &analytics.max_episode {
        println!(
            "Highest Rated: S{}E{} - {} ({})",
            max.season_number, max.episode_number, max.title, max.rating
        );
    }
    if let Some(min) = &analytics.min_episode {
        println!(
            "Lowest Rated: S{}E{} - {} ({})",
            min.season_number, min.episode_number, min.title, min.rating
        );
    }
    println!("{}", "=".repeat(50));
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Scrapes the show, writes the report and prints the result
fn run(cli: Cli) -> Result<(), HeatmapError> {
    let scraper_config = ScraperConfig::default().with_base_url(&cli.base_url);
    let report_config = ReportConfig {
        output_dir: cli.output_dir,
        output_name: cli.output,
    };

    let fetcher = HttpPageFetcher::new(&scraper_config)?;

    let progress = |event| {
        if !cli.json {
            handle_progress_event(event);
        }
    };

    let report = scrape_show(&cli.url, &scraper_config, &fetcher, progress)?;
    let path = write_report(&report, &report_config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Generated: {}", path.display());
        print_summary(&report);
    }

    Ok(())
}

fn main() {
    init_tracing();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
