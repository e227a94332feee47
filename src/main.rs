use article_scraper::fetch::HttpFetcher;
use article_scraper::pipeline::{self, RunOptions, RunSummary};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tokio::time::Duration;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(
    name = "article-scraper",
    about = "Fetch article pages and archive them as simplified html"
)]
struct Cli {
    /// Newline-delimited list of article urls
    #[arg(short, long, default_value = "scrape-list.txt")]
    list: PathBuf,
    /// Directory the extracted articles are written to
    #[arg(short, long, default_value = "articles")]
    out_dir: PathBuf,
    /// How many urls may be in flight at once
    #[arg(long, default_value_t = 8)]
    max_in_flight: usize,
    /// Minimum milliseconds between request starts
    #[arg(long, default_value_t = 200)]
    request_delay_ms: u64,
    /// Print the summary as json instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    succeeded: u64,
    failed: Vec<ReportFailure<'a>>,
}

#[derive(Serialize)]
struct ReportFailure<'a> {
    url: &'a str,
    kind: &'static str,
    reason: String,
}

impl<'a> Report<'a> {
    fn new(summary: &'a RunSummary) -> Report<'a> {
        Report {
            succeeded: summary.succeeded,
            failed: summary
                .failed
                .iter()
                .map(|failure| ReportFailure {
                    url: &failure.url,
                    kind: failure.error.kind(),
                    reason: failure.error.to_string(),
                })
                .collect(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cli = Cli::parse();

    let urls = pipeline::read_url_list(&cli.list)?;
    std::fs::create_dir_all(&cli.out_dir)?;
    info!("Scrape list length: {}", urls.len());

    let options = RunOptions {
        out_dir: cli.out_dir,
        max_in_flight: cli.max_in_flight,
        request_delay: Duration::from_millis(cli.request_delay_ms),
    };
    let summary = pipeline::run(HttpFetcher::new(), options, urls).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&Report::new(&summary))?);
    } else {
        print!("{}", summary);
    }

    if !summary.failed.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
