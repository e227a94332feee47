use crate::error::ScrapeError;
use crate::extract::extract;
use crate::fetch::Fetcher;
use crate::render;
use futures::StreamExt;
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct RunOptions {
    pub out_dir: PathBuf,
    pub max_in_flight: usize,
    pub request_delay: Duration,
}

impl RunOptions {
    pub fn new<P: Into<PathBuf>>(out_dir: P) -> RunOptions {
        RunOptions {
            out_dir: out_dir.into(),
            max_in_flight: 8,
            request_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
pub struct Failure {
    pub url: String,
    pub error: ScrapeError,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: u64,
    pub failed: Vec<Failure>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Succeeded : {}", self.succeeded)?;
        writeln!(f, "Failed    : {}", self.failed.len())?;
        for failure in &self.failed {
            writeln!(f, "> {} : {}", failure.url, failure.error)?;
        }
        Ok(())
    }
}

/// Read a newline-delimited url list; lines are trimmed, blank lines skipped.
pub fn read_url_list<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

struct RunContext<F> {
    fetcher: F,
    options: RunOptions,
    last_request: tokio::sync::Mutex<Option<Instant>>,
    claimed: std::sync::Mutex<HashSet<String>>,
    written: std::sync::Mutex<u64>,
}

impl<F> RunContext<F> {
    // Gate request starts so no two begin within request_delay of each other.
    async fn pace(&self) {
        if self.options.request_delay.is_zero() {
            return;
        }
        let mut last_request = self.last_request.lock().await;
        if let Some(last) = last_request.take() {
            let elapsed = last.elapsed();
            if elapsed < self.options.request_delay {
                tokio::time::sleep(self.options.request_delay - elapsed).await;
            }
        }
        last_request.replace(Instant::now());
    }

    // One claim per file name per run; a later claim fails the later write.
    fn claim(&self, name: &str) -> bool {
        self.claimed.lock().unwrap().insert(name.to_string())
    }

    // Gives a name back when its write fails.
    fn release(&self, name: &str) {
        self.claimed.lock().unwrap().remove(name);
    }
}

/// Scrape every url once: fetch, extract, render, persist. Failures are
/// recorded per url and never abort the rest of the batch.
pub async fn run<F>(fetcher: F, options: RunOptions, urls: Vec<String>) -> RunSummary
where
    F: Fetcher + Send + Sync,
{
    let width = options.max_in_flight.max(1);
    let ctx = Arc::new(RunContext {
        fetcher,
        options,
        last_request: tokio::sync::Mutex::new(None),
        claimed: std::sync::Mutex::new(HashSet::new()),
        written: std::sync::Mutex::new(0),
    });

    let results: Vec<(String, Result<PathBuf, ScrapeError>)> = futures::stream::iter(urls)
        .map(|url| {
            let ctx = Arc::clone(&ctx);
            async move {
                let result = process_one(ctx.as_ref(), &url).await;
                match &result {
                    Ok(path) => {
                        let mut written = ctx.written.lock().unwrap();
                        *written += 1;
                        info!("[{}] wrote {}", *written, path.display());
                    }
                    Err(e) => warn!("{}: {}", url, e),
                }
                (url, result)
            }
        })
        .buffered(width)
        .collect()
        .await;

    let mut summary = RunSummary::default();
    for (url, result) in results {
        match result {
            Ok(_) => summary.succeeded += 1,
            Err(error) => summary.failed.push(Failure { url, error }),
        }
    }
    summary
}

async fn process_one<F: Fetcher>(ctx: &RunContext<F>, url: &str) -> Result<PathBuf, ScrapeError> {
    ctx.pace().await;

    debug!("visit {}", url);
    let page = ctx.fetcher.fetch(url).await?;

    let article = extract(&page.body)?;
    let title = article.title.as_deref().ok_or(ScrapeError::MissingTitle)?;

    let name = render::file_name(title).ok_or_else(|| ScrapeError::Write {
        path: ctx.options.out_dir.clone(),
        source: io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("title {:?} leaves no usable file name", title),
        ),
    })?;

    let path = ctx.options.out_dir.join(&name);
    if !ctx.claim(&name) {
        return Err(ScrapeError::Write {
            path,
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "file name already claimed by another url in this run",
            ),
        });
    }

    let rendered = render::render(&article);
    if let Err(source) = tokio::fs::write(&path, rendered).await {
        ctx.release(&name);
        return Err(ScrapeError::Write { path, source });
    }

    Ok(path)
}
