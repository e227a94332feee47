use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("page is not parsable as html: {0}")]
    Parse(#[from] std::str::Utf8Error),
    #[error("page has no <h1> title")]
    MissingTitle,
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ScrapeError {
    /// Stable short tag for machine-readable reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::Network(_) => "network",
            ScrapeError::Parse(_) => "parse",
            ScrapeError::MissingTitle => "missing-title",
            ScrapeError::Write { .. } => "write",
        }
    }
}
