pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod render;

pub use error::ScrapeError;
pub use extract::{extract, Article};
pub use fetch::{FetchedPage, Fetcher, HttpFetcher};
pub use pipeline::{read_url_list, run, Failure, RunOptions, RunSummary};
pub use render::{file_name, render};
