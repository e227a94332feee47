use crate::error::ScrapeError;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

/// Raw page bytes plus the content type the server reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> HttpFetcher {
        HttpFetcher {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        HttpFetcher::new()
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let content_type = check_response(response.status(), content_type.as_deref())?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(FetchedPage {
            body: body.to_vec(),
            content_type,
        })
    }
}

// A usable response has status 200 and names a content type.
fn check_response(status: StatusCode, content_type: Option<&str>) -> Result<String, ScrapeError> {
    if status != StatusCode::OK {
        return Err(ScrapeError::Network(format!(
            "unexpected status {}",
            status
        )));
    }
    match content_type {
        Some(ct) if !ct.trim().is_empty() => Ok(ct.to_string()),
        _ => Err(ScrapeError::Network(
            "response has no content type".to_string(),
        )),
    }
}
