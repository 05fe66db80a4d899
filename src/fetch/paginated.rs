//! Paginated JSON fetch
//!
//! Follows the `next` links of a REST listing (`{"results": [...], "next": url|null}`)
//! and concatenates every page's results.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::config::FetchConfig;

/// Fetch error types
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed page from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("Stopped after {max_pages} pages; next page was {next}")]
    PageLimit { max_pages: usize, next: String },
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// One page of a paginated listing
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub results: Vec<Value>,
    #[serde(default)]
    pub next: Option<String>,
}

impl Page {
    /// Parse a page body, keeping the URL for error reporting
    pub fn parse(url: &str, body: &str) -> FetchResult<Self> {
        serde_json::from_str(body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }

    /// URL of the following page, if any
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.trim().is_empty())
    }
}

/// Something that can fetch a single page
pub trait PageSource {
    fn get_page(&self, url: &str, headers: &HeaderMap) -> FetchResult<Page>;
}

/// Blocking HTTP page source
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(timeout: Option<Duration>) -> FetchResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap a preconfigured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageSource for HttpPageSource {
    fn get_page(&self, url: &str, headers: &HeaderMap) -> FetchResult<Page> {
        let response = self.client.get(url).headers(headers.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        Page::parse(url, &body)
    }
}

/// Request `start_url` and every page after it, one at a time
///
/// With `max_pages` unset this follows `next` for as long as the server
/// supplies one.
pub fn collect_pages<S>(
    source: &S,
    start_url: &str,
    headers: &HeaderMap,
    max_pages: Option<usize>,
) -> FetchResult<Vec<Value>>
where
    S: PageSource + ?Sized,
{
    let mut results = Vec::new();
    let mut url = start_url.to_string();
    let mut pages = 0usize;

    loop {
        let page = source.get_page(&url, headers)?;
        pages += 1;
        tracing::debug!("Fetched page {} from {} ({} results)", pages, url, page.results.len());

        let next = page.next_url().map(str::to_string);
        results.extend(page.results);

        let Some(next) = next else {
            break;
        };

        if let Some(max_pages) = max_pages {
            if pages >= max_pages {
                return Err(FetchError::PageLimit { max_pages, next });
            }
        }
        url = next;
    }

    tracing::info!("Fetched {} results in {} pages from {}", results.len(), pages, start_url);
    Ok(results)
}

/// Identifying header merged with the caller's headers; the caller wins on conflicts
pub fn merge_headers(user_agent: &str, extra: Option<&HeaderMap>) -> FetchResult<HeaderMap> {
    let mut merged = HeaderMap::new();
    merged.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);

    if let Some(extra) = extra {
        for name in extra.keys() {
            merged.remove(name);
        }
        for (name, value) in extra.iter() {
            merged.append(name.clone(), value.clone());
        }
    }

    Ok(merged)
}

/// Fetches complete paginated listings
pub struct Paginator<S = HttpPageSource> {
    source: S,
    config: FetchConfig,
}

impl Paginator<HttpPageSource> {
    /// Paginator over HTTP
    pub fn new(config: FetchConfig) -> FetchResult<Self> {
        let source = HttpPageSource::new(config.timeout)?;
        Ok(Self { source, config })
    }
}

impl<S: PageSource> Paginator<S> {
    pub fn with_source(source: S, config: FetchConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// All results of the listing at `url`, in server order
    pub fn fetch_all(&self, url: &str, headers: Option<&HeaderMap>) -> FetchResult<Vec<Value>> {
        let headers = merge_headers(&self.config.user_agent, headers)?;
        collect_pages(&self.source, url, &headers, self.config.max_pages)
    }
}

/// One-shot fetch over HTTP with the given configuration
pub fn fetch_all(url: &str, headers: Option<&HeaderMap>, config: &FetchConfig) -> FetchResult<Vec<Value>> {
    Paginator::new(config.clone())?.fetch_all(url, headers)
}
