//! Sitemap CSV retrieval, tokenizing and indexing.
//!
//! The widget reads a CSV sitemap (`page_id,title,url,breadcrumb_html`) once
//! per load. This crate fetches it (HTTP, bypassing caches, or a local file),
//! tokenizes it with [`csv::parse`] and folds the rows into a [`SitemapIndex`].

pub mod csv;
mod index;
pub mod path;

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use sitenav_shared::{Result, SiteNavError};
use tracing::{debug, info, instrument};
use url::Url;

pub use index::{SitemapIndex, build_index};

/// Default timeout in seconds for fetching the sitemap.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum response size we consider valid (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// User-Agent string for sitemap requests.
const USER_AGENT: &str = concat!("SiteNav/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// SitemapSource
// ---------------------------------------------------------------------------

/// Where the sitemap CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapSource {
    /// Fetched over HTTP(S).
    Http(Url),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl SitemapSource {
    /// Interpret a raw location.
    ///
    /// Absolute `http(s)` URLs are used as-is and `file:` URLs become paths.
    /// Anything else is joined onto `base` when one is given (the widget's own
    /// URL), or treated as a filesystem path otherwise.
    pub fn resolve(raw: &str, base: Option<&Url>) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SiteNavError::validation("sitemap location is empty"));
        }

        if let Ok(url) = Url::parse(raw) {
            return Self::from_url(url);
        }

        match base {
            Some(base) => {
                let joined = base.join(raw).map_err(|e| {
                    SiteNavError::parse(format!("cannot resolve '{raw}' against {base}: {e}"))
                })?;
                Self::from_url(joined)
            }
            None => Ok(Self::File(PathBuf::from(raw))),
        }
    }

    fn from_url(url: Url) -> Result<Self> {
        match url.scheme() {
            "http" | "https" => Ok(Self::Http(url)),
            "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|()| SiteNavError::validation(format!("not a local file URL: {url}"))),
            other => Err(SiteNavError::validation(format!(
                "unsupported sitemap scheme '{other}': {url}"
            ))),
        }
    }
}

impl std::fmt::Display for SitemapSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch options
// ---------------------------------------------------------------------------

/// Configuration for the sitemap fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Timeout for HTTP requests in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Main entry points
// ---------------------------------------------------------------------------

/// Retrieve the raw sitemap text.
///
/// HTTP requests ask every cache along the way for a fresh copy. A non-2xx
/// status is an error, as is a body larger than 10 MB.
#[instrument(skip_all, fields(source = %source))]
pub async fn fetch_sitemap(source: &SitemapSource, opts: &FetchOptions) -> Result<String> {
    let body = match source {
        SitemapSource::Http(url) => {
            let client = build_client(opts)?;
            fetch_http(&client, url).await?
        }
        SitemapSource::File(path) => read_file(path).await?,
    };

    debug!(bytes = body.len(), "sitemap retrieved");
    Ok(body)
}

/// Fetch, tokenize and index in one step.
pub async fn load_index(
    source: &SitemapSource,
    opts: &FetchOptions,
    home_section: &str,
) -> Result<SitemapIndex> {
    let text = fetch_sitemap(source, opts).await?;
    let index = SitemapIndex::from_csv(&text, home_section);

    info!(%source, pages = index.len(), "sitemap loaded");
    Ok(index)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a reqwest client that never serves the sitemap from a cache.
fn build_client(opts: &FetchOptions) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(opts.timeout_secs))
        .build()
        .map_err(|e| SiteNavError::Network(format!("failed to build HTTP client: {e}")))
}

async fn fetch_http(client: &Client, url: &Url) -> Result<String> {
    let mut response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| SiteNavError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SiteNavError::Network(format!("{url}: HTTP {status}")));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(SiteNavError::validation(format!(
                "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
            )));
        }
    }

    // Chunked bodies have no Content-Length; count bytes as they arrive.
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| SiteNavError::Network(format!("{url}: failed to read body: {e}")))?
    {
        if (body.len() + chunk.len()) as u64 > MAX_RESPONSE_SIZE {
            return Err(SiteNavError::validation(format!(
                "{url}: response too large (over {MAX_RESPONSE_SIZE} bytes)"
            )));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

async fn read_file(path: &std::path::Path) -> Result<String> {
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|e| SiteNavError::io(path, e))?;
    if meta.len() > MAX_RESPONSE_SIZE {
        return Err(SiteNavError::validation(format!(
            "{}: file too large ({} bytes, max {MAX_RESPONSE_SIZE})",
            path.display(),
            meta.len()
        )));
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SiteNavError::io(path, e))
}
