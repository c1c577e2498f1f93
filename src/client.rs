use crate::listing;
use anyhow::{Context, Result};
use frabdl_common::paths::{domain_from_url, join_url};
use frabdl_parser::{IndexBuilder, IndexConfig, MediaIndex};
use reqwest::header::{HeaderMap, HeaderValue, FROM, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Timeout for a single listing or schedule request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where users find the project; sent in the `From` header.
pub const UPSTREAM: &str = "https://github.com/frabdl/frabdl";

/// User agent sent with every request.
pub fn user_agent() -> String {
    format!("frabdl/{} (+{})", env!("CARGO_PKG_VERSION"), UPSTREAM)
}

/// Source of the anchor texts of one listing page
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    /// Format directories under a media prefix
    async fn formats(&self, prefix: &str) -> Result<Vec<String>>;

    /// Media file names of one format directory, in page order
    async fn media_links(&self, prefix: &str, format: &str) -> Result<Vec<String>>;
}

/// HTTP client for media servers and schedule files
#[derive(Debug, Clone)]
pub struct MediaServerClient {
    client: Client,
}

impl Default for MediaServerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaServerClient {
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&user_agent()) {
            headers.insert(USER_AGENT, value);
        }
        headers.insert(FROM, HeaderValue::from_static(UPSTREAM));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self { client }
    }

    /// GET a URL and return the body as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Could not download \"{}\"", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Could not download \"{}\": HTTP {}", url, status);
        }

        response
            .text()
            .await
            .with_context(|| format!("Could not read response from \"{}\"", url))
    }
}

#[async_trait::async_trait]
impl ListingSource for MediaServerClient {
    async fn formats(&self, prefix: &str) -> Result<Vec<String>> {
        let url = join_url(prefix, "")?;
        let html = self
            .fetch_text(&url)
            .await
            .context("Could not download list of media formats")?;
        Ok(listing::format_list(&html))
    }

    async fn media_links(&self, prefix: &str, format: &str) -> Result<Vec<String>> {
        let url = join_url(prefix, format)?;
        let html = self
            .fetch_text(&url)
            .await
            .context("Could not download list of media files")?;
        Ok(listing::media_links(&html))
    }
}

/// Build one independent index per format.
///
/// Listings are fetched concurrently; each index is built from its own
/// listing only.
pub async fn build_indexes<S>(
    source: &S,
    prefix: &str,
    formats: &[String],
    config: &IndexConfig,
) -> Result<Vec<MediaIndex>>
where
    S: ListingSource + ?Sized,
{
    tracing::info!(
        "Media file information from \"{}\" for the formats {:?}",
        domain_from_url(prefix).unwrap_or_else(|_| prefix.to_string()),
        formats
    );
    let builder = &IndexBuilder::new(config.clone());
    let fetches = formats.iter().map(|format| async move {
        let links = source.media_links(prefix, format).await?;
        let index = builder
            .build(prefix, format, &links)
            .with_context(|| format!("Invalid media listing for format \"{}\"", format))?;
        if !index.skipped().is_empty() {
            tracing::info!(
                "{} of {} entries in {} skipped",
                index.skipped().len(),
                links.len(),
                format
            );
        }
        Ok::<_, anyhow::Error>(index)
    });

    futures::future::try_join_all(fetches).await
}
