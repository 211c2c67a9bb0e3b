//! HTTP client for page and robots.txt retrieval

use crate::error::FetchError;
use reqwest::{Client, Proxy};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Total request timeout for the content fetch
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw response from a successful page fetch
#[derive(Debug, Clone)]
pub(crate) struct PageResponse {
    /// Response body as text
    pub body: String,
    /// Content-Type header value, empty string if absent
    pub content_type: String,
    /// HTTP status code
    pub status_code: u16,
}

/// Build the HTTP client shared by the robots.txt and content fetches
///
/// Redirects are followed (reqwest default policy). reqwest has no finite
/// default timeout, so both fetches share the 30 second bound.
pub(crate) fn build_client(
    user_agent: &str,
    proxy_url: Option<&str>,
) -> Result<Client, FetchError> {
    let mut builder = Client::builder()
        .user_agent(user_agent)
        .timeout(FETCH_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = proxy_url {
        builder = builder.proxy(Proxy::all(proxy).map_err(FetchError::ClientBuild)?);
    }

    builder.build().map_err(FetchError::ClientBuild)
}

/// Fetch a page and return its body, content type and status
///
/// Transport failures and HTTP statuses >= 400 are both fatal; the error
/// carries the URL and the cause or status code.
pub(crate) async fn fetch_page(client: &Client, url: &Url) -> Result<PageResponse, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status_code = response.status().as_u16();
    if status_code >= 400 {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status_code,
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    debug!(%url, status_code, content_type, bytes = body.len(), "fetched page");

    Ok(PageResponse {
        body,
        content_type,
        status_code,
    })
}
