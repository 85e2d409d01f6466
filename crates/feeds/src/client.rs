//! Shared HTTP client construction and JSON fetch helper.

use crate::error::FeedError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Default per-request timeout. A timed-out request is an ordinary
/// per-source failure; siblings are never cancelled.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Some venues reject requests without a browser-like user agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/98.0.4758.102 Safari/537.36";

/// Build the shared client used for every outbound price request.
pub fn build_client(timeout: Duration) -> Result<Client, FeedError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

    let client = Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Issue a GET and decode the JSON body.
///
/// Non-2xx statuses and undecodable bodies are reported as errors tagged
/// with `source` so the caller can log which venue failed.
pub async fn fetch_json(
    client: &Client,
    url: &str,
    source: &'static str,
) -> Result<serde_json::Value, FeedError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FeedError::Status {
            src: source,
            status: response.status().as_u16(),
        });
    }

    response.json().await.map_err(|e| FeedError::Parse {
        src: source,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        let client = build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(client.is_ok());
    }
}
