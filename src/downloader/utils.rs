// Helper functions shared by the fetcher and the bot

use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, DNT, USER_AGENT};
use std::time::Duration;

use super::errors::ExtractError;
use super::models::NetworkConfig;

lazy_static::lazy_static! {
    static ref SHARE_LINK_RE: Regex =
        Regex::new(r"^https://(?:www|m|vm)\.tiktok\.com/[^\s]*$").unwrap();
}

/// Check that `url` is a TikTok share link before anything touches the network
pub fn validate_share_link(url: &str) -> Result<(), ExtractError> {
    if SHARE_LINK_RE.is_match(url) {
        Ok(())
    } else {
        Err(ExtractError::InvalidLink(url.to_string()))
    }
}

/// Convenience wrapper for filters in the bot
pub fn is_share_link(url: &str) -> bool {
    validate_share_link(url).is_ok()
}

/// Header set sent with every request so basic bot filtering lets us through
pub fn default_headers(config: &NetworkConfig) -> Result<HeaderMap, ExtractError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent).map_err(|e| {
            ExtractError::Retrieval(format!("invalid user agent {:?}: {}", config.user_agent, e))
        })?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    Ok(headers)
}

/// Build an HTTP client with the default headers, timeout and optional proxy
pub fn build_client(config: &NetworkConfig) -> Result<reqwest::Client, ExtractError> {
    let mut builder = reqwest::Client::builder().default_headers(default_headers(config)?);

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(Duration::from_secs(u64::from(timeout)));
    }

    if let Some(proxy_url) = config.proxy.as_deref() {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
            ExtractError::Retrieval(format!("invalid proxy URL {}: {}", proxy_url, e))
        })?;
        tracing::debug!(proxy = %proxy_url, "Using proxy");
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ExtractError::Retrieval(format!("failed to build HTTP client: {}", e)))
}
