use std::time::Duration;

use axum::http;
use reqwest::Client;

use crate::error::{Result, TranscribeError};

/// Shared outbound client; the timeout is the only deadline on a provider call
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .user_agent(concat!("scribe/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()
        .map_err(|e| TranscribeError::Config(format!("failed to build HTTP client: {e}")))
}
