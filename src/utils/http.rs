// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, REFERER};

use crate::error::{AppError, Result};
use crate::models::ClientConfig;

/// Create a configured asynchronous HTTP client for the stats endpoint.
pub fn create_async_client(config: &ClientConfig) -> Result<reqwest::Client> {
    Ok(client_builder(config)?.build()?)
}

/// Builder carrying the headers and timeout every stats request uses.
pub fn client_builder(config: &ClientConfig) -> Result<reqwest::ClientBuilder> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let referer = HeaderValue::from_str(&config.referer)
        .map_err(|e| AppError::config(format!("Invalid referer header: {e}")))?;
    headers.insert(REFERER, referer);

    Ok(reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs)))
}
