//! Generic HTTP fetching with retry logic and error classification

use rand::Rng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::constants::retry::{JITTER_FRACTION, MAX_DELAY_SECONDS};
use crate::error::AppError;

/// How transient failures (timeouts, connection errors, 429, 5xx) are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        RetryPolicy {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// Exponential backoff for the given attempt (0-based), with jitter, capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let cap = Duration::from_secs(MAX_DELAY_SECONDS);
        let exp = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(cap);
        if exp.is_zero() {
            return exp;
        }
        let factor = rand::rng().random_range((1.0 - JITTER_FRACTION)..=(1.0 + JITTER_FRACTION));
        exp.mul_f64(factor).min(cap)
    }
}

/// A GET request: target URL, query parameters and optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub url: &'a str,
    pub query: Vec<(&'static str, String)>,
    pub bearer_token: Option<&'a str>,
}

impl<'a> ApiRequest<'a> {
    pub fn get(url: &'a str) -> Self {
        ApiRequest {
            url,
            query: Vec::new(),
            bearer_token: None,
        }
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn bearer(mut self, token: Option<&'a str>) -> Self {
        self.bearer_token = token;
        self
    }

    fn build(&self, client: &Client) -> reqwest::RequestBuilder {
        let mut builder = client.get(self.url);
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(token) = self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

/// Generic fetch function with retry logic and detailed error handling.
///
/// - Retries whatever [`AppError::is_retryable`] accepts (timeouts, connection failures,
///   429 and 5xx) with exponential backoff
/// - Respects Retry-After headers for rate limiting
/// - Maps 401/403 to [`AppError::ApiUnauthorized`] so a bad token is never mistaken for bad data
/// - Distinguishes empty bodies, non-JSON bodies and JSON of the wrong shape
#[instrument(skip(client, request), fields(url = request.url))]
pub async fn fetch<T: DeserializeOwned>(
    client: &Client,
    request: &ApiRequest<'_>,
    retry: &RetryPolicy,
) -> Result<T, AppError> {
    let url = request.url;
    info!("Fetching data from URL: {url}");

    let mut attempt = 0u32;
    let response = loop {
        let (err, retry_after) = match request.build(client).send().await {
            Ok(resp) if resp.status().is_success() => break resp,
            Ok(resp) => {
                let retry_after = retry_after_header(&resp);
                (status_error(resp.status(), url), retry_after)
            }
            Err(e) => (transport_error(e, url), None),
        };

        if !err.is_retryable() || attempt >= retry.max_retries {
            error!("Request failed for URL {}: {}", url, err);
            return Err(err);
        }

        let wait = retry_after.unwrap_or_else(|| retry.backoff(attempt));
        warn!(
            "{}. Retrying in {:?} (attempt {}/{})",
            err,
            wait,
            attempt + 1,
            retry.max_retries
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
    };

    debug!("Response status: {}", response.status());

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());
    let preview: String = response_text.chars().take(512).collect();
    debug!("Response text (first 512 chars): {preview}");

    parse_body(&response_text, url)
}

/// `Retry-After` in seconds, capped like the backoff.
fn retry_after_header(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.min(MAX_DELAY_SECONDS)))
}

/// Maps a non-success status to its [`AppError`].
fn status_error(status: reqwest::StatusCode, url: &str) -> AppError {
    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    debug!("HTTP {} - {} (URL: {})", status_code, reason, url);

    match status_code {
        401 | 403 => AppError::api_unauthorized(status_code, url),
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

fn transport_error(e: reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Parses a response body, classifying failures the same way for every endpoint.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            let trimmed = body.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json("Response is not valid JSON", url))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
