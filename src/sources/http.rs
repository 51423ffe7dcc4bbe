//! Shared JSON-over-HTTP plumbing for the source clients
//!
//! Each client owns one `JsonClient`: a pooled `reqwest::Client` with a
//! fixed per-request timeout, its own sliding-window limiter, and a single
//! retry on upstream 429. Plain-text bodies go through `get_text`.

use super::rate_limit::SlidingWindowLimiter;
use super::retry::{parse_retry_after, RateLimitRetry};
use crate::error::AlphaError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, RETRY_AFTER, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

const CLIENT_USER_AGENT: &str = concat!("daily-alpha/", env!("CARGO_PKG_VERSION"));

pub struct JsonClient {
    source: &'static str,
    base_url: String,
    client: reqwest::Client,
    limiter: SlidingWindowLimiter,
    extra_headers: HeaderMap,
}

impl JsonClient {
    /// Build a client for one upstream
    ///
    /// `auth` is an optional `(header, value)` pair sent with every request.
    pub fn new(
        source: &'static str,
        base_url: &str,
        timeout: Duration,
        limiter: SlidingWindowLimiter,
        auth: Option<(&'static str, &str)>,
    ) -> Result<Self, AlphaError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        if let Some((name, value)) = auth {
            let mut value = HeaderValue::from_str(value).map_err(|_| {
                AlphaError::InvalidParameter(format!("{} credential is not a valid header value", source))
            })?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(name), value);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AlphaError::source_unavailable(source, e.to_string()))?;

        Ok(Self {
            source,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            limiter,
            extra_headers: HeaderMap::new(),
        })
    }

    /// Send `name: value` with every request, overriding a default header
    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.extra_headers
            .insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        self
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Join `path` onto the base URL; an empty path is the base URL itself
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AlphaError> {
        self.send(path, query)
            .await?
            .json::<T>()
            .await
            .map_err(|e| self.unavailable(format!("malformed response: {}", e)))
    }

    /// GET `path` and return the body as text
    pub async fn get_text(&self, path: &str) -> Result<String, AlphaError> {
        self.send(path, &[])
            .await?
            .text()
            .await
            .map_err(|e| self.unavailable(format!("unreadable response: {}", e)))
    }

    async fn send(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response, AlphaError> {
        let url = self.url(path);
        let mut retry = RateLimitRetry::once();

        loop {
            self.limiter.acquire().await;
            log::debug!("Making {} request to {}", self.source, path);

            let response = self
                .client
                .get(&url)
                .headers(self.extra_headers.clone())
                .query(query)
                .send()
                .await
                .map_err(|e| self.unavailable(describe_transport_error(&e)))?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                let delay = parse_retry_after(
                    response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok()),
                );
                log::warn!("🚫 {} rate limit exceeded", self.source);
                if retry.sleep(delay).await.is_err() {
                    return Err(self.unavailable("rate limited"));
                }
                continue;
            }

            if !status.is_success() {
                return Err(self.unavailable(format!("HTTP {}", status.as_u16())));
            }

            return Ok(response);
        }
    }

    fn unavailable(&self, reason: impl Into<String>) -> AlphaError {
        AlphaError::source_unavailable(self.source, reason)
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        format!("request failed: {}", err)
    }
}
