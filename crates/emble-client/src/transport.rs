// Raw HTTP layer: URL resolution, status handling, JSON parsing

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Instant;
use url::Url;

use crate::config::ClientConfig;
use crate::error::RequestError;

/// Untyped JSON transport behind [`crate::ApiClient`].
///
/// One call, one attempt: implementations must not retry or cache.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, path: &str) -> std::result::Result<Value, RequestError>;

    async fn post(&self, path: &str, body: Value) -> std::result::Result<Value, RequestError>;
}

/// reqwest-backed transport against a fixed base URL
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        // A trailing slash makes `join` append to the base path instead of replacing it
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .with_context(|| format!("Invalid base URL: {}", config.base_url))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` (which may carry a query string) against the base URL.
    pub fn resolve(&self, path: &str) -> std::result::Result<Url, RequestError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| RequestError::InvalidUrl {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    async fn execute(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<Value>,
    ) -> std::result::Result<Value, RequestError> {
        let url = self.resolve(path)?;
        let start = Instant::now();

        let mut request = self.http_client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(method = %method, path = %path, error = %e, "Request failed");
            RequestError::Transport {
                path: path.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        tracing::debug!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = %start.elapsed().as_millis(),
            "Request completed"
        );

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!(path = %path, body = %error_text, "Non-success response body");
            return Err(RequestError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| RequestError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&bytes).map_err(|e| RequestError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, path: &str) -> std::result::Result<Value, RequestError> {
        self.execute(reqwest::Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> std::result::Result<Value, RequestError> {
        self.execute(reqwest::Method::POST, path, Some(body)).await
    }
}
