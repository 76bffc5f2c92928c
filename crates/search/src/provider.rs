//! Transport to the search engine.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::container::{Payload, PayloadFormat};
use crate::error::TransportError;

/// Sends rendered requests to the engine and returns the raw response text.
///
/// Implementations own timeouts and retries; the query pipeline calls each
/// method at most once per query and passes errors through unchanged.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Runs a query against `handler`.
    async fn get(&self, handler: &str, payload: &Payload) -> Result<String, TransportError>;

    /// Posts a JSON body to `handler`.
    async fn post(&self, handler: &str, body: &str) -> Result<String, TransportError>;
}

/// [`Provider`] over HTTP.
///
/// Query-string payloads are sent as `GET <base>/<collection>/<handler>?...`,
/// JSON payloads are posted to the same URL.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    base: Url,
}

impl HttpProvider {
    /// Targets `collection` on the engine at `base_url`.
    pub fn new(base_url: &str, collection: &str, timeout: Duration) -> Result<Self, TransportError> {
        let raw = format!(
            "{}/{}/",
            base_url.trim_end_matches('/'),
            collection.trim_matches('/')
        );
        let base = Url::parse(&raw).map_err(|e| TransportError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client {
                message: e.to_string(),
            })?;
        Ok(Self { client, base })
    }

    /// Builds a provider from client settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(
            &config.base_url,
            &config.collection,
            Duration::from_secs(config.request_timeout),
        )
    }

    /// The collection URL handlers are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, handler: &str) -> Result<Url, TransportError> {
        self.base
            .join(handler.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidUrl {
                url: format!("{}{}", self.base, handler),
                message: e.to_string(),
            })
    }

    /// Query-string payloads go out as a GET with the decoded pairs
    /// re-encoded by reqwest; JSON payloads are POSTed as the body.
    fn query_request(
        &self,
        handler: &str,
        payload: &Payload,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = self.endpoint(handler)?;
        Ok(match payload.format {
            PayloadFormat::QueryString => self.client.get(url).query(&payload.pairs()),
            PayloadFormat::Json => self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(payload.body.clone()),
        })
    }

    async fn send(
        &self,
        handler: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, TransportError> {
        let response = request.send().await.map_err(|source| TransportError::Request {
            handler: handler.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| TransportError::Request {
            handler: handler.to_string(),
            source,
        })?;

        debug!(handler, status = status.as_u16(), bytes = body.len(), "Engine responded");

        if !status.is_success() {
            return Err(TransportError::Status {
                handler: handler.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn get(&self, handler: &str, payload: &Payload) -> Result<String, TransportError> {
        let request = self.query_request(handler, payload)?;
        self.send(handler, request).await
    }

    async fn post(&self, handler: &str, body: &str) -> Result<String, TransportError> {
        let url = self.endpoint(handler)?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        self.send(handler, request).await
    }
}
