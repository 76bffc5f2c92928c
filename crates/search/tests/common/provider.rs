//! A provider that records requests and answers with a canned response.

use async_trait::async_trait;
use parking_lot::Mutex;

use helios_search::error::TransportError;
use helios_search::{Payload, Provider};

/// Records every request and answers with a fixed body or status.
pub struct MockProvider {
    response: String,
    status: Option<u16>,
    gets: Mutex<Vec<(String, Payload)>>,
    posts: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    /// Answers every request with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: None,
            gets: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request with `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::new("")
        }
    }

    /// Queries received so far, as `(handler, payload)`.
    pub fn gets(&self) -> Vec<(String, Payload)> {
        self.gets.lock().clone()
    }

    /// Posts received so far, as `(handler, body)`.
    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().clone()
    }

    /// The payload of the last query.
    pub fn last_payload(&self) -> Payload {
        self.gets
            .lock()
            .last()
            .map(|(_, payload)| payload.clone())
            .expect("no query was sent")
    }

    fn answer(&self, handler: &str) -> Result<String, TransportError> {
        match self.status {
            Some(status) => Err(TransportError::Status {
                handler: handler.to_string(),
                status,
                body: "unavailable".to_string(),
            }),
            None => Ok(self.response.clone()),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn get(&self, handler: &str, payload: &Payload) -> Result<String, TransportError> {
        self.gets.lock().push((handler.to_string(), payload.clone()));
        self.answer(handler)
    }

    async fn post(&self, handler: &str, body: &str) -> Result<String, TransportError> {
        self.posts.lock().push((handler.to_string(), body.to_string()));
        self.answer(handler)
    }
}
