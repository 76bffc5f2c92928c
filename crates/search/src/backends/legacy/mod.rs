//! Query-string backend.
//!
//! Requests are ordered `key=value` pairs joined by `&`, sent as the query
//! string of a GET request. Facet counts come back under `facet_counts`.

mod parameter_handlers;
mod response;

use serde_json::Value;
use url::form_urlencoded;

use crate::backends::{Backend, RangeBuckets};
use crate::container::PayloadFormat;
use crate::document::Document;
use crate::error::ResponseError;
use crate::parameter::Parameter;

/// Ordered `key=value` pairs of a query-string request.
///
/// Keys may repeat (`fq`, `facet.field`, ...). Pairs are kept decoded here;
/// `finish` form-encodes them into the payload body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Appends a pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Appends a pair unless `key` is already present.
    pub fn push_if_absent(&mut self, key: &str, value: impl Into<String>) {
        if !self.contains_key(key) {
            self.push(key, value);
        }
    }

    /// True if any pair has `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// The value of the first pair with `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes the first pair with `key` and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(index).1)
    }

    /// The pairs in order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The query-string request format.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBackend;

impl Backend for LegacyBackend {
    const NAME: &'static str = "legacy";
    const FORMAT: PayloadFormat = PayloadFormat::QueryString;

    type Carrier = QueryString;

    fn render<D: Document>(parameter: &Parameter<D>, carrier: &mut QueryString) {
        parameter_handlers::render(parameter, carrier);
    }

    fn finish(carrier: QueryString) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(carrier.pairs.iter())
            .finish()
    }

    fn field_buckets(response: &Value, alias: &str) -> Result<Vec<(String, u64)>, ResponseError> {
        response::field_buckets(response, alias)
    }

    fn query_count(response: &Value, alias: &str) -> Result<u64, ResponseError> {
        response::query_count(response, alias)
    }

    fn range_buckets(response: &Value, alias: &str) -> Result<RangeBuckets, ResponseError> {
        response::range_buckets(response, alias)
    }
}
