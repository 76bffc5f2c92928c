//! JSON request backend.
//!
//! Requests are JSON objects posted as the request body:
//!
//! ```json
//! {
//!   "query": "title:rust",
//!   "filter": ["{!tag=dt}city:rio"],
//!   "offset": 0,
//!   "limit": 10,
//!   "fields": ["*", "score"],
//!   "sort": "price desc,score asc",
//!   "facet": { "city": { "type": "terms", "field": "city", "mincount": 1 } },
//!   "params": { "defType": "edismax", "wt": "json" }
//! }
//! ```
//!
//! Facet counts come back under `facets`, keyed by alias.

mod parameter_handlers;
mod response;

use serde_json::{Map, Value};

use crate::backends::{Backend, RangeBuckets};
use crate::container::PayloadFormat;
use crate::document::Document;
use crate::error::ResponseError;
use crate::parameter::Parameter;

/// Accumulates a JSON request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRequest {
    body: Map<String, Value>,
    filters: Vec<Value>,
    fields: Vec<String>,
    facets: Map<String, Value>,
    params: Map<String, Value>,
}

impl JsonRequest {
    /// Sets a top-level member, replacing any earlier value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.body.insert(key.to_string(), value.into());
    }

    /// A top-level member.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// Removes a top-level member.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.body.remove(key)
    }

    /// Appends a filter query.
    pub fn push_filter(&mut self, filter: impl Into<String>) {
        self.filters.push(Value::String(filter.into()));
    }

    pub fn filters(&self) -> &[Value] {
        &self.filters
    }

    /// Appends to the returned field list.
    pub fn extend_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Sets the facet named `alias`, replacing an earlier facet with that alias.
    pub fn set_facet(&mut self, alias: &str, facet: Value) {
        self.facets.insert(alias.to_string(), facet);
    }

    pub fn facet(&self, alias: &str) -> Option<&Value> {
        self.facets.get(alias)
    }

    /// Adds an engine parameter. A repeated name collects its values in an array.
    pub fn add_param(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.params.get_mut(name) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.params.insert(name.to_string(), value);
            }
        }
    }

    /// Sets an engine parameter unless it is already present.
    pub fn param_if_absent(&mut self, name: &str, value: impl Into<Value>) {
        if !self.params.contains_key(name) {
            self.params.insert(name.to_string(), value.into());
        }
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Assembles the request object. Empty sections are left out.
    pub fn into_value(self) -> Value {
        let mut body = self.body;
        if !self.filters.is_empty() {
            body.insert("filter".to_string(), Value::Array(self.filters));
        }
        if !self.fields.is_empty() {
            body.insert(
                "fields".to_string(),
                Value::Array(self.fields.into_iter().map(Value::String).collect()),
            );
        }
        if !self.facets.is_empty() {
            body.insert("facet".to_string(), Value::Object(self.facets));
        }
        if !self.params.is_empty() {
            body.insert("params".to_string(), Value::Object(self.params));
        }
        Value::Object(body)
    }
}

/// The JSON request format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend;

impl Backend for JsonBackend {
    const NAME: &'static str = "json";
    const FORMAT: PayloadFormat = PayloadFormat::Json;

    type Carrier = JsonRequest;

    fn render<D: Document>(parameter: &Parameter<D>, carrier: &mut JsonRequest) {
        parameter_handlers::render(parameter, carrier);
    }

    fn finish(carrier: JsonRequest) -> String {
        carrier.into_value().to_string()
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

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_repeated_params_become_array() {
        let mut request = JsonRequest::default();
        request.add_param("facet.pivot", "a,b");
        request.add_param("facet.pivot", "c,d");
        request.add_param("facet.pivot", "e");
        request.add_param("debug", "true");
        assert_eq!(request.param("facet.pivot"), Some(&json!(["a,b", "c,d", "e"])));
        assert_eq!(request.param("debug"), Some(&json!("true")));
    }

    #[test]
    fn test_into_value_omits_empty_sections() {
        let mut request = JsonRequest::default();
        request.set("query", "*:*");
        assert_eq!(request.clone().into_value(), json!({ "query": "*:*" }));

        request.push_filter("a:1");
        request.extend_fields(["id"]);
        request.set_facet("a", json!({ "type": "terms", "field": "a" }));
        request.param_if_absent("wt", "json");
        request.param_if_absent("wt", "xml");
        assert_eq!(
            request.into_value(),
            json!({
                "query": "*:*",
                "filter": ["a:1"],
                "fields": ["id"],
                "facet": { "a": { "type": "terms", "field": "a" } },
                "params": { "wt": "json" }
            })
        );
    }

    #[test]
    fn test_finish_is_compact_json() {
        let mut request = JsonRequest::default();
        request.set("limit", 10);
        assert_eq!(JsonBackend::finish(request), r#"{"limit":10}"#);
    }
}
