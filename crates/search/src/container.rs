//! Rendering a parameter set into a wire payload.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::backends::Backend;
use crate::document::Document;
use crate::parameter::Parameter;

/// The wire format of a rendered payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadFormat {
    /// Form-encoded `key=value` pairs joined by `&`.
    QueryString,
    /// A JSON object sent as the request body.
    Json,
}

/// A rendered request, ready for the query interceptors and the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// How `body` is encoded.
    pub format: PayloadFormat,
    /// The request text.
    pub body: String,
}

impl Payload {
    /// Wraps rendered request text.
    pub fn new(format: PayloadFormat, body: impl Into<String>) -> Self {
        Self {
            format,
            body: body.into(),
        }
    }

    /// Decodes a query-string body into its `(key, value)` pairs.
    ///
    /// The body is `application/x-www-form-urlencoded`, so reserved
    /// characters inside values (`&`, `=`, `#`) come back intact. JSON
    /// bodies yield no pairs.
    pub fn pairs(&self) -> Vec<(String, String)> {
        match self.format {
            PayloadFormat::QueryString => form_urlencoded::parse(self.body.as_bytes())
                .into_owned()
                .collect(),
            PayloadFormat::Json => Vec::new(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

/// Collects the parameters of one query and renders them through backend `B`.
///
/// Parameters render in insertion order into one carrier. Kinds that coalesce
/// (sorts, field lists, facets keyed by alias) merge with the entry already
/// in the carrier instead of adding a second one. No validation happens here.
pub struct ParameterContainer<'a, B, D> {
    parameters: Vec<&'a Parameter<D>>,
    _backend: PhantomData<fn() -> B>,
}

impl<'a, B: Backend, D: Document> ParameterContainer<'a, B, D> {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
            _backend: PhantomData,
        }
    }

    /// Appends parameters, keeping their order.
    pub fn add_parameters<I>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = &'a Parameter<D>>,
    {
        self.parameters.extend(parameters);
    }

    /// Number of collected parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// True if nothing was added.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Renders every parameter into a fresh carrier.
    ///
    /// Calling this again with the same parameters yields the same payload.
    pub fn execute(&self) -> Payload {
        let mut carrier = B::Carrier::default();
        for &parameter in &self.parameters {
            B::render(parameter, &mut carrier);
        }
        Payload::new(B::FORMAT, B::finish(carrier))
    }
}

impl<B: Backend, D: Document> Default for ParameterContainer<'_, B, D> {
    fn default() -> Self {
        Self::new()
    }
}
