//! Wire-format backends.
//!
//! A [`Backend`] knows how one engine API generation expects requests to be
//! written and where it puts facet counts in its responses. Backends are
//! selected at compile time through the `Queryable` type parameter and gated
//! by cargo features:
//!
//! - `legacy` - [`LegacyBackend`], `key=value` query strings
//! - `json` - [`JsonBackend`], structured JSON request bodies

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "legacy")]
pub mod legacy;

use std::fmt;

use serde_json::Value;

use crate::container::PayloadFormat;
use crate::document::Document;
use crate::error::ResponseError;
use crate::parameter::Parameter;

#[cfg(feature = "json")]
pub use json::JsonBackend;
#[cfg(feature = "legacy")]
pub use legacy::LegacyBackend;

/// Raw buckets of one range facet, as reported by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeBuckets {
    /// `(bucket start, count)` in the order reported.
    pub counts: Vec<(String, u64)>,
    /// Documents below the range start, when reported.
    pub before: Option<u64>,
    /// Documents above the range end, when reported.
    pub after: Option<u64>,
}

/// A request/response format of the search engine.
pub trait Backend: Send + Sync + 'static {
    /// Name used in logs.
    const NAME: &'static str;

    /// The payload format this backend produces.
    const FORMAT: PayloadFormat;

    /// Accumulator the parameters render into.
    type Carrier: Default + fmt::Debug;

    /// Renders one parameter into the carrier.
    fn render<D: Document>(parameter: &Parameter<D>, carrier: &mut Self::Carrier);

    /// Serializes the carrier into payload text.
    fn finish(carrier: Self::Carrier) -> String;

    /// Reads the `(value, count)` buckets of the field facet named `alias`.
    fn field_buckets(response: &Value, alias: &str) -> Result<Vec<(String, u64)>, ResponseError>;

    /// Reads the count of the query facet named `alias`.
    fn query_count(response: &Value, alias: &str) -> Result<u64, ResponseError>;

    /// Reads the buckets of the range facet named `alias`.
    fn range_buckets(response: &Value, alias: &str) -> Result<RangeBuckets, ResponseError>;
}

/// Renders a bucket value the engine may report as a string or a number.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads a non-negative whole count. `3.0` is accepted, `2.5` is not.
pub(crate) fn count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}
