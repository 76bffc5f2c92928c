//! Facet sections of a JSON response.
//!
//! ```json
//! "facets": {
//!   "count": 42,
//!   "city": { "buckets": [{ "val": "rio", "count": 10 }] },
//!   "cheap": { "count": 12 },
//!   "prices": { "buckets": [{ "val": 0, "count": 3 }], "before": { "count": 0 }, "after": { "count": 1 } }
//! }
//! ```

use serde_json::Value;

use crate::backends::{RangeBuckets, count, value_text};
use crate::error::ResponseError;

fn facet<'a>(response: &'a Value, alias: &str) -> Result<&'a Value, ResponseError> {
    response
        .get("facets")
        .and_then(|facets| facets.get(alias))
        .ok_or_else(|| ResponseError::unexpected(format!("missing facets.{}", alias), response))
}

fn buckets(
    facet: &Value,
    alias: &str,
    response: &Value,
) -> Result<Vec<(String, u64)>, ResponseError> {
    let path = format!("facets.{}.buckets", alias);
    let items = facet
        .get("buckets")
        .and_then(Value::as_array)
        .ok_or_else(|| ResponseError::unexpected(format!("missing {}", path), response))?;
    items
        .iter()
        .map(|bucket| {
            let value = bucket.get("val");
            let quantity = bucket.get("count").and_then(count);
            match (value, quantity) {
                (Some(value), Some(quantity)) => Ok((value_text(value), quantity)),
                _ => Err(ResponseError::unexpected(
                    format!("{} holds a bucket without val/count", path),
                    response,
                )),
            }
        })
        .collect()
}

pub(super) fn field_buckets(
    response: &Value,
    alias: &str,
) -> Result<Vec<(String, u64)>, ResponseError> {
    buckets(facet(response, alias)?, alias, response)
}

pub(super) fn query_count(response: &Value, alias: &str) -> Result<u64, ResponseError> {
    facet(response, alias)?
        .get("count")
        .and_then(count)
        .ok_or_else(|| ResponseError::unexpected(format!("missing facets.{}.count", alias), response))
}

pub(super) fn range_buckets(response: &Value, alias: &str) -> Result<RangeBuckets, ResponseError> {
    let range = facet(response, alias)?;
    let other = |name: &str| range.get(name).and_then(|o| o.get("count")).and_then(count);
    Ok(RangeBuckets {
        counts: buckets(range, alias, response)?,
        before: other("before"),
        after: other("after"),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response() -> Value {
        json!({
            "facets": {
                "count": 42,
                "city": { "buckets": [{ "val": "rio", "count": 10 }, { "val": "recife", "count": 4 }] },
                "cheap": { "count": 12 },
                "prices": {
                    "buckets": [{ "val": 0, "count": 3 }, { "val": 10, "count": 5 }],
                    "before": { "count": 0 },
                    "after": { "count": 1 }
                },
                "broken": { "buckets": [{ "val": "x" }] }
            }
        })
    }

    #[test]
    fn test_field_buckets() {
        assert_eq!(
            field_buckets(&response(), "city").unwrap(),
            vec![("rio".to_string(), 10), ("recife".to_string(), 4)]
        );
        assert!(field_buckets(&response(), "broken").is_err());
        assert!(field_buckets(&response(), "cheap").is_err());
    }

    #[test]
    fn test_missing_facet_embeds_response() {
        let err = field_buckets(&json!({ "response": {} }), "city").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("facets.city"));
        assert!(message.contains("\"response\""));
    }

    #[test]
    fn test_query_count() {
        assert_eq!(query_count(&response(), "cheap").unwrap(), 12);
        assert!(query_count(&response(), "missing").is_err());
    }

    #[test]
    fn test_range_buckets() {
        let range = range_buckets(&response(), "prices").unwrap();
        assert_eq!(range.counts, vec![("0".to_string(), 3), ("10".to_string(), 5)]);
        assert_eq!(range.before, Some(0));
        assert_eq!(range.after, Some(1));
    }
}
