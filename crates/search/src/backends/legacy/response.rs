//! Facet sections of a query-string response.
//!
//! ```json
//! "facet_counts": {
//!   "facet_queries": { "cheap": 12 },
//!   "facet_fields": { "city": ["rio", 10, "recife", 4] },
//!   "facet_ranges": { "prices": { "counts": ["0", 3, "10", 5], "before": 0, "after": 1 } }
//! }
//! ```

use serde_json::Value;

use crate::backends::{RangeBuckets, count, value_text};
use crate::error::ResponseError;

fn section<'a>(response: &'a Value, name: &str) -> Result<&'a Value, ResponseError> {
    response
        .get("facet_counts")
        .and_then(|counts| counts.get(name))
        .ok_or_else(|| ResponseError::unexpected(format!("missing facet_counts.{}", name), response))
}

/// Reads a flat `[value, count, value, count, ...]` array.
fn flat_pairs(
    array: &Value,
    path: &str,
    response: &Value,
) -> Result<Vec<(String, u64)>, ResponseError> {
    let items = array
        .as_array()
        .ok_or_else(|| ResponseError::unexpected(format!("{} is not an array", path), response))?;
    if items.len() % 2 != 0 {
        return Err(ResponseError::unexpected(
            format!("{} has an odd number of entries", path),
            response,
        ));
    }
    items
        .chunks(2)
        .map(|pair| {
            let quantity = count(&pair[1]).ok_or_else(|| {
                ResponseError::unexpected(format!("{} holds a non-numeric count", path), response)
            })?;
            Ok((value_text(&pair[0]), quantity))
        })
        .collect()
}

pub(super) fn field_buckets(
    response: &Value,
    alias: &str,
) -> Result<Vec<(String, u64)>, ResponseError> {
    let path = format!("facet_counts.facet_fields.{}", alias);
    let array = section(response, "facet_fields")?
        .get(alias)
        .ok_or_else(|| ResponseError::unexpected(format!("missing {}", path), response))?;
    flat_pairs(array, &path, response)
}

pub(super) fn query_count(response: &Value, alias: &str) -> Result<u64, ResponseError> {
    let path = format!("facet_counts.facet_queries.{}", alias);
    section(response, "facet_queries")?
        .get(alias)
        .and_then(count)
        .ok_or_else(|| ResponseError::unexpected(format!("missing {}", path), response))
}

pub(super) fn range_buckets(response: &Value, alias: &str) -> Result<RangeBuckets, ResponseError> {
    let path = format!("facet_counts.facet_ranges.{}", alias);
    let range = section(response, "facet_ranges")?
        .get(alias)
        .ok_or_else(|| ResponseError::unexpected(format!("missing {}", path), response))?;
    let counts = range.get("counts").ok_or_else(|| {
        ResponseError::unexpected(format!("missing {}.counts", path), response)
    })?;

    Ok(RangeBuckets {
        counts: flat_pairs(counts, &format!("{}.counts", path), response)?,
        before: range.get("before").and_then(count),
        after: range.get("after").and_then(count),
    })
}
