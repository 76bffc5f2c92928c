//! Facet results.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backends::{Backend, RangeBuckets};
use crate::document::Document;
use crate::error::ResponseError;
use crate::parameter::Parameter;
use crate::types::datetime;

/// One bucket of a field facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub key: String,
    pub quantity: u64,
}

/// The buckets of one field facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFieldResult {
    /// The facet alias.
    pub name: String,
    pub values: Vec<FacetValue>,
}

/// The count of one query or spatial facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetQueryResult {
    /// The facet alias.
    pub name: String,
    pub quantity: u64,
}

/// One bucket of a range facet, covering `[minimum, maximum)`.
///
/// `None` marks an open end: the "before" bucket has no minimum and the
/// "after" bucket has no maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetRangeValue {
    pub minimum: Option<String>,
    pub maximum: Option<String>,
    pub quantity: u64,
}

/// The buckets of one range facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetRangeResult {
    /// The facet alias.
    pub name: String,
    pub values: Vec<FacetRangeValue>,
}

pub(crate) fn build_fields<D: Document, B: Backend>(
    parameters: &[Parameter<D>],
    response: &Value,
) -> Result<Vec<FacetFieldResult>, ResponseError> {
    parameters
        .iter()
        .filter_map(|p| match p {
            Parameter::FacetField(facet) => Some(facet.alias()),
            _ => None,
        })
        .map(|alias| {
            let values = B::field_buckets(response, alias)?
                .into_iter()
                .map(|(key, quantity)| FacetValue { key, quantity })
                .collect();
            Ok(FacetFieldResult {
                name: alias.to_string(),
                values,
            })
        })
        .collect()
}

pub(crate) fn build_queries<D: Document, B: Backend>(
    parameters: &[Parameter<D>],
    response: &Value,
) -> Result<Vec<FacetQueryResult>, ResponseError> {
    parameters
        .iter()
        .filter_map(|p| match p {
            Parameter::FacetQuery(facet) => Some(facet.alias()),
            Parameter::FacetSpatial(facet) => Some(facet.alias()),
            _ => None,
        })
        .map(|alias| {
            Ok(FacetQueryResult {
                name: alias.to_string(),
                quantity: B::query_count(response, alias)?,
            })
        })
        .collect()
}

pub(crate) fn build_ranges<D: Document, B: Backend>(
    parameters: &[Parameter<D>],
    response: &Value,
) -> Result<Vec<FacetRangeResult>, ResponseError> {
    parameters
        .iter()
        .filter_map(|p| match p {
            Parameter::FacetRange(facet) => Some(facet),
            _ => None,
        })
        .map(|facet| {
            let buckets = B::range_buckets(response, facet.alias())?;
            Ok(FacetRangeResult {
                name: facet.alias().to_string(),
                values: range_values(buckets, facet.start(), facet.end(), facet.gap()),
            })
        })
        .collect()
}

/// Turns bucket starts into `[start, start + gap)` intervals capped at the
/// range end, framed by the before/after buckets.
///
/// Buckets the engine omitted (below mincount) leave no gap in the bounds of
/// their neighbours. When the gap is neither numeric nor date math, a bucket
/// is closed by the next reported start instead.
fn range_values(
    buckets: RangeBuckets,
    start: &str,
    end: &str,
    gap: &str,
) -> Vec<FacetRangeValue> {
    let mut values = Vec::with_capacity(buckets.counts.len() + 2);

    if let Some(quantity) = buckets.before {
        values.push(FacetRangeValue {
            minimum: None,
            maximum: Some(start.to_string()),
            quantity,
        });
    }

    let mut counts = buckets.counts.into_iter().peekable();
    while let Some((minimum, quantity)) = counts.next() {
        let maximum = bucket_end(&minimum, gap, end)
            .or_else(|| counts.peek().map(|(next, _)| next.clone()))
            .unwrap_or_else(|| end.to_string());
        values.push(FacetRangeValue {
            minimum: Some(minimum),
            maximum: Some(maximum),
            quantity,
        });
    }

    if let Some(quantity) = buckets.after {
        values.push(FacetRangeValue {
            minimum: Some(end.to_string()),
            maximum: None,
            quantity,
        });
    }

    values
}

/// `minimum + gap`, or `end` when that passes it.
fn bucket_end(minimum: &str, gap: &str, end: &str) -> Option<String> {
    let step = gap.strip_prefix('+').unwrap_or(gap);
    if let (Ok(lower), Ok(step)) = (Decimal::from_str(minimum), Decimal::from_str(step)) {
        let upper = lower.checked_add(step)?;
        return Some(match Decimal::from_str(end) {
            Ok(limit) if upper > limit => end.to_string(),
            _ => upper.to_string(),
        });
    }

    let lower = datetime::parse(minimum).ok()?;
    let upper = datetime::add_gap(lower, gap)?;
    Some(match datetime::parse(end) {
        Ok(limit) if upper > limit => end.to_string(),
        _ => datetime::format(&upper),
    })
}
