//! Sorts merge into the top-level `sort` string.

use serde_json::Value;

use crate::backends::json::JsonRequest;
use crate::parameter::merge_sort_keys;

pub(super) fn merge(carrier: &mut JsonRequest, key: &str) {
    let previous = match carrier.remove("sort") {
        Some(Value::String(previous)) => Some(previous),
        _ => None,
    };
    carrier.set("sort", merge_sort_keys(key, previous.as_deref()));
}
