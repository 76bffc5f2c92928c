//! Query, filter, boost, field list and pass-through parameters.

use crate::backends::legacy::QueryString;
use crate::document::Document;
use crate::parameter::{Any, Boost, Fields, Filter, MinimumShouldMatch, Query, QueryField};

pub(super) fn render_query<D: Document>(parameter: &Query<D>, carrier: &mut QueryString) {
    carrier.push("q", parameter.value().to_string());
}

pub(super) fn render_filter<D: Document>(parameter: &Filter<D>, carrier: &mut QueryString) {
    carrier.push("fq", parameter.expression());
}

pub(super) fn render_boost<D: Document>(parameter: &Boost<D>, carrier: &mut QueryString) {
    carrier.push(parameter.function().as_str(), parameter.value().to_string());
}

pub(super) fn render_query_field(parameter: &QueryField, carrier: &mut QueryString) {
    carrier.push("qf", parameter.expression());
}

pub(super) fn render_minimum_should_match(parameter: &MinimumShouldMatch, carrier: &mut QueryString) {
    carrier.push("mm", parameter.expression());
}

pub(super) fn render_any(parameter: &Any, carrier: &mut QueryString) {
    carrier.push(parameter.name(), parameter.value());
}

/// Appends to the existing `fl` entry, or starts one.
pub(super) fn render_fields<D: Document>(parameter: &Fields<D>, carrier: &mut QueryString) {
    let names = parameter.names().join(",");
    let merged = match carrier.remove("fl") {
        Some(previous) if !previous.is_empty() => format!("{},{}", previous, names),
        _ => names,
    };
    carrier.push("fl", merged);
}
