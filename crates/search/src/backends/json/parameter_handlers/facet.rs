//! Facets, keyed by alias under `facet`.

use serde_json::{Map, Value, json};

use crate::backends::json::JsonRequest;
use crate::document::Document;
use crate::parameter::{FacetField, FacetQuery, FacetRange, FacetSpatial};
use crate::types::FacetSortType;

fn sort_value(sort: FacetSortType) -> Value {
    let (criterion, direction) = sort.parts();
    Value::String(format!("{} {}", criterion, direction))
}

fn with_excludes(mut facet: Map<String, Value>, excludes: &[String]) -> Value {
    if !excludes.is_empty() {
        facet.insert("domain".to_string(), json!({ "excludeTags": excludes }));
    }
    Value::Object(facet)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub(super) fn render_field<D: Document>(parameter: &FacetField<D>, carrier: &mut JsonRequest) {
    let mut facet = object(json!({
        "type": "terms",
        "field": parameter.field().name(),
        "mincount": 1
    }));
    if let Some(sort) = parameter.sort() {
        facet.insert("sort".to_string(), sort_value(sort));
    }
    if let Some(limit) = parameter.limit() {
        facet.insert("limit".to_string(), Value::from(limit));
    }
    carrier.set_facet(parameter.alias(), with_excludes(facet, parameter.excludes()));
}

pub(super) fn render_query<D: Document>(parameter: &FacetQuery<D>, carrier: &mut JsonRequest) {
    let facet = object(json!({
        "type": "query",
        "q": parameter.query().to_string()
    }));
    carrier.set_facet(parameter.alias(), with_excludes(facet, parameter.excludes()));
}

pub(super) fn render_range<D: Document>(parameter: &FacetRange<D>, carrier: &mut JsonRequest) {
    let mut facet = object(json!({
        "type": "range",
        "field": parameter.field().name(),
        "start": parameter.start(),
        "end": parameter.end(),
        "gap": parameter.gap(),
        "mincount": 1,
        "other": ["before", "after"]
    }));
    if let Some(sort) = parameter.sort() {
        facet.insert("sort".to_string(), sort_value(sort));
    }
    carrier.set_facet(parameter.alias(), with_excludes(facet, parameter.excludes()));
}

pub(super) fn render_spatial<D: Document>(parameter: &FacetSpatial<D>, carrier: &mut JsonRequest) {
    let facet = object(json!({
        "type": "query",
        "q": parameter.expression()
    }));
    carrier.set_facet(parameter.alias(), with_excludes(facet, parameter.excludes()));
}
