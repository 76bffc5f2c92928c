//! Per-kind rendering into a [`JsonRequest`].

mod facet;
mod query;
mod sort;
mod system;

use serde_json::Value;

use super::JsonRequest;
use crate::document::Document;
use crate::parameter::Parameter;

/// Dispatches a parameter to the handler for its kind.
pub(super) fn render<D: Document>(parameter: &Parameter<D>, carrier: &mut JsonRequest) {
    match parameter {
        Parameter::Any(p) => carrier.add_param(p.name(), p.value()),
        Parameter::Boost(p) => carrier.add_param(p.function().as_str(), p.value().to_string()),
        Parameter::FacetField(p) => facet::render_field(p, carrier),
        Parameter::FacetLimit(p) => carrier.add_param("facet.limit", p.value()),
        Parameter::FacetQuery(p) => facet::render_query(p, carrier),
        Parameter::FacetRange(p) => facet::render_range(p, carrier),
        Parameter::FacetSpatial(p) => facet::render_spatial(p, carrier),
        Parameter::Fields(p) => carrier.extend_fields(p.names()),
        Parameter::Filter(p) => carrier.push_filter(p.expression()),
        Parameter::Limit(p) => carrier.set("limit", Value::from(p.value())),
        Parameter::MinimumShouldMatch(p) => carrier.add_param("mm", p.expression()),
        Parameter::Offset(p) => carrier.set("offset", Value::from(p.value())),
        Parameter::Query(p) => query::render_query(p, carrier),
        Parameter::QueryField(p) => carrier.add_param("qf", p.expression()),
        Parameter::RandomSort(p) => sort::merge(carrier, &p.sort_key()),
        Parameter::Sort(p) => sort::merge(carrier, &p.sort_key()),
        Parameter::SpatialFilter(p) => carrier.push_filter(p.expression()),
        Parameter::System(_) => system::render(carrier),
    }
}
