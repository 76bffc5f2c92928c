//! Per-kind rendering into a [`QueryString`].

mod facet;
mod pagination;
mod query;
mod sort;
mod spatial;
mod system;

use super::QueryString;
use crate::document::Document;
use crate::parameter::Parameter;

/// Dispatches a parameter to the handler for its kind.
pub(super) fn render<D: Document>(parameter: &Parameter<D>, carrier: &mut QueryString) {
    match parameter {
        Parameter::Any(p) => query::render_any(p, carrier),
        Parameter::Boost(p) => query::render_boost(p, carrier),
        Parameter::FacetField(p) => facet::render_field(p, carrier),
        Parameter::FacetLimit(p) => facet::render_limit(p, carrier),
        Parameter::FacetQuery(p) => facet::render_query(p, carrier),
        Parameter::FacetRange(p) => facet::render_range(p, carrier),
        Parameter::FacetSpatial(p) => facet::render_spatial(p, carrier),
        Parameter::Fields(p) => query::render_fields(p, carrier),
        Parameter::Filter(p) => query::render_filter(p, carrier),
        Parameter::Limit(p) => pagination::render_limit(p, carrier),
        Parameter::MinimumShouldMatch(p) => query::render_minimum_should_match(p, carrier),
        Parameter::Offset(p) => pagination::render_offset(p, carrier),
        Parameter::Query(p) => query::render_query(p, carrier),
        Parameter::QueryField(p) => query::render_query_field(p, carrier),
        Parameter::RandomSort(p) => sort::render_random(p, carrier),
        Parameter::Sort(p) => sort::render_sort(p, carrier),
        Parameter::SpatialFilter(p) => spatial::render_filter(p, carrier),
        Parameter::System(_) => system::render(carrier),
    }
}
