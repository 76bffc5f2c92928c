//! Spatial filter: `fq`, `pt` and `d`.

use crate::backends::legacy::QueryString;
use crate::document::Document;
use crate::parameter::SpatialFilter;

pub(super) fn render_filter<D: Document>(parameter: &SpatialFilter<D>, carrier: &mut QueryString) {
    carrier.push(
        "fq",
        format!("{{!{} sfield={}}}", parameter.function(), parameter.field()),
    );
    carrier.push("pt", parameter.center().to_string());
    carrier.push("d", parameter.distance().to_string());
}
