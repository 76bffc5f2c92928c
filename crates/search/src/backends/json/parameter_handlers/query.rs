//! The main query.

use crate::backends::json::JsonRequest;
use crate::document::Document;
use crate::parameter::Query;

pub(super) fn render_query<D: Document>(parameter: &Query<D>, carrier: &mut JsonRequest) {
    carrier.set("query", parameter.value().to_string());
}
