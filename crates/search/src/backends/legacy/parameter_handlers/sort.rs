//! `sort`, merged into a single entry.

use crate::backends::legacy::QueryString;
use crate::document::Document;
use crate::parameter::{RandomSort, Sort, merge_sort_keys};

fn merge(carrier: &mut QueryString, key: &str) {
    let previous = carrier.remove("sort");
    carrier.push("sort", merge_sort_keys(key, previous.as_deref()));
}

pub(super) fn render_sort<D: Document>(parameter: &Sort<D>, carrier: &mut QueryString) {
    merge(carrier, &parameter.sort_key());
}

pub(super) fn render_random(parameter: &RandomSort, carrier: &mut QueryString) {
    merge(carrier, &parameter.sort_key());
}
