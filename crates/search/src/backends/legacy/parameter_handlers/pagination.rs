//! `start` and `rows`.

use crate::backends::legacy::QueryString;
use crate::parameter::{Limit, Offset};

pub(super) fn render_offset(parameter: &Offset, carrier: &mut QueryString) {
    carrier.push("start", parameter.value().to_string());
}

pub(super) fn render_limit(parameter: &Limit, carrier: &mut QueryString) {
    carrier.push("rows", parameter.value().to_string());
}
