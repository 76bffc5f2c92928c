//! Pagination statistics.

use std::time::Duration;

use serde_json::Value;

use crate::document::Document;
use crate::error::ResponseError;
use crate::parameter::{DEFAULT_PAGE_SIZE, Parameter};

/// Document count, timing and pagination of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Information {
    /// Documents matching the query across all pages.
    pub document_count: u64,
    /// Time the engine reports it spent on the query.
    pub elapsed_time: Duration,
    /// Requested documents per page.
    pub page_size: u64,
    /// 1-based number of the returned page.
    pub page_number: u64,
    /// Number of pages needed for all matching documents.
    pub page_count: u64,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl Information {
    /// Derives pagination from the request window and the engine's counts.
    ///
    /// A zero `limit` yields zero pages and page number 1.
    pub fn calculate(offset: u64, limit: u64, elapsed_ms: u64, document_count: u64) -> Self {
        let (page_number, page_count) = if limit == 0 {
            (1, 0)
        } else {
            (offset / limit + 1, document_count.div_ceil(limit))
        };

        Self {
            document_count,
            elapsed_time: Duration::from_millis(elapsed_ms),
            page_size: limit,
            page_number,
            page_count,
            is_first_page: page_number == 1,
            is_last_page: page_number >= page_count,
            has_previous_page: page_number > 1,
            has_next_page: page_number < page_count,
        }
    }
}

/// Reads `response.numFound` and `responseHeader.QTime`, and the window
/// from the offset and limit parameters.
pub(crate) fn build<D: Document>(
    parameters: &[Parameter<D>],
    response: &Value,
) -> Result<Information, ResponseError> {
    let document_count = response
        .pointer("/response/numFound")
        .and_then(Value::as_u64)
        .ok_or_else(|| ResponseError::unexpected("missing response.numFound", response))?;
    let elapsed_ms = response
        .pointer("/responseHeader/QTime")
        .and_then(Value::as_u64)
        .ok_or_else(|| ResponseError::unexpected("missing responseHeader.QTime", response))?;

    let offset = parameters
        .iter()
        .find_map(|p| match p {
            Parameter::Offset(offset) => Some(offset.value()),
            _ => None,
        })
        .unwrap_or(0);
    let limit = parameters
        .iter()
        .find_map(|p| match p {
            Parameter::Limit(limit) => Some(limit.value()),
            _ => None,
        })
        .unwrap_or(DEFAULT_PAGE_SIZE);

    Ok(Information::calculate(offset, limit, elapsed_ms, document_count))
}
