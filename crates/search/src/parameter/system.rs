//! Engine-required request defaults.

/// Request defaults the engine needs to answer in the expected shape.
///
/// The queryable appends one instance to every query just before it is
/// rendered. Each default is written only when the rendered request does not
/// already carry that key, so caller-supplied values always win. The lookup is
/// by key, per wire format, never by comparing rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemParameter {
    _private: (),
}

impl SystemParameter {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// Engine parameters shared by both wire formats, as `(key, value)`.
pub(crate) const ENGINE_DEFAULTS: &[(&str, &str)] = &[
    ("echoParams", "none"),
    ("wt", "json"),
    ("indent", "off"),
    ("defType", "edismax"),
    ("q.alt", "*:*"),
    ("df", "id"),
];

/// Query matching every document.
pub(crate) const DEFAULT_QUERY: &str = "*:*";

/// Field list returning all stored fields plus the score.
pub(crate) const DEFAULT_FIELDS: &[&str] = &["*", "score"];

/// Relevance ordering.
pub(crate) const DEFAULT_SORT: &str = "score asc";
