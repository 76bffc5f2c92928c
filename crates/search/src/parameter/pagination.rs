//! Pagination parameters.

/// Number of documents returned when the caller sets no limit.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Index of the first document to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    value: u64,
}

impl Offset {
    /// Skips the first `value` documents.
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// The number of documents skipped.
    pub fn value(&self) -> u64 {
        self.value
    }
}

/// Maximum number of documents to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    value: u64,
}

impl Limit {
    /// Returns at most `value` documents.
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// The page size.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
