//! Sort parameters.
//!
//! Every sort parameter coalesces into a single `sort` entry. The most
//! recently added key becomes the primary one, so adding `a asc` then
//! `b desc` renders `b desc,a asc`.

use crate::document::{Document, Field};
use crate::parameter::Validate;
use crate::types::SortDirection;

/// Orders results by a document field.
#[derive(Debug, Clone)]
pub struct Sort<D> {
    field: Field<D>,
    direction: SortDirection,
}

impl<D: Document> Sort<D> {
    /// Sorts on `field` in `direction`.
    pub fn new(field: Field<D>, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Ascending sort on `field`.
    pub fn ascending(field: Field<D>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Descending sort on `field`.
    pub fn descending(field: Field<D>) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// The sorted field.
    pub fn field(&self) -> &Field<D> {
        &self.field
    }

    /// The sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// The sort key as rendered on the wire, e.g. `price desc`.
    pub fn sort_key(&self) -> String {
        format!("{} {}", self.field, self.direction)
    }
}

impl<D: Document> Validate for Sort<D> {
    fn validate(&self) -> Result<(), String> {
        self.field.require_indexed(&format!(
            "field \"{}\" must be indexed to be used in a sort",
            self.field
        ))
    }
}

/// Orders results randomly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomSort {
    direction: SortDirection,
}

impl RandomSort {
    /// Random ordering in `direction`.
    pub fn new(direction: SortDirection) -> Self {
        Self { direction }
    }

    /// The sort key as rendered on the wire.
    pub fn sort_key(&self) -> String {
        format!("random {}", self.direction)
    }
}

/// Places `key` in front of the keys already in `previous`.
pub(crate) fn merge_sort_keys(key: &str, previous: Option<&str>) -> String {
    match previous {
        Some(previous) if !previous.is_empty() => format!("{},{}", key, previous),
        _ => key.to_string(),
    }
}
