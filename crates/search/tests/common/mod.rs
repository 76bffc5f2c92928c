//! Test infrastructure for the search client.
//!
//! - [`fixtures`] - a document type with a declared schema and canned engine responses
//! - [`provider`] - a recording [`Provider`](helios_search::Provider) double

#![allow(dead_code)]

pub mod fixtures;
pub mod provider;

pub use fixtures::*;
pub use provider::*;
