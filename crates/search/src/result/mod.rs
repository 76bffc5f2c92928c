//! Query results.
//!
//! A [`QueryResult`] keeps the final parameter list of the query together
//! with the parsed response and builds each part on demand. Every builder
//! fails with [`ResponseError::UnexpectedFormat`] when the part of the
//! response it needs is missing. Facet builders return an empty list when
//! the query carried no facet of their kind.

mod document;
mod facet;
mod information;

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::backends::Backend;
use crate::document::Document;
use crate::error::ResponseError;
use crate::parameter::Parameter;

pub use facet::{FacetFieldResult, FacetQueryResult, FacetRangeResult, FacetRangeValue, FacetValue};
pub use information::Information;

/// The outcome of one executed query.
pub struct QueryResult<D, B> {
    parameters: Vec<Parameter<D>>,
    response: Value,
    _backend: PhantomData<fn() -> B>,
}

impl<D: Document, B: Backend> QueryResult<D, B> {
    /// Parses the raw response text.
    pub fn new(parameters: Vec<Parameter<D>>, raw: &str) -> Result<Self, ResponseError> {
        let response = serde_json::from_str(raw).map_err(|e| ResponseError::UnexpectedFormat {
            reason: format!("invalid JSON: {}", e),
            response: raw.to_string(),
        })?;
        Ok(Self::from_value(parameters, response))
    }

    /// Wraps an already parsed response.
    pub fn from_value(parameters: Vec<Parameter<D>>, response: Value) -> Self {
        Self {
            parameters,
            response,
            _backend: PhantomData,
        }
    }

    /// The typed documents of the returned page.
    pub fn documents(&self) -> Result<Vec<D>, ResponseError> {
        document::build(&self.response)
    }

    /// Document count, timing and pagination.
    pub fn information(&self) -> Result<Information, ResponseError> {
        information::build(&self.parameters, &self.response)
    }

    /// One result per field facet, in parameter order.
    pub fn facet_fields(&self) -> Result<Vec<FacetFieldResult>, ResponseError> {
        facet::build_fields::<D, B>(&self.parameters, &self.response)
    }

    /// One result per query and spatial facet, in parameter order.
    pub fn facet_queries(&self) -> Result<Vec<FacetQueryResult>, ResponseError> {
        facet::build_queries::<D, B>(&self.parameters, &self.response)
    }

    /// One result per range facet, in parameter order.
    pub fn facet_ranges(&self) -> Result<Vec<FacetRangeResult>, ResponseError> {
        facet::build_ranges::<D, B>(&self.parameters, &self.response)
    }

    /// The parameters the query was rendered from, engine defaults included.
    pub fn parameters(&self) -> &[Parameter<D>] {
        &self.parameters
    }

    /// The parsed response.
    pub fn raw(&self) -> &Value {
        &self.response
    }
}

impl<D: Document, B: Backend> fmt::Debug for QueryResult<D, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResult")
            .field("backend", &B::NAME)
            .field("parameters", &self.parameters.len())
            .finish_non_exhaustive()
    }
}
