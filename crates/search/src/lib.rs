//! Helios Search
//!
//! A typed client for a search engine's HTTP API. Callers declare a document
//! type and its field metadata, assemble a query from independent
//! parameters, and get back typed documents, facet counts and pagination
//! statistics.
//!
//! # Pipeline
//!
//! 1. Parameters are added to a [`Queryable`]. Duplicates of single-instance
//!    kinds are rejected, and with fail-fast validation on each parameter is
//!    checked against the document schema as it is added.
//! 2. [`Queryable::execute`] merges the global parameters and interceptors of
//!    the shared [`Configuration`], appends the engine defaults and the
//!    default pagination.
//! 3. A [`ParameterContainer`] renders the parameters through the selected
//!    [`Backend`] into a [`Payload`].
//! 4. Query interceptors rewrite the payload, the [`Provider`] sends it, and
//!    result interceptors rewrite the raw response.
//! 5. The [`QueryResult`] builds documents, facets and [`Information`] on
//!    demand.
//!
//! # Backend Features
//!
//! - `legacy` (default) - `key=value` query strings
//! - `json` (default) - structured JSON request bodies
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use helios_search::backends::JsonBackend;
//! use helios_search::document::{DynamicDocument, Field};
//! use helios_search::parameter::{FacetField, Parameter, QueryValue};
//! use helios_search::types::SortDirection;
//! use helios_search::{HttpProvider, Queryable, SearchResult};
//!
//! # async fn run() -> SearchResult<()> {
//! let provider = Arc::new(HttpProvider::new(
//!     "http://localhost:8983/solr",
//!     "products",
//!     std::time::Duration::from_secs(10),
//! )?);
//!
//! let mut query = Queryable::<DynamicDocument, JsonBackend>::new(provider);
//! query
//!     .parameter(Parameter::query(QueryValue::expression("title:rust")?))?
//!     .parameter(Parameter::sort(Field::new("price"), SortDirection::Ascending))?
//!     .parameter(FacetField::new(Field::new("brand")))?
//!     .parameter(Parameter::limit(20))?;
//!
//! let result = query.execute().await?;
//! let documents = result.documents()?;
//! let information = result.information()?;
//! println!("{} of {} documents", documents.len(), information.document_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod config;
pub mod container;
pub mod document;
pub mod error;
pub mod interceptor;
pub mod parameter;
pub mod provider;
pub mod queryable;
pub mod result;
pub mod types;
pub mod update;

pub use backends::Backend;
#[cfg(feature = "json")]
pub use backends::JsonBackend;
#[cfg(feature = "legacy")]
pub use backends::LegacyBackend;
pub use config::{ClientConfig, Configuration, WireFormat};
pub use container::{ParameterContainer, Payload, PayloadFormat};
pub use document::{Document, DocumentSchema, DynamicDocument, Field, FieldDescriptor, FieldKind};
pub use error::{
    BoxError, ConfigurationError, ResponseError, SearchError, SearchResult, TransportError,
};
pub use interceptor::{
    FileLogQueryInterceptor, LogQueryInterceptor, QueryInterceptor, ResultInterceptor,
};
pub use parameter::{Parameter, ParameterKind, QueryValue, Validate};
pub use provider::{HttpProvider, Provider};
pub use queryable::{Queryable, SELECT_HANDLER};
pub use result::{Information, QueryResult};
pub use update::{DocumentDelete, DocumentUpdate, UPDATE_HANDLER, Updatable};
