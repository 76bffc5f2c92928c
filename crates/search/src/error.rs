//! Error types for the search client.
//!
//! Errors are split by the stage of the query pipeline that raises them:
//! configuration errors are raised while a query is being assembled and
//! before any network activity, response errors while the engine's reply is
//! being interpreted, and transport errors by the [`Provider`](crate::Provider)
//! collaborator.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::parameter::ParameterKind;

/// Boxed error returned by interceptors and other caller-supplied hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type for all query operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Query assembly errors
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Response interpretation errors
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Transport errors, passed through as produced by the provider
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An interceptor rejected the text it was given.
    #[error("interceptor {interceptor} failed: {source}")]
    Interceptor {
        interceptor: String,
        #[source]
        source: BoxError,
    },
}

/// Errors raised while a query is being configured.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A parameter of a single-instance kind was added twice.
    #[error(
        "parameter \"{kind}\" is not allowed because another instance of the same kind was added"
    )]
    DuplicateParameter { kind: ParameterKind },

    /// A parameter failed its own validation.
    #[error("parameter \"{kind}\" is invalid: {message}")]
    InvalidParameter {
        kind: ParameterKind,
        message: String,
    },

    /// A required argument was empty.
    #[error("argument '{argument}' must not be empty")]
    EmptyArgument { argument: &'static str },

    /// An argument was present but unusable.
    #[error("invalid argument '{argument}': {message}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },
}

/// Errors raised while interpreting the engine's response.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// The response does not have the shape a result builder requires.
    #[error("unexpected response format ({reason}): {response}")]
    UnexpectedFormat { reason: String, response: String },

    /// The response has the right shape but its documents do not fit the
    /// document type.
    #[error("failed to deserialize documents ({message}): {response}")]
    Deserialization { message: String, response: String },
}

impl ResponseError {
    /// Creates an [`ResponseError::UnexpectedFormat`] carrying the raw response.
    pub fn unexpected(reason: impl Into<String>, response: &serde_json::Value) -> Self {
        ResponseError::UnexpectedFormat {
            reason: reason.into(),
            response: response.to_string(),
        }
    }
}

/// Errors produced by the HTTP transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The configured base URL or handler does not form a valid URL.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {message}")]
    Client { message: String },

    /// The request could not be sent or its body could not be read.
    #[error("request to handler '{handler}' failed: {source}")]
    Request {
        handler: String,
        #[source]
        source: reqwest::Error,
    },

    /// The engine answered with a non-success status.
    #[error("handler '{handler}' returned status {status}: {body}")]
    Status {
        handler: String,
        status: u16,
        body: String,
    },
}

/// Result type alias for query operations.
pub type SearchResult<T> = Result<T, SearchError>;
