//! The per-document-type query orchestrator.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::backends::Backend;
use crate::config::Configuration;
use crate::container::{ParameterContainer, Payload};
use crate::document::Document;
use crate::error::{ConfigurationError, SearchResult};
use crate::interceptor::{QueryInterceptor, ResultInterceptor, run_query_chain, run_result_chain};
use crate::parameter::{Limit, Offset, Parameter, ParameterKind};
use crate::provider::Provider;
use crate::result::QueryResult;

/// Handler queries are sent to unless another one is set.
pub const SELECT_HANDLER: &str = "select";

/// Builds, validates and runs one query for document type `D` through
/// backend `B`.
///
/// Parameters are checked as they are added:
///
/// - a second parameter of a kind that does not allow multiple instances is
///   rejected with [`ConfigurationError::DuplicateParameter`];
/// - with fail-fast validation on, a parameter that can validate itself is
///   validated immediately and rejected with
///   [`ConfigurationError::InvalidParameter`]. Pass-through ([`Any`]) parameters
///   are validated only when the configuration also enables
///   `check_any_parameter`.
///
/// [`execute`](Queryable::execute) then merges the configuration's global
/// parameters and interceptors, appends the engine defaults and the default
/// pagination, renders the payload, runs the query interceptors, calls the
/// provider, runs the result interceptors and parses the response.
///
/// [`Any`]: crate::parameter::Any
pub struct Queryable<D, B> {
    parameters: Vec<Parameter<D>>,
    query_interceptors: Vec<Arc<dyn QueryInterceptor>>,
    result_interceptors: Vec<Arc<dyn ResultInterceptor>>,
    handler: String,
    configuration: Arc<Configuration>,
    provider: Arc<dyn Provider>,
    _backend: PhantomData<fn() -> B>,
}

impl<D: Document, B: Backend> Queryable<D, B> {
    /// Creates a query with the default configuration.
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self::with_configuration(provider, Arc::new(Configuration::default()))
    }

    /// Creates a query governed by a shared configuration.
    pub fn with_configuration(provider: Arc<dyn Provider>, configuration: Arc<Configuration>) -> Self {
        Self {
            parameters: Vec::new(),
            query_interceptors: Vec::new(),
            result_interceptors: Vec::new(),
            handler: SELECT_HANDLER.to_string(),
            configuration,
            provider,
            _backend: PhantomData,
        }
    }

    /// Replaces the configuration. Parameters already added are not rechecked.
    pub fn set_configuration(&mut self, configuration: Arc<Configuration>) -> &mut Self {
        self.configuration = configuration;
        self
    }

    /// Sends the query to another request handler.
    pub fn set_handler(&mut self, handler: impl Into<String>) -> SearchResult<&mut Self> {
        let handler = handler.into();
        if handler.trim().is_empty() {
            return Err(ConfigurationError::EmptyArgument { argument: "handler" }.into());
        }
        self.handler = handler;
        Ok(self)
    }

    /// Adds a parameter.
    pub fn parameter(&mut self, parameter: impl Into<Parameter<D>>) -> SearchResult<&mut Self> {
        self.add(parameter.into())?;
        Ok(self)
    }

    /// Adds several parameters, stopping at the first rejected one.
    pub fn parameters<I, P>(&mut self, parameters: I) -> SearchResult<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Parameter<D>>,
    {
        for parameter in parameters {
            self.add(parameter.into())?;
        }
        Ok(self)
    }

    /// Adds a query interceptor.
    pub fn query_interceptor(&mut self, interceptor: impl QueryInterceptor + 'static) -> &mut Self {
        self.query_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Adds a default-constructed query interceptor.
    pub fn query_interceptor_default<T>(&mut self) -> &mut Self
    where
        T: QueryInterceptor + Default + 'static,
    {
        self.query_interceptor(T::default())
    }

    /// Adds a result interceptor.
    pub fn result_interceptor(&mut self, interceptor: impl ResultInterceptor + 'static) -> &mut Self {
        self.result_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Adds a default-constructed result interceptor.
    pub fn result_interceptor_default<T>(&mut self) -> &mut Self
    where
        T: ResultInterceptor + Default + 'static,
    {
        self.result_interceptor(T::default())
    }

    /// Injects offset 0 and the default page size unless the caller set them.
    pub fn set_default_pagination_parameters(&mut self) -> &mut Self {
        if !self.contains(ParameterKind::Offset) {
            self.parameters.push(Parameter::Offset(Offset::default()));
        }
        if !self.contains(ParameterKind::Limit) {
            self.parameters.push(Parameter::Limit(Limit::default()));
        }
        self
    }

    /// The parameters added so far.
    pub fn parameter_list(&self) -> &[Parameter<D>] {
        &self.parameters
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn contains(&self, kind: ParameterKind) -> bool {
        self.parameters.iter().any(|p| p.kind() == kind)
    }

    fn add(&mut self, parameter: Parameter<D>) -> Result<(), ConfigurationError> {
        let kind = parameter.kind();

        if !kind.allows_multiple_instances() && self.contains(kind) {
            warn!(%kind, "Duplicate parameter rejected");
            return Err(ConfigurationError::DuplicateParameter { kind });
        }

        let check = self.configuration.fail_fast()
            && (!parameter.is_any() || self.configuration.check_any_parameter());
        if check {
            if let Some(Err(message)) = parameter.validation().map(|v| v.validate()) {
                warn!(%kind, %message, "Invalid parameter rejected");
                return Err(ConfigurationError::InvalidParameter { kind, message });
            }
        }

        debug!(%kind, "Parameter added");
        self.parameters.push(parameter);
        Ok(())
    }

    fn render(&self) -> Payload {
        let mut container = ParameterContainer::<B, D>::new();
        container.add_parameters(&self.parameters);
        container.execute()
    }

    /// Runs the query.
    ///
    /// Configuration errors abort before anything is sent. Transport and
    /// interceptor errors are returned as raised.
    pub async fn execute(mut self) -> SearchResult<QueryResult<D, B>> {
        let configuration = Arc::clone(&self.configuration);
        for parameter in configuration.global_parameters() {
            self.add(parameter.clone().into())?;
        }
        self.query_interceptors
            .extend(configuration.global_query_interceptors().iter().cloned());
        self.result_interceptors
            .extend(configuration.global_result_interceptors().iter().cloned());

        self.add(Parameter::system())?;
        self.set_default_pagination_parameters();

        let payload = self.render();
        debug!(
            backend = B::NAME,
            handler = %self.handler,
            parameters = self.parameters.len(),
            "Rendered query"
        );
        trace!(payload = %payload.body, "Query payload");

        let body = run_query_chain(&self.query_interceptors, payload.body)?;
        let payload = Payload::new(payload.format, body);

        let raw = self.provider.get(&self.handler, &payload).await?;
        debug!(handler = %self.handler, bytes = raw.len(), "Received response");
        trace!(response = %raw, "Raw response");

        let raw = run_result_chain(&self.result_interceptors, raw)?;
        Ok(QueryResult::new(self.parameters, &raw)?)
    }
}

impl<D: Document, B: Backend> fmt::Debug for Queryable<D, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queryable")
            .field("backend", &B::NAME)
            .field("handler", &self.handler)
            .field("parameters", &self.parameters)
            .field("query_interceptors", &self.query_interceptors.len())
            .field("result_interceptors", &self.result_interceptors.len())
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}
