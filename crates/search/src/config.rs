//! Client configuration.
//!
//! Two layers:
//!
//! - [`Configuration`] is the runtime policy every queryable consults: the
//!   validation switches plus parameters and interceptors merged into every
//!   query. It is built once and shared read-only as `Arc<Configuration>`.
//! - [`ClientConfig`] holds connection settings read from the command line or
//!   the environment, and derives a [`Configuration`].
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SEARCH_BASE_URL` | http://localhost:8983/solr | Engine base URL |
//! | `SEARCH_COLLECTION` | collection1 | Core or collection name |
//! | `SEARCH_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `SEARCH_FAIL_FAST` | true | Validate parameters when they are added |
//! | `SEARCH_CHECK_ANY_PARAMETER` | false | Also validate pass-through parameters |
//! | `SEARCH_WIRE_FORMAT` | json | `legacy` or `json` |
//! | `SEARCH_LOG_LEVEL` | info | Log level |

use std::fmt;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::interceptor::{QueryInterceptor, ResultInterceptor};
use crate::parameter::GlobalParameter;

/// Runtime query policy shared by every queryable built from it.
///
/// ```
/// use std::sync::Arc;
///
/// use helios_search::config::Configuration;
/// use helios_search::interceptor::LogQueryInterceptor;
/// use helios_search::parameter::Limit;
///
/// let configuration = Arc::new(
///     Configuration::new()
///         .with_check_any_parameter(true)
///         .with_global_parameter(Limit::new(20))
///         .with_global_query_interceptor(LogQueryInterceptor),
/// );
/// assert!(configuration.fail_fast());
/// ```
#[derive(Clone)]
pub struct Configuration {
    fail_fast: bool,
    check_any_parameter: bool,
    global_parameters: Vec<GlobalParameter>,
    global_query_interceptors: Vec<Arc<dyn QueryInterceptor>>,
    global_result_interceptors: Vec<Arc<dyn ResultInterceptor>>,
}

impl Configuration {
    /// Fail-fast validation on, pass-through parameters unchecked, no globals.
    pub fn new() -> Self {
        Self {
            fail_fast: true,
            check_any_parameter: false,
            global_parameters: Vec::new(),
            global_query_interceptors: Vec::new(),
            global_result_interceptors: Vec::new(),
        }
    }

    /// Validate parameters as they are added.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Validate pass-through parameters too. Has no effect without fail-fast.
    pub fn with_check_any_parameter(mut self, check: bool) -> Self {
        self.check_any_parameter = check;
        self
    }

    /// Adds a parameter to every query.
    pub fn with_global_parameter(mut self, parameter: impl Into<GlobalParameter>) -> Self {
        self.global_parameters.push(parameter.into());
        self
    }

    /// Runs `interceptor` on every payload, after the query's own interceptors.
    pub fn with_global_query_interceptor(
        mut self,
        interceptor: impl QueryInterceptor + 'static,
    ) -> Self {
        self.global_query_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Runs `interceptor` on every response, after the query's own interceptors.
    pub fn with_global_result_interceptor(
        mut self,
        interceptor: impl ResultInterceptor + 'static,
    ) -> Self {
        self.global_result_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    pub fn check_any_parameter(&self) -> bool {
        self.check_any_parameter
    }

    pub fn global_parameters(&self) -> &[GlobalParameter] {
        &self.global_parameters
    }

    pub fn global_query_interceptors(&self) -> &[Arc<dyn QueryInterceptor>] {
        &self.global_query_interceptors
    }

    pub fn global_result_interceptors(&self) -> &[Arc<dyn ResultInterceptor>] {
        &self.global_result_interceptors
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |list: Vec<&str>| list.join(", ");
        f.debug_struct("Configuration")
            .field("fail_fast", &self.fail_fast)
            .field("check_any_parameter", &self.check_any_parameter)
            .field("global_parameters", &self.global_parameters)
            .field(
                "global_query_interceptors",
                &names(self.global_query_interceptors.iter().map(|i| i.name()).collect()),
            )
            .field(
                "global_result_interceptors",
                &names(self.global_result_interceptors.iter().map(|i| i.name()).collect()),
            )
            .finish()
    }
}

/// Request format spoken to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// `key=value` query strings.
    Legacy,
    /// JSON request bodies.
    #[default]
    Json,
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Legacy => f.write_str("legacy"),
            WireFormat::Json => f.write_str("json"),
        }
    }
}

/// Connection settings for the search engine.
#[derive(Debug, Clone, Parser)]
#[command(name = "search-client")]
#[command(about = "Typed search engine client")]
pub struct ClientConfig {
    /// Engine base URL, without the collection.
    #[arg(long, env = "SEARCH_BASE_URL", default_value = "http://localhost:8983/solr")]
    pub base_url: String,

    /// Core or collection to query.
    #[arg(long, env = "SEARCH_COLLECTION", default_value = "collection1")]
    pub collection: String,

    /// Request timeout in seconds.
    #[arg(long, env = "SEARCH_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Validate parameters when they are added.
    #[arg(long, env = "SEARCH_FAIL_FAST", default_value = "true", action = clap::ArgAction::Set)]
    pub fail_fast: bool,

    /// Also validate pass-through parameters.
    #[arg(long, env = "SEARCH_CHECK_ANY_PARAMETER", default_value = "false", action = clap::ArgAction::Set)]
    pub check_any_parameter: bool,

    /// Request format.
    #[arg(long, env = "SEARCH_WIRE_FORMAT", value_enum, default_value = "json")]
    pub wire_format: WireFormat,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "SEARCH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8983/solr".to_string(),
            collection: "collection1".to_string(),
            request_timeout: 30,
            fail_fast: true,
            check_any_parameter: false,
            wire_format: WireFormat::Json,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads the settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::try_parse_from(["search-client"]).unwrap_or_default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if url::Url::parse(&self.base_url).is_err() {
            errors.push(format!("Base URL '{}' is not a valid URL", self.base_url));
        }

        if self.collection.trim().is_empty() {
            errors.push("Collection cannot be empty".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if !["error", "warn", "info", "debug", "trace"].contains(&self.log_level.as_str()) {
            errors.push(format!("Unknown log level '{}'", self.log_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The runtime policy these settings describe.
    pub fn to_configuration(&self) -> Configuration {
        Configuration::new()
            .with_fail_fast(self.fail_fast)
            .with_check_any_parameter(self.check_any_parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::parameter::{Any, Limit};

    #[test]
    fn test_configuration_defaults() {
        let configuration = Configuration::default();
        assert!(configuration.fail_fast());
        assert!(!configuration.check_any_parameter());
        assert!(configuration.global_parameters().is_empty());
    }

    #[test]
    fn test_configuration_builders() {
        let configuration = Configuration::new()
            .with_fail_fast(false)
            .with_global_parameter(Limit::new(5))
            .with_global_parameter(Any::new("debug", "true").unwrap())
            .with_global_result_interceptor(|text: String| -> Result<String, BoxError> {
                Ok(text)
            });
        assert!(!configuration.fail_fast());
        assert_eq!(configuration.global_parameters().len(), 2);
        assert_eq!(configuration.global_result_interceptors().len(), 1);
        assert!(format!("{:?}", configuration).contains("fail_fast: false"));
    }

    #[test]
    fn test_client_config_default_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wire_format, WireFormat::Json);
    }

    #[test]
    fn test_client_config_validation() {
        let config = ClientConfig {
            base_url: "nope".to_string(),
            collection: " ".to_string(),
            request_timeout: 0,
            log_level: "loud".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_client_config_parses_flags() {
        let config = ClientConfig::try_parse_from([
            "search-client",
            "--collection",
            "products",
            "--fail-fast",
            "false",
            "--wire-format",
            "legacy",
        ])
        .unwrap();
        assert_eq!(config.collection, "products");
        assert!(!config.fail_fast);
        assert_eq!(config.wire_format, WireFormat::Legacy);

        let configuration = config.to_configuration();
        assert!(!configuration.fail_fast());
    }
}
