//! Request and response interceptors.
//!
//! Interceptors are `(text) -> text` steps. Query interceptors see the
//! rendered payload before it is sent; result interceptors see the raw
//! response text before it is parsed. Each chain runs in registration order,
//! every step receiving the output of the one before it. Closures implement
//! both traits:
//!
//! ```
//! use helios_search::error::BoxError;
//! use helios_search::interceptor::QueryInterceptor;
//!
//! let upper = |text: String| -> Result<String, BoxError> { Ok(text.to_uppercase()) };
//! assert_eq!(upper.intercept("q=a".to_string()).unwrap(), "Q=A");
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use tracing::info;

use crate::error::{BoxError, ConfigurationError, SearchError, SearchResult};

/// Rewrites the outgoing payload text.
pub trait QueryInterceptor: Send + Sync {
    /// Name used in error reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Returns the payload to send in place of `payload`.
    fn intercept(&self, payload: String) -> Result<String, BoxError>;
}

/// Rewrites the raw response text.
pub trait ResultInterceptor: Send + Sync {
    /// Name used in error reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Returns the response to parse in place of `response`.
    fn intercept(&self, response: String) -> Result<String, BoxError>;
}

impl<F> QueryInterceptor for F
where
    F: Fn(String) -> Result<String, BoxError> + Send + Sync,
{
    fn intercept(&self, payload: String) -> Result<String, BoxError> {
        self(payload)
    }
}

impl<F> ResultInterceptor for F
where
    F: Fn(String) -> Result<String, BoxError> + Send + Sync,
{
    fn intercept(&self, response: String) -> Result<String, BoxError> {
        self(response)
    }
}

pub(crate) fn run_query_chain(
    interceptors: &[Arc<dyn QueryInterceptor>],
    payload: String,
) -> SearchResult<String> {
    interceptors.iter().try_fold(payload, |text, interceptor| {
        interceptor
            .intercept(text)
            .map_err(|source| SearchError::Interceptor {
                interceptor: interceptor.name().to_string(),
                source,
            })
    })
}

pub(crate) fn run_result_chain(
    interceptors: &[Arc<dyn ResultInterceptor>],
    response: String,
) -> SearchResult<String> {
    interceptors.iter().try_fold(response, |text, interceptor| {
        interceptor
            .intercept(text)
            .map_err(|source| SearchError::Interceptor {
                interceptor: interceptor.name().to_string(),
                source,
            })
    })
}

/// Logs every payload at `info` level and passes it through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogQueryInterceptor;

impl QueryInterceptor for LogQueryInterceptor {
    fn name(&self) -> &str {
        "log"
    }

    fn intercept(&self, payload: String) -> Result<String, BoxError> {
        info!(payload = %payload, "Search query");
        Ok(payload)
    }
}

/// Appends every payload to a file and passes it through unchanged.
///
/// Entries look like:
///
/// ```text
/// 2016-06-01T12:30:00.000Z - query
/// q=*:*&rows=10
/// --------------------------------------------------
/// ```
#[derive(Debug)]
pub struct FileLogQueryInterceptor {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLogQueryInterceptor {
    /// Logs to `path`, creating the file on first write.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigurationError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConfigurationError::EmptyArgument { argument: "path" });
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// The log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QueryInterceptor for FileLogQueryInterceptor {
    fn name(&self) -> &str {
        "file-log"
    }

    fn intercept(&self, payload: String) -> Result<String, BoxError> {
        let entry = format!(
            "{} - query\n{}\n{}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            payload,
            "-".repeat(50)
        );

        let _guard = self.lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        Ok(payload)
    }
}
