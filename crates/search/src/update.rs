//! Adding and deleting documents.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use crate::document::Document;
use crate::error::{ConfigurationError, SearchResult};
use crate::provider::Provider;

/// Handler updates are posted to.
pub const UPDATE_HANDLER: &str = "update";

/// Documents to add or replace.
#[derive(Debug, Clone)]
pub struct DocumentUpdate<D> {
    documents: Vec<D>,
}

impl<D: Document> DocumentUpdate<D> {
    /// Fails when `documents` is empty.
    pub fn new(documents: impl IntoIterator<Item = D>) -> Result<Self, ConfigurationError> {
        let documents: Vec<D> = documents.into_iter().collect();
        if documents.is_empty() {
            return Err(ConfigurationError::EmptyArgument {
                argument: "documents",
            });
        }
        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[D] {
        &self.documents
    }

    /// The request body: a JSON array of the documents.
    pub fn body(&self) -> Result<String, ConfigurationError> {
        serde_json::to_string(&self.documents).map_err(|e| ConfigurationError::InvalidArgument {
            argument: "documents",
            message: e.to_string(),
        })
    }
}

/// Documents to delete, by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDelete {
    ids: Vec<String>,
}

impl DocumentDelete {
    /// Fails when `ids` is empty or holds a blank id.
    pub fn new<I, S>(ids: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(ConfigurationError::EmptyArgument { argument: "ids" });
        }
        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigurationError::EmptyArgument { argument: "id" });
        }
        Ok(Self { ids })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// `{"delete":"id"}` for one id, `{"delete":["a","b"]}` for several.
    pub fn body(&self) -> String {
        let target = match self.ids.as_slice() {
            [id] => Value::String(id.clone()),
            ids => json!(ids),
        };
        json!({ "delete": target }).to_string()
    }
}

/// Posts updates for document type `D`.
pub struct Updatable<D> {
    provider: Arc<dyn Provider>,
    handler: String,
    commit: bool,
    _document: PhantomData<fn() -> D>,
}

impl<D: Document> Updatable<D> {
    /// Posts to the update handler without committing.
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            handler: UPDATE_HANDLER.to_string(),
            commit: false,
            _document: PhantomData,
        }
    }

    /// Asks the engine to commit after each request.
    pub fn with_commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    /// Posts to another handler.
    pub fn with_handler(mut self, handler: impl Into<String>) -> Result<Self, ConfigurationError> {
        let handler = handler.into();
        if handler.trim().is_empty() {
            return Err(ConfigurationError::EmptyArgument { argument: "handler" });
        }
        self.handler = handler;
        Ok(self)
    }

    fn endpoint(&self) -> String {
        if self.commit {
            format!("{}?commit=true", self.handler)
        } else {
            self.handler.clone()
        }
    }

    /// Adds or replaces documents. Returns the raw engine response.
    pub async fn add(&self, update: &DocumentUpdate<D>) -> SearchResult<String> {
        let body = update.body()?;
        debug!(documents = update.documents().len(), commit = self.commit, "Posting documents");
        Ok(self.provider.post(&self.endpoint(), &body).await?)
    }

    /// Deletes documents. Returns the raw engine response.
    pub async fn delete(&self, delete: &DocumentDelete) -> SearchResult<String> {
        debug!(ids = delete.ids().len(), commit = self.commit, "Deleting documents");
        Ok(self.provider.post(&self.endpoint(), &delete.body()).await?)
    }
}

impl<D> fmt::Debug for Updatable<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updatable")
            .field("handler", &self.handler)
            .field("commit", &self.commit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;
    use crate::document::DynamicDocument;

    #[test]
    fn test_delete_body() {
        assert_eq!(DocumentDelete::new(["a"]).unwrap().body(), r#"{"delete":"a"}"#);
        assert_eq!(
            DocumentDelete::new(["a", "b"]).unwrap().body(),
            r#"{"delete":["a","b"]}"#
        );
        assert!(DocumentDelete::new(Vec::<String>::new()).is_err());
        assert!(DocumentDelete::new(["a", ""]).is_err());
    }

    #[test]
    fn test_update_body_is_array() {
        let mut fields = Map::new();
        fields.insert("id".to_string(), json!("1"));
        let update = DocumentUpdate::new([DynamicDocument(fields)]).unwrap();
        assert_eq!(update.body().unwrap(), r#"[{"id":"1"}]"#);
        assert!(DocumentUpdate::<DynamicDocument>::new(Vec::new()).is_err());
    }
}
