//! Document types and their field metadata.
//!
//! Every searchable document type declares a [`DocumentSchema`] once: the
//! wire name of each field, what kind of value it holds, and whether the
//! engine indexes and stores it. Parameters reference fields through the
//! typed [`Field`] handle and consult the schema when they validate.
//!
//! # Example
//!
//! ```
//! use std::sync::OnceLock;
//!
//! use helios_search::document::{Document, DocumentSchema, FieldDescriptor, FieldKind};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Product {
//!     id: String,
//!     price: f64,
//! }
//!
//! impl Document for Product {
//!     fn schema() -> &'static DocumentSchema {
//!         static SCHEMA: OnceLock<DocumentSchema> = OnceLock::new();
//!         SCHEMA.get_or_init(|| {
//!             DocumentSchema::new()
//!                 .with_field(FieldDescriptor::new("id", FieldKind::Text))
//!                 .with_field(FieldDescriptor::new("price", FieldKind::Double))
//!         })
//!     }
//! }
//!
//! assert!(Product::schema().field("price").unwrap().kind().supports_range());
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document type that can be searched for and returned by the engine.
pub trait Document: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Returns the field metadata declared for this document type.
    fn schema() -> &'static DocumentSchema;
}

/// The kind of value stored in a document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free or tokenized text.
    Text,
    /// A boolean flag.
    Boolean,
    /// A 32-bit integer.
    Integer,
    /// A 64-bit integer.
    Long,
    /// A single-precision float.
    Float,
    /// A double-precision float.
    Double,
    /// An exact decimal.
    Decimal,
    /// A point in time.
    DateTime,
    /// A latitude/longitude pair.
    GeoCoordinate,
}

impl FieldKind {
    /// Returns true for integer and floating point kinds.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Integer
                | FieldKind::Long
                | FieldKind::Float
                | FieldKind::Double
                | FieldKind::Decimal
        )
    }

    /// Returns true if the engine can bucket this kind into ranges.
    pub fn supports_range(&self) -> bool {
        self.is_numeric() || *self == FieldKind::DateTime
    }
}

/// Declared metadata for one document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    indexed: bool,
    stored: bool,
}

impl FieldDescriptor {
    /// Creates an indexed, stored field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            indexed: true,
            stored: true,
        }
    }

    /// Sets whether the engine indexes the field.
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Sets whether the engine stores the field.
    pub fn with_stored(mut self, stored: bool) -> Self {
        self.stored = stored;
        self
    }

    /// The field name as it appears on the wire.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of value held by the field.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field can be queried, sorted on or faceted.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Whether the field value is returned with documents.
    pub fn is_stored(&self) -> bool {
        self.stored
    }
}

/// The field registry of one document type.
///
/// Fields keep their declaration order. Schemas are small, so lookups scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSchema {
    fields: Vec<FieldDescriptor>,
}

impl DocumentSchema {
    /// Creates an empty schema.
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a field, replacing any earlier declaration with the same name.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.retain(|f| f.name != field.name);
        self.fields.push(field);
        self
    }

    /// Looks up a field by wire name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns all declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A typed reference to a field of document type `D`.
pub struct Field<D> {
    name: String,
    _document: PhantomData<fn() -> D>,
}

impl<D: Document> Field<D> {
    /// References the field with the given wire name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _document: PhantomData,
        }
    }

    /// The field name as it appears on the wire.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared metadata, if `D`'s schema describes this field.
    pub fn descriptor(&self) -> Option<&'static FieldDescriptor> {
        D::schema().field(&self.name)
    }

    /// Fails unless the field is indexed. Undeclared fields pass.
    pub(crate) fn require_indexed(&self, message: &str) -> Result<(), String> {
        match self.descriptor() {
            Some(descriptor) if !descriptor.is_indexed() => Err(message.to_string()),
            _ => Ok(()),
        }
    }
}

impl<D> Clone for Field<D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _document: PhantomData,
        }
    }
}

impl<D> PartialEq for Field<D> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<D> Eq for Field<D> {}

impl<D> fmt::Debug for Field<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

impl<D> fmt::Display for Field<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

static DYNAMIC_SCHEMA: DocumentSchema = DocumentSchema::new();

/// A schema-less document holding whatever fields the engine returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicDocument(pub Map<String, Value>);

impl DynamicDocument {
    /// Returns a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl Document for DynamicDocument {
    fn schema() -> &'static DocumentSchema {
        &DYNAMIC_SCHEMA
    }
}
