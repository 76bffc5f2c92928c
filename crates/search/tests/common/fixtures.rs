//! Test fixtures: a product document and engine responses.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use helios_search::document::{Document, DocumentSchema, Field, FieldDescriptor, FieldKind};
use helios_search::types::GeoCoordinate;

/// A product as stored in the test collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, with = "helios_search::types::datetime::option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<GeoCoordinate>,
}

static PRODUCT_SCHEMA: Lazy<DocumentSchema> = Lazy::new(|| {
    DocumentSchema::new()
        .with_field(FieldDescriptor::new("id", FieldKind::Text))
        .with_field(FieldDescriptor::new("name", FieldKind::Text))
        .with_field(FieldDescriptor::new("price", FieldKind::Double))
        .with_field(FieldDescriptor::new("created", FieldKind::DateTime))
        .with_field(FieldDescriptor::new("location", FieldKind::GeoCoordinate))
        .with_field(FieldDescriptor::new("description", FieldKind::Text).with_indexed(false))
        .with_field(FieldDescriptor::new("internal", FieldKind::Text).with_stored(false))
});

impl Document for Product {
    fn schema() -> &'static DocumentSchema {
        &PRODUCT_SCHEMA
    }
}

/// Shorthand for a product field reference.
pub fn field(name: &str) -> Field<Product> {
    Field::new(name)
}

/// Two products with every converted field populated.
pub fn product_docs() -> Value {
    json!([
        {
            "id": "p1",
            "name": "Notebook",
            "price": 10.5,
            "created": "2016-06-01T12:30:00Z",
            "location": "-23.5505,-46.6333",
            "score": 1.0
        },
        {
            "id": "p2",
            "name": "Pen",
            "price": 2.0,
            "created": "2020-01-02T03:04:05.678Z",
            "location": "51.5,-0.125",
            "score": 0.5
        }
    ])
}

/// A query-string engine response with facet counts.
pub fn legacy_response() -> String {
    json!({
        "responseHeader": { "status": 0, "QTime": 5 },
        "response": { "numFound": 42, "start": 0, "docs": product_docs() },
        "facet_counts": {
            "facet_queries": { "cheap": 12, "near": 3 },
            "facet_fields": { "name": ["notebook", 20, "pen", 22] },
            "facet_ranges": {
                "prices": { "counts": ["0", 30, "10", 10], "before": 1, "after": 1 }
            }
        }
    })
    .to_string()
}

/// A JSON engine response with facets.
pub fn json_response() -> String {
    json!({
        "responseHeader": { "status": 0, "QTime": 5 },
        "response": { "numFound": 42, "start": 0, "docs": product_docs() },
        "facets": {
            "count": 42,
            "name": { "buckets": [{ "val": "notebook", "count": 20 }, { "val": "pen", "count": 22 }] },
            "cheap": { "count": 12 },
            "near": { "count": 3 },
            "prices": {
                "buckets": [{ "val": 0, "count": 30 }, { "val": 10, "count": 10 }],
                "before": { "count": 1 },
                "after": { "count": 1 }
            }
        }
    })
    .to_string()
}

/// A response without `response.docs`.
pub fn response_without_docs() -> String {
    json!({
        "responseHeader": { "status": 0, "QTime": 1 },
        "response": { "numFound": 0 }
    })
    .to_string()
}
