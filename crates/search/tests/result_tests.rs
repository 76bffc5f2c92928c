//! Result mapping tests: documents, pagination statistics and facets.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use helios_search::error::{ResponseError, SearchError};
use helios_search::parameter::{FacetField, FacetQuery, FacetRange, FacetSpatial, Limit, Offset};
use helios_search::result::{FacetFieldResult, FacetQueryResult, FacetRangeValue, FacetValue};
use helios_search::types::{GeoCoordinate, SpatialFunction};
use helios_search::{Backend, Parameter, Queryable, QueryValue};

use common::*;

fn facet_parameters() -> Vec<Parameter<Product>> {
    vec![
        FacetField::new(field("name")).into(),
        FacetQuery::new(
            "cheap",
            QueryValue::range(field("price"), None, Some("5".to_string())),
        )
        .unwrap()
        .into(),
        FacetSpatial::new(
            "near",
            SpatialFunction::Geofilt,
            field("location"),
            GeoCoordinate::new(-23.5505, -46.6333).unwrap(),
            Decimal::new(10, 0),
        )
        .unwrap()
        .into(),
        FacetRange::new("prices", field("price"), "10", "0", "20")
            .unwrap()
            .into(),
    ]
}

fn range_value(minimum: Option<&str>, maximum: Option<&str>, quantity: u64) -> FacetRangeValue {
    FacetRangeValue {
        minimum: minimum.map(str::to_string),
        maximum: maximum.map(str::to_string),
        quantity,
    }
}

async fn run<B: Backend>(
    response: String,
    parameters: Vec<Parameter<Product>>,
) -> helios_search::QueryResult<Product, B> {
    let provider = Arc::new(MockProvider::new(response));
    let mut q: Queryable<Product, B> = Queryable::new(provider);
    q.parameters(parameters).unwrap();
    q.execute().await.unwrap()
}

/// Asserts the facet results shared by both fixture responses.
fn assert_facets<B: Backend>(result: &helios_search::QueryResult<Product, B>) {
    assert_eq!(
        result.facet_fields().unwrap(),
        vec![FacetFieldResult {
            name: "name".to_string(),
            values: vec![
                FacetValue {
                    key: "notebook".to_string(),
                    quantity: 20
                },
                FacetValue {
                    key: "pen".to_string(),
                    quantity: 22
                },
            ],
        }]
    );
    assert_eq!(
        result.facet_queries().unwrap(),
        vec![
            FacetQueryResult {
                name: "cheap".to_string(),
                quantity: 12
            },
            FacetQueryResult {
                name: "near".to_string(),
                quantity: 3
            },
        ]
    );

    let ranges = result.facet_ranges().unwrap();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].name, "prices");
    assert_eq!(
        ranges[0].values,
        vec![
            range_value(None, Some("0"), 1),
            range_value(Some("0"), Some("10"), 30),
            range_value(Some("10"), Some("20"), 10),
            range_value(Some("20"), None, 1),
        ]
    );
}

// ============================================================================
// Documents
// ============================================================================

/// Test that documents map with their coordinate and date fields.
#[cfg(feature = "legacy")]
#[tokio::test]
async fn test_documents_mapped() {
    let result = run::<helios_search::LegacyBackend>(legacy_response(), Vec::new()).await;
    let documents = result.documents().unwrap();

    assert_eq!(documents.len(), 2);
    let first = &documents[0];
    assert_eq!(first.id, "p1");
    assert_eq!(first.name.as_deref(), Some("Notebook"));
    assert_eq!(first.price, Some(10.5));
    assert_eq!(
        first.created,
        Some(Utc.with_ymd_and_hms(2016, 6, 1, 12, 30, 0).unwrap())
    );
    let location = first.location.unwrap();
    assert_eq!(location.latitude(), -23.5505);
    assert_eq!(location.longitude(), -46.6333);

    let second = &documents[1];
    assert_eq!(
        second.created.unwrap().timestamp_subsec_millis(),
        678,
        "fractional seconds are kept"
    );
}

/// Test that a response without documents is reported, not emptied.
#[cfg(feature = "json")]
#[tokio::test]
async fn test_missing_documents() {
    let result = run::<helios_search::JsonBackend>(response_without_docs(), Vec::new()).await;
    let err = result.documents().unwrap_err();
    assert!(matches!(err, ResponseError::UnexpectedFormat { .. }));
    assert!(err.to_string().contains("numFound"));
}

/// Test that documents of the wrong shape fail to deserialize.
#[cfg(feature = "json")]
#[tokio::test]
async fn test_documents_of_wrong_shape() {
    let response = serde_json::json!({
        "responseHeader": { "QTime": 1 },
        "response": { "numFound": 1, "docs": [{ "name": "no id" }] }
    })
    .to_string();
    let result = run::<helios_search::JsonBackend>(response, Vec::new()).await;
    assert!(matches!(
        result.documents().unwrap_err(),
        ResponseError::Deserialization { .. }
    ));
}

/// Test that a document survives serialization back into its own shape.
#[test]
fn test_document_serde_round_trip() {
    let product = Product {
        id: "p9".to_string(),
        name: Some("Atlas".to_string()),
        price: Some(42.25),
        created: Some(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap()),
        location: Some(GeoCoordinate::new(-23.5505, -46.6333).unwrap()),
    };

    let text = serde_json::to_string(&product).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["created"], "2021-03-04T05:06:07Z");
    assert_eq!(value["location"], "-23.5505,-46.6333");
    assert_eq!(serde_json::from_str::<Product>(&text).unwrap(), product);

    let sparse = Product {
        id: "p10".to_string(),
        name: None,
        price: None,
        created: None,
        location: None,
    };
    let text = serde_json::to_string(&sparse).unwrap();
    assert_eq!(serde_json::from_str::<Product>(&text).unwrap(), sparse);
}

// ============================================================================
// Statistics
// ============================================================================

/// Test statistics for the default page.
#[cfg(feature = "legacy")]
#[tokio::test]
async fn test_information_first_page() {
    let result = run::<helios_search::LegacyBackend>(legacy_response(), Vec::new()).await;
    let information = result.information().unwrap();

    assert_eq!(information.document_count, 42);
    assert_eq!(information.elapsed_time, Duration::from_millis(5));
    assert_eq!(information.page_size, 10);
    assert_eq!(information.page_number, 1);
    assert_eq!(information.page_count, 5);
    assert!(information.is_first_page);
    assert!(!information.is_last_page);
    assert!(!information.has_previous_page);
    assert!(information.has_next_page);
}

/// Test statistics for an explicit last page.
#[cfg(feature = "legacy")]
#[tokio::test]
async fn test_information_last_page() {
    let parameters = vec![Offset::new(40).into(), Limit::new(20).into()];
    let result = run::<helios_search::LegacyBackend>(legacy_response(), parameters).await;
    let information = result.information().unwrap();

    assert_eq!(information.page_size, 20);
    assert_eq!(information.page_number, 3);
    assert_eq!(information.page_count, 3);
    assert!(information.is_last_page);
    assert!(information.has_previous_page);
    assert!(!information.has_next_page);
}

// ============================================================================
// Facets
// ============================================================================

/// Test facet results from a query-string engine response.
#[cfg(feature = "legacy")]
#[tokio::test]
async fn test_legacy_facets() {
    let result = run::<helios_search::LegacyBackend>(legacy_response(), facet_parameters()).await;
    assert_facets(&result);
}

/// Test facet results from a JSON engine response.
#[cfg(feature = "json")]
#[tokio::test]
async fn test_json_facets() {
    let result = run::<helios_search::JsonBackend>(json_response(), facet_parameters()).await;
    assert_facets(&result);
}

/// Test that an omitted middle bucket leaves its neighbours' bounds intact.
#[cfg(feature = "json")]
#[tokio::test]
async fn test_json_range_with_missing_bucket() {
    let response = serde_json::json!({
        "responseHeader": { "status": 0, "QTime": 1 },
        "response": { "numFound": 4, "start": 0, "docs": [] },
        "facets": {
            "prices": {
                "buckets": [{ "val": 0, "count": 3 }, { "val": 20, "count": 1 }]
            }
        }
    })
    .to_string();
    let parameters = vec![
        FacetRange::new("prices", field("price"), "10", "0", "30")
            .unwrap()
            .into(),
    ];
    let result = run::<helios_search::JsonBackend>(response, parameters).await;

    let ranges = result.facet_ranges().unwrap();
    assert_eq!(
        ranges[0].values,
        vec![
            range_value(Some("0"), Some("10"), 3),
            range_value(Some("20"), Some("30"), 1),
        ]
    );
}

/// Test date range buckets from a query-string engine response.
#[cfg(feature = "legacy")]
#[tokio::test]
async fn test_legacy_date_range_with_missing_bucket() {
    let response = serde_json::json!({
        "responseHeader": { "status": 0, "QTime": 1 },
        "response": { "numFound": 5, "start": 0, "docs": [] },
        "facet_counts": {
            "facet_ranges": {
                "created": {
                    "counts": ["2016-01-01T00:00:00Z", 4, "2016-01-03T00:00:00Z", 1],
                    "gap": "+1DAY",
                    "start": "2016-01-01T00:00:00Z",
                    "end": "2016-01-04T00:00:00Z"
                }
            }
        }
    })
    .to_string();
    let parameters = vec![
        FacetRange::new(
            "created",
            field("created"),
            "+1DAY",
            "2016-01-01T00:00:00Z",
            "2016-01-04T00:00:00Z",
        )
        .unwrap()
        .into(),
    ];
    let result = run::<helios_search::LegacyBackend>(response, parameters).await;

    assert_eq!(
        result.facet_ranges().unwrap()[0].values,
        vec![
            range_value(Some("2016-01-01T00:00:00Z"), Some("2016-01-02T00:00:00Z"), 4),
            range_value(Some("2016-01-03T00:00:00Z"), Some("2016-01-04T00:00:00Z"), 1),
        ]
    );
}

/// Test that a facet missing from the response is reported.
#[cfg(feature = "json")]
#[tokio::test]
async fn test_missing_facet_section() {
    let parameters = vec![FacetField::new(field("created")).into()];
    let result = run::<helios_search::JsonBackend>(json_response(), parameters).await;
    match result.facet_fields() {
        Err(ResponseError::UnexpectedFormat { reason, .. }) => {
            assert!(reason.contains("facets.created"))
        }
        other => panic!("unexpected result {:?}", other),
    }
}

/// Test that a result without facet parameters has no facet results.
#[cfg(feature = "legacy")]
#[tokio::test]
async fn test_no_facet_parameters() {
    let result = run::<helios_search::LegacyBackend>(legacy_response(), Vec::new()).await;
    assert!(result.facet_fields().unwrap().is_empty());
    assert!(result.facet_queries().unwrap().is_empty());
    assert!(result.facet_ranges().unwrap().is_empty());
}

/// Test that errors from the response stage surface as response errors.
#[cfg(feature = "legacy")]
#[tokio::test]
async fn test_response_error_category() {
    let provider = Arc::new(MockProvider::new("not json"));
    let q: Queryable<Product, helios_search::LegacyBackend> = Queryable::new(provider);
    assert!(matches!(
        q.execute().await.unwrap_err(),
        SearchError::Response(ResponseError::UnexpectedFormat { .. })
    ));
}
