//! Query expressions shared by the query, filter, boost and facet-query
//! parameters.

use std::fmt;

use rust_decimal::Decimal;

use crate::document::{Document, Field, FieldKind};
use crate::error::ConfigurationError;
use crate::types::{GeoCoordinate, SpatialFunction};

/// A query expression over the fields of document type `D`.
///
/// Values render to the engine's standard query syntax:
///
/// | Variant | Rendering |
/// |---------|-----------|
/// | `Expression` | verbatim |
/// | `Single` | `field:value`, quoted when the value contains whitespace |
/// | `Range` | `field:[from TO to]`, `*` for an open end |
/// | `Spatial` | `{!geofilt sfield=field pt=lat,lon d=distance}` |
/// | `And` / `Or` | `(a AND b)` / `(a OR b)` |
/// | `Not` | `NOT a` |
#[derive(Clone, Debug)]
pub enum QueryValue<D> {
    /// A raw expression passed through unchanged.
    Expression(String),
    /// A single field/value match.
    Single { field: Field<D>, value: String },
    /// An inclusive range over a field.
    Range {
        field: Field<D>,
        from: Option<String>,
        to: Option<String>,
    },
    /// Documents around a point.
    Spatial {
        function: SpatialFunction,
        field: Field<D>,
        center: GeoCoordinate,
        distance: Decimal,
    },
    /// All members must match.
    And(Vec<QueryValue<D>>),
    /// Any member must match.
    Or(Vec<QueryValue<D>>),
    /// The inner value must not match.
    Not(Box<QueryValue<D>>),
}

impl<D: Document> QueryValue<D> {
    /// A raw expression. Fails when `expression` is blank.
    pub fn expression(expression: impl Into<String>) -> Result<Self, ConfigurationError> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(ConfigurationError::EmptyArgument {
                argument: "expression",
            });
        }
        Ok(QueryValue::Expression(expression))
    }

    /// Matches `field` against a single value.
    pub fn single(field: Field<D>, value: impl Into<String>) -> Self {
        QueryValue::Single {
            field,
            value: value.into(),
        }
    }

    /// Matches `field` within `[from, to]`; `None` leaves that end open.
    pub fn range(field: Field<D>, from: Option<String>, to: Option<String>) -> Self {
        QueryValue::Range { field, from, to }
    }

    /// Matches documents whose `field` lies within `distance` km of `center`.
    pub fn spatial(
        function: SpatialFunction,
        field: Field<D>,
        center: GeoCoordinate,
        distance: Decimal,
    ) -> Self {
        QueryValue::Spatial {
            function,
            field,
            center,
            distance,
        }
    }

    /// Negates this value.
    pub fn negate(self) -> Self {
        QueryValue::Not(Box::new(self))
    }

    /// Checks that every referenced field is indexed and that spatial
    /// expressions target coordinate fields.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            QueryValue::Expression(_) => Ok(()),
            QueryValue::Single { field, .. } | QueryValue::Range { field, .. } => {
                field.require_indexed(&format!(
                    "field \"{}\" must be indexed to be used in a query",
                    field
                ))
            }
            QueryValue::Spatial { field, .. } => validate_spatial_field(field),
            QueryValue::And(values) | QueryValue::Or(values) => {
                if values.is_empty() {
                    return Err("query groups must contain at least one value".to_string());
                }
                values.iter().try_for_each(QueryValue::validate)
            }
            QueryValue::Not(value) => value.validate(),
        }
    }
}

/// Checks that `field` is indexed and holds coordinates. Undeclared fields pass.
pub(crate) fn validate_spatial_field<D: Document>(field: &Field<D>) -> Result<(), String> {
    field.require_indexed(&format!(
        "field \"{}\" must be indexed to be used in a spatial search",
        field
    ))?;
    match field.descriptor() {
        Some(descriptor) if descriptor.kind() != FieldKind::GeoCoordinate => Err(format!(
            "field \"{}\" must hold geographic coordinates to be used in a spatial search",
            field
        )),
        _ => Ok(()),
    }
}

/// Renders the local-params form of a spatial filter.
pub(crate) fn spatial_expression<D>(
    function: SpatialFunction,
    field: &Field<D>,
    center: &GeoCoordinate,
    distance: &Decimal,
) -> String {
    format!(
        "{{!{} sfield={} pt={} d={}}}",
        function,
        field,
        center,
        distance.normalize()
    )
}

fn quote(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

fn write_group<D>(f: &mut fmt::Formatter<'_>, values: &[QueryValue<D>], op: &str) -> fmt::Result {
    if values.is_empty() {
        return f.write_str("-*:*");
    }
    f.write_str("(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", value)?;
    }
    f.write_str(")")
}

impl<D> fmt::Display for QueryValue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Expression(expression) => f.write_str(expression),
            QueryValue::Single { field, value } => write!(f, "{}:{}", field, quote(value)),
            QueryValue::Range { field, from, to } => write!(
                f,
                "{}:[{} TO {}]",
                field,
                from.as_deref().unwrap_or("*"),
                to.as_deref().unwrap_or("*")
            ),
            QueryValue::Spatial {
                function,
                field,
                center,
                distance,
            } => f.write_str(&spatial_expression(*function, field, center, distance)),
            QueryValue::And(values) => write_group(f, values, "AND"),
            QueryValue::Or(values) => write_group(f, values, "OR"),
            QueryValue::Not(value) => write!(f, "NOT {}", value),
        }
    }
}
