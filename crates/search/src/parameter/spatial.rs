//! Spatial filtering.

use rust_decimal::Decimal;

use crate::document::{Document, Field};
use crate::error::ConfigurationError;
use crate::parameter::Validate;
use crate::parameter::value::{spatial_expression, validate_spatial_field};
use crate::types::{GeoCoordinate, SpatialFunction};

/// Restricts results to documents within `distance` km of `center`.
#[derive(Debug, Clone)]
pub struct SpatialFilter<D> {
    function: SpatialFunction,
    field: Field<D>,
    center: GeoCoordinate,
    distance: Decimal,
}

impl<D: Document> SpatialFilter<D> {
    /// Fails when `distance` is negative.
    pub fn new(
        function: SpatialFunction,
        field: Field<D>,
        center: GeoCoordinate,
        distance: Decimal,
    ) -> Result<Self, ConfigurationError> {
        if distance.is_sign_negative() {
            return Err(ConfigurationError::InvalidArgument {
                argument: "distance",
                message: format!("{} is negative", distance),
            });
        }
        Ok(Self {
            function,
            field,
            center,
            distance,
        })
    }

    pub fn function(&self) -> SpatialFunction {
        self.function
    }

    pub fn field(&self) -> &Field<D> {
        &self.field
    }

    pub fn center(&self) -> &GeoCoordinate {
        &self.center
    }

    /// The distance with trailing zeros removed, as sent on the wire.
    pub fn distance(&self) -> Decimal {
        self.distance.normalize()
    }

    /// The self-contained filter expression.
    pub fn expression(&self) -> String {
        spatial_expression(self.function, &self.field, &self.center, &self.distance)
    }
}

impl<D: Document> Validate for SpatialFilter<D> {
    fn validate(&self) -> Result<(), String> {
        validate_spatial_field(&self.field)
    }
}
