//! Value types shared by parameters, documents and results.
//!
//! - [`GeoCoordinate`] - a latitude/longitude pair, serialized as `"lat,lon"`
//! - [`datetime`] - serde helpers for engine timestamps
//! - [`SortDirection`], [`FacetSortType`], [`SpatialFunction`], [`BoostFunction`] -
//!   option enums used when configuring parameters

pub mod datetime;
mod geo;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use geo::GeoCoordinate;

/// Direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the engine keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Maps a boolean "ascending" flag to a direction.
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering of facet buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacetSortType {
    /// By bucket value, ascending.
    IndexAsc,
    /// By bucket value, descending.
    IndexDesc,
    /// By document count, ascending.
    CountAsc,
    /// By document count, descending.
    CountDesc,
}

impl FacetSortType {
    /// Returns the sort criterion and direction, e.g. `("count", "desc")`.
    pub fn parts(&self) -> (&'static str, &'static str) {
        match self {
            FacetSortType::IndexAsc => ("index", "asc"),
            FacetSortType::IndexDesc => ("index", "desc"),
            FacetSortType::CountAsc => ("count", "asc"),
            FacetSortType::CountDesc => ("count", "desc"),
        }
    }
}

/// Spatial filter shapes understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpatialFunction {
    /// Points within a radius of the center.
    #[default]
    Geofilt,
    /// Points within the bounding box of that radius.
    Bbox,
}

impl SpatialFunction {
    /// Returns the local-params function name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialFunction::Geofilt => "geofilt",
            SpatialFunction::Bbox => "bbox",
        }
    }
}

impl fmt::Display for SpatialFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a boost expression is combined with the relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoostFunction {
    /// Additive boost function (`bf`).
    #[default]
    Bf,
    /// Multiplicative boost (`boost`).
    Boost,
}

impl BoostFunction {
    /// Returns the request parameter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoostFunction::Bf => "bf",
            BoostFunction::Boost => "boost",
        }
    }
}
