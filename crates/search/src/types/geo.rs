//! Geographic coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A latitude/longitude pair in decimal degrees.
///
/// The engine exchanges points as `"lat,lon"` strings, and that is also how
/// the type (de)serializes inside documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Creates a coordinate, rejecting values outside the valid degree ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {} is outside [-90, 90]", latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {} is outside [-180, 180]", longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoCoordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got \"{}\"", s))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("invalid latitude \"{}\": {}", lat.trim(), e))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|e| format!("invalid longitude \"{}\": {}", lon.trim(), e))?;
        GeoCoordinate::new(latitude, longitude)
    }
}

impl Serialize for GeoCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GeoCoordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
