use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coordinate::GeoCoordinate;

/// Which POI service produced a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceSource {
    Overpass,
    Geoapify,
}

impl fmt::Display for PlaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceSource::Overpass => f.write_str("overpass"),
            PlaceSource::Geoapify => f.write_str("geoapify"),
        }
    }
}

/// A mosque or musholla near the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOfWorship {
    /// Provider-scoped identifier, e.g. `"osm:node/123"`.
    pub id: String,
    pub name: String,
    /// Comma-joined street/suburb/city; may be empty.
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance from the search centre.
    pub distance_km: f64,
    pub source: PlaceSource,
}

impl PlaceOfWorship {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new_unchecked(self.latitude, self.longitude)
    }
}

/// Where a qibla bearing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BearingSource {
    /// Returned by an external qibla API.
    Api,
    /// Computed with the great-circle formula.
    Local,
}

/// Bearing from true north towards the Kaaba, degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QiblaBearing {
    pub degrees: f64,
    pub source: BearingSource,
}

impl QiblaBearing {
    pub fn new(degrees: f64, source: BearingSource) -> Self {
        Self {
            degrees: degrees.rem_euclid(360.0),
            source,
        }
    }
}

impl fmt::Display for QiblaBearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° dari utara", self.degrees.round() as i64)
    }
}
