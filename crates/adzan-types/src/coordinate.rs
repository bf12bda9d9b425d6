use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AdzanError;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude, -90..=90 (positive north).
    pub lat: f64,
    /// Longitude, -180..=180 (positive east).
    pub lng: f64,
}

impl GeoCoordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    /// Returns `InvalidCoordinate` for non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, AdzanError> {
        if !lat.is_finite() || !lng.is_finite() || !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(AdzanError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Creates a coordinate without range checks (trusted provider data).
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}
