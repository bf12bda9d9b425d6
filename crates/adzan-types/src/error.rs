use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from adzan operations.
///
/// Every variant is recoverable: the screen renders
/// [`AdzanError::localized_message`] instead of crashing.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdzanError {
    /// Location (or heading) access was refused by the device.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The free-form location could not be mapped onto a provider city.
    #[error("No prayer-schedule city matches {query:?}")]
    CityNotFound { query: String },

    /// Transport, timeout, HTTP status or parse failure on an external call.
    #[error("Fetch failed: {0}")]
    FetchError(String),

    /// The provider answered, but with an empty result set.
    #[error("No results: {0}")]
    NoResults(String),

    /// Latitude/longitude outside the valid range.
    #[error("Invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl AdzanError {
    /// Creates a `CityNotFound` error.
    pub fn city_not_found(query: impl Into<String>) -> Self {
        Self::CityNotFound { query: query.into() }
    }

    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Short Indonesian status line shown in place of the failed content.
    pub fn localized_message(&self) -> &'static str {
        match self {
            AdzanError::PermissionDenied => "Izin lokasi ditolak",
            AdzanError::CityNotFound { .. } => "Kota untuk jadwal sholat tidak ditemukan",
            AdzanError::FetchError(_) => "Gagal memuat data, periksa koneksi internet",
            AdzanError::NoResults(_) => "Data tidak ditemukan",
            AdzanError::InvalidCoordinate { .. } => "Koordinat lokasi tidak valid",
            AdzanError::InvalidConfiguration { .. } => "Konfigurasi tidak valid",
        }
    }
}
