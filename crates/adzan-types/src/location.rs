use serde::{Deserialize, Serialize};

/// Raw reverse-geocoder output for the device position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceHint {
    /// City or, on some platforms, the kecamatan.
    pub city: Option<String>,
    /// Kabupaten/kota.
    pub subregion: Option<String>,
    /// Province.
    pub region: Option<String>,
}

/// Free-form location used to look up a schedule city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    /// Header text, e.g. `"Bekasi, Jawa Barat"`.
    pub label: String,
    pub province: String,
    /// Kabupaten/kota as the user or geocoder named it.
    pub kabkota: String,
}

impl LocationQuery {
    pub fn new(province: impl Into<String>, kabkota: impl Into<String>) -> Self {
        let province = province.into();
        let kabkota = kabkota.into();
        let label = match (kabkota.is_empty(), province.is_empty()) {
            (false, false) => format!("{}, {}", kabkota, province),
            (false, true) => kabkota.clone(),
            _ => province.clone(),
        };
        Self { label, province, kabkota }
    }
}

/// A free-form location mapped onto a provider's city identifier.
///
/// Derived once per location change; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityResolution {
    pub province: String,
    pub city: String,
    pub city_id: String,
}
