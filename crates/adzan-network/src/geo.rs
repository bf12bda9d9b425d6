//! Reverse geocoding through OpenStreetMap Nominatim.
//!
//! Turns the device position into Indonesian administrative divisions, which
//! then feed [`adzan_schedule::location_from_place`].

use std::time::Duration;

use adzan_types::{AdzanError, GeoCoordinate, PlaceHint};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::client::{build_client, get_json, parse_base_url, with_query};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Detailed location info with Indonesian administrative divisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedLocationInfo {
    pub coords: GeoCoordinate,
    /// Kelurahan/Desa (village).
    pub kelurahan: Option<String>,
    /// Kecamatan (district).
    pub kecamatan: Option<String>,
    /// City or town as Nominatim names it.
    pub city: Option<String>,
    /// Kabupaten/Kota (regency/city).
    pub kabupaten: Option<String>,
    /// Provinsi (province).
    pub provinsi: Option<String>,
    pub country: Option<String>,
    /// Full formatted address.
    pub display_name: String,
}

impl DetailedLocationInfo {
    /// Indonesian-style address, e.g. `"Menteng, Kec. Menteng, Jakarta Pusat, DKI Jakarta"`.
    pub fn alamat_lengkap(&self) -> String {
        let kecamatan = self.kecamatan.as_deref().map(|k| format!("Kec. {}", k));
        let parts: Vec<&str> = [
            self.kelurahan.as_deref(),
            kecamatan.as_deref(),
            self.kabupaten.as_deref(),
            self.provinsi.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            self.display_name.clone()
        } else {
            parts.join(", ")
        }
    }

    /// The reverse-geocoder view used to pick a schedule city.
    pub fn to_place_hint(&self) -> PlaceHint {
        PlaceHint {
            city: self.city.clone().or_else(|| self.kecamatan.clone()),
            subregion: self.kabupaten.clone(),
            region: self.provinsi.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    village: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,

    county: Option<String>,
    municipality: Option<String>,
    city_district: Option<String>,

    city: Option<String>,
    town: Option<String>,

    state: Option<String>,
    region: Option<String>,
    province: Option<String>,

    country: Option<String>,
}

impl NominatimAddress {
    fn into_info(self, coords: GeoCoordinate, display_name: String) -> DetailedLocationInfo {
        let city = first_some([&self.city, &self.town, &self.village, &self.suburb, &self.municipality]);
        DetailedLocationInfo {
            coords,
            kelurahan: first_some([&self.village, &self.suburb, &self.neighbourhood]),
            kecamatan: first_some([&self.city_district, &self.municipality, &self.county]),
            kabupaten: first_some([&self.city, &self.town, &self.county]),
            city,
            provinsi: first_some([&self.state, &self.region, &self.province]),
            country: self.country,
            display_name,
        }
    }
}

fn first_some<const N: usize>(fields: [&Option<String>; N]) -> Option<String> {
    fields
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    pub fn new(timeout: Duration) -> Result<Self, AdzanError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, AdzanError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Reverse geocodes `coords`.
    ///
    /// # Rate Limiting
    /// Nominatim allows one request per second. Please respect this.
    ///
    /// # Errors
    /// `FetchError` on transport/status/parse failure.
    pub async fn reverse_geocode(&self, coords: GeoCoordinate) -> Result<DetailedLocationInfo, AdzanError> {
        let lat = coords.lat.to_string();
        let lon = coords.lng.to_string();
        let url = with_query(
            &self.base_url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "jsonv2"),
                ("addressdetails", "1"),
                ("accept-language", "id"),
            ],
        );
        let body = get_json(&self.client, url, "nominatim").await?;
        let data: NominatimResponse = serde_json::from_value(body)
            .map_err(|e| AdzanError::FetchError(format!("Failed to parse Nominatim response: {}", e)))?;
        let info = data.address.into_info(coords, data.display_name);
        tracing::debug!(city = ?info.city, province = ?info.provinsi, "reverse geocoded");
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info_from(body: serde_json::Value) -> DetailedLocationInfo {
        let data: NominatimResponse = serde_json::from_value(body).unwrap();
        data.address.into_info(GeoCoordinate::new_unchecked(-6.19, 106.83), data.display_name)
    }

    #[test]
    fn test_jakarta_address() {
        let info = info_from(json!({
            "display_name": "Menteng, Jakarta Pusat, Daerah Khusus Ibukota Jakarta, Indonesia",
            "address": {
                "suburb": "Menteng",
                "city_district": "Menteng",
                "city": "Jakarta Pusat",
                "state": "Daerah Khusus Ibukota Jakarta",
                "country": "Indonesia"
            }
        }));
        assert_eq!(info.kelurahan.as_deref(), Some("Menteng"));
        assert_eq!(info.kecamatan.as_deref(), Some("Menteng"));
        assert_eq!(info.alamat_lengkap(), "Menteng, Kec. Menteng, Jakarta Pusat, Daerah Khusus Ibukota Jakarta");

        let hint = info.to_place_hint();
        assert_eq!(hint.city.as_deref(), Some("Jakarta Pusat"));
        assert_eq!(hint.region.as_deref(), Some("Daerah Khusus Ibukota Jakarta"));
    }

    #[test]
    fn test_rural_address_falls_back() {
        let info = info_from(json!({
            "display_name": "Cibodas, Bogor, Jawa Barat, Indonesia",
            "address": {"village": "Cibodas", "county": "Bogor", "province": "Jawa Barat"}
        }));
        assert_eq!(info.city.as_deref(), Some("Cibodas"));
        assert_eq!(info.kabupaten.as_deref(), Some("Bogor"));
        assert_eq!(info.provinsi.as_deref(), Some("Jawa Barat"));
    }

    #[test]
    fn test_empty_address_uses_display_name() {
        let info = info_from(json!({"display_name": "Somewhere"}));
        assert_eq!(info.alamat_lengkap(), "Somewhere");
        assert_eq!(info.to_place_hint(), PlaceHint::default());
    }
}
