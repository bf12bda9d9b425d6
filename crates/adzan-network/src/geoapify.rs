//! Geoapify Places API provider. Only built when an API key is configured.

use std::time::Duration;

use adzan_geo::haversine_km;
use adzan_types::{AdzanError, GeoCoordinate, PlaceOfWorship, PlaceSource};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::client::{build_client, first_str, get_json, parse_base_url, string_or_number, with_query};
use crate::nearby::PlaceProvider;
use crate::overpass::UNNAMED_MOSQUE;

pub const DEFAULT_BASE_URL: &str = "https://api.geoapify.com/v2/places";
pub const CATEGORY: &str = "religion.place_of_worship.islam";

pub struct GeoapifyProvider {
    client: Client,
    base_url: Url,
    api_key: String,
    limit: usize,
}

impl GeoapifyProvider {
    /// # Errors
    /// `InvalidConfiguration` for a blank key.
    pub fn new(api_key: impl Into<String>, limit: usize, timeout: Duration) -> Result<Self, AdzanError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, limit, timeout)
    }

    pub fn with_base_url(
        base_url: &str,
        api_key: impl Into<String>,
        limit: usize,
        timeout: Duration,
    ) -> Result<Self, AdzanError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AdzanError::invalid_config("Geoapify API key is empty"));
        }
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
            api_key,
            limit,
        })
    }

    pub fn request_url(&self, center: GeoCoordinate, radius_m: u32) -> Url {
        let filter = format!("circle:{},{},{}", center.lng, center.lat, radius_m);
        let bias = format!("proximity:{},{}", center.lng, center.lat);
        let limit = self.limit.to_string();
        with_query(
            &self.base_url,
            &[
                ("categories", CATEGORY),
                ("filter", filter.as_str()),
                ("bias", bias.as_str()),
                ("limit", limit.as_str()),
                ("apiKey", self.api_key.as_str()),
            ],
        )
    }
}

#[async_trait]
impl PlaceProvider for GeoapifyProvider {
    fn source(&self) -> PlaceSource {
        PlaceSource::Geoapify
    }

    async fn search(&self, center: GeoCoordinate, radius_m: u32) -> Result<Vec<PlaceOfWorship>, AdzanError> {
        let url = self.request_url(center, radius_m);
        let body = get_json(&self.client, url, "geoapify places").await?;
        Ok(parse_features(&body, center))
    }
}

/// Converts `features[]` into places; features without a position are skipped.
pub fn parse_features(body: &Value, center: GeoCoordinate) -> Vec<PlaceOfWorship> {
    let Some(features) = body.get("features").and_then(Value::as_array) else {
        return Vec::new();
    };
    features
        .iter()
        .enumerate()
        .filter_map(|(i, f)| parse_feature(f, i, center))
        .collect()
}

fn parse_feature(feature: &Value, index: usize, center: GeoCoordinate) -> Option<PlaceOfWorship> {
    let props = feature.get("properties")?;
    let (lat, lng) = feature_position(feature, props)?;
    let position = GeoCoordinate::new(lat, lng).ok()?;

    let name = first_str(props, &["name", "address_line1"]).unwrap_or(UNNAMED_MOSQUE);
    let address = first_str(props, &["formatted", "address_line2"]).unwrap_or_default();
    let id = string_or_number(props.get("place_id")).unwrap_or_else(|| index.to_string());

    Some(PlaceOfWorship {
        id: format!("geoapify:{}", id),
        name: name.to_string(),
        address: address.to_string(),
        latitude: lat,
        longitude: lng,
        distance_km: haversine_km(center, position),
        source: PlaceSource::Geoapify,
    })
}

/// `properties.lat/lon`, else GeoJSON `geometry.coordinates` (`[lon, lat]`).
fn feature_position(feature: &Value, props: &Value) -> Option<(f64, f64)> {
    if let (Some(lat), Some(lon)) = (
        props.get("lat").and_then(Value::as_f64),
        props.get("lon").and_then(Value::as_f64),
    ) {
        return Some((lat, lon));
    }
    let coords = feature.get("geometry")?.get("coordinates")?.as_array()?;
    Some((coords.get(1)?.as_f64()?, coords.first()?.as_f64()?))
}
