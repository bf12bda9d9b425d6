//! OpenStreetMap mosques through the Overpass API.

use std::time::Duration;

use adzan_geo::haversine_km;
use adzan_types::{AdzanError, GeoCoordinate, PlaceOfWorship, PlaceSource};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::client::{build_client, first_str, parse_base_url, read_json};
use crate::nearby::PlaceProvider;

pub const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";
pub const UNNAMED_MOSQUE: &str = "Masjid tanpa nama";

/// Element cap passed to `out center`.
const MAX_ELEMENTS: u32 = 30;

pub struct OverpassProvider {
    client: Client,
    base_url: Url,
}

impl OverpassProvider {
    pub fn new(timeout: Duration) -> Result<Self, AdzanError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, AdzanError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl PlaceProvider for OverpassProvider {
    fn source(&self) -> PlaceSource {
        PlaceSource::Overpass
    }

    async fn search(&self, center: GeoCoordinate, radius_m: u32) -> Result<Vec<PlaceOfWorship>, AdzanError> {
        let query = build_query(center, radius_m);
        tracing::debug!(url = self.base_url.as_str(), radius_m, "POST overpass");
        let response = self
            .client
            .post(self.base_url.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .await
            .map_err(|e| AdzanError::FetchError(format!("overpass request failed: {}", e)))?;
        let body = read_json(response, "overpass").await?;
        Ok(parse_elements(&body, center))
    }
}

/// Overpass QL for Muslim places of worship around `center`.
pub fn build_query(center: GeoCoordinate, radius_m: u32) -> String {
    let around = format!("around:{},{},{}", radius_m, center.lat, center.lng);
    let filter = r#"["amenity"="place_of_worship"]["religion"="muslim"]"#;
    format!(
        "[out:json][timeout:25];\n(\n  node({around}){filter};\n  way({around}){filter};\n  relation({around}){filter};\n);\nout center {MAX_ELEMENTS};\n"
    )
}

/// Converts `elements[]` into places; elements without a position are skipped.
pub fn parse_elements(body: &Value, center: GeoCoordinate) -> Vec<PlaceOfWorship> {
    let Some(elements) = body.get("elements").and_then(Value::as_array) else {
        return Vec::new();
    };
    elements.iter().filter_map(|el| parse_element(el, center)).collect()
}

fn parse_element(el: &Value, center: GeoCoordinate) -> Option<PlaceOfWorship> {
    let (lat, lng) = element_position(el)?;
    let position = GeoCoordinate::new(lat, lng).ok()?;
    let empty = Value::Null;
    let tags = el.get("tags").unwrap_or(&empty);

    let name = first_str(tags, &["name", "name:en", "name:id"]).unwrap_or(UNNAMED_MOSQUE);
    let address = [
        first_str(tags, &["addr:street"]),
        first_str(tags, &["addr:suburb", "suburb"]),
        first_str(tags, &["addr:city", "city", "town"]),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    let kind = el.get("type").and_then(Value::as_str).unwrap_or("node");
    let id = el.get("id").map(|v| v.to_string()).unwrap_or_default();

    Some(PlaceOfWorship {
        id: format!("osm:{}/{}", kind, id),
        name: name.to_string(),
        address,
        latitude: lat,
        longitude: lng,
        distance_km: haversine_km(center, position),
        source: PlaceSource::Overpass,
    })
}

/// Nodes carry `lat`/`lon`; ways and relations carry `center`.
fn element_position(el: &Value) -> Option<(f64, f64)> {
    let read = |obj: &Value| Some((obj.get("lat")?.as_f64()?, obj.get("lon")?.as_f64()?));
    read(el).or_else(|| el.get("center").and_then(read))
}
