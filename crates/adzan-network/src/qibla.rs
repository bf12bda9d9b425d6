//! Qibla bearing from public qibla APIs, with a local great-circle fallback.

use std::time::Duration;

use adzan_geo::local_qibla;
use adzan_types::{AdzanError, BearingSource, GeoCoordinate, QiblaBearing};
use reqwest::{Client, Url};
use serde_json::Value;
use smallvec::SmallVec;

use crate::client::{build_client, get_json, parse_base_url, with_query, with_segments};

pub const MYQURAN_QIBLA_URL: &str = "https://api.myquran.com/v3/qibla";
pub const SISWADI_QIBLA_URL: &str = "https://time.siswadi.com/qibla";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(7);

/// City used by the last remote attempt when nothing else answered.
const LAST_RESORT_CITY: &str = "Jakarta";

const DIRECTION_KEYS: [&str; 3] = ["direction", "deg", "bearing"];
const DEGREE_KEYS: [&str; 3] = ["derajat", "degree", "qibla_degree"];

pub type AttemptList = SmallVec<[Url; 5]>;

pub struct QiblaClient {
    client: Client,
    myquran: Url,
    siswadi: Url,
}

impl QiblaClient {
    pub fn new() -> Result<Self, AdzanError> {
        Self::with_base_urls(MYQURAN_QIBLA_URL, SISWADI_QIBLA_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_urls(myquran: &str, siswadi: &str, timeout: Duration) -> Result<Self, AdzanError> {
        Ok(Self {
            client: build_client(timeout)?,
            myquran: parse_base_url(myquran)?,
            siswadi: parse_base_url(siswadi)?,
        })
    }

    /// The fixed request sequence for `coord`, in the order it is tried.
    ///
    /// The address form is only included for a non-blank hint.
    pub fn attempt_urls(&self, coord: GeoCoordinate, address_hint: Option<&str>) -> AttemptList {
        let lat = coord.lat.to_string();
        let lng = coord.lng.to_string();
        let (lat, lng) = (lat.as_str(), lng.as_str());
        let mut urls = AttemptList::new();
        urls.push(with_query(&self.myquran, &[("lat", lat), ("lon", lng)]));
        urls.push(with_segments(&self.siswadi, &[lat, lng]));
        let siswadi_root = with_segments(&self.siswadi, &[""]);
        urls.push(with_query(&siswadi_root, &[("lat", lat), ("lng", lng)]));
        if let Some(hint) = address_hint.map(str::trim).filter(|h| !h.is_empty()) {
            urls.push(with_query(&siswadi_root, &[("address", hint)]));
        }
        urls.push(with_segments(&self.siswadi, &[LAST_RESORT_CITY]));
        urls
    }

    /// Tries each remote source in turn; the first numeric degree wins.
    /// Never fails: when every attempt fails the bearing is computed locally.
    pub async fn resolve(&self, coord: GeoCoordinate, address_hint: Option<&str>) -> QiblaBearing {
        for url in self.attempt_urls(coord, address_hint) {
            let shown = url.to_string();
            match get_json(&self.client, url, "qibla").await {
                Ok(body) => match extract_degrees(&body) {
                    Some(degrees) => {
                        let bearing = QiblaBearing::new(degrees, BearingSource::Api);
                        tracing::info!(url = %shown, degrees = bearing.degrees, "qibla resolved from API");
                        return bearing;
                    }
                    None => tracing::debug!(url = %shown, "qibla response carried no numeric degree"),
                },
                Err(e) => tracing::debug!(url = %shown, error = %e, "qibla attempt failed"),
            }
        }
        let bearing = local_qibla(coord);
        tracing::warn!(%coord, degrees = bearing.degrees, "all qibla APIs failed, using local bearing");
        bearing
    }

    /// Immediate local value, shown while [`resolve`](Self::resolve) runs.
    pub fn local(&self, coord: GeoCoordinate) -> QiblaBearing {
        local_qibla(coord)
    }
}

/// Pulls a bearing out of any of the known response shapes.
///
/// The first alias present with a non-null value decides: if that value is
/// not a finite JSON number the response carries no bearing, and later
/// aliases are not consulted.
pub fn extract_degrees(body: &Value) -> Option<f64> {
    let data = body.get("data");
    let qibla = body.get("qibla");
    let candidates: [(Option<&Value>, &[&str]); 5] = [
        (data, &DIRECTION_KEYS),
        (Some(body), &DIRECTION_KEYS),
        (qibla, &DIRECTION_KEYS),
        (data, &DEGREE_KEYS),
        (Some(body), &DEGREE_KEYS),
    ];
    candidates
        .iter()
        .filter_map(|&(obj, keys)| obj.map(|o| (o, keys)))
        .flat_map(|(obj, keys)| keys.iter().filter_map(move |k| obj.get(*k)))
        .find(|v| !v.is_null())
        .and_then(Value::as_f64)
        .filter(|d| d.is_finite())
}
