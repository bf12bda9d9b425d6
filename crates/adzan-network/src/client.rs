//! Shared HTTP plumbing: client construction, URL building, JSON fetch.

use std::time::Duration;

use adzan_types::{AdzanError, PrayerTimes};
use reqwest::{Client, Url};
use serde_json::Value;

/// Sent with every request; Nominatim rejects anonymous clients.
pub const USER_AGENT: &str = concat!("adzan/", env!("CARGO_PKG_VERSION"), " (Islamic prayer times library)");

/// Builds a `reqwest::Client` with a per-request timeout.
///
/// # Errors
/// Returns `FetchError` if the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration) -> Result<Client, AdzanError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
        .map_err(|e| AdzanError::FetchError(format!("Failed to create HTTP client: {}", e)))
}

/// Parses a base URL, rejecting anything that cannot carry path segments.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, AdzanError> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| AdzanError::invalid_config(format!("invalid base URL '{}': {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(AdzanError::invalid_config(format!("base URL '{}' cannot be a base", base_url)));
    }
    Ok(url)
}

/// Appends percent-encoded path segments to `base`.
pub(crate) fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Appends query pairs to `base`.
pub(crate) fn with_query(base: &Url, pairs: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        for (k, v) in pairs {
            query.append_pair(k, v);
        }
    }
    url
}

/// Reads a successful response body as JSON.
pub(crate) async fn read_json(response: reqwest::Response, context: &str) -> Result<Value, AdzanError> {
    let response = response
        .error_for_status()
        .map_err(|e| AdzanError::FetchError(format!("{} returned error status: {}", context, e)))?;
    response
        .json::<Value>()
        .await
        .map_err(|e| AdzanError::FetchError(format!("Failed to parse {} response: {}", context, e)))
}

/// GET `url` and parse the body as JSON. Single attempt, no retry.
pub(crate) async fn get_json(client: &Client, url: Url, context: &str) -> Result<Value, AdzanError> {
    tracing::debug!(url = url.as_str(), context, "GET");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AdzanError::FetchError(format!("{} request failed: {}", context, e)))?;
    read_json(response, context).await
}

/// Reads a string field that providers send either as a string or a number.
pub(crate) fn string_or_number(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty string among `keys` of `obj`.
pub(crate) fn first_str<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Reads the prayer slots of one schedule row.
///
/// Providers spell the keys in lower or title case, sometimes both in the
/// same row; each slot takes the first non-empty spelling.
pub(crate) fn prayer_times(row: &Value) -> PrayerTimes {
    let slot = |keys: &[&str]| first_str(row, keys).map(str::to_string);
    PrayerTimes {
        imsak: slot(&["imsak", "Imsak"]),
        subuh: slot(&["subuh", "Subuh"]),
        dhuha: slot(&["dhuha", "Dhuha"]),
        dzuhur: slot(&["dzuhur", "Dzuhur"]),
        ashar: slot(&["ashar", "Ashar"]),
        maghrib: slot(&["maghrib", "Maghrib"]),
        isya: slot(&["isya", "Isya"]),
    }
}
