//! Client for the myquran.com daily prayer schedule API.
//!
//! Endpoints:
//! - `GET {base}/kota/semua`: every city with its numeric identifier.
//! - `GET {base}/jadwal/{id}/{yyyy}/{mm}/{dd}`: one day's table.

use std::time::Duration;

use adzan_schedule::{resolve_city_id, CityEntry};
use adzan_types::{AdzanError, CityResolution, LocationQuery, PrayerSchedule};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::client::{build_client, first_str, get_json, parse_base_url, prayer_times, string_or_number, with_segments};
use crate::source::ScheduleSource;

pub const DEFAULT_BASE_URL: &str = "https://api.myquran.com/v1/sholat";

/// Accepted spellings of a city entry's identifier.
const CITY_ID_KEYS: [&str; 2] = ["id", "kode"];
/// Accepted spellings of a city entry's name.
const CITY_NAME_KEYS: [&str; 2] = ["lokasi", "nama"];

pub struct MyQuranClient {
    client: Client,
    base_url: Url,
}

impl MyQuranClient {
    /// Client for the production API.
    ///
    /// # Errors
    /// Returns `FetchError` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, AdzanError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Client for a custom base URL (mirrors, tests).
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for an unusable URL, `FetchError` if
    /// the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, AdzanError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Shares an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, AdzanError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetches the provider's full city list.
    ///
    /// # Errors
    /// `FetchError` on transport/status/parse failure.
    pub async fn city_list(&self) -> Result<Vec<CityEntry>, AdzanError> {
        let url = with_segments(&self.base_url, &["kota", "semua"]);
        let body = get_json(&self.client, url, "myquran city list").await?;
        let list = parse_city_list(&body);
        tracing::debug!(count = list.len(), "fetched myquran city list");
        Ok(list)
    }

    /// Resolves a free-form city/province onto a myquran city identifier.
    ///
    /// # Errors
    /// `FetchError` if the list cannot be fetched, `CityNotFound` if nothing matches.
    pub async fn resolve_city_id(&self, city: &str, province: &str) -> Result<String, AdzanError> {
        let list = self.city_list().await?;
        resolve_city_id(city, province, &list)
    }

    /// Fetches one day's schedule. Single GET, no retry, no cached fallback.
    ///
    /// # Errors
    /// `FetchError` on transport/status/parse failure or a missing `jadwal`.
    pub async fn fetch_schedule(&self, city_id: &str, date: NaiveDate) -> Result<PrayerSchedule, AdzanError> {
        let year = format!("{:04}", date.year());
        let month = format!("{:02}", date.month());
        let day = format!("{:02}", date.day());
        let url = with_segments(&self.base_url, &["jadwal", city_id, &year, &month, &day]);
        let body = get_json(&self.client, url, "myquran schedule").await?;
        parse_schedule(&body, city_id, date)
    }
}

#[async_trait]
impl ScheduleSource for MyQuranClient {
    fn name(&self) -> &'static str {
        "myquran"
    }

    async fn resolve(&self, query: &LocationQuery) -> Result<CityResolution, AdzanError> {
        let city_id = self.resolve_city_id(&query.kabkota, &query.province).await?;
        Ok(CityResolution {
            province: query.province.clone(),
            city: query.kabkota.clone(),
            city_id,
        })
    }

    async fn fetch_schedule(&self, city: &CityResolution, date: NaiveDate) -> Result<PrayerSchedule, AdzanError> {
        MyQuranClient::fetch_schedule(self, &city.city_id, date).await
    }
}

/// Reads `{data: [...]}` or a bare array; entries without id or name are skipped.
pub fn parse_city_list(body: &Value) -> Vec<CityEntry> {
    let items = body
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| body.as_array());
    let Some(items) = items else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let id = CITY_ID_KEYS.iter().find_map(|k| string_or_number(item.get(*k)))?;
            let name = first_str(item, &CITY_NAME_KEYS)?;
            Some(CityEntry::new(id, name))
        })
        .collect()
}

/// Reads `data.jadwal` into a [`PrayerSchedule`].
///
/// # Errors
/// `FetchError` if the payload is missing or carries no prayer times.
pub fn parse_schedule(body: &Value, city_id: &str, date: NaiveDate) -> Result<PrayerSchedule, AdzanError> {
    let jadwal = body
        .get("data")
        .and_then(|d| d.get("jadwal"))
        .filter(|j| j.is_object())
        .ok_or_else(|| AdzanError::FetchError(format!("myquran schedule for {} on {} has no jadwal", city_id, date)))?;

    let times = prayer_times(jadwal);
    if times.is_empty() {
        return Err(AdzanError::FetchError(format!("myquran schedule for {} on {} is empty", city_id, date)));
    }

    let mut schedule = PrayerSchedule::new(date, city_id, times);
    schedule.day_label = first_str(jadwal, &["tanggal"]).map(str::to_string);
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adzan_types::PrayerName;
    use serde_json::json;

    #[test]
    fn test_parse_city_list_variants() {
        let body = json!({
            "status": true,
            "data": [
                {"id": "1301", "lokasi": "KOTA JAKARTA"},
                {"kode": 1609, "nama": "KOTA MALANG"},
                {"id": "9999"},
                {"lokasi": "NO ID"}
            ]
        });
        let list = parse_city_list(&body);
        assert_eq!(list, vec![CityEntry::new("1301", "KOTA JAKARTA"), CityEntry::new("1609", "KOTA MALANG")]);

        let bare = json!([{"id": 7, "lokasi": "Bandung"}]);
        assert_eq!(parse_city_list(&bare), vec![CityEntry::new("7", "Bandung")]);
        assert!(parse_city_list(&json!({"status": false})).is_empty());
    }

    #[test]
    fn test_parse_schedule() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        let body = json!({
            "status": true,
            "data": {
                "id": 1301,
                "lokasi": "KOTA JAKARTA",
                "jadwal": {
                    "tanggal": "Selasa, 06/01/2026",
                    "imsak": "04:10", "subuh": "04:20", "terbit": "05:39", "dhuha": "06:08",
                    "dzuhur": "11:58", "ashar": "15:23", "maghrib": "18:10", "isya": "19:25",
                    "date": "2026-01-06"
                }
            }
        });
        let s = parse_schedule(&body, "1301", date).unwrap();
        assert_eq!(s.city_id, "1301");
        assert_eq!(s.date, date);
        assert_eq!(s.time_of(PrayerName::Maghrib), Some("18:10"));
        assert_eq!(s.day_label.as_deref(), Some("Selasa, 06/01/2026"));
    }

    #[test]
    fn test_parse_schedule_with_both_key_spellings() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        let body = json!({"data": {"jadwal": {"subuh": "04:30", "Subuh": "04:30", "Isya": "19:00", "isya": ""}}});
        let s = parse_schedule(&body, "1301", date).unwrap();
        assert_eq!(s.time_of(PrayerName::Subuh), Some("04:30"));
        assert_eq!(s.time_of(PrayerName::Isya), Some("19:00"));
    }

    #[test]
    fn test_parse_schedule_missing_jadwal() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        let err = parse_schedule(&json!({"status": false, "message": "not found"}), "1", date).unwrap_err();
        assert!(matches!(err, AdzanError::FetchError(_)));
        let err = parse_schedule(&json!({"data": {"jadwal": {"tanggal": "x"}}}), "1", date).unwrap_err();
        assert!(matches!(err, AdzanError::FetchError(_)));
    }
}
