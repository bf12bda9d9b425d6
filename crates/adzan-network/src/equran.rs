//! Client for the equran.id monthly prayer schedule API.
//!
//! One POST returns a whole month for a province/regency pair; days are keyed
//! by `tanggal_lengkap` (`YYYY-MM-DD`).

use std::collections::BTreeMap;
use std::time::Duration;

use adzan_schedule::kabkota_for_equran;
use adzan_types::{AdzanError, CityResolution, LocationQuery, PrayerSchedule};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use crate::client::{build_client, first_str, parse_base_url, prayer_times, read_json};
use crate::source::ScheduleSource;

pub const DEFAULT_BASE_URL: &str = "https://equran.id/api/v2/shalat";

#[derive(Debug, Serialize)]
struct MonthRequest<'a> {
    provinsi: &'a str,
    kabkota: &'a str,
    bulan: u32,
    tahun: i32,
}

pub struct EquranClient {
    client: Client,
    base_url: Url,
}

impl EquranClient {
    pub fn new(timeout: Duration) -> Result<Self, AdzanError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, AdzanError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, AdzanError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetches every day of `year`-`month` for one regency.
    ///
    /// # Errors
    /// `FetchError` on transport/status/parse failure or an empty table.
    pub async fn fetch_month(
        &self,
        province: &str,
        kabkota: &str,
        year: i32,
        month: u32,
    ) -> Result<BTreeMap<NaiveDate, PrayerSchedule>, AdzanError> {
        let request = MonthRequest {
            provinsi: province,
            kabkota,
            bulan: month,
            tahun: year,
        };
        tracing::debug!(url = self.base_url.as_str(), province, kabkota, year, month, "POST");
        let response = self
            .client
            .post(self.base_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| AdzanError::FetchError(format!("equran month request failed: {}", e)))?;
        let body = read_json(response, "equran month").await?;
        let days = parse_month(&body, kabkota)?;
        if days.is_empty() {
            return Err(AdzanError::FetchError(format!(
                "equran returned no days for {}, {} {}-{:02}",
                kabkota, province, year, month
            )));
        }
        Ok(days)
    }

    /// Fetches the month containing `date` and picks that day.
    ///
    /// # Errors
    /// `FetchError` if the month cannot be fetched or lacks `date`.
    pub async fn fetch_schedule(&self, province: &str, kabkota: &str, date: NaiveDate) -> Result<PrayerSchedule, AdzanError> {
        let mut days = self.fetch_month(province, kabkota, date.year(), date.month()).await?;
        days.remove(&date)
            .ok_or_else(|| AdzanError::FetchError(format!("equran month for {} has no entry for {}", kabkota, date)))
    }
}

#[async_trait]
impl ScheduleSource for EquranClient {
    fn name(&self) -> &'static str {
        "equran"
    }

    /// The regency name itself is the key; no lookup round-trip.
    async fn resolve(&self, query: &LocationQuery) -> Result<CityResolution, AdzanError> {
        if query.kabkota.trim().is_empty() {
            return Err(AdzanError::city_not_found(query.label.clone()));
        }
        Ok(CityResolution {
            province: query.province.clone(),
            city: query.kabkota.clone(),
            city_id: kabkota_for_equran(&query.kabkota),
        })
    }

    async fn fetch_schedule(&self, city: &CityResolution, date: NaiveDate) -> Result<PrayerSchedule, AdzanError> {
        EquranClient::fetch_schedule(self, &city.province, &city.city_id, date).await
    }
}

/// Reads `data.jadwal[]`; rows with an unparseable `tanggal_lengkap` or no
/// times are skipped.
pub fn parse_month(body: &Value, city_id: &str) -> Result<BTreeMap<NaiveDate, PrayerSchedule>, AdzanError> {
    let rows = body
        .get("data")
        .and_then(|d| d.get("jadwal"))
        .and_then(Value::as_array)
        .ok_or_else(|| AdzanError::FetchError(format!("equran response for {} has no jadwal", city_id)))?;

    let mut days = BTreeMap::new();
    for row in rows {
        let Some(full) = first_str(row, &["tanggal_lengkap"]) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(full, "%Y-%m-%d") else {
            tracing::debug!(tanggal_lengkap = full, "skipping equran row with bad date");
            continue;
        };
        let times = prayer_times(row);
        if times.is_empty() {
            continue;
        }
        let mut schedule = PrayerSchedule::new(date, city_id, times);
        schedule.day_label = Some(match first_str(row, &["hari"]) {
            Some(hari) => format!("{} {}", hari, full),
            None => full.to_string(),
        });
        days.insert(date, schedule);
    }
    Ok(days)
}
