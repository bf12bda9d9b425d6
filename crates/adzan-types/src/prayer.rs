use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prayer times and day markers shown on the schedule.
///
/// Declared in chronological order within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerName {
    /// Pre-dawn fasting cutoff.
    Imsak,
    Subuh,
    /// Mid-morning voluntary prayer window.
    Dhuha,
    Dzuhur,
    Ashar,
    Maghrib,
    Isya,
}

impl PrayerName {
    /// The five obligatory prayers, in daily order.
    pub const CANONICAL: [PrayerName; 5] = [
        PrayerName::Subuh,
        PrayerName::Dzuhur,
        PrayerName::Ashar,
        PrayerName::Maghrib,
        PrayerName::Isya,
    ];

    /// Every row of a full schedule table, in daily order.
    pub const ALL: [PrayerName; 7] = [
        PrayerName::Imsak,
        PrayerName::Subuh,
        PrayerName::Dhuha,
        PrayerName::Dzuhur,
        PrayerName::Ashar,
        PrayerName::Maghrib,
        PrayerName::Isya,
    ];

    /// Provider JSON key (`"subuh"`).
    pub fn key(&self) -> &'static str {
        match self {
            PrayerName::Imsak => "imsak",
            PrayerName::Subuh => "subuh",
            PrayerName::Dhuha => "dhuha",
            PrayerName::Dzuhur => "dzuhur",
            PrayerName::Ashar => "ashar",
            PrayerName::Maghrib => "maghrib",
            PrayerName::Isya => "isya",
        }
    }

    /// Display label (`"Subuh"`, `"Isya'"`).
    pub fn label(&self) -> &'static str {
        match self {
            PrayerName::Imsak => "Imsak",
            PrayerName::Subuh => "Subuh",
            PrayerName::Dhuha => "Dhuha",
            PrayerName::Dzuhur => "Dzuhur",
            PrayerName::Ashar => "Ashar",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isya => "Isya'",
        }
    }

    pub fn is_canonical(&self) -> bool {
        Self::CANONICAL.contains(self)
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw `"HH:MM"` strings as the schedule providers send them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimes {
    #[serde(default)]
    pub imsak: Option<String>,
    #[serde(default)]
    pub subuh: Option<String>,
    #[serde(default)]
    pub dhuha: Option<String>,
    #[serde(default)]
    pub dzuhur: Option<String>,
    #[serde(default)]
    pub ashar: Option<String>,
    #[serde(default)]
    pub maghrib: Option<String>,
    #[serde(default)]
    pub isya: Option<String>,
}

impl PrayerTimes {
    /// Returns the time string for `prayer`, treating blank values as missing.
    pub fn get(&self, prayer: PrayerName) -> Option<&str> {
        let slot = match prayer {
            PrayerName::Imsak => &self.imsak,
            PrayerName::Subuh => &self.subuh,
            PrayerName::Dhuha => &self.dhuha,
            PrayerName::Dzuhur => &self.dzuhur,
            PrayerName::Ashar => &self.ashar,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isya => &self.isya,
        };
        slot.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// True when none of the five canonical prayers carries a time.
    pub fn is_empty(&self) -> bool {
        PrayerName::CANONICAL.iter().all(|p| self.get(*p).is_none())
    }
}

/// One day's prayer-time table for one resolved city.
///
/// Immutable once fetched; a new fetch replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerSchedule {
    pub date: NaiveDate,
    /// Provider city identifier (or regency name for name-keyed providers).
    pub city_id: String,
    pub times: PrayerTimes,
    /// Provider's own day label, e.g. `"Senin, 06/01/2026"`.
    pub day_label: Option<String>,
}

impl PrayerSchedule {
    pub fn new(date: NaiveDate, city_id: impl Into<String>, times: PrayerTimes) -> Self {
        Self {
            date,
            city_id: city_id.into(),
            times,
            day_label: None,
        }
    }

    pub fn time_of(&self, prayer: PrayerName) -> Option<&str> {
        self.times.get(prayer)
    }

    /// `(prayer, time)` rows for the schedule table, missing rows included as `None`.
    pub fn rows(&self) -> impl Iterator<Item = (PrayerName, Option<&str>)> + '_ {
        PrayerName::ALL.into_iter().map(|p| (p, self.time_of(p)))
    }
}

/// The upcoming prayer relative to "now". Derived fresh on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPrayerInfo {
    pub prayer: PrayerName,
    /// The `"HH:MM"` string as published by the provider.
    pub time: String,
    /// Absolute instant of the prayer (tomorrow's date for the rollover case).
    pub at: NaiveDateTime,
    /// Time left; zero when the prayer time is exactly now.
    pub remaining: Duration,
    /// True when this is tomorrow's subuh.
    pub is_tomorrow: bool,
}

impl NextPrayerInfo {
    pub fn label(&self) -> &'static str {
        self.prayer.label()
    }

    /// `"Now"`, `"25 min"` or `"2h 5m"`.
    pub fn countdown(&self) -> String {
        format_remaining(self.remaining)
    }
}

/// Formats a countdown the way the home screen shows it.
///
/// Non-positive durations read `"Now"`; minutes are floored.
pub fn format_remaining(remaining: Duration) -> String {
    if remaining <= Duration::zero() {
        return "Now".to_string();
    }
    let total_minutes = remaining.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours <= 0 {
        format!("{} min", minutes)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}

/// One-time notice raised when the clock reaches a prayer time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerAlert {
    pub prayer: PrayerName,
    pub date: NaiveDate,
    pub time: String,
    pub title: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_is_chronological() {
        let mut sorted = PrayerName::CANONICAL;
        sorted.sort();
        assert_eq!(sorted, PrayerName::CANONICAL);
        assert!(!PrayerName::Imsak.is_canonical());
        assert!(PrayerName::Isya.is_canonical());
    }

    #[test]
    fn test_blank_times_are_missing() {
        let json = r#"{"subuh":"04:30","dzuhur":" 12:00 ","isya":""}"#;
        let times: PrayerTimes = serde_json::from_str(json).unwrap();
        assert_eq!(times.get(PrayerName::Subuh), Some("04:30"));
        assert_eq!(times.get(PrayerName::Dzuhur), Some("12:00"));
        assert_eq!(times.get(PrayerName::Isya), None);
        assert_eq!(times.get(PrayerName::Ashar), None);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::zero()), "Now");
        assert_eq!(format_remaining(Duration::seconds(-5)), "Now");
        assert_eq!(format_remaining(Duration::seconds(59)), "0 min");
        assert_eq!(format_remaining(Duration::minutes(25)), "25 min");
        assert_eq!(format_remaining(Duration::minutes(125)), "2h 5m");
    }
}
