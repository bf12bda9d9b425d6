//! # Adzan
//!
//! Islamic prayer schedules, qibla direction and nearest mosques for
//! Indonesian locations.
//!
//! This crate is a facade that re-exports functionality from the `adzan` ecosystem.
//!
//! ## Modules
//!
//! - `types`: Core types (PrayerSchedule, QiblaBearing, PlaceOfWorship, etc.)
//! - `prayer`: Next-prayer selection, alerts and city resolution
//! - `geo`: Qibla bearing, haversine distance, place merging
//! - `network`: Schedule, qibla, POI and geocoding clients (`async` feature)
//!
//! ## Usage
//!
//! ```rust
//! use adzan::prelude::*;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
//! let times = PrayerTimes {
//!     subuh: Some("04:31".into()),
//!     dzuhur: Some("11:55".into()),
//!     ashar: Some("15:15".into()),
//!     maghrib: Some("17:58".into()),
//!     isya: Some("19:10".into()),
//!     ..Default::default()
//! };
//! let today = PrayerSchedule::new(date, "1219", times);
//! let next = compute_next_prayer(&today, None, date.and_hms_opt(13, 0, 0).unwrap()).unwrap();
//! assert_eq!(next.prayer, PrayerName::Ashar);
//! assert_eq!(next.countdown(), "2h 15m");
//! ```

pub use adzan_core::*;
