//! Core types shared by the adzan crates.

pub mod coordinate;
pub mod error;
pub mod location;
pub mod place;
pub mod prayer;

pub use coordinate::GeoCoordinate;
pub use error::AdzanError;
pub use location::{CityResolution, LocationQuery, PlaceHint};
pub use place::{BearingSource, PlaceOfWorship, PlaceSource, QiblaBearing};
pub use prayer::{format_remaining, NextPrayerInfo, PrayerAlert, PrayerName, PrayerSchedule, PrayerTimes};
