//! Today's and tomorrow's tables for one resolved location.

use adzan_schedule::{compute_next_prayer, daily_quote, location_from_place};
use adzan_types::{AdzanError, CityResolution, LocationQuery, NextPrayerInfo, PlaceHint, PrayerSchedule};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// What the prayer screen renders: the location, today's table and, when it
/// could be fetched, tomorrow's (for the after-Isya rollover).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedules {
    pub location: LocationQuery,
    pub resolution: CityResolution,
    pub today: PrayerSchedule,
    pub tomorrow: Option<PrayerSchedule>,
}

impl DaySchedules {
    pub fn next_prayer(&self, now: NaiveDateTime) -> Option<NextPrayerInfo> {
        compute_next_prayer(&self.today, self.tomorrow.as_ref(), now)
    }

    pub fn quote(&self) -> &'static str {
        daily_quote(self.today.date)
    }

    /// True once the wall clock has moved past the day these tables cover.
    pub fn is_stale(&self, now: NaiveDateTime) -> bool {
        now.date() != self.today.date
    }
}

/// Picks the lookup location from a reverse-geocode outcome.
///
/// A denied permission, a failed lookup or a hint that names nothing all
/// fall back to `default`.
pub fn location_or_default(hint: Result<PlaceHint, AdzanError>, default: &LocationQuery) -> LocationQuery {
    match hint {
        Ok(hint) => match location_from_place(&hint) {
            Some(query) => query,
            None => {
                tracing::debug!(?hint, "place hint names nothing, using default location");
                default.clone()
            }
        },
        Err(AdzanError::PermissionDenied) => {
            tracing::info!(default = %default.label, "location permission denied, using default location");
            default.clone()
        }
        Err(e) => {
            tracing::warn!(error = %e, default = %default.label, "location lookup failed, using default location");
            default.clone()
        }
    }
}
