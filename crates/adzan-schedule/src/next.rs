//! Next-prayer selection with rollover to tomorrow's subuh.

use adzan_types::{NextPrayerInfo, PrayerName, PrayerSchedule};
use chrono::{Days, NaiveDateTime};

use crate::clock::{parse_time_for_date, parse_time_today};

/// Finds the next canonical prayer at or after `now`.
///
/// The five prayers are checked in daily order; the first whose time-of-day
/// is `>= now` wins, so a prayer at exactly `now` has zero remaining. When
/// nothing remains today, tomorrow's subuh is used (measured against the
/// calendar day after `now`). Returns `None` when neither applies.
pub fn compute_next_prayer(
    today: &PrayerSchedule,
    tomorrow: Option<&PrayerSchedule>,
    now: NaiveDateTime,
) -> Option<NextPrayerInfo> {
    for prayer in PrayerName::CANONICAL {
        let Some(time) = today.time_of(prayer) else {
            continue;
        };
        let Some(at) = parse_time_today(time, now) else {
            continue;
        };
        if at >= now {
            return Some(NextPrayerInfo {
                prayer,
                time: time.to_string(),
                at,
                remaining: at - now,
                is_tomorrow: false,
            });
        }
    }

    let subuh = tomorrow?.time_of(PrayerName::Subuh)?;
    let next_day = now.date().checked_add_days(Days::new(1))?;
    let at = parse_time_for_date(subuh, next_day)?;
    Some(NextPrayerInfo {
        prayer: PrayerName::Subuh,
        time: subuh.to_string(),
        at,
        remaining: at - now,
        is_tomorrow: true,
    })
}
