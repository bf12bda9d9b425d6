//! One-shot "prayer time has arrived" alerts.

use std::collections::HashSet;

use adzan_types::{PrayerAlert, PrayerName, PrayerSchedule};
use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::parse_time_today;
use crate::quotes::ALERT_QUOTE;

/// Width of the window after a prayer time in which the alert may fire.
pub const ALERT_WINDOW_SECS: i64 = 60;

/// Remembers which prayers were already signalled, per calendar day.
///
/// A prayer fires at most once per day, even when the one-second tick
/// re-enters the window after the wall clock is moved back. Entries within
/// a day of the current tick are kept, so a clock stepped back across
/// midnight still sees the previous day's record.
#[derive(Debug, Clone, Default)]
pub struct PrayerAlarm {
    fired: HashSet<(NaiveDate, PrayerName)>,
}

impl PrayerAlarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `now` against today's schedule and returns at most one new alert.
    pub fn poll(&mut self, schedule: &PrayerSchedule, now: NaiveDateTime) -> Option<PrayerAlert> {
        let today = now.date();
        self.fired.retain(|(date, _)| (*date - today).num_days().abs() <= 1);

        for prayer in PrayerName::CANONICAL {
            let Some(time) = schedule.time_of(prayer) else {
                continue;
            };
            let Some(at) = parse_time_today(time, now) else {
                continue;
            };
            let elapsed = (now - at).num_milliseconds();
            if !(0..ALERT_WINDOW_SECS * 1000).contains(&elapsed) {
                continue;
            }
            if !self.fired.insert((today, prayer)) {
                continue;
            }
            tracing::info!(prayer = prayer.key(), time, "prayer time reached");
            return Some(PrayerAlert {
                prayer,
                date: today,
                time: time.to_string(),
                title: format!("Waktu Sholat {}", prayer.label()),
                message: format!("Telah tiba pada pukul {}\n\n{}", time, ALERT_QUOTE),
            });
        }
        None
    }

    pub fn has_fired(&self, date: NaiveDate, prayer: PrayerName) -> bool {
        self.fired.contains(&(date, prayer))
    }

    pub fn reset(&mut self) {
        self.fired.clear();
    }
}
