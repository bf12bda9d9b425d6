//! Location -> city -> today's and tomorrow's schedule.

use adzan_network::ScheduleSource;
use adzan_types::{AdzanError, CityResolution, LocationQuery, NextPrayerInfo, PlaceHint, PrayerSchedule};
use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::day::{location_or_default, DaySchedules};

pub struct ScheduleResolver<S> {
    source: S,
    default_location: LocationQuery,
}

impl<S: ScheduleSource> ScheduleResolver<S> {
    pub fn new(source: S, default_location: LocationQuery) -> Self {
        Self {
            source,
            default_location,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn default_location(&self) -> &LocationQuery {
        &self.default_location
    }

    /// See [`location_or_default`].
    pub fn location_or_default(&self, hint: Result<PlaceHint, AdzanError>) -> LocationQuery {
        location_or_default(hint, &self.default_location)
    }

    /// Maps `query` onto the provider's city key.
    ///
    /// # Errors
    /// `FetchError` if the provider's city list is unreachable, `CityNotFound`
    /// if nothing matches.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<CityResolution, AdzanError> {
        let resolution = self.source.resolve(query).await?;
        tracing::info!(
            provider = self.source.name(),
            location = %query.label,
            city_id = %resolution.city_id,
            "schedule city resolved"
        );
        Ok(resolution)
    }

    pub async fn fetch(&self, city: &CityResolution, date: NaiveDate) -> Result<PrayerSchedule, AdzanError> {
        self.source.fetch_schedule(city, date).await
    }

    /// Resolves `query` and fetches `today` and the day after.
    ///
    /// Only today's table is required; a failed tomorrow is logged and left
    /// empty, which merely disables the after-Isya rollover.
    ///
    /// # Errors
    /// Resolution errors, or `FetchError` for today's table.
    pub async fn load_day(&self, query: &LocationQuery, today: NaiveDate) -> Result<DaySchedules, AdzanError> {
        let resolution = self.resolve(query).await?;
        self.load_resolved(query.clone(), resolution, today).await
    }

    /// [`load_day`](Self::load_day) for an already resolved city, e.g. at
    /// midnight when only the date changed.
    pub async fn load_resolved(
        &self,
        location: LocationQuery,
        resolution: CityResolution,
        today: NaiveDate,
    ) -> Result<DaySchedules, AdzanError> {
        let today_schedule = self.fetch(&resolution, today).await?;

        let tomorrow = match today.checked_add_days(Days::new(1)) {
            Some(next) => match self.fetch(&resolution, next).await {
                Ok(schedule) => Some(schedule),
                Err(e) => {
                    tracing::warn!(
                        provider = self.source.name(),
                        date = %next,
                        error = %e,
                        "tomorrow's schedule unavailable"
                    );
                    None
                }
            },
            None => None,
        };

        Ok(DaySchedules {
            location,
            resolution,
            today: today_schedule,
            tomorrow,
        })
    }

    pub fn next_prayer(&self, day: &DaySchedules, now: NaiveDateTime) -> Option<NextPrayerInfo> {
        day.next_prayer(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adzan_types::{PrayerName, PrayerTimes};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory provider: one table per date, "Atlantis" is unknown.
    struct Memory {
        days: HashMap<NaiveDate, PrayerTimes>,
    }

    #[async_trait]
    impl ScheduleSource for Memory {
        fn name(&self) -> &'static str {
            "memory"
        }

        async fn resolve(&self, query: &LocationQuery) -> Result<CityResolution, AdzanError> {
            if query.kabkota == "Atlantis" {
                return Err(AdzanError::city_not_found(query.kabkota.clone()));
            }
            Ok(CityResolution {
                province: query.province.clone(),
                city: query.kabkota.clone(),
                city_id: "42".into(),
            })
        }

        async fn fetch_schedule(&self, city: &CityResolution, date: NaiveDate) -> Result<PrayerSchedule, AdzanError> {
            self.days
                .get(&date)
                .cloned()
                .map(|times| PrayerSchedule::new(date, city.city_id.clone(), times))
                .ok_or_else(|| AdzanError::FetchError(format!("no table for {}", date)))
        }
    }

    fn times(subuh: &str) -> PrayerTimes {
        PrayerTimes {
            subuh: Some(subuh.into()),
            dzuhur: Some("11:55".into()),
            ashar: Some("15:15".into()),
            maghrib: Some("17:58".into()),
            isya: Some("19:10".into()),
            ..Default::default()
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn resolver(days: &[(u32, &str)]) -> ScheduleResolver<Memory> {
        let days = days.iter().map(|(d, s)| (date(*d), times(s))).collect();
        ScheduleResolver::new(Memory { days }, LocationQuery::new("Jawa Barat", "Bekasi"))
    }

    #[tokio::test]
    async fn test_load_day_with_tomorrow() {
        let r = resolver(&[(6, "04:30"), (7, "04:31")]);
        let day = r.load_day(&LocationQuery::new("Jawa Barat", "Bekasi"), date(6)).await.unwrap();
        assert_eq!(day.resolution.city_id, "42");
        assert_eq!(day.tomorrow.as_ref().unwrap().date, date(7));

        let late = date(6).and_hms_opt(20, 0, 0).unwrap();
        let next = r.next_prayer(&day, late).unwrap();
        assert_eq!(next.prayer, PrayerName::Subuh);
        assert!(next.is_tomorrow);
        assert_eq!(next.time, "04:31");
    }

    #[tokio::test]
    async fn test_missing_tomorrow_is_tolerated() {
        let r = resolver(&[(6, "04:30")]);
        let day = r.load_day(&LocationQuery::new("Jawa Barat", "Bekasi"), date(6)).await.unwrap();
        assert!(day.tomorrow.is_none());
        assert!(day.next_prayer(date(6).and_hms_opt(20, 0, 0).unwrap()).is_none());
    }

    #[tokio::test]
    async fn test_missing_today_is_an_error() {
        let r = resolver(&[(7, "04:31")]);
        let err = r.load_day(&LocationQuery::new("Jawa Barat", "Bekasi"), date(6)).await.unwrap_err();
        assert!(matches!(err, AdzanError::FetchError(_)));
    }

    #[tokio::test]
    async fn test_unknown_city() {
        let r = resolver(&[(6, "04:30")]);
        let err = r.load_day(&LocationQuery::new("Samudra", "Atlantis"), date(6)).await.unwrap_err();
        assert!(matches!(err, AdzanError::CityNotFound { .. }));
    }

    #[test]
    fn test_location_or_default_uses_configured_default() {
        let r = resolver(&[]);
        let q = r.location_or_default(Err(AdzanError::PermissionDenied));
        assert_eq!(q.label, "Bekasi, Jawa Barat");
    }
}
