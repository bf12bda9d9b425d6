use adzan_types::{AdzanError, CityResolution, LocationQuery, PrayerSchedule};
use async_trait::async_trait;
use chrono::NaiveDate;

/// A prayer-schedule provider.
///
/// Providers key their tables differently (numeric city id vs. province and
/// regency names), so resolution and fetching are separate steps: resolve
/// once per location change, then fetch as many days as needed.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Maps a free-form location onto this provider's city key.
    async fn resolve(&self, query: &LocationQuery) -> Result<CityResolution, AdzanError>;

    /// Fetches one day's table for a resolved city.
    async fn fetch_schedule(&self, city: &CityResolution, date: NaiveDate) -> Result<PrayerSchedule, AdzanError>;
}

#[async_trait]
impl<T: ScheduleSource + ?Sized> ScheduleSource for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn resolve(&self, query: &LocationQuery) -> Result<CityResolution, AdzanError> {
        (**self).resolve(query).await
    }

    async fn fetch_schedule(&self, city: &CityResolution, date: NaiveDate) -> Result<PrayerSchedule, AdzanError> {
        (**self).fetch_schedule(city, date).await
    }
}
