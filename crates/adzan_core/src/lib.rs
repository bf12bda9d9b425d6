//! Core logic for adzan: configuration, the schedule resolver and the
//! prayer ticker.
//!
//! The pure pieces (schedule logic, geometry, configuration) are always
//! available. Network clients, the resolvers built on them and the tokio
//! ticker sit behind the `async` feature.

pub mod config;
pub mod day;

#[cfg(feature = "async")]
pub mod schedule;
#[cfg(feature = "async")]
pub mod services;
#[cfg(feature = "async")]
pub mod ticker;

pub use adzan_geo as geo;
#[cfg(feature = "async")]
pub use adzan_network as network;
pub use adzan_schedule as prayer;
pub use adzan_types as types;

pub use config::{Endpoints, ResolverConfig, ResolverConfigBuilder, ScheduleProvider};
pub use day::{location_or_default, DaySchedules};
pub use adzan_types::AdzanError;

#[cfg(feature = "async")]
pub use schedule::ScheduleResolver;
#[cfg(feature = "async")]
pub use services::AdzanClient;
#[cfg(feature = "async")]
pub use ticker::{spawn_prayer_ticker, Clock, SystemClock, Tick, TickerHandle};

pub mod prelude {
    pub use adzan_types::*;
    pub use adzan_geo::{format_distance, haversine_km, pointer_rotation, qibla_bearing, rotation_guide, select_heading};
    pub use adzan_schedule::{compute_next_prayer, daily_quote, PrayerAlarm};
    pub use crate::{DaySchedules, ResolverConfig, ScheduleProvider};

    #[cfg(feature = "async")]
    pub use crate::{spawn_prayer_ticker, AdzanClient, Clock, ScheduleResolver, SystemClock, Tick, TickerHandle};
    #[cfg(feature = "async")]
    pub use adzan_network::{MosqueFinder, QiblaClient, ScheduleSource};
}
