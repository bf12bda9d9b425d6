//! HTTP clients for adzan: prayer schedules, qibla, nearby mosques and
//! reverse geocoding.
//!
//! Every client takes its base URL at construction so it can be pointed at a
//! mirror or a mock server. Requests are single-shot: no retry, no backoff.

pub mod client;
pub mod equran;
pub mod geo;
pub mod geoapify;
pub mod myquran;
pub mod nearby;
pub mod overpass;
pub mod qibla;
pub mod source;

pub use client::{build_client, USER_AGENT};
pub use equran::EquranClient;
pub use geo::{DetailedLocationInfo, NominatimClient};
pub use geoapify::GeoapifyProvider;
pub use myquran::MyQuranClient;
pub use nearby::{MosqueFinder, NearbySettings, PlaceProvider};
pub use overpass::OverpassProvider;
pub use qibla::{extract_degrees, QiblaClient};
pub use source::ScheduleSource;
