//! Resolver configuration: endpoints, timeouts, search radii and the
//! fallback location.

use std::time::Duration;

use adzan_schedule::city::{DEFAULT_KABKOTA, DEFAULT_PROVINCE};
use adzan_types::{AdzanError, LocationQuery};
use serde::{Deserialize, Serialize};
use url::Url;

pub const GEOAPIFY_KEY_ENV: &str = "GEOAPIFY_API_KEY";

pub const MYQURAN_URL: &str = "https://api.myquran.com/v1/sholat";
pub const EQURAN_URL: &str = "https://equran.id/api/v2/shalat";
pub const MYQURAN_QIBLA_URL: &str = "https://api.myquran.com/v3/qibla";
pub const SISWADI_QIBLA_URL: &str = "https://time.siswadi.com/qibla";
pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const GEOAPIFY_URL: &str = "https://api.geoapify.com/v2/places";
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Which service supplies the daily table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleProvider {
    /// Per-day lookups keyed by a numeric city id.
    #[default]
    MyQuran,
    /// Whole-month lookups keyed by province and regency.
    Equran,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub myquran: String,
    pub equran: String,
    pub myquran_qibla: String,
    pub siswadi_qibla: String,
    pub overpass: String,
    pub geoapify: String,
    pub nominatim: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            myquran: MYQURAN_URL.into(),
            equran: EQURAN_URL.into(),
            myquran_qibla: MYQURAN_QIBLA_URL.into(),
            siswadi_qibla: SISWADI_QIBLA_URL.into(),
            overpass: OVERPASS_URL.into(),
            geoapify: GEOAPIFY_URL.into(),
            nominatim: NOMINATIM_URL.into(),
        }
    }
}

impl Endpoints {
    /// Every endpoint rooted at `base`, e.g. a local mock server.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            myquran: format!("{}/v1/sholat", base),
            equran: format!("{}/api/v2/shalat", base),
            myquran_qibla: format!("{}/v3/qibla", base),
            siswadi_qibla: format!("{}/qibla", base),
            overpass: format!("{}/api/interpreter", base),
            geoapify: format!("{}/v2/places", base),
            nominatim: format!("{}/reverse", base),
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("myquran", self.myquran.as_str()),
            ("equran", self.equran.as_str()),
            ("myquran_qibla", self.myquran_qibla.as_str()),
            ("siswadi_qibla", self.siswadi_qibla.as_str()),
            ("overpass", self.overpass.as_str()),
            ("geoapify", self.geoapify.as_str()),
            ("nominatim", self.nominatim.as_str()),
        ]
        .into_iter()
    }
}

/// Validated resolver settings. Build with [`ResolverConfig::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub endpoints: Endpoints,
    pub schedule_provider: ScheduleProvider,
    /// Enables the Geoapify provider when set.
    pub geoapify_api_key: Option<String>,
    pub schedule_timeout: Duration,
    pub qibla_timeout: Duration,
    pub poi_timeout: Duration,
    pub near_radius_m: u32,
    pub wide_radius_m: u32,
    pub min_results: usize,
    pub max_results: usize,
    /// Used when location access is denied or the geocoder names nothing.
    pub default_location: LocationQuery,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            schedule_provider: ScheduleProvider::default(),
            geoapify_api_key: None,
            schedule_timeout: Duration::from_secs(15),
            qibla_timeout: Duration::from_secs(7),
            poi_timeout: Duration::from_secs(15),
            near_radius_m: 1500,
            wide_radius_m: 3000,
            min_results: 5,
            max_results: 15,
            default_location: LocationQuery::new(DEFAULT_PROVINCE, DEFAULT_KABKOTA),
        }
    }
}

impl ResolverConfig {
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::new()
    }

    /// Defaults plus the Geoapify key from the environment, if any.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let geoapify_api_key = lookup(GEOAPIFY_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if geoapify_api_key.is_none() {
            tracing::debug!(var = GEOAPIFY_KEY_ENV, "not set, nearby search uses Overpass only");
        }
        Self {
            geoapify_api_key,
            ..Self::default()
        }
    }
}

/// Builder with validation for `ResolverConfig`.
#[derive(Debug, Default)]
pub struct ResolverConfigBuilder {
    endpoints: Option<Endpoints>,
    schedule_provider: Option<ScheduleProvider>,
    geoapify_api_key: Option<String>,
    schedule_timeout: Option<Duration>,
    qibla_timeout: Option<Duration>,
    poi_timeout: Option<Duration>,
    near_radius_m: Option<u32>,
    wide_radius_m: Option<u32>,
    min_results: Option<usize>,
    max_results: Option<usize>,
    default_location: Option<LocationQuery>,
}

impl ResolverConfigBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self { self.endpoints = Some(endpoints); self }
    pub fn schedule_provider(mut self, provider: ScheduleProvider) -> Self { self.schedule_provider = Some(provider); self }
    pub fn geoapify_api_key(mut self, key: impl Into<String>) -> Self { self.geoapify_api_key = Some(key.into()); self }
    pub fn schedule_timeout(mut self, timeout: Duration) -> Self { self.schedule_timeout = Some(timeout); self }
    pub fn qibla_timeout(mut self, timeout: Duration) -> Self { self.qibla_timeout = Some(timeout); self }
    pub fn poi_timeout(mut self, timeout: Duration) -> Self { self.poi_timeout = Some(timeout); self }
    pub fn radii(mut self, near_m: u32, wide_m: u32) -> Self { self.near_radius_m = Some(near_m); self.wide_radius_m = Some(wide_m); self }
    pub fn min_results(mut self, min: usize) -> Self { self.min_results = Some(min); self }
    pub fn max_results(mut self, max: usize) -> Self { self.max_results = Some(max); self }

    /// Fallback location, e.g. `("Jawa Barat", "Bekasi")`.
    pub fn default_location(mut self, province: &str, kabkota: &str) -> Self {
        self.default_location = Some(LocationQuery::new(province, kabkota));
        self
    }

    /// Builds and validates.
    pub fn build(self) -> Result<ResolverConfig, AdzanError> {
        let d = ResolverConfig::default();
        let config = ResolverConfig {
            endpoints: self.endpoints.unwrap_or(d.endpoints),
            schedule_provider: self.schedule_provider.unwrap_or(d.schedule_provider),
            geoapify_api_key: self.geoapify_api_key.map(|k| k.trim().to_string()),
            schedule_timeout: self.schedule_timeout.unwrap_or(d.schedule_timeout),
            qibla_timeout: self.qibla_timeout.unwrap_or(d.qibla_timeout),
            poi_timeout: self.poi_timeout.unwrap_or(d.poi_timeout),
            near_radius_m: self.near_radius_m.unwrap_or(d.near_radius_m),
            wide_radius_m: self.wide_radius_m.unwrap_or(d.wide_radius_m),
            min_results: self.min_results.unwrap_or(d.min_results),
            max_results: self.max_results.unwrap_or(d.max_results),
            default_location: self.default_location.unwrap_or(d.default_location),
        };
        config.validate()?;
        Ok(config)
    }
}

impl ResolverConfig {
    /// Checks the invariants the builder enforces.
    pub fn validate(&self) -> Result<(), AdzanError> {
        for (name, timeout) in [
            ("schedule_timeout", self.schedule_timeout),
            ("qibla_timeout", self.qibla_timeout),
            ("poi_timeout", self.poi_timeout),
        ] {
            if timeout.is_zero() {
                return Err(AdzanError::invalid_config(format!("{} must be greater than zero", name)));
            }
        }

        if self.near_radius_m == 0 || self.near_radius_m > self.wide_radius_m {
            return Err(AdzanError::invalid_config(format!(
                "radii must satisfy 0 < near ({} m) <= wide ({} m)",
                self.near_radius_m, self.wide_radius_m
            )));
        }
        if self.max_results == 0 {
            return Err(AdzanError::invalid_config("max_results must be greater than zero"));
        }

        if let Some(key) = &self.geoapify_api_key {
            if key.is_empty() {
                return Err(AdzanError::invalid_config("Geoapify API key is empty"));
            }
        }

        for (name, raw) in self.endpoints.iter() {
            let url = Url::parse(raw.trim())
                .map_err(|e| AdzanError::invalid_config(format!("{} endpoint '{}' does not parse: {}", name, raw, e)))?;
            if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
                return Err(AdzanError::invalid_config(format!("{} endpoint '{}' is not an http(s) URL", name, raw)));
            }
        }

        if self.default_location.kabkota.trim().is_empty() && self.default_location.province.trim().is_empty() {
            return Err(AdzanError::invalid_config("default location names nothing"));
        }
        Ok(())
    }
}
