//! The three resolvers wired together from one [`ResolverConfig`].

use adzan_network::{
    EquranClient, GeoapifyProvider, MosqueFinder, MyQuranClient, NearbySettings, NominatimClient, OverpassProvider,
    QiblaClient, ScheduleSource,
};
use adzan_types::{AdzanError, GeoCoordinate, LocationQuery, PlaceOfWorship, QiblaBearing};

use crate::config::{ResolverConfig, ScheduleProvider};
use crate::schedule::ScheduleResolver;

pub type DynScheduleSource = Box<dyn ScheduleSource>;

pub struct AdzanClient {
    schedule: ScheduleResolver<DynScheduleSource>,
    qibla: QiblaClient,
    mosques: MosqueFinder,
    geocoder: NominatimClient,
}

impl AdzanClient {
    /// Builds every client from `config`.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `config` fails validation or an endpoint
    /// does not parse, `FetchError` if an HTTP client cannot be built.
    pub fn new(config: &ResolverConfig) -> Result<Self, AdzanError> {
        config.validate()?;
        let ep = &config.endpoints;

        let source: DynScheduleSource = match config.schedule_provider {
            ScheduleProvider::MyQuran => Box::new(MyQuranClient::with_base_url(&ep.myquran, config.schedule_timeout)?),
            ScheduleProvider::Equran => Box::new(EquranClient::with_base_url(&ep.equran, config.schedule_timeout)?),
        };

        let settings = NearbySettings {
            near_radius_m: config.near_radius_m,
            wide_radius_m: config.wide_radius_m,
            min_results: config.min_results,
            max_results: config.max_results,
        };
        let mut mosques =
            MosqueFinder::new(settings).with_provider(OverpassProvider::with_base_url(&ep.overpass, config.poi_timeout)?);
        if let Some(key) = &config.geoapify_api_key {
            mosques.add_provider(Box::new(GeoapifyProvider::with_base_url(
                &ep.geoapify,
                key.as_str(),
                config.max_results,
                config.poi_timeout,
            )?));
        }

        tracing::debug!(
            schedule = source.name(),
            poi_providers = mosques.provider_count(),
            "adzan client configured"
        );

        Ok(Self {
            schedule: ScheduleResolver::new(source, config.default_location.clone()),
            qibla: QiblaClient::with_base_urls(&ep.myquran_qibla, &ep.siswadi_qibla, config.qibla_timeout)?,
            mosques,
            geocoder: NominatimClient::with_base_url(&ep.nominatim, config.poi_timeout)?,
        })
    }

    pub fn schedule(&self) -> &ScheduleResolver<DynScheduleSource> {
        &self.schedule
    }

    pub fn qibla(&self) -> &QiblaClient {
        &self.qibla
    }

    pub fn mosques(&self) -> &MosqueFinder {
        &self.mosques
    }

    pub fn geocoder(&self) -> &NominatimClient {
        &self.geocoder
    }

    /// Location for the schedule screen. `None` means location access was
    /// denied; both that and a failed reverse geocode yield the default.
    pub async fn locate(&self, position: Option<GeoCoordinate>) -> LocationQuery {
        let hint = match position {
            Some(coords) => self.geocoder.reverse_geocode(coords).await.map(|info| info.to_place_hint()),
            None => Err(AdzanError::PermissionDenied),
        };
        self.schedule.location_or_default(hint)
    }

    /// Qibla bearing for `position`; never fails.
    pub async fn qibla_bearing(&self, position: GeoCoordinate, address_hint: Option<&str>) -> QiblaBearing {
        self.qibla.resolve(position, address_hint).await
    }

    /// Closest mosques around `position`.
    ///
    /// # Errors
    /// `NoResults` when nothing is found within the wide radius.
    pub async fn nearest_mosques(&self, position: GeoCoordinate) -> Result<Vec<PlaceOfWorship>, AdzanError> {
        self.mosques.find_nearest(position).await
    }
}
