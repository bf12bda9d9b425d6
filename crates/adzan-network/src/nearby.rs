//! Nearest mosque search across several POI providers.

use adzan_geo::merge_places;
use adzan_types::{AdzanError, GeoCoordinate, PlaceOfWorship, PlaceSource};
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// A points-of-interest backend that can list mosques around a point.
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    fn source(&self) -> PlaceSource;

    /// Places within `radius_m` metres of `center`, distances filled in.
    async fn search(&self, center: GeoCoordinate, radius_m: u32) -> Result<Vec<PlaceOfWorship>, AdzanError>;
}

/// Radii and result limits for [`MosqueFinder::find_nearest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearbySettings {
    pub near_radius_m: u32,
    pub wide_radius_m: u32,
    /// Below this many near results the wide radius is searched.
    pub min_results: usize,
    pub max_results: usize,
}

impl Default for NearbySettings {
    fn default() -> Self {
        Self {
            near_radius_m: 1500,
            wide_radius_m: 3000,
            min_results: 5,
            max_results: 15,
        }
    }
}

pub struct MosqueFinder {
    providers: Vec<Box<dyn PlaceProvider>>,
    settings: NearbySettings,
}

impl MosqueFinder {
    pub fn new(settings: NearbySettings) -> Self {
        Self {
            providers: Vec::new(),
            settings,
        }
    }

    pub fn with_provider(mut self, provider: impl PlaceProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn add_provider(&mut self, provider: Box<dyn PlaceProvider>) {
        self.providers.push(provider);
    }

    pub fn settings(&self) -> &NearbySettings {
        &self.settings
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Queries every provider at once and merges whatever succeeded.
    ///
    /// A failing provider is logged and contributes nothing; this never errors.
    pub async fn search(&self, center: GeoCoordinate, radius_m: u32) -> Vec<PlaceOfWorship> {
        let results = join_all(self.providers.iter().map(|p| p.search(center, radius_m))).await;

        let mut candidates = Vec::new();
        for (provider, result) in self.providers.iter().zip(results) {
            match result {
                Ok(places) => {
                    tracing::debug!(source = %provider.source(), count = places.len(), radius_m, "provider answered");
                    candidates.extend(places);
                }
                Err(e) => {
                    tracing::warn!(source = %provider.source(), error = %e, "dropping failed POI provider");
                }
            }
        }
        merge_places(candidates, self.settings.max_results)
    }

    /// Near radius first; too few results are replaced by a wide-radius search.
    ///
    /// # Errors
    /// `NoResults` when neither radius yields anything.
    pub async fn find_nearest(&self, center: GeoCoordinate) -> Result<Vec<PlaceOfWorship>, AdzanError> {
        let s = self.settings;
        let mut places = self.search(center, s.near_radius_m).await;
        if places.len() < s.min_results {
            tracing::debug!(found = places.len(), radius_m = s.wide_radius_m, "widening mosque search");
            places = self.search(center, s.wide_radius_m).await;
        }
        if places.is_empty() {
            return Err(AdzanError::NoResults(format!(
                "no mosque within {} km of {}",
                f64::from(s.wide_radius_m) / 1000.0,
                center
            )));
        }
        tracing::info!(count = places.len(), nearest_km = places[0].distance_km, "nearby mosques found");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed {
        near: Vec<PlaceOfWorship>,
        wide: Vec<PlaceOfWorship>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PlaceProvider for Fixed {
        fn source(&self) -> PlaceSource {
            PlaceSource::Overpass
        }

        async fn search(&self, _center: GeoCoordinate, radius_m: u32) -> Result<Vec<PlaceOfWorship>, AdzanError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(if radius_m <= 1500 { self.near.clone() } else { self.wide.clone() })
        }
    }

    struct Failing;

    #[async_trait]
    impl PlaceProvider for Failing {
        fn source(&self) -> PlaceSource {
            PlaceSource::Geoapify
        }

        async fn search(&self, _center: GeoCoordinate, _radius_m: u32) -> Result<Vec<PlaceOfWorship>, AdzanError> {
            Err(AdzanError::FetchError("boom".into()))
        }
    }

    fn place(n: usize, distance_km: f64) -> PlaceOfWorship {
        PlaceOfWorship {
            id: format!("p{}", n),
            name: format!("Masjid {}", n),
            address: String::new(),
            latitude: -6.2 + n as f64 * 0.001,
            longitude: 106.8,
            distance_km,
            source: PlaceSource::Overpass,
        }
    }

    fn center() -> GeoCoordinate {
        GeoCoordinate::new(-6.2, 106.8).unwrap()
    }

    #[tokio::test]
    async fn test_enough_near_results_skip_wide_search() {
        let calls = Arc::new(AtomicUsize::new(0));
        let finder = MosqueFinder::new(NearbySettings::default()).with_provider(Fixed {
            near: (0..6).map(|i| place(i, 0.1 * i as f64)).collect(),
            wide: vec![],
            calls: calls.clone(),
        });
        let found = finder.find_nearest(center()).await.unwrap();
        assert_eq!(found.len(), 6);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_few_near_results_are_replaced() {
        let calls = Arc::new(AtomicUsize::new(0));
        let finder = MosqueFinder::new(NearbySettings::default()).with_provider(Fixed {
            near: vec![place(0, 0.3)],
            wide: (10..30).map(|i| place(i, 0.1 * i as f64)).collect(),
            calls: calls.clone(),
        });
        let found = finder.find_nearest(center()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(found.len(), 15);
        assert!(found.iter().all(|p| p.id != "p0"));
        assert!(found.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[tokio::test]
    async fn test_failed_provider_is_dropped() {
        let finder = MosqueFinder::new(NearbySettings::default())
            .with_provider(Failing)
            .with_provider(Fixed {
                near: (0..5).map(|i| place(i, 0.2 * i as f64)).collect(),
                wide: vec![],
                calls: Arc::new(AtomicUsize::new(0)),
            });
        let found = finder.find_nearest(center()).await.unwrap();
        assert_eq!(found.len(), 5);
    }

    #[tokio::test]
    async fn test_nothing_found_is_no_results() {
        let finder = MosqueFinder::new(NearbySettings::default()).with_provider(Failing);
        let err = finder.find_nearest(center()).await.unwrap_err();
        assert!(matches!(err, AdzanError::NoResults(_)));
        assert_eq!(err.localized_message(), AdzanError::NoResults(String::new()).localized_message());
    }
}
