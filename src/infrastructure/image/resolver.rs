//! Vehicle image resolution orchestrator.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use super::circuit_breaker::CircuitBreaker;
use super::ttl_cache::{CacheStats, TtlImageCache};
use crate::domain::entities::{LookupKey, ResolvedImage, VehicleDescriptor};
use crate::domain::errors::{LookupError, ResolveError};
use crate::domain::ports::{ImageResolverPort, Resolution, VehicleLookupPort};
use crate::infrastructure::config::ResolverConfig;

type SharedResolution = Shared<BoxFuture<'static, Resolution>>;

/// Diagnostic snapshot of the resolver's internal state.
#[derive(Debug, Clone)]
pub struct ResolverStats {
    /// Cache hit/miss counters and size.
    pub cache: CacheStats,
    /// True while the breaker is suppressing lookups.
    pub breaker_open: bool,
    /// Number of network lookups currently in flight.
    pub in_flight: usize,
}

/// Resolves representative vehicle photos through a TTL cache and a
/// circuit-breaker-gated lookup service.
///
/// One instance is constructed at process start and shared by every caller;
/// the cache and breaker state span the process lifetime. Concurrent
/// resolutions of the same uncached key coalesce into a single network call
/// whose outcome all callers share.
pub struct VehicleImageResolver {
    cache: Arc<TtlImageCache>,
    breaker: Arc<CircuitBreaker>,
    lookup: Arc<dyn VehicleLookupPort>,
    in_flight: Arc<Mutex<HashMap<LookupKey, SharedResolution>>>,
}

impl VehicleImageResolver {
    /// Creates a resolver with the given configuration and lookup adapter.
    #[must_use]
    pub fn new(config: &ResolverConfig, lookup: Arc<dyn VehicleLookupPort>) -> Self {
        Self {
            cache: Arc::new(TtlImageCache::new(config.ttl())),
            breaker: Arc::new(CircuitBreaker::new(config.cooldown())),
            lookup,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Resolves a photo for the described vehicle.
    ///
    /// Flow: derive the lookup key; serve a fresh cache entry if present;
    /// otherwise join (or start) the single in-flight lookup for that key,
    /// which consults the breaker, calls the service and populates the cache
    /// on success.
    ///
    /// # Errors
    /// See [`ResolveError`] for the outcome taxonomy; no variant is fatal.
    pub async fn resolve(&self, vehicle: &VehicleDescriptor) -> Resolution {
        let key = vehicle.lookup_key();
        if key.is_empty() {
            trace!("Skipping resolution for vehicle with no descriptive fields");
            return Err(ResolveError::EmptyKey);
        }

        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit.into_cached());
        }

        self.join_flight(&key, vehicle.display_name()).await
    }

    /// Joins the in-flight lookup for `key`, starting one if none exists.
    fn join_flight(&self, key: &LookupKey, query: String) -> SharedResolution {
        let mut in_flight = self.in_flight.lock();

        if let Some(existing) = in_flight.get(key) {
            trace!(%key, "Joining in-flight lookup");
            return existing.clone();
        }

        let flight = Self::perform_lookup(
            self.cache.clone(),
            self.breaker.clone(),
            self.lookup.clone(),
            self.in_flight.clone(),
            key.clone(),
            query,
        )
        .boxed()
        .shared();

        in_flight.insert(key.clone(), flight.clone());
        flight
    }

    async fn perform_lookup(
        cache: Arc<TtlImageCache>,
        breaker: Arc<CircuitBreaker>,
        lookup: Arc<dyn VehicleLookupPort>,
        in_flight: Arc<Mutex<HashMap<LookupKey, SharedResolution>>>,
        key: LookupKey,
        query: String,
    ) -> Resolution {
        let result = Self::call_service(cache, breaker, lookup, &key, query).await;

        // The flight unregisters itself: cleanup must not depend on any
        // particular caller still being around to observe the outcome
        in_flight.lock().remove(&key);

        result
    }

    async fn call_service(
        cache: Arc<TtlImageCache>,
        breaker: Arc<CircuitBreaker>,
        lookup: Arc<dyn VehicleLookupPort>,
        key: &LookupKey,
        query: String,
    ) -> Resolution {
        if !breaker.allow_call() {
            debug!(%key, "Lookup suppressed, circuit breaker open");
            return Err(ResolveError::BreakerOpen);
        }

        match lookup.search(&query).await {
            Ok(hit) => {
                breaker.report_success();

                // Structural success requires a usable image URL
                if hit.image_url.trim().is_empty() {
                    debug!(%key, "Lookup answered without an image URL");
                    return Err(ResolveError::no_match(query));
                }

                let normalized = hit
                    .normalized_name
                    .unwrap_or_else(|| key.as_str().to_owned());
                let mut image = ResolvedImage::new(hit.image_url, query, normalized)
                    .with_alternates(hit.alternate_images);
                if let Some(vehicle_type) = hit.vehicle_type {
                    image = image.with_vehicle_type(vehicle_type);
                }
                if let Some(year) = hit.year {
                    image = image.with_year(year);
                }

                cache.put(key.clone(), image.clone()).await;
                debug!(%key, "Vehicle image resolved from network");
                Ok(image)
            }
            Err(LookupError::NotFound { .. }) => {
                // A valid negative answer, not a service failure
                debug!(%key, "No image matches this vehicle");
                Err(ResolveError::no_match(query))
            }
            Err(err @ LookupError::Transport { .. }) => {
                warn!(%key, error = %err, "Lookup transport failure");
                breaker.report_failure();
                Err(ResolveError::unavailable(err.to_string()))
            }
        }
    }

    /// Drops the cached result for one vehicle.
    pub async fn invalidate(&self, vehicle: &VehicleDescriptor) {
        self.cache.invalidate(&vehicle.lookup_key()).await;
    }

    /// Drops every cached result.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Suspends lookups immediately for a full cooldown window.
    pub fn suspend_lookups(&self) {
        self.breaker.force_open();
    }

    /// Lifts a suspension, whether manual or failure-triggered.
    pub fn resume_lookups(&self) {
        self.breaker.force_close();
    }

    /// Checks whether the lookup service is reachable.
    ///
    /// # Errors
    /// Returns [`LookupError::Transport`] if the service cannot be reached.
    pub async fn health_check(&self) -> Result<(), LookupError> {
        self.lookup.health_check().await
    }

    /// Returns a diagnostic snapshot of cache, breaker and in-flight state.
    #[must_use]
    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            cache: self.cache.stats(),
            breaker_open: self.breaker.is_open(),
            in_flight: self.in_flight.lock().len(),
        }
    }
}

impl std::fmt::Debug for VehicleImageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VehicleImageResolver")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ImageResolverPort for VehicleImageResolver {
    async fn resolve(&self, vehicle: &VehicleDescriptor) -> Resolution {
        Self::resolve(self, vehicle).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ImageSource;
    use crate::domain::ports::mocks::MockVehicleLookup;
    use std::time::Duration;

    fn resolver(lookup: Arc<MockVehicleLookup>) -> VehicleImageResolver {
        VehicleImageResolver::new(&ResolverConfig::default(), lookup)
    }

    fn cb600f() -> VehicleDescriptor {
        VehicleDescriptor::new()
            .with_brand("Honda")
            .with_model("CB 600F")
            .with_year("2020")
    }

    #[tokio::test]
    async fn second_resolution_within_ttl_is_served_from_cache() {
        let lookup = Arc::new(MockVehicleLookup::new());
        lookup.enqueue(Ok(MockVehicleLookup::hit("https://cdn.example/cb600f.jpg")));
        let resolver = resolver(lookup.clone());

        let first = resolver.resolve(&cb600f()).await.unwrap();
        assert_eq!(first.source, ImageSource::Network);
        assert_eq!(first.original_query, "Honda CB 600F 2020");

        let second = resolver.resolve(&cb600f()).await.unwrap();
        assert_eq!(second.source, ImageSource::Cache);
        assert_eq!(second.image_url, first.image_url);

        // The lookup service saw exactly one call, with the display-form query
        assert_eq!(lookup.calls(), 1);
        assert_eq!(lookup.queries(), vec!["Honda CB 600F 2020"]);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_opens_breaker_until_cooldown_elapses() {
        let lookup = Arc::new(MockVehicleLookup::new());
        lookup.enqueue(Err(LookupError::transport("request timed out")));
        let resolver = resolver(lookup.clone());

        let first = resolver.resolve(&cb600f()).await.unwrap_err();
        assert!(matches!(first, ResolveError::ServiceUnavailable { .. }));
        assert_eq!(lookup.calls(), 1);

        // 10 seconds later: suppressed without a network attempt
        tokio::time::advance(Duration::from_secs(10)).await;
        let second = resolver.resolve(&cb600f()).await.unwrap_err();
        assert_eq!(second, ResolveError::BreakerOpen);
        assert!(second.is_not_attempted());
        assert_eq!(lookup.calls(), 1);
        assert!(resolver.stats().breaker_open);

        // At 301 seconds the next call goes back to the network
        tokio::time::advance(Duration::from_secs(291)).await;
        lookup.enqueue(Ok(MockVehicleLookup::hit("https://cdn.example/cb600f.jpg")));
        let third = resolver.resolve(&cb600f()).await.unwrap();
        assert_eq!(third.source, ImageSource::Network);
        assert_eq!(lookup.calls(), 2);
        assert!(!resolver.stats().breaker_open);
    }

    #[tokio::test]
    async fn clean_not_found_does_not_trip_the_breaker() {
        let lookup = Arc::new(MockVehicleLookup::new());
        lookup.enqueue(Err(LookupError::not_found("Zonda Unicornio 1999")));
        let resolver = resolver(lookup.clone());

        let zonda = VehicleDescriptor::new()
            .with_brand("Zonda")
            .with_model("Unicornio")
            .with_year("1999");
        let outcome = resolver.resolve(&zonda).await.unwrap_err();
        assert!(matches!(outcome, ResolveError::NoMatch { .. }));
        assert!(!outcome.is_retryable());
        assert!(!resolver.stats().breaker_open);

        // A different key proceeds normally
        lookup.enqueue(Ok(MockVehicleLookup::hit("https://cdn.example/cb600f.jpg")));
        assert!(resolver.resolve(&cb600f()).await.is_ok());
        assert_eq!(lookup.calls(), 2);
    }

    #[tokio::test]
    async fn blank_vehicle_touches_neither_cache_nor_breaker() {
        let lookup = Arc::new(MockVehicleLookup::new());
        let resolver = resolver(lookup.clone());

        let outcome = resolver.resolve(&VehicleDescriptor::new()).await.unwrap_err();
        assert_eq!(outcome, ResolveError::EmptyKey);
        assert!(outcome.is_not_attempted());

        assert_eq!(lookup.calls(), 0);
        let stats = resolver.stats();
        assert_eq!(stats.cache.hits + stats.cache.misses, 0);
        assert!(!stats.breaker_open);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_resolutions_of_one_key_share_a_single_call() {
        let lookup = Arc::new(MockVehicleLookup::new());
        lookup.set_delay(Duration::from_millis(50));
        lookup.enqueue(Ok(MockVehicleLookup::hit("https://cdn.example/cb600f.jpg")));
        let resolver = resolver(lookup.clone());

        let vehicle = cb600f();
        let (a, b) = tokio::join!(resolver.resolve(&vehicle), resolver.resolve(&vehicle));

        assert_eq!(a.unwrap().image_url, "https://cdn.example/cb600f.jpg");
        assert_eq!(b.unwrap().image_url, "https://cdn.example/cb600f.jpg");
        assert_eq!(lookup.calls(), 1);
        assert_eq!(resolver.stats().in_flight, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_caller_does_not_wedge_the_key() {
        let lookup = Arc::new(MockVehicleLookup::new());
        lookup.set_delay(Duration::from_millis(50));
        lookup.enqueue(Err(LookupError::transport("request timed out")));
        let resolver = resolver(lookup.clone());
        let vehicle = cb600f();

        // First caller starts the lookup, then goes away mid-flight
        {
            let mut flight = Box::pin(resolver.resolve(&vehicle));
            assert!(futures_util::poll!(flight.as_mut()).is_pending());
        }

        // A later caller joins the still-pending flight and sees its outcome
        let outcome = resolver.resolve(&vehicle).await.unwrap_err();
        assert!(matches!(outcome, ResolveError::ServiceUnavailable { .. }));
        assert_eq!(lookup.calls(), 1);
        assert!(resolver.stats().breaker_open);

        // The completed flight unregistered itself despite the lost caller
        assert_eq!(resolver.stats().in_flight, 0);

        // Post-cooldown recovery still reaches the network
        tokio::time::advance(Duration::from_secs(301)).await;
        lookup.enqueue(Ok(MockVehicleLookup::hit("https://cdn.example/cb600f.jpg")));
        let recovered = resolver.resolve(&vehicle).await.unwrap();
        assert_eq!(recovered.source, ImageSource::Network);
        assert_eq!(lookup.calls(), 2);
        assert!(!resolver.stats().breaker_open);
    }

    #[tokio::test]
    async fn no_match_is_not_cached() {
        let lookup = Arc::new(MockVehicleLookup::new());
        let resolver = resolver(lookup.clone());

        // Empty script: every call answers not-found
        assert!(resolver.resolve(&cb600f()).await.is_err());
        assert!(resolver.resolve(&cb600f()).await.is_err());
        assert_eq!(lookup.calls(), 2);
        assert_eq!(resolver.stats().cache.size, 0);
    }

    #[tokio::test]
    async fn hit_without_usable_url_is_a_no_match() {
        let lookup = Arc::new(MockVehicleLookup::new());
        lookup.enqueue(Ok(MockVehicleLookup::hit("   ")));
        let resolver = resolver(lookup.clone());

        let outcome = resolver.resolve(&cb600f()).await.unwrap_err();
        assert!(matches!(outcome, ResolveError::NoMatch { .. }));
        assert!(!resolver.stats().breaker_open);
        assert_eq!(resolver.stats().cache.size, 0);
    }

    #[tokio::test]
    async fn manual_suspension_and_resume() {
        let lookup = Arc::new(MockVehicleLookup::new());
        lookup.enqueue(Ok(MockVehicleLookup::hit("https://cdn.example/cb600f.jpg")));
        let resolver = resolver(lookup.clone());

        resolver.suspend_lookups();
        let outcome = resolver.resolve(&cb600f()).await.unwrap_err();
        assert_eq!(outcome, ResolveError::BreakerOpen);
        assert_eq!(lookup.calls(), 0);

        resolver.resume_lookups();
        assert!(resolver.resolve(&cb600f()).await.is_ok());
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_lookup() {
        let lookup = Arc::new(MockVehicleLookup::new());
        lookup.enqueue(Ok(MockVehicleLookup::hit("https://cdn.example/old.jpg")));
        lookup.enqueue(Ok(MockVehicleLookup::hit("https://cdn.example/new.jpg")));
        let resolver = resolver(lookup.clone());

        assert_eq!(
            resolver.resolve(&cb600f()).await.unwrap().image_url,
            "https://cdn.example/old.jpg"
        );
        resolver.invalidate(&cb600f()).await;
        assert_eq!(
            resolver.resolve(&cb600f()).await.unwrap().image_url,
            "https://cdn.example/new.jpg"
        );
        assert_eq!(lookup.calls(), 2);
    }
}
