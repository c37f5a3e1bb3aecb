//! Batch resolution for gallery views.

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream;
use tracing::debug;

use crate::domain::entities::VehicleDescriptor;
use crate::domain::ports::{ImageResolverPort, Resolution};
use crate::infrastructure::config::ResolverConfig;

/// Resolves photos for a whole listing with bounded concurrency.
///
/// Gallery views render many thumbnails at once; this service fans the
/// resolutions out without exceeding the configured number of simultaneous
/// lookups. Duplicate vehicles in one batch coalesce into a single network
/// call through the resolver's in-flight sharing.
pub struct BatchImageResolver {
    resolver: Arc<dyn ImageResolverPort>,
    concurrency: usize,
}

impl BatchImageResolver {
    /// Creates a batch resolver using the configured concurrency bound.
    #[must_use]
    pub fn new(resolver: Arc<dyn ImageResolverPort>, config: &ResolverConfig) -> Self {
        Self::with_concurrency(resolver, config.max_concurrent_lookups)
    }

    /// Creates a batch resolver with an explicit concurrency bound.
    #[must_use]
    pub fn with_concurrency(resolver: Arc<dyn ImageResolverPort>, concurrency: usize) -> Self {
        Self {
            resolver,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolves every vehicle in the slice, returning outcomes in input
    /// order. Individual failures do not abort the batch.
    pub async fn resolve_all(&self, vehicles: &[VehicleDescriptor]) -> Vec<Resolution> {
        if vehicles.is_empty() {
            return Vec::new();
        }

        debug!(count = vehicles.len(), "Resolving vehicle batch");

        let mut indexed: Vec<(usize, Resolution)> =
            stream::iter(vehicles.iter().enumerate().map(|(idx, vehicle)| {
                let resolver = Arc::clone(&self.resolver);
                async move { (idx, resolver.resolve(vehicle).await) }
            }))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, outcome)| outcome).collect()
    }
}
