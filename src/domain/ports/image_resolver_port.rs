//! Inbound port for vehicle image resolution.

use async_trait::async_trait;

use crate::domain::entities::{ResolvedImage, VehicleDescriptor};
use crate::domain::errors::ResolveError;

/// Outcome of one resolution request.
pub type Resolution = Result<ResolvedImage, ResolveError>;

/// Port consumed by presentation widgets and application services to
/// resolve a representative photo for a vehicle.
///
/// Implementations must be safe to share across many concurrent callers
/// rendering thumbnails for the same view.
#[async_trait]
pub trait ImageResolverPort: Send + Sync {
    /// Resolves a photo for the described vehicle.
    ///
    /// # Errors
    /// Returns [`ResolveError`] distinguishing not-attempted, no-match and
    /// service-unavailable outcomes; no variant is fatal to the caller.
    async fn resolve(&self, vehicle: &VehicleDescriptor) -> Resolution;
}
