//! Outbound port for the vehicle image lookup service.

use async_trait::async_trait;

use crate::domain::errors::LookupError;

/// Structured answer from the lookup service for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupHit {
    /// URL of the best matching photo. Never empty.
    pub image_url: String,
    /// Normalized vehicle name as understood by the service.
    pub normalized_name: Option<String>,
    /// Vehicle category (e.g. motorcycle, car), if reported.
    pub vehicle_type: Option<String>,
    /// Model year, if the service could extract one.
    pub year: Option<String>,
    /// Further candidate photos, best match first.
    pub alternate_images: Vec<String>,
    /// Which upstream source the service found the image in.
    pub found_source: Option<String>,
}

/// Port for the external vehicle image lookup service.
///
/// One network request per call. Implementations must bound each request
/// with a timeout and must surface connectivity failures as
/// [`LookupError::Transport`], distinct from a clean
/// [`LookupError::NotFound`] answer.
#[async_trait]
pub trait VehicleLookupPort: Send + Sync {
    /// Searches for a representative photo of the described vehicle.
    /// The query is the display-form description, not the normalized key.
    async fn search(&self, query: &str) -> Result<LookupHit, LookupError>;

    /// Checks whether the lookup service is reachable.
    async fn health_check(&self) -> Result<(), LookupError>;
}
