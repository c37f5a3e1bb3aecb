//! Resolved vehicle image value types.

use chrono::{DateTime, Utc};

/// Where a resolved image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Fetched from the lookup service on this resolution.
    Network,
    /// Served from the in-memory TTL cache.
    Cache,
}

impl ImageSource {
    /// Returns true if the image was served from cache.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Self::Cache)
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Cache => write!(f, "cache"),
        }
    }
}

/// A successfully resolved vehicle image.
///
/// Immutable once created; cache consumers always receive their own clone,
/// never a reference into cache storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    /// URL of the representative photo.
    pub image_url: String,
    /// The query string as sent to the lookup service (original casing).
    pub original_query: String,
    /// The normalized form of the query used for cache indexing.
    pub normalized_query: String,
    /// Vehicle category reported by the service, if any.
    pub vehicle_type: Option<String>,
    /// Model year reported by the service, if any.
    pub year: Option<String>,
    /// Additional photo URLs, best match first. May be empty.
    pub alternate_images: Vec<String>,
    /// Whether this instance came from the network or the cache.
    pub source: ImageSource,
    /// Wall-clock time the image was resolved from the network.
    pub resolved_at: DateTime<Utc>,
}

impl ResolvedImage {
    /// Creates a freshly network-resolved image.
    #[must_use]
    pub fn new(
        image_url: impl Into<String>,
        original_query: impl Into<String>,
        normalized_query: impl Into<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            original_query: original_query.into(),
            normalized_query: normalized_query.into(),
            vehicle_type: None,
            year: None,
            alternate_images: Vec::new(),
            source: ImageSource::Network,
            resolved_at: Utc::now(),
        }
    }

    /// Sets the vehicle type.
    #[must_use]
    pub fn with_vehicle_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self
    }

    /// Sets the model year.
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the alternate image URLs.
    #[must_use]
    pub fn with_alternates(mut self, alternates: Vec<String>) -> Self {
        self.alternate_images = alternates;
        self
    }

    /// Re-tags this image as served from cache, keeping the original
    /// network resolution timestamp.
    #[must_use]
    pub fn into_cached(mut self) -> Self {
        self.source = ImageSource::Cache;
        self
    }
}
