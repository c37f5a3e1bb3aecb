//! Resolver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default lookup service endpoint.
pub const DEFAULT_API_BASE: &str = "https://torq.up.railway.app/api/vehicle-images";

/// Configuration for the image resolution subsystem.
///
/// All values have recognized defaults; hosts typically construct this once
/// at startup and hand it to [`VehicleImageResolver::new`].
///
/// [`VehicleImageResolver::new`]: crate::infrastructure::image::VehicleImageResolver::new
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL of the lookup service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cache entry lifetime in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Circuit breaker cooldown in seconds.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Bound on each network call, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Maximum lookups in flight during batch resolution.
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_owned()
}

const fn default_ttl_secs() -> u64 {
    3600
}

const fn default_cooldown_secs() -> u64 {
    300
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

const fn default_max_concurrent_lookups() -> usize {
    3
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ttl_secs: default_ttl_secs(),
            cooldown_secs: default_cooldown_secs(),
            request_timeout_ms: default_request_timeout_ms(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
        }
    }
}

impl ResolverConfig {
    /// Cache entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Breaker cooldown window.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// Per-request network timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
