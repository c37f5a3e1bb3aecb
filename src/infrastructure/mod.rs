//! Infrastructure layer with external service adapters.

/// Resolver configuration.
pub mod config;
/// Image caching, circuit breaking and lookup.
pub mod image;

pub use config::{DEFAULT_API_BASE, ResolverConfig};
pub use image::{
    CacheStats, CircuitBreaker, DEFAULT_COOLDOWN, DEFAULT_TTL, HttpVehicleLookup, ResolverStats,
    TtlImageCache, VehicleImageResolver,
};
