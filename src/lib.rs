//! Torq Images - vehicle photo resolution for workshop management UIs.
//!
//! Given a vehicle's descriptive fields, this crate resolves a
//! representative photo through an external lookup service while avoiding
//! redundant network calls with a time-bounded cache and shielding the
//! caller from a failing service with a self-healing circuit breaker.
//! Concurrent resolutions of the same vehicle coalesce into a single
//! in-flight request.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing batch services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing cache, breaker and HTTP adapters.
pub mod infrastructure;

pub use application::BatchImageResolver;
pub use domain::{
    ImageResolverPort, ImageSource, LookupError, LookupHit, LookupKey, ResolveError, ResolvedImage,
    Resolution, VehicleDescriptor, VehicleLookupPort,
};
pub use infrastructure::{
    CacheStats, CircuitBreaker, HttpVehicleLookup, ResolverConfig, ResolverStats, TtlImageCache,
    VehicleImageResolver,
};

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "torq-images";
