//! Vehicle image resolution infrastructure.
//!
//! This module provides:
//! - TTL caching with lazy eviction
//! - A circuit breaker with elapsed-time recovery
//! - The HTTP lookup service adapter
//! - The resolution orchestrator with request coalescing

mod circuit_breaker;
mod dto;
mod lookup_client;
mod resolver;
mod ttl_cache;

pub use circuit_breaker::{CircuitBreaker, DEFAULT_COOLDOWN};
pub use lookup_client::HttpVehicleLookup;
pub use resolver::{ResolverStats, VehicleImageResolver};
pub use ttl_cache::{CacheStats, DEFAULT_TTL, TtlImageCache};
