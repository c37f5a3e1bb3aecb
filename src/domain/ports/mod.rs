//! Port definitions.

mod image_resolver_port;
mod vehicle_lookup_port;

pub use image_resolver_port::{ImageResolverPort, Resolution};
pub use vehicle_lookup_port::{LookupHit, VehicleLookupPort};
