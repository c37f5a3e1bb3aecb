//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{ImageSource, LookupKey, ResolvedImage, VehicleDescriptor};
pub use errors::{LookupError, ResolveError};
pub use ports::{ImageResolverPort, LookupHit, Resolution, VehicleLookupPort};
