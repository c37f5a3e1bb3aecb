//! Domain entity definitions.

mod image;
mod vehicle;

pub use image::{ImageSource, ResolvedImage};
pub use vehicle::{LookupKey, VehicleDescriptor};
