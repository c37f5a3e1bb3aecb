//! Domain error types.

mod lookup_error;
mod resolve_error;

pub use lookup_error::LookupError;
pub use resolve_error::ResolveError;
