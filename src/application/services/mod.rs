//! Application service implementations.

mod batch_resolver;

pub use batch_resolver::BatchImageResolver;
