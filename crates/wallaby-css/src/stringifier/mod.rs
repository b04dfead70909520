//! CSS stringifier module.

/// Sink that also records source-map mappings.
pub mod map;
/// Tree-to-text stringifier implementation.
pub mod stringifier;

pub use map::MapSink;
pub use stringifier::{Builder, StringBuilder, Stringifier};
