pub mod error;
pub mod types;
pub mod config;
pub mod pattern;
pub mod cache;
pub mod matcher;
pub mod segment;
pub mod slice;
pub mod remap;
pub mod render;
pub mod metadata;
pub mod offsets;

pub use error::*;
pub use types::*;
pub use config::*;
pub use pattern::*;
pub use cache::*;
pub use matcher::*;
pub use segment::*;
pub use slice::*;
pub use remap::*;
pub use render::*;
pub use metadata::*;
pub use offsets::*;

#[cfg(test)]
mod tests;
