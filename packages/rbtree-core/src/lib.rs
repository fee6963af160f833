#![forbid(unsafe_code)]
//! Sentinel-based red-black tree over a fixed ordinal key type.
//! Nodes live in an index arena whose slot 0 is the shared BLACK sentinel, so rotations and
//! fixups never branch on a missing link. Every traversal uses an explicit stack.

mod tracing_helpers;

mod arena;
pub mod error;
pub mod ids;
mod erase;
mod insert;
mod render;
mod rotate;
pub mod traverse;
pub mod tree;

#[cfg(test)]
mod test_helpers;

pub use arena::Color;
pub use error::{Error, Result};
pub use ids::{Key, NodeHandle, TreeId};
pub use traverse::Iter;
pub use tree::RbTree;
