//! Lossy image compression by quadtree subdivision.
//!
//! An image is split into quadrants, recursively, until each quadrant's
//! colors are close enough to their mean or a depth limit is reached. Each
//! leaf of the resulting tree is then drawn as a flat rectangle of its mean
//! color.

pub mod codec;
pub mod node;
pub mod tree;

pub use node::*;
pub use node::build::{BuildOptions, ERROR_THRESHOLD};
pub use tree::{AnimationOptions, QuadTree};
