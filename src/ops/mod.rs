//! Lazy composite set operations.
//!
//! Composites own their children (no sharing, no cycles) and implement the
//! capability contract by delegation, so queries stay exact without forcing
//! materialization.

pub mod blocks;
pub mod cartesian_product;
pub mod linear_map;

pub use blocks::{Block, BlockStructure};
pub use cartesian_product::{CartesianProduct, CartesianProductArray, VerticesConfig};
pub use linear_map::{AffineMap, LinearMap};
