//! # ReachSet - Lazy Convex-Set Operations
//!
//! A library of convex set representations and the lazy operations that
//! combine them, including:
//! - Leaf sets: intervals, hyperrectangles, zonotopes, half-spaces, lines,
//!   singletons, the empty set and the universe
//! - Lazy composites: Cartesian products, linear and affine maps
//! - Exact queries: support function, support vector, membership
//! - On-demand materialization: constraint lists and vertex lists
//!
//! ## Architecture
//!
//! ```text
//! Query (rho, sigma, member) → Composite → Block bookkeeping → Leaf sets
//! ```
//!
//! Composites own boxed children and answer queries by delegation, so a
//! deeply nested expression is evaluated without ever building the combined
//! set. Materialization happens only when `constraints_list` or
//! `vertices_list` is called, and only for the representations that admit a
//! closed form.
//!
//! ## Example
//!
//! ```rust
//! use reachset::prelude::*;
//! use nalgebra::{dmatrix, dvector};
//!
//! # fn main() -> Result<(), SetError> {
//! let x = Hyperrectangle::new(dvector![0.0, 0.0], dvector![1.0, 2.0])?;
//! let image = LinearMap::of(dmatrix![2.0, 0.0; 0.0, 1.0], x)?;
//!
//! // the support function of the image is answered through the child
//! assert_eq!(image.support_function(&dvector![1.0, 0.0])?, 2.0);
//! assert!(image.contains(&dvector![2.0, -2.0])?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comparison;
pub mod convert;
pub mod errors;
pub mod ops;
pub mod sample;
pub mod set;
pub mod sets;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::comparison::{approx_eq, approx_zero, vector_approx_eq, ABSZTOL};
    pub use crate::errors::{SetError, SetResult};
    pub use crate::ops::{
        AffineMap, Block, BlockStructure, CartesianProduct, CartesianProductArray, LinearMap,
        VerticesConfig,
    };
    pub use crate::sample::{seeded_rng, RandomSet};
    pub use crate::set::{LazySet, Numeric};
    pub use crate::sets::{
        EmptySet, HalfSpace, Hyperrectangle, Interval, Line, Singleton, Universe, Zonotope,
    };
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
