//! Concrete set representations.
//!
//! Every type here implements the [`crate::set::LazySet`] contract with
//! closed-form queries; the lazy composites in [`crate::ops`] delegate to
//! them without materialization.

mod empty;
mod half_space;
mod hyperrectangle;
mod interval;
mod line;
mod singleton;
mod universe;
mod zonotope;

pub use empty::EmptySet;
pub use half_space::HalfSpace;
pub use hyperrectangle::Hyperrectangle;
pub use interval::Interval;
pub use line::Line;
pub use singleton::Singleton;
pub use universe::Universe;
pub use zonotope::Zonotope;
