//! Tolerance-aware comparison service.
//!
//! All geometric equality, emptiness and flatness tests route through these
//! predicates rather than exact floating-point comparison, so floating-point
//! noise does not spuriously trigger error paths. The predicates use an
//! absolute tolerance; callers with unusual scales can pass their own.

use nalgebra::{convert, DVector, RealField};

/// Default absolute tolerance for near-zero tests.
pub const ABSZTOL: f64 = 1e-8;

/// The default tolerance converted into the working scalar type.
pub fn default_tolerance<N: RealField>() -> N {
    convert(ABSZTOL)
}

/// Positive infinity in the working scalar type.
pub fn infinity<N: RealField>() -> N {
    convert(f64::INFINITY)
}

/// Negative infinity in the working scalar type.
pub fn neg_infinity<N: RealField>() -> N {
    convert(f64::NEG_INFINITY)
}

/// Whether `x` is finite (neither infinite nor NaN).
pub fn is_finite<N: RealField + Copy>(x: N) -> bool {
    x > neg_infinity() && x < infinity()
}

/// Whether `x` is zero up to the given absolute tolerance.
pub fn approx_zero_with<N: RealField + Copy>(x: N, tol: N) -> bool {
    x.is_zero() || x.abs() <= tol
}

/// Whether `x` is zero up to [`ABSZTOL`].
pub fn approx_zero<N: RealField + Copy>(x: N) -> bool {
    approx_zero_with(x, default_tolerance())
}

/// Whether `a` and `b` agree up to [`ABSZTOL`].
pub fn approx_eq<N: RealField + Copy>(a: N, b: N) -> bool {
    approx_zero(a - b)
}

/// Whether two vectors agree entrywise up to [`ABSZTOL`].
///
/// Vectors of different lengths never compare equal.
pub fn vector_approx_eq<N: RealField + Copy>(a: &DVector<N>, b: &DVector<N>) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| approx_eq(x, y))
}

/// Whether a vector is entrywise zero up to [`ABSZTOL`].
pub fn vector_approx_zero<N: RealField + Copy>(v: &DVector<N>) -> bool {
    v.iter().all(|&x| approx_zero(x))
}
