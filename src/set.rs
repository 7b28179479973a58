//! The capability contract every set representation implements.
//!
//! A set is any value that can answer the core geometric queries: ambient
//! dimension, support function, support vector, membership, boundedness and
//! emptiness. Lazy composites implement the same contract by delegating to
//! their children, so a query flows down an unevaluated operation graph and
//! back up without materializing anything.

use crate::comparison::is_finite;
use crate::errors::{SetError, SetResult};
use crate::ops::{AffineMap, LinearMap};
use crate::sets::HalfSpace;
use nalgebra::{DMatrix, DVector, RealField};
use std::fmt;

/// Scalar bound shared by every set type.
///
/// Numeric precision is a single parameter threaded through a computation;
/// precisions are never mixed silently.
pub trait Numeric: RealField + Copy + 'static {}

impl<T: RealField + Copy + 'static> Numeric for T {}

/// The polymorphic contract satisfied by every concrete and lazy set type.
///
/// Required queries are pure and evaluate in time bounded by the geometric
/// structure's size; `is_bounded` and `is_empty` in particular never
/// enumerate vertices.
pub trait LazySet<N: Numeric>: fmt::Debug {
    /// Ambient dimension of the set.
    fn dim(&self) -> usize;

    /// Support function `ρ(d) = sup { d·x : x ∈ X }`.
    ///
    /// Returns positive infinity when the set is unbounded in direction `d`
    /// and negative infinity for the empty set.
    fn support_function(&self, direction: &DVector<N>) -> SetResult<N>;

    /// Support vector `σ(d)`: a point of the set attaining the support
    /// function's supremum.
    ///
    /// Fails with [`SetError::UnboundedDirection`] when no maximizer exists.
    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>>;

    /// Membership test, exact up to the comparison service's tolerance.
    fn contains(&self, point: &DVector<N>) -> SetResult<bool>;

    /// Whether the set is bounded.
    fn is_bounded(&self) -> bool;

    /// Whether the set is empty.
    fn is_empty(&self) -> bool;

    /// Clone into an owned trait object, so composites can own heterogeneous
    /// children.
    fn clone_box(&self) -> Box<dyn LazySet<N>>;

    /// Name of the concrete representation, used in error reports.
    fn set_name(&self) -> &'static str;

    /// Materialize an explicit polyhedral description as a list of
    /// half-space constraints whose intersection is the set.
    ///
    /// The default fails with [`SetError::UnsupportedOperation`]; types with
    /// a closed-form constraint representation override it.
    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        Err(SetError::unsupported(
            "constraints_list",
            self.set_name(),
            "no closed-form constraint representation",
        ))
    }

    /// Materialize an explicit vertex representation.
    ///
    /// The default fails with [`SetError::UnsupportedOperation`].
    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        Err(SetError::unsupported(
            "vertices_list",
            self.set_name(),
            "no closed-form vertex representation",
        ))
    }

    /// Center of the set, where defined.
    fn center(&self) -> SetResult<DVector<N>> {
        Err(SetError::unsupported(
            "center",
            self.set_name(),
            "no distinguished center",
        ))
    }

    /// Project the set onto the given (zero-based) coordinates.
    ///
    /// The default is lazy: it wraps the set in a selection [`LinearMap`].
    fn project(&self, dims: &[usize]) -> SetResult<Box<dyn LazySet<N>>> {
        selection_project(self.clone_box(), self.dim(), dims)
    }

    /// Lazy translation by `v`, as an [`AffineMap`] with identity matrix.
    fn translated(&self, v: &DVector<N>) -> SetResult<AffineMap<N>> {
        let n = self.dim();
        AffineMap::new(DMatrix::identity(n, n), self.clone_box(), v.clone())
    }

    /// Lazy uniform scaling by `alpha`, as a [`LinearMap`] with diagonal
    /// matrix.
    fn scaled(&self, alpha: N) -> SetResult<LinearMap<N>> {
        let n = self.dim();
        LinearMap::new(
            DMatrix::from_diagonal_element(n, n, alpha),
            self.clone_box(),
        )
    }
}

impl<N: Numeric> Clone for Box<dyn LazySet<N>> {
    fn clone(&self) -> Self {
        self.as_ref().clone_box()
    }
}

impl<N: Numeric> LazySet<N> for Box<dyn LazySet<N>> {
    fn dim(&self) -> usize {
        self.as_ref().dim()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        self.as_ref().support_function(direction)
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        self.as_ref().support_vector(direction)
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        self.as_ref().contains(point)
    }

    fn is_bounded(&self) -> bool {
        self.as_ref().is_bounded()
    }

    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        self.as_ref().clone_box()
    }

    fn set_name(&self) -> &'static str {
        self.as_ref().set_name()
    }

    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        self.as_ref().constraints_list()
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        self.as_ref().vertices_list()
    }

    fn center(&self) -> SetResult<DVector<N>> {
        self.as_ref().center()
    }

    fn project(&self, dims: &[usize]) -> SetResult<Box<dyn LazySet<N>>> {
        self.as_ref().project(dims)
    }
}

/// Build the lazy selection map realizing a coordinate projection.
pub(crate) fn selection_project<N: Numeric>(
    set: Box<dyn LazySet<N>>,
    ambient_dim: usize,
    dims: &[usize],
) -> SetResult<Box<dyn LazySet<N>>> {
    let mut matrix = DMatrix::zeros(dims.len(), ambient_dim);
    for (row, &d) in dims.iter().enumerate() {
        if d >= ambient_dim {
            return Err(SetError::dim_mismatch("project", ambient_dim, d + 1));
        }
        matrix[(row, d)] = N::one();
    }
    Ok(Box::new(LinearMap::new(matrix, set)?))
}

/// Exact boundedness test for convex sets through support evaluations.
///
/// A nonempty convex set is bounded iff its support function is finite along
/// all `2n` signed unit directions. Costs `2n` support evaluations.
pub fn is_bounded_via_support<N: Numeric>(set: &dyn LazySet<N>) -> bool {
    let n = set.dim();
    for i in 0..n {
        for sign in [N::one(), -N::one()] {
            let mut d = DVector::zeros(n);
            d[i] = sign;
            match set.support_function(&d) {
                Ok(value) if is_finite(value) => {}
                _ => return false,
            }
        }
    }
    true
}
