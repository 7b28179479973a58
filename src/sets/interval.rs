//! One-dimensional closed intervals.

use crate::comparison::{approx_eq, default_tolerance, is_finite};
use crate::errors::{check_dim, SetError, SetResult};
use crate::set::{LazySet, Numeric};
use crate::sets::HalfSpace;
use nalgebra::{dvector, DVector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed bounded interval `[lo, hi]` in one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval<N> {
    lo: N,
    hi: N,
}

impl<N: Numeric> Interval<N> {
    /// Create an interval from its endpoints.
    ///
    /// Fails with [`SetError::InvalidConstruction`] if the endpoints are not
    /// finite or are out of order beyond tolerance.
    pub fn new(lo: N, hi: N) -> SetResult<Self> {
        if !is_finite(lo) || !is_finite(hi) {
            return Err(SetError::invalid("Interval", "endpoints must be finite"));
        }
        if lo > hi + default_tolerance() {
            return Err(SetError::invalid(
                "Interval",
                "lower endpoint exceeds upper endpoint",
            ));
        }
        Ok(Self { lo, hi })
    }

    /// The lower endpoint.
    pub fn lo(&self) -> N {
        self.lo
    }

    /// The upper endpoint.
    pub fn hi(&self) -> N {
        self.hi
    }

    /// Half the width of the interval.
    pub fn radius(&self) -> N {
        (self.hi - self.lo) / (N::one() + N::one())
    }

    /// Whether the interval has zero width up to tolerance.
    pub fn is_flat(&self) -> bool {
        approx_eq(self.lo, self.hi)
    }

    /// Return the interval shifted by `offset`.
    pub fn translate(&self, offset: N) -> Self {
        Self {
            lo: self.lo + offset,
            hi: self.hi + offset,
        }
    }

    /// Shift the interval by `offset` in place.
    pub fn translate_mut(&mut self, offset: N) {
        self.lo += offset;
        self.hi += offset;
    }

    /// Return the interval scaled by `alpha` (endpoints swap for negative
    /// factors).
    pub fn scale(&self, alpha: N) -> Self {
        if alpha >= N::zero() {
            Self {
                lo: self.lo * alpha,
                hi: self.hi * alpha,
            }
        } else {
            Self {
                lo: self.hi * alpha,
                hi: self.lo * alpha,
            }
        }
    }

    /// Scale the interval by `alpha` in place.
    pub fn scale_mut(&mut self, alpha: N) {
        *self = self.scale(alpha);
    }
}

impl<N: Numeric> LazySet<N> for Interval<N> {
    fn dim(&self) -> usize {
        1
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", 1, direction.len())?;
        let d = direction[0];
        Ok(if d >= N::zero() { d * self.hi } else { d * self.lo })
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", 1, direction.len())?;
        let d = direction[0];
        Ok(if d >= N::zero() {
            dvector![self.hi]
        } else {
            dvector![self.lo]
        })
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", 1, point.len())?;
        let x = point[0];
        let tol = default_tolerance();
        Ok(x >= self.lo - tol && x <= self.hi + tol)
    }

    fn is_bounded(&self) -> bool {
        true
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        Box::new(self.clone())
    }

    fn set_name(&self) -> &'static str {
        "Interval"
    }

    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        Ok(vec![
            HalfSpace::new(dvector![N::one()], self.hi)?,
            HalfSpace::new(dvector![-N::one()], -self.lo)?,
        ])
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        if self.is_flat() {
            Ok(vec![dvector![self.lo]])
        } else {
            Ok(vec![dvector![self.lo], dvector![self.hi]])
        }
    }

    fn center(&self) -> SetResult<DVector<N>> {
        Ok(dvector![(self.lo + self.hi) / (N::one() + N::one())])
    }
}

impl<N: fmt::Display> fmt::Display for Interval<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
