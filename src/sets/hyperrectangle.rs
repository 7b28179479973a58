//! Axis-aligned hyperrectangles in center/radius form.

use crate::comparison::{approx_zero, default_tolerance};
use crate::errors::{check_dim, SetError, SetResult};
use crate::set::{LazySet, Numeric};
use crate::sets::HalfSpace;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// An axis-aligned box `{ x : |x_i - c_i| ≤ r_i }` with center `c` and
/// nonnegative radius `r`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: nalgebra::Scalar + serde::Serialize",
    deserialize = "N: nalgebra::Scalar + serde::de::DeserializeOwned"
))]
pub struct Hyperrectangle<N> {
    center: DVector<N>,
    radius: DVector<N>,
}

impl<N: Numeric> Hyperrectangle<N> {
    /// Create a hyperrectangle from its center and radius vectors.
    pub fn new(center: DVector<N>, radius: DVector<N>) -> SetResult<Self> {
        check_dim("Hyperrectangle::new", center.len(), radius.len())?;
        if radius.iter().any(|&r| r < N::zero()) {
            return Err(SetError::invalid(
                "Hyperrectangle",
                "radius entries must be nonnegative",
            ));
        }
        Ok(Self { center, radius })
    }

    /// Create the box `[lo_1, hi_1] × … × [lo_n, hi_n]` from corner vectors.
    pub fn from_bounds(low: DVector<N>, high: DVector<N>) -> SetResult<Self> {
        check_dim("Hyperrectangle::from_bounds", low.len(), high.len())?;
        let two = N::one() + N::one();
        let center = (&low + &high) / two;
        let radius = (&high - &low) / two;
        Self::new(center, radius)
    }

    /// The radius vector.
    pub fn radius(&self) -> &DVector<N> {
        &self.radius
    }

    /// The corner with smallest coordinates.
    pub fn low(&self) -> DVector<N> {
        &self.center - &self.radius
    }

    /// The corner with largest coordinates.
    pub fn high(&self) -> DVector<N> {
        &self.center + &self.radius
    }

    /// Whether some dimension is degenerate (zero radius up to tolerance).
    pub fn is_flat(&self) -> bool {
        self.radius.iter().any(|&r| approx_zero(r))
    }

    /// Return the box translated by `v`.
    pub fn translate(&self, v: &DVector<N>) -> SetResult<Self> {
        check_dim("translate", self.dim(), v.len())?;
        Ok(Self {
            center: &self.center + v,
            radius: self.radius.clone(),
        })
    }

    /// Translate the box by `v` in place.
    pub fn translate_mut(&mut self, v: &DVector<N>) -> SetResult<()> {
        check_dim("translate", self.dim(), v.len())?;
        self.center += v;
        Ok(())
    }

    /// Return the box scaled by `alpha` about the origin.
    pub fn scale(&self, alpha: N) -> Self {
        Self {
            center: &self.center * alpha,
            radius: &self.radius * alpha.abs(),
        }
    }

    /// Scale the box by `alpha` in place.
    pub fn scale_mut(&mut self, alpha: N) {
        self.center *= alpha;
        self.radius *= alpha.abs();
    }
}

impl<N: Numeric> LazySet<N> for Hyperrectangle<N> {
    fn dim(&self) -> usize {
        self.center.len()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        let mut acc = direction.dot(&self.center);
        for (d, r) in direction.iter().zip(self.radius.iter()) {
            acc += d.abs() * *r;
        }
        Ok(acc)
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        let mut sv = self.center.clone();
        // tolerance-zero direction entries break the tie toward +radius, so
        // repeated queries return the same maximizer
        for i in 0..self.dim() {
            if direction[i] >= N::zero() || approx_zero(direction[i]) {
                sv[i] += self.radius[i];
            } else {
                sv[i] -= self.radius[i];
            }
        }
        Ok(sv)
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        let tol = default_tolerance();
        for i in 0..self.dim() {
            if (point[i] - self.center[i]).abs() > self.radius[i] + tol {
                return Ok(false);
            }
        }
        Ok(true)
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
        "Hyperrectangle"
    }

    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        let n = self.dim();
        let mut constraints = Vec::with_capacity(2 * n);
        for i in 0..n {
            let mut pos = DVector::zeros(n);
            pos[i] = N::one();
            constraints.push(HalfSpace::new(pos, self.center[i] + self.radius[i])?);
            let mut neg = DVector::zeros(n);
            neg[i] = -N::one();
            constraints.push(HalfSpace::new(neg, self.radius[i] - self.center[i])?);
        }
        Ok(constraints)
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        let n = self.dim();
        let mut vertices = Vec::with_capacity(1 << n);
        for mask in 0..(1usize << n) {
            let mut v = self.center.clone();
            for i in 0..n {
                if mask & (1 << i) != 0 {
                    v[i] += self.radius[i];
                } else {
                    v[i] -= self.radius[i];
                }
            }
            vertices.push(v);
        }
        Ok(vertices)
    }

    fn center(&self) -> SetResult<DVector<N>> {
        Ok(self.center.clone())
    }
}
