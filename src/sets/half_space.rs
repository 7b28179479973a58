//! Half-spaces: single linear inequality constraints.

use crate::comparison::{approx_zero, default_tolerance, infinity, vector_approx_eq};
use crate::errors::{check_dim, SetError, SetResult};
use crate::set::{LazySet, Numeric};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The half-space `{ x : a·x ≤ b }` with nonzero normal `a`.
///
/// Also serves as the constraint element produced by `constraints_list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: nalgebra::Scalar + serde::Serialize",
    deserialize = "N: nalgebra::Scalar + serde::de::DeserializeOwned"
))]
pub struct HalfSpace<N> {
    normal: DVector<N>,
    offset: N,
}

impl<N: Numeric> HalfSpace<N> {
    /// Create a half-space from its outward normal and offset.
    ///
    /// Fails with [`SetError::InvalidConstruction`] for a near-zero normal.
    pub fn new(normal: DVector<N>, offset: N) -> SetResult<Self> {
        if approx_zero(normal.norm()) {
            return Err(SetError::invalid("HalfSpace", "normal vector is zero"));
        }
        Ok(Self { normal, offset })
    }

    /// The outward normal vector `a`.
    pub fn normal(&self) -> &DVector<N> {
        &self.normal
    }

    /// The offset `b`.
    pub fn offset(&self) -> N {
        self.offset
    }

    /// Return an equivalent half-space with unit normal.
    pub fn normalize(&self) -> Self {
        let norm = self.normal.norm();
        Self {
            normal: &self.normal / norm,
            offset: self.offset / norm,
        }
    }

    /// Whether `point` lies on the boundary hyperplane up to tolerance.
    pub fn is_tight(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("is_tight", self.normal.len(), point.len())?;
        Ok(approx_zero(self.normal.dot(point) - self.offset))
    }

    /// Return the half-space translated by `v` (the normal is unchanged,
    /// only the offset moves).
    pub fn translate(&self, v: &DVector<N>) -> SetResult<Self> {
        check_dim("translate", self.normal.len(), v.len())?;
        Ok(Self {
            normal: self.normal.clone(),
            offset: self.offset + self.normal.dot(v),
        })
    }

    /// Translate the half-space by `v` in place.
    pub fn translate_mut(&mut self, v: &DVector<N>) -> SetResult<()> {
        check_dim("translate", self.normal.len(), v.len())?;
        self.offset += self.normal.dot(v);
        Ok(())
    }

    /// A point of the half-space: the boundary point closest to the origin.
    pub fn an_element(&self) -> DVector<N> {
        let scale = self.offset / self.normal.norm_squared();
        &self.normal * scale
    }

    /// Decompose `direction` as a nonnegative multiple of the normal, if it
    /// is one (up to tolerance). The support function is finite exactly in
    /// those directions.
    fn ray_factor(&self, direction: &DVector<N>) -> Option<N> {
        if approx_zero(direction.norm()) {
            return Some(N::zero());
        }
        let lambda = direction.dot(&self.normal) / self.normal.norm_squared();
        if lambda < N::zero() {
            return None;
        }
        let scaled = &self.normal * lambda;
        if vector_approx_eq(direction, &scaled) {
            Some(lambda)
        } else {
            None
        }
    }
}

impl<N: Numeric> LazySet<N> for HalfSpace<N> {
    fn dim(&self) -> usize {
        self.normal.len()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        match self.ray_factor(direction) {
            Some(lambda) => Ok(lambda * self.offset),
            None => Ok(infinity()),
        }
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        match self.ray_factor(direction) {
            Some(_) => Ok(self.an_element()),
            None => Err(SetError::unbounded("HalfSpace")),
        }
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        Ok(self.normal.dot(point) <= self.offset + default_tolerance())
    }

    fn is_bounded(&self) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        Box::new(self.clone())
    }

    fn set_name(&self) -> &'static str {
        "HalfSpace"
    }

    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        Ok(vec![self.clone()])
    }
}

impl<N: Numeric + fmt::Display> fmt::Display for HalfSpace<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ x : [")?;
        for (i, a) in self.normal.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", a)?;
        }
        write!(f, "]·x <= {} }}", self.offset)
    }
}
