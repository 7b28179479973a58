//! Singletons: sets with exactly one element.

use crate::comparison::vector_approx_eq;
use crate::errors::{check_dim, SetResult};
use crate::set::{LazySet, Numeric};
use crate::sets::HalfSpace;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// The set `{ e }` holding a single point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: nalgebra::Scalar + serde::Serialize",
    deserialize = "N: nalgebra::Scalar + serde::de::DeserializeOwned"
))]
pub struct Singleton<N> {
    element: DVector<N>,
}

impl<N: Numeric> Singleton<N> {
    /// Create a singleton from its only element.
    pub fn new(element: DVector<N>) -> Self {
        Self { element }
    }

    /// The single element.
    pub fn element(&self) -> &DVector<N> {
        &self.element
    }

    /// Return the singleton translated by `v`.
    pub fn translate(&self, v: &DVector<N>) -> SetResult<Self> {
        check_dim("translate", self.dim(), v.len())?;
        Ok(Self {
            element: &self.element + v,
        })
    }

    /// Translate the singleton by `v` in place.
    pub fn translate_mut(&mut self, v: &DVector<N>) -> SetResult<()> {
        check_dim("translate", self.dim(), v.len())?;
        self.element += v;
        Ok(())
    }

    /// Return the singleton scaled by `alpha`.
    pub fn scale(&self, alpha: N) -> Self {
        Self {
            element: &self.element * alpha,
        }
    }
}

impl<N: Numeric> LazySet<N> for Singleton<N> {
    fn dim(&self) -> usize {
        self.element.len()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        Ok(direction.dot(&self.element))
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        Ok(self.element.clone())
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        Ok(vector_approx_eq(point, &self.element))
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
        "Singleton"
    }

    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        let n = self.dim();
        let mut constraints = Vec::with_capacity(2 * n);
        for i in 0..n {
            let mut pos = DVector::zeros(n);
            pos[i] = N::one();
            constraints.push(HalfSpace::new(pos, self.element[i])?);
            let mut neg = DVector::zeros(n);
            neg[i] = -N::one();
            constraints.push(HalfSpace::new(neg, -self.element[i])?);
        }
        Ok(constraints)
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        Ok(vec![self.element.clone()])
    }

    fn center(&self) -> SetResult<DVector<N>> {
        Ok(self.element.clone())
    }
}
