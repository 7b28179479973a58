//! The universal set.

use crate::comparison::{approx_zero, infinity};
use crate::errors::{check_dim, SetError, SetResult};
use crate::set::{LazySet, Numeric};
use crate::sets::HalfSpace;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// The whole space `ℝⁿ` of a fixed ambient dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe<N> {
    dim: usize,
    #[serde(skip)]
    _marker: PhantomData<N>,
}

impl<N: Numeric> Universe<N> {
    /// Create the universe of dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            _marker: PhantomData,
        }
    }
}

impl<N: Numeric> LazySet<N> for Universe<N> {
    fn dim(&self) -> usize {
        self.dim
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim, direction.len())?;
        if approx_zero(direction.norm()) {
            Ok(N::zero())
        } else {
            Ok(infinity())
        }
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim, direction.len())?;
        if approx_zero(direction.norm()) {
            Ok(DVector::zeros(self.dim))
        } else {
            Err(SetError::unbounded("Universe"))
        }
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim, point.len())?;
        Ok(true)
    }

    fn is_bounded(&self) -> bool {
        self.dim == 0
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        Box::new(self.clone())
    }

    fn set_name(&self) -> &'static str {
        "Universe"
    }

    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        // the universe is the intersection of no constraints
        Ok(Vec::new())
    }

    fn project(&self, dims: &[usize]) -> SetResult<Box<dyn LazySet<N>>> {
        for &d in dims {
            if d >= self.dim {
                return Err(SetError::dim_mismatch("project", self.dim, d + 1));
            }
        }
        Ok(Box::new(Universe::<N>::new(dims.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_queries() {
        let u: Universe<f64> = Universe::new(2);
        assert_eq!(u.dim(), 2);
        assert!(!u.is_empty());
        assert!(!u.is_bounded());
        assert!(u.contains(&dvector![1e9, -1e9]).unwrap());
        assert_eq!(
            u.support_function(&dvector![1.0, 0.0]).unwrap(),
            f64::INFINITY
        );
        assert_eq!(u.support_function(&dvector![0.0, 0.0]).unwrap(), 0.0);
        assert!(u.support_vector(&dvector![1.0, 0.0]).is_err());
        assert!(u.constraints_list().unwrap().is_empty());
    }

    #[test]
    fn test_project() {
        let u: Universe<f64> = Universe::new(3);
        let p = u.project(&[0, 2]).unwrap();
        assert_eq!(p.set_name(), "Universe");
        assert_eq!(p.dim(), 2);
        assert!(u.project(&[5]).is_err());
    }
}
