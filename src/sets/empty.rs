//! The empty set.

use crate::comparison::neg_infinity;
use crate::errors::{check_dim, SetError, SetResult};
use crate::set::{LazySet, Numeric};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// The empty set of a fixed ambient dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptySet<N> {
    dim: usize,
    #[serde(skip)]
    _marker: PhantomData<N>,
}

impl<N: Numeric> EmptySet<N> {
    /// Create the empty set of dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            _marker: PhantomData,
        }
    }
}

impl<N: Numeric> LazySet<N> for EmptySet<N> {
    fn dim(&self) -> usize {
        self.dim
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim, direction.len())?;
        // supremum over the empty set
        Ok(neg_infinity())
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim, direction.len())?;
        // no point of the set attains the supremum, same kind as any other
        // maximizer-free query
        Err(SetError::unbounded("EmptySet"))
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim, point.len())?;
        Ok(false)
    }

    fn is_bounded(&self) -> bool {
        true
    }

    fn is_empty(&self) -> bool {
        true
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        Box::new(self.clone())
    }

    fn set_name(&self) -> &'static str {
        "EmptySet"
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        Ok(Vec::new())
    }
}
