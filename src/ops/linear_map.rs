//! Lazy linear and affine images.
//!
//! The support function of a linear image equals the support function of the
//! preimage at the transposed direction, `ρ(d, M·X) = ρ(Mᵗd, X)`; this single
//! identity lets a composition of maps answer exact queries without ever
//! materializing the image.

use crate::errors::{check_dim, SetError, SetResult};
use crate::set::{is_bounded_via_support, LazySet, Numeric};
use crate::sets::HalfSpace;
use log::debug;
use nalgebra::{DMatrix, DVector};

/// The lazy linear image `M·X`.
#[derive(Debug, Clone)]
pub struct LinearMap<N: Numeric> {
    matrix: DMatrix<N>,
    child: Box<dyn LazySet<N>>,
}

impl<N: Numeric> LinearMap<N> {
    /// Create the lazy image of `child` under `matrix`.
    ///
    /// The matrix column count must equal the child's dimension; checked
    /// eagerly, not at first query.
    pub fn new(matrix: DMatrix<N>, child: Box<dyn LazySet<N>>) -> SetResult<Self> {
        check_dim("LinearMap::new", child.dim(), matrix.ncols())?;
        Ok(Self { matrix, child })
    }

    /// Create the lazy image of an unboxed set.
    pub fn of(matrix: DMatrix<N>, child: impl LazySet<N> + 'static) -> SetResult<Self> {
        Self::new(matrix, Box::new(child))
    }

    /// The map's matrix.
    pub fn matrix(&self) -> &DMatrix<N> {
        &self.matrix
    }

    /// The wrapped set.
    pub fn child(&self) -> &dyn LazySet<N> {
        self.child.as_ref()
    }

    fn inverse(&self) -> Option<DMatrix<N>> {
        if self.matrix.nrows() != self.matrix.ncols() {
            return None;
        }
        self.matrix.clone().try_inverse()
    }
}

impl<N: Numeric> LazySet<N> for LinearMap<N> {
    fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        self.child.support_function(&self.matrix.tr_mul(direction))
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        let inner = self.child.support_vector(&self.matrix.tr_mul(direction))?;
        Ok(&self.matrix * inner)
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        if self.matrix.nrows() == self.matrix.ncols() {
            let lu = self.matrix.clone().lu();
            if let Some(preimage) = lu.solve(point) {
                return self.child.contains(&preimage);
            }
        }
        Err(SetError::unsupported(
            "contains",
            "LinearMap",
            "matrix is not square invertible; requires an external linear-feasibility solver",
        ))
    }

    fn is_bounded(&self) -> bool {
        // the image of a bounded set is bounded; otherwise fall back to the
        // exact support-based test (the matrix may annihilate every
        // unbounded direction)
        self.child.is_bounded() || is_bounded_via_support(self)
    }

    fn is_empty(&self) -> bool {
        self.child.is_empty()
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        Box::new(self.clone())
    }

    fn set_name(&self) -> &'static str {
        "LinearMap"
    }

    /// Pull each child constraint normal back through the transposed
    /// inverse: `a·y ≤ b` with `y = M⁻¹x` becomes `(M⁻ᵗa)·x ≤ b`.
    /// Requires a square invertible matrix.
    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        let Some(inverse) = self.inverse() else {
            return Err(SetError::unsupported(
                "constraints_list",
                "LinearMap",
                "matrix is not square invertible; fall back to vertex enumeration",
            ));
        };
        debug!("materializing constraints through an inverse linear map");
        let mut constraints = Vec::new();
        for c in self.child.constraints_list()? {
            let normal = inverse.tr_mul(c.normal());
            constraints.push(HalfSpace::new(normal, c.offset())?);
        }
        Ok(constraints)
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        debug!("materializing vertices through a linear map");
        Ok(self
            .child
            .vertices_list()?
            .into_iter()
            .map(|v| &self.matrix * v)
            .collect())
    }

    fn center(&self) -> SetResult<DVector<N>> {
        Ok(&self.matrix * self.child.center()?)
    }
}

/// The lazy affine image `M·X + v`.
#[derive(Debug, Clone)]
pub struct AffineMap<N: Numeric> {
    matrix: DMatrix<N>,
    child: Box<dyn LazySet<N>>,
    translation: DVector<N>,
}

impl<N: Numeric> AffineMap<N> {
    /// Create the lazy affine image of `child` under `matrix` plus
    /// `translation`.
    pub fn new(
        matrix: DMatrix<N>,
        child: Box<dyn LazySet<N>>,
        translation: DVector<N>,
    ) -> SetResult<Self> {
        check_dim("AffineMap::new", child.dim(), matrix.ncols())?;
        check_dim("AffineMap::new", matrix.nrows(), translation.len())?;
        Ok(Self {
            matrix,
            child,
            translation,
        })
    }

    /// Create the lazy affine image of an unboxed set.
    pub fn of(
        matrix: DMatrix<N>,
        child: impl LazySet<N> + 'static,
        translation: DVector<N>,
    ) -> SetResult<Self> {
        Self::new(matrix, Box::new(child), translation)
    }

    /// The map's matrix.
    pub fn matrix(&self) -> &DMatrix<N> {
        &self.matrix
    }

    /// The translation vector.
    pub fn translation(&self) -> &DVector<N> {
        &self.translation
    }

    /// The wrapped set.
    pub fn child(&self) -> &dyn LazySet<N> {
        self.child.as_ref()
    }

    fn linear_part(&self) -> SetResult<LinearMap<N>> {
        LinearMap::new(self.matrix.clone(), self.child.clone())
    }
}

impl<N: Numeric> LazySet<N> for AffineMap<N> {
    fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        let shift = direction.dot(&self.translation);
        Ok(shift + self.child.support_function(&self.matrix.tr_mul(direction))?)
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        let inner = self.child.support_vector(&self.matrix.tr_mul(direction))?;
        Ok(&self.matrix * inner + &self.translation)
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        let shifted = point - &self.translation;
        if self.matrix.nrows() == self.matrix.ncols() {
            let lu = self.matrix.clone().lu();
            if let Some(preimage) = lu.solve(&shifted) {
                return self.child.contains(&preimage);
            }
        }
        Err(SetError::unsupported(
            "contains",
            "AffineMap",
            "matrix is not square invertible; requires an external linear-feasibility solver",
        ))
    }

    fn is_bounded(&self) -> bool {
        self.child.is_bounded() || is_bounded_via_support(self)
    }

    fn is_empty(&self) -> bool {
        self.child.is_empty()
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        Box::new(self.clone())
    }

    fn set_name(&self) -> &'static str {
        "AffineMap"
    }

    /// Constraints of the linear part, each translated by `v`.
    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        let mut constraints = Vec::new();
        for c in self.linear_part()?.constraints_list()? {
            constraints.push(c.translate(&self.translation)?);
        }
        Ok(constraints)
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        Ok(self
            .child
            .vertices_list()?
            .into_iter()
            .map(|v| &self.matrix * v + &self.translation)
            .collect())
    }

    fn center(&self) -> SetResult<DVector<N>> {
        Ok(&self.matrix * self.child.center()? + &self.translation)
    }
}
