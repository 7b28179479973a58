//! Lines: one-dimensional affine subspaces.

use crate::comparison::{approx_zero, infinity};
use crate::errors::{check_dim, SetError, SetResult};
use crate::set::{selection_project, LazySet, Numeric};
use crate::sets::{HalfSpace, Singleton, Universe};
use nalgebra::{convert, DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// The line `{ p + λ d : λ ∈ ℝ }` through `p` with nonzero direction `d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: nalgebra::Scalar + serde::Serialize",
    deserialize = "N: nalgebra::Scalar + serde::de::DeserializeOwned"
))]
pub struct Line<N> {
    point: DVector<N>,
    direction: DVector<N>,
}

impl<N: Numeric> Line<N> {
    /// Create a line from a point and a direction.
    ///
    /// Fails with [`SetError::InvalidConstruction`] for a near-zero
    /// direction.
    pub fn new(point: DVector<N>, direction: DVector<N>) -> SetResult<Self> {
        check_dim("Line::new", point.len(), direction.len())?;
        if approx_zero(direction.norm()) {
            return Err(SetError::invalid("Line", "direction vector is zero"));
        }
        Ok(Self { point, direction })
    }

    /// Create a line with the direction normalized to unit length.
    pub fn new_normalized(point: DVector<N>, direction: DVector<N>) -> SetResult<Self> {
        let line = Self::new(point, direction)?;
        Ok(line.normalize())
    }

    /// The base point `p`.
    pub fn point(&self) -> &DVector<N> {
        &self.point
    }

    /// The direction `d`.
    pub fn direction(&self) -> &DVector<N> {
        &self.direction
    }

    /// Return the line with unit direction.
    pub fn normalize(&self) -> Self {
        Self {
            point: self.point.clone(),
            direction: &self.direction / self.direction.norm(),
        }
    }

    /// Return the line translated by `v`.
    pub fn translate(&self, v: &DVector<N>) -> SetResult<Self> {
        check_dim("translate", self.dim(), v.len())?;
        Ok(Self {
            point: &self.point + v,
            direction: self.direction.clone(),
        })
    }

    /// Translate the line by `v` in place.
    pub fn translate_mut(&mut self, v: &DVector<N>) -> SetResult<()> {
        check_dim("translate", self.dim(), v.len())?;
        self.point += v;
        Ok(())
    }

    /// Whether `direction` is orthogonal to the line, up to tolerance on the
    /// angle (scale-free).
    fn is_orthogonal(&self, direction: &DVector<N>) -> bool {
        let norm = direction.norm();
        if approx_zero(norm) {
            return true;
        }
        let cosine = direction.dot(&self.direction) / (norm * self.direction.norm());
        approx_zero(cosine)
    }

    /// Concrete image of the line under a linear map.
    ///
    /// When the matrix annihilates the direction, the image degenerates to a
    /// single point and an explicit [`Singleton`] is returned instead of an
    /// invalid zero-direction line.
    pub fn linear_map(&self, matrix: &DMatrix<N>) -> SetResult<Box<dyn LazySet<N>>> {
        check_dim("linear_map", self.dim(), matrix.ncols())?;
        let image_point = matrix * &self.point;
        let image_direction = matrix * &self.direction;
        if approx_zero(image_direction.norm()) {
            Ok(Box::new(Singleton::new(image_point)))
        } else {
            Ok(Box::new(Line {
                point: image_point,
                direction: image_direction,
            }))
        }
    }
}

/// Orthonormal basis of the orthogonal complement of `d`, as the trailing
/// `n-1` columns of the Householder reflector mapping `d` onto `±‖d‖ e_1`.
///
/// The reflector is orthogonal by construction, so the basis is exact to
/// rounding even for ill-conditioned input, unlike naive Gram-Schmidt.
fn orthogonal_complement<N: Numeric>(d: &DVector<N>) -> DMatrix<N> {
    let n = d.len();
    let norm = d.norm();
    let mut v = d.clone();
    // sign choice avoids cancellation in the first entry
    let sign = if v[0] >= N::zero() { N::one() } else { -N::one() };
    v[0] += sign * norm;
    let vtv = v.norm_squared();
    let two: N = convert(2.0);
    let mut basis = DMatrix::zeros(n, n.saturating_sub(1));
    for j in 1..n {
        let factor = two * v[j] / vtv;
        for i in 0..n {
            let e = if i == j { N::one() } else { N::zero() };
            basis[(i, j - 1)] = e - factor * v[i];
        }
    }
    basis
}

impl<N: Numeric> LazySet<N> for Line<N> {
    fn dim(&self) -> usize {
        self.point.len()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        if self.is_orthogonal(direction) {
            Ok(direction.dot(&self.point))
        } else {
            Ok(infinity())
        }
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        if self.is_orthogonal(direction) {
            Ok(self.point.clone())
        } else {
            Err(SetError::unbounded("Line"))
        }
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        let offset = point - &self.point;
        let unit = &self.direction / self.direction.norm();
        let residual = &offset - &unit * offset.dot(&unit);
        Ok(approx_zero(residual.norm()))
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
        "Line"
    }

    /// `2(n-1)` half-spaces, two opposing ones per orthogonal-complement
    /// basis vector, whose intersection is exactly the line.
    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        let n = self.dim();
        let basis = orthogonal_complement(&self.direction);
        let mut constraints = Vec::with_capacity(2 * n.saturating_sub(1));
        for j in 0..basis.ncols() {
            let q = basis.column(j).into_owned();
            let offset = q.dot(&self.point);
            constraints.push(HalfSpace::new(q.clone(), offset)?);
            constraints.push(HalfSpace::new(-q, -offset)?);
        }
        Ok(constraints)
    }

    /// Projecting onto a single coordinate yields the full axis.
    fn project(&self, dims: &[usize]) -> SetResult<Box<dyn LazySet<N>>> {
        if dims.len() == 1 {
            if dims[0] >= self.dim() {
                return Err(SetError::dim_mismatch("project", self.dim(), dims[0] + 1));
            }
            Ok(Box::new(Universe::new(1)))
        } else {
            selection_project(self.clone_box(), self.dim(), dims)
        }
    }
}
