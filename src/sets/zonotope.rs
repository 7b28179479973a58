//! Zonotopes in center/generator form.

use crate::comparison::{approx_zero, vector_approx_eq};
use crate::errors::{check_dim, SetError, SetResult};
use crate::set::{LazySet, Numeric};
use crate::sets::HalfSpace;
use nalgebra::{dvector, DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// The zonotope `{ c + Σ ξ_j g_j : ξ_j ∈ [-1, 1] }` with center `c` and
/// generators `g_j` (the columns of the generator matrix).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: nalgebra::Scalar + serde::Serialize",
    deserialize = "N: nalgebra::Scalar + serde::de::DeserializeOwned"
))]
pub struct Zonotope<N> {
    center: DVector<N>,
    generators: DMatrix<N>,
}

impl<N: Numeric> Zonotope<N> {
    /// Create a zonotope from its center and generator matrix (one generator
    /// per column).
    pub fn new(center: DVector<N>, generators: DMatrix<N>) -> SetResult<Self> {
        check_dim("Zonotope::new", center.len(), generators.nrows())?;
        Ok(Self { center, generators })
    }

    /// The generator matrix.
    pub fn generators(&self) -> &DMatrix<N> {
        &self.generators
    }

    /// Number of generators.
    pub fn ngens(&self) -> usize {
        self.generators.ncols()
    }

    /// Order of the zonotope: generators per ambient dimension.
    pub fn order(&self) -> N {
        nalgebra::convert::<f64, N>(self.ngens() as f64 / self.dim() as f64)
    }

    /// Return the zonotope translated by `v`.
    pub fn translate(&self, v: &DVector<N>) -> SetResult<Self> {
        check_dim("translate", self.dim(), v.len())?;
        Ok(Self {
            center: &self.center + v,
            generators: self.generators.clone(),
        })
    }

    /// Translate the zonotope by `v` in place.
    pub fn translate_mut(&mut self, v: &DVector<N>) -> SetResult<()> {
        check_dim("translate", self.dim(), v.len())?;
        self.center += v;
        Ok(())
    }

    /// Return the zonotope scaled by `alpha` about the origin.
    pub fn scale(&self, alpha: N) -> Self {
        Self {
            center: &self.center * alpha,
            generators: &self.generators * alpha,
        }
    }

    /// Scale the zonotope by `alpha` in place.
    pub fn scale_mut(&mut self, alpha: N) {
        self.center *= alpha;
        self.generators *= alpha;
    }

    /// Concrete linear image `M·Z = (M·c, M·G)`.
    pub fn linear_map(&self, matrix: &DMatrix<N>) -> SetResult<Self> {
        check_dim("linear_map", self.dim(), matrix.ncols())?;
        Ok(Self {
            center: matrix * &self.center,
            generators: matrix * &self.generators,
        })
    }

    /// Generators oriented into the upper half-plane and sorted by angle,
    /// with near-zero columns dropped. Only meaningful in two dimensions.
    fn sorted_generators_2d(&self) -> Vec<DVector<N>> {
        let mut gens: Vec<DVector<N>> = Vec::with_capacity(self.ngens());
        for j in 0..self.ngens() {
            let g = self.generators.column(j).into_owned();
            if approx_zero(g.norm()) {
                continue;
            }
            // flip into y > 0 (or y = 0, x > 0) so angles lie in [0, pi)
            if g[1] < N::zero() || (approx_zero(g[1]) && g[0] < N::zero()) {
                gens.push(-g);
            } else {
                gens.push(g);
            }
        }
        gens.sort_by(|a, b| {
            let aa = a[1].atan2(a[0]);
            let ab = b[1].atan2(b[0]);
            aa.partial_cmp(&ab).unwrap_or(std::cmp::Ordering::Equal)
        });
        gens
    }
}

impl<N: Numeric> LazySet<N> for Zonotope<N> {
    fn dim(&self) -> usize {
        self.center.len()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        let pulled = self.generators.tr_mul(direction);
        let mut acc = direction.dot(&self.center);
        for x in pulled.iter() {
            acc += x.abs();
        }
        Ok(acc)
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        let pulled = self.generators.tr_mul(direction);
        let mut sv = self.center.clone();
        for (j, x) in pulled.iter().enumerate() {
            // tolerance-zero factors break the tie toward +1
            let sign = if *x >= N::zero() || approx_zero(*x) {
                N::one()
            } else {
                -N::one()
            };
            sv += self.generators.column(j) * sign;
        }
        Ok(sv)
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        Err(SetError::unsupported(
            "contains",
            "Zonotope",
            "membership requires an external linear-feasibility solver",
        ))
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
        "Zonotope"
    }

    fn center(&self) -> SetResult<DVector<N>> {
        Ok(self.center.clone())
    }

    /// Vertex enumeration, closed-form in one and two dimensions.
    ///
    /// In 2-D the generators are oriented upward and angle-sorted; walking
    /// the sign flips in that order traces one half of the boundary, the
    /// other half is the reflection through the center.
    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        match self.dim() {
            1 => {
                let rho = self.support_function(&dvector![N::one()])?;
                let low = -self.support_function(&dvector![-N::one()])?;
                if approx_zero(rho - low) {
                    Ok(vec![dvector![low]])
                } else {
                    Ok(vec![dvector![low], dvector![rho]])
                }
            }
            2 => {
                let gens = self.sorted_generators_2d();
                if gens.is_empty() {
                    return Ok(vec![self.center.clone()]);
                }
                let two = N::one() + N::one();
                let mut first: DVector<N> = self.center.clone();
                for g in &gens {
                    first += g;
                }
                let mut chain = vec![first.clone()];
                let mut current = first;
                for g in &gens {
                    current -= g * two;
                    chain.push(current.clone());
                }
                // mirror the interior of the chain through the center
                let mut vertices = chain.clone();
                let center2 = &self.center * two;
                for v in chain.iter().skip(1).take(gens.len().saturating_sub(1)) {
                    vertices.push(&center2 - v);
                }
                // parallel generators produce coincident corners
                let mut pruned: Vec<DVector<N>> = Vec::with_capacity(vertices.len());
                for v in vertices {
                    if !pruned.iter().any(|w| vector_approx_eq(w, &v)) {
                        pruned.push(v);
                    }
                }
                Ok(pruned)
            }
            _ => Err(SetError::unsupported(
                "vertices_list",
                "Zonotope",
                "closed-form enumeration is limited to one and two dimensions",
            )),
        }
    }

    /// Constraint enumeration, closed-form in one and two dimensions.
    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        match self.dim() {
            1 => {
                let hi = self.support_function(&dvector![N::one()])?;
                let low = -self.support_function(&dvector![-N::one()])?;
                Ok(vec![
                    HalfSpace::new(dvector![N::one()], hi)?,
                    HalfSpace::new(dvector![-N::one()], -low)?,
                ])
            }
            2 => {
                let vertices = self.vertices_list()?;
                if vertices.len() < 3 {
                    return Err(SetError::unsupported(
                        "constraints_list",
                        "Zonotope",
                        "degenerate zonotope has no full-dimensional facets",
                    ));
                }
                let k = vertices.len();
                let mut constraints = Vec::with_capacity(k);
                for i in 0..k {
                    let a = &vertices[i];
                    let b = &vertices[(i + 1) % k];
                    // outward normal of a counterclockwise edge
                    let normal = dvector![b[1] - a[1], a[0] - b[0]];
                    let offset = normal.dot(a);
                    constraints.push(HalfSpace::new(normal, offset)?);
                }
                Ok(constraints)
            }
            _ => Err(SetError::unsupported(
                "constraints_list",
                "Zonotope",
                "closed-form enumeration is limited to one and two dimensions",
            )),
        }
    }
}
