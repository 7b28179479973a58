//! Lazy Cartesian products, binary and n-ary.
//!
//! Product sets decompose additively in the support function under
//! block-separable directions; this is the shortcut that answers exact
//! queries on a product without materializing it. Materialization routines
//! (`constraints_list`, `vertices_list`) realize an explicit representation
//! on demand by lifting each child's local description into the global
//! ambient space.

use crate::comparison::{neg_infinity, vector_approx_eq};
use crate::errors::{check_dim, SetError, SetResult};
use crate::ops::blocks::BlockStructure;
use crate::set::{selection_project, LazySet, Numeric};
use crate::sets::HalfSpace;
use log::debug;
use nalgebra::DVector;

/// Options for vertex materialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticesConfig {
    /// Filter duplicate corners and, in two dimensions, non-extreme points
    /// through a convex-hull pass. Defaults to `false`.
    pub prune: bool,
}

/// The binary Cartesian product `X1 × X2`.
#[derive(Debug, Clone)]
pub struct CartesianProduct<N: Numeric> {
    x1: Box<dyn LazySet<N>>,
    x2: Box<dyn LazySet<N>>,
}

impl<N: Numeric> CartesianProduct<N> {
    /// Create the product of two sets.
    pub fn new(x1: impl LazySet<N> + 'static, x2: impl LazySet<N> + 'static) -> Self {
        Self {
            x1: Box::new(x1),
            x2: Box::new(x2),
        }
    }

    /// Create the product from already-boxed children.
    pub fn from_boxes(x1: Box<dyn LazySet<N>>, x2: Box<dyn LazySet<N>>) -> Self {
        Self { x1, x2 }
    }

    /// The first factor.
    pub fn first(&self) -> &dyn LazySet<N> {
        self.x1.as_ref()
    }

    /// The second factor.
    pub fn second(&self) -> &dyn LazySet<N> {
        self.x2.as_ref()
    }

    /// The product with the factor order swapped.
    pub fn swap(&self) -> Self {
        Self {
            x1: self.x2.clone(),
            x2: self.x1.clone(),
        }
    }

    fn blocks(&self) -> BlockStructure {
        BlockStructure::from_dims(&[self.x1.dim(), self.x2.dim()])
    }

    /// Vertex materialization with explicit options.
    pub fn vertices_list_with(&self, config: &VerticesConfig) -> SetResult<Vec<DVector<N>>> {
        let children: [&dyn LazySet<N>; 2] = [self.x1.as_ref(), self.x2.as_ref()];
        cross_vertices(&children, &self.blocks(), config)
    }
}

impl<N: Numeric> LazySet<N> for CartesianProduct<N> {
    fn dim(&self) -> usize {
        self.x1.dim() + self.x2.dim()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        if self.is_empty() {
            return Ok(neg_infinity());
        }
        let n1 = self.x1.dim();
        let d1 = direction.rows(0, n1).into_owned();
        let d2 = direction.rows(n1, self.x2.dim()).into_owned();
        Ok(self.x1.support_function(&d1)? + self.x2.support_function(&d2)?)
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        let n1 = self.x1.dim();
        let d1 = direction.rows(0, n1).into_owned();
        let d2 = direction.rows(n1, self.x2.dim()).into_owned();
        let s1 = self.x1.support_vector(&d1)?;
        let s2 = self.x2.support_vector(&d2)?;
        self.blocks().assemble(&[s1, s2])
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        let n1 = self.x1.dim();
        let p1 = point.rows(0, n1).into_owned();
        if !self.x1.contains(&p1)? {
            return Ok(false);
        }
        let p2 = point.rows(n1, self.x2.dim()).into_owned();
        self.x2.contains(&p2)
    }

    fn is_bounded(&self) -> bool {
        self.x1.is_bounded() && self.x2.is_bounded()
    }

    fn is_empty(&self) -> bool {
        self.x1.is_empty() || self.x2.is_empty()
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        Box::new(self.clone())
    }

    fn set_name(&self) -> &'static str {
        "CartesianProduct"
    }

    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        let children: [&dyn LazySet<N>; 2] = [self.x1.as_ref(), self.x2.as_ref()];
        lift_constraints(&children, &self.blocks())
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        self.vertices_list_with(&VerticesConfig::default())
    }

    fn center(&self) -> SetResult<DVector<N>> {
        self.blocks()
            .assemble(&[self.x1.center()?, self.x2.center()?])
    }
}

/// The n-ary Cartesian product of an ordered sequence of sets.
///
/// The block structure is a pure function of the immutable child sequence,
/// computed once at construction.
#[derive(Debug, Clone)]
pub struct CartesianProductArray<N: Numeric> {
    children: Vec<Box<dyn LazySet<N>>>,
    blocks: BlockStructure,
}

impl<N: Numeric> CartesianProductArray<N> {
    /// Create the product of an ordered sequence of sets.
    pub fn new(children: Vec<Box<dyn LazySet<N>>>) -> Self {
        let dims: Vec<usize> = children.iter().map(|c| c.dim()).collect();
        Self {
            children,
            blocks: BlockStructure::from_dims(&dims),
        }
    }

    /// The child sequence.
    pub fn children(&self) -> &[Box<dyn LazySet<N>>] {
        &self.children
    }

    /// The cached block structure.
    pub fn block_structure(&self) -> &BlockStructure {
        &self.blocks
    }

    /// Splice two product arrays into one flat array.
    pub fn concatenate(&self, other: &Self) -> Self {
        let mut children = self.children.clone();
        children.extend(other.children.iter().cloned());
        Self::new(children)
    }

    /// Replace target blocks by source blocks.
    ///
    /// Each `(target, source)` pair replaces `self`'s block `target` with
    /// `source_array`'s block `source`; the dimensions must match per pair,
    /// otherwise the substitution fails with [`SetError::DimensionMismatch`].
    pub fn substitute_blocks(
        &self,
        source_array: &Self,
        pairs: &[(usize, usize)],
    ) -> SetResult<Self> {
        let mut children = self.children.clone();
        for &(target, source) in pairs {
            if target >= self.children.len() {
                return Err(SetError::dim_mismatch(
                    "substitute_blocks: target block index",
                    self.children.len(),
                    target + 1,
                ));
            }
            if source >= source_array.children.len() {
                return Err(SetError::dim_mismatch(
                    "substitute_blocks: source block index",
                    source_array.children.len(),
                    source + 1,
                ));
            }
            let expected = self.children[target].dim();
            let found = source_array.children[source].dim();
            check_dim("substitute_blocks", expected, found)?;
            children[target] = source_array.children[source].clone();
        }
        // per-pair dimension equality keeps the partition unchanged
        Ok(Self {
            children,
            blocks: self.blocks.clone(),
        })
    }

    /// Vertex materialization with explicit options.
    pub fn vertices_list_with(&self, config: &VerticesConfig) -> SetResult<Vec<DVector<N>>> {
        let children: Vec<&dyn LazySet<N>> = self.children.iter().map(|c| c.as_ref()).collect();
        cross_vertices(&children, &self.blocks, config)
    }
}

impl<N: Numeric> LazySet<N> for CartesianProductArray<N> {
    fn dim(&self) -> usize {
        self.blocks.total_dim()
    }

    fn support_function(&self, direction: &DVector<N>) -> SetResult<N> {
        check_dim("support_function", self.dim(), direction.len())?;
        if self.is_empty() {
            return Ok(neg_infinity());
        }
        let mut acc = N::zero();
        for (child, d) in self.children.iter().zip(self.blocks.split(direction)) {
            acc += child.support_function(&d)?;
        }
        Ok(acc)
    }

    fn support_vector(&self, direction: &DVector<N>) -> SetResult<DVector<N>> {
        check_dim("support_vector", self.dim(), direction.len())?;
        let mut parts = Vec::with_capacity(self.children.len());
        for (child, d) in self.children.iter().zip(self.blocks.split(direction)) {
            parts.push(child.support_vector(&d)?);
        }
        self.blocks.assemble(&parts)
    }

    fn contains(&self, point: &DVector<N>) -> SetResult<bool> {
        check_dim("contains", self.dim(), point.len())?;
        for (child, p) in self.children.iter().zip(self.blocks.split(point)) {
            if !child.contains(&p)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn is_bounded(&self) -> bool {
        self.children.iter().all(|c| c.is_bounded())
    }

    fn is_empty(&self) -> bool {
        self.children.iter().any(|c| c.is_empty())
    }

    fn clone_box(&self) -> Box<dyn LazySet<N>> {
        Box::new(self.clone())
    }

    fn set_name(&self) -> &'static str {
        "CartesianProductArray"
    }

    fn constraints_list(&self) -> SetResult<Vec<HalfSpace<N>>> {
        let children: Vec<&dyn LazySet<N>> = self.children.iter().map(|c| c.as_ref()).collect();
        lift_constraints(&children, &self.blocks)
    }

    fn vertices_list(&self) -> SetResult<Vec<DVector<N>>> {
        self.vertices_list_with(&VerticesConfig::default())
    }

    fn center(&self) -> SetResult<DVector<N>> {
        let mut parts = Vec::with_capacity(self.children.len());
        for child in &self.children {
            parts.push(child.center()?);
        }
        self.blocks.assemble(&parts)
    }

    /// Block-wise projection: requested dimensions are grouped by owning
    /// block and each group is delegated to its child (fully covered blocks
    /// pass through unchanged). Unsorted requests fall back to the lazy
    /// selection map.
    fn project(&self, dims: &[usize]) -> SetResult<Box<dyn LazySet<N>>> {
        let ascending = dims.windows(2).all(|w| w[0] < w[1]);
        if !ascending {
            return selection_project(self.clone_box(), self.dim(), dims);
        }
        let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
        for &d in dims {
            let b = self
                .blocks
                .block_of_dim(d)
                .ok_or_else(|| SetError::dim_mismatch("project", self.dim(), d + 1))?;
            let local = d - self.blocks.block(b).start;
            match groups.last_mut() {
                Some((owner, locals)) if *owner == b => locals.push(local),
                _ => groups.push((b, vec![local])),
            }
        }
        let mut parts: Vec<Box<dyn LazySet<N>>> = Vec::with_capacity(groups.len());
        for (b, locals) in groups {
            if locals.len() == self.blocks.block(b).len() {
                parts.push(self.children[b].clone());
            } else {
                parts.push(self.children[b].project(&locals)?);
            }
        }
        if parts.len() == 1 {
            return Ok(parts.remove(0));
        }
        Ok(Box::new(Self::new(parts)))
    }
}

/// Lift each child's local constraints into the global ambient space by
/// zero-padding the normals outside the child's block, and concatenate.
fn lift_constraints<N: Numeric>(
    children: &[&dyn LazySet<N>],
    blocks: &BlockStructure,
) -> SetResult<Vec<HalfSpace<N>>> {
    let total = blocks.total_dim();
    debug!(
        "materializing constraints of a {}-block product in dimension {}",
        children.len(),
        total
    );
    let mut constraints = Vec::new();
    for (child, block) in children.iter().zip(blocks.iter()) {
        for local in child.constraints_list()? {
            let mut normal = DVector::zeros(total);
            normal
                .rows_mut(block.start, block.len())
                .copy_from(local.normal());
            constraints.push(HalfSpace::new(normal, local.offset())?);
        }
    }
    Ok(constraints)
}

/// Cartesian-combine the children's vertex lists into global vertices.
fn cross_vertices<N: Numeric>(
    children: &[&dyn LazySet<N>],
    blocks: &BlockStructure,
    config: &VerticesConfig,
) -> SetResult<Vec<DVector<N>>> {
    let mut lists = Vec::with_capacity(children.len());
    for child in children {
        let vs = child.vertices_list()?;
        if vs.is_empty() {
            return Ok(Vec::new());
        }
        lists.push(vs);
    }
    debug!(
        "materializing vertices of a {}-block product ({} combinations)",
        children.len(),
        lists.iter().map(|l| l.len()).product::<usize>()
    );
    let mut vertices = Vec::new();
    let mut odometer = vec![0usize; lists.len()];
    loop {
        let parts: Vec<DVector<N>> = odometer
            .iter()
            .zip(lists.iter())
            .map(|(&i, l)| l[i].clone())
            .collect();
        vertices.push(blocks.assemble(&parts)?);
        // advance the mixed-radix counter
        let mut k = lists.len();
        loop {
            if k == 0 {
                return Ok(if config.prune {
                    prune_vertices(vertices)
                } else {
                    vertices
                });
            }
            k -= 1;
            odometer[k] += 1;
            if odometer[k] < lists[k].len() {
                break;
            }
            odometer[k] = 0;
        }
    }
}

/// Drop duplicate points and, in two dimensions, points that are not extreme
/// (monotone-chain convex hull).
fn prune_vertices<N: Numeric>(vertices: Vec<DVector<N>>) -> Vec<DVector<N>> {
    let mut unique: Vec<DVector<N>> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !unique.iter().any(|w| vector_approx_eq(w, &v)) {
            unique.push(v);
        }
    }
    if unique.first().map(|v| v.len()) == Some(2) && unique.len() > 2 {
        convex_hull_2d(unique)
    } else {
        unique
    }
}

/// Andrew's monotone chain, counterclockwise output.
fn convex_hull_2d<N: Numeric>(mut points: Vec<DVector<N>>) -> Vec<DVector<N>> {
    points.sort_by(|a, b| {
        (a[0], a[1])
            .partial_cmp(&(b[0], b[1]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let cross = |o: &DVector<N>, a: &DVector<N>, b: &DVector<N>| {
        (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
    };
    let mut lower: Vec<DVector<N>> = Vec::with_capacity(points.len());
    for p in points.iter() {
        while lower.len() >= 2
            && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= N::zero()
        {
            lower.pop();
        }
        lower.push(p.clone());
    }
    let mut upper: Vec<DVector<N>> = Vec::with_capacity(points.len());
    for p in points.iter().rev() {
        while upper.len() >= 2
            && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= N::zero()
        {
            upper.pop();
        }
        upper.push(p.clone());
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::{EmptySet, Hyperrectangle, Interval, Line, Singleton};
    use nalgebra::dvector;

    fn unit_interval() -> Interval<f64> {
        Interval::new(0.0, 1.0).unwrap()
    }

    #[test]
    fn test_binary_dim_and_support() {
        let p = CartesianProduct::new(unit_interval(), Interval::new(-2.0, 2.0).unwrap());
        assert_eq!(p.dim(), 2);
        // additivity across the blocks
        assert_eq!(p.support_function(&dvector![1.0, 1.0]).unwrap(), 3.0);
        assert_eq!(
            p.support_vector(&dvector![1.0, -1.0]).unwrap(),
            dvector![1.0, -2.0]
        );
    }

    #[test]
    fn test_binary_membership_short_circuit() {
        let p = CartesianProduct::new(unit_interval(), unit_interval());
        assert!(p.contains(&dvector![0.5, 0.5]).unwrap());
        assert!(!p.contains(&dvector![2.0, 0.5]).unwrap());
        assert!(!p.contains(&dvector![0.5, -1.0]).unwrap());
    }

    #[test]
    fn test_array_block_structure() {
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(unit_interval()),
            Box::new(Hyperrectangle::new(dvector![0.0, 0.0], dvector![1.0, 1.0]).unwrap()),
            Box::new(unit_interval()),
        ]);
        assert_eq!(cpa.dim(), 4);
        let bs = cpa.block_structure();
        assert_eq!(bs.num_blocks(), 3);
        assert_eq!(bs.block(1).range(), 1..3);
    }

    #[test]
    fn test_array_support_additivity() {
        let x1 = Interval::new(-1.0, 1.0).unwrap();
        let x2 = Hyperrectangle::new(dvector![1.0, 2.0], dvector![0.5, 0.5]).unwrap();
        let cpa =
            CartesianProductArray::<f64>::new(vec![Box::new(x1.clone()), Box::new(x2.clone())]);
        let d = dvector![2.0, -1.0, 3.0];
        let d1 = dvector![2.0];
        let d2 = dvector![-1.0, 3.0];
        let expected =
            x1.support_function(&d1).unwrap() + x2.support_function(&d2).unwrap();
        assert_eq!(cpa.support_function(&d).unwrap(), expected);

        let sv = cpa.support_vector(&d).unwrap();
        assert_eq!(sv.rows(0, 1).into_owned(), x1.support_vector(&d1).unwrap());
        assert_eq!(sv.rows(1, 2).into_owned(), x2.support_vector(&d2).unwrap());
    }

    #[test]
    fn test_emptiness_short_circuit() {
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(unit_interval()),
            Box::new(EmptySet::new(3)),
        ]);
        assert!(cpa.is_empty());
        assert_eq!(
            cpa.support_function(&dvector![1.0, 0.0, 0.0, 0.0]).unwrap(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_lifted_constraints() {
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(Interval::new(-1.0, 2.0).unwrap()),
            Box::new(Hyperrectangle::new(dvector![0.0], dvector![3.0]).unwrap()),
        ]);
        let cs = cpa.constraints_list().unwrap();
        assert_eq!(cs.len(), 4);
        for c in &cs {
            assert_eq!(c.normal().len(), 2);
        }
        assert!(cs.iter().all(|c| c.contains(&dvector![0.0, 0.0]).unwrap()));
        assert!(cs.iter().any(|c| !c.contains(&dvector![3.0, 0.0]).unwrap()));
        assert!(cs.iter().any(|c| !c.contains(&dvector![0.0, 4.0]).unwrap()));
    }

    #[test]
    fn test_constraints_from_universe_child() {
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(unit_interval()),
            Box::new(crate::sets::Universe::new(3)),
        ]);
        // the universe contributes no constraints, so only the interval's
        // two survive
        assert_eq!(cpa.constraints_list().unwrap().len(), 2);
    }

    #[test]
    fn test_constraints_unsupported_child() {
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(unit_interval()),
            Box::new(Line::new(dvector![0.0, 0.0], dvector![1.0, 0.0]).unwrap()),
            Box::new(crate::sets::Zonotope::new(
                nalgebra::DVector::zeros(3),
                nalgebra::DMatrix::identity(3, 3),
            )
            .unwrap()),
        ]);
        // the 3-D zonotope has no closed-form constraint list
        assert!(matches!(
            cpa.constraints_list().unwrap_err(),
            SetError::UnsupportedOperation { .. }
        ));
    }

    #[test]
    fn test_cross_vertices() {
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(unit_interval()),
            Box::new(Interval::new(2.0, 3.0).unwrap()),
        ]);
        let vs = cpa.vertices_list().unwrap();
        assert_eq!(vs.len(), 4);
        assert!(vs.contains(&dvector![0.0, 2.0]));
        assert!(vs.contains(&dvector![1.0, 3.0]));
    }

    #[test]
    fn test_vertices_prune() {
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(Interval::new(0.0, 0.0).unwrap()),
            Box::new(unit_interval()),
        ]);
        let pruned = cpa
            .vertices_list_with(&VerticesConfig { prune: true })
            .unwrap();
        assert_eq!(pruned.len(), 2);
    }

    #[test]
    fn test_substitute_blocks() {
        let target = CartesianProductArray::<f64>::new(vec![
            Box::new(unit_interval()),
            Box::new(Interval::new(5.0, 6.0).unwrap()),
        ]);
        let source = CartesianProductArray::<f64>::new(vec![
            Box::new(Interval::new(-9.0, 9.0).unwrap()),
        ]);
        let out = target.substitute_blocks(&source, &[(1, 0)]).unwrap();
        assert_eq!(out.support_function(&dvector![0.0, 1.0]).unwrap(), 9.0);
        // mismatched dimensions are rejected
        let source2 = CartesianProductArray::<f64>::new(vec![Box::new(
            Hyperrectangle::new(dvector![0.0, 0.0], dvector![1.0, 1.0]).unwrap(),
        )]);
        assert!(target.substitute_blocks(&source2, &[(1, 0)]).is_err());
    }

    #[test]
    fn test_concatenate() {
        let a = CartesianProductArray::<f64>::new(vec![Box::new(unit_interval())]);
        let b = CartesianProductArray::<f64>::new(vec![
            Box::new(unit_interval()),
            Box::new(unit_interval()),
        ]);
        let c = a.concatenate(&b);
        assert_eq!(c.dim(), 3);
        assert_eq!(c.block_structure().num_blocks(), 3);
    }

    #[test]
    fn test_blockwise_project() {
        let line = Line::new(dvector![0.0, 0.0], dvector![1.0, 1.0]).unwrap();
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(unit_interval()),
            Box::new(line),
        ]);
        // the whole first block passes through unchanged
        let p = cpa.project(&[0]).unwrap();
        assert_eq!(p.set_name(), "Interval");
        // one coordinate of the line block: the documented universe shadow
        let p = cpa.project(&[1]).unwrap();
        assert_eq!(p.set_name(), "Universe");
        // a mix keeps the product shape
        let p = cpa.project(&[0, 2]).unwrap();
        assert_eq!(p.dim(), 2);
        assert_eq!(p.set_name(), "CartesianProductArray");
    }

    #[test]
    fn test_singleton_product_center() {
        let cpa = CartesianProductArray::<f64>::new(vec![
            Box::new(Singleton::new(dvector![1.0])),
            Box::new(Singleton::new(dvector![2.0, 3.0])),
        ]);
        assert_eq!(cpa.center().unwrap(), dvector![1.0, 2.0, 3.0]);
    }
}
