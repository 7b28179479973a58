//! Integration tests for the lazy set-operation pipeline.

use approx::assert_relative_eq;
use nalgebra::{dmatrix, dvector, DMatrix, DVector};
use reachset::prelude::*;

fn boxed<N: Numeric>(set: impl LazySet<N> + 'static) -> Box<dyn LazySet<N>> {
    Box::new(set)
}

#[test]
fn test_block_partition_covers_ambient_space() {
    let array: CartesianProductArray<f64> = CartesianProductArray::new(vec![
        boxed(Interval::new(-1.0, 1.0).unwrap()),
        boxed(Hyperrectangle::new(dvector![0.0, 0.0], dvector![1.0, 2.0]).unwrap()),
        boxed(Singleton::new(dvector![5.0, 6.0, 7.0])),
    ]);

    let blocks = array.block_structure();
    assert_eq!(blocks.num_blocks(), 3);
    assert_eq!(blocks.total_dim(), 6);
    assert_eq!(array.dim(), 6);

    // consecutive, disjoint, exhaustive
    let mut next = 0;
    for (i, block) in blocks.iter().enumerate() {
        assert_eq!(block.child, i);
        assert_eq!(block.start, next);
        next = block.end;
    }
    assert_eq!(next, 6);

    // every ambient dimension maps back to its owning block
    assert_eq!(blocks.block_of_dim(0), Some(0));
    assert_eq!(blocks.block_of_dim(1), Some(1));
    assert_eq!(blocks.block_of_dim(2), Some(1));
    assert_eq!(blocks.block_of_dim(5), Some(2));
    assert_eq!(blocks.block_of_dim(6), None);
}

#[test]
fn test_product_support_is_blockwise() {
    let x1 = Hyperrectangle::new(dvector![1.0, -1.0], dvector![0.5, 2.0]).unwrap();
    let x2 = Interval::new(-3.0, 4.0).unwrap();
    let product = CartesianProduct::new(x1.clone(), x2.clone());

    let d = dvector![1.0, -2.0, 0.5];
    let d1 = dvector![1.0, -2.0];
    let d2 = dvector![0.5];

    // the support function decomposes over the factors
    let rho = product.support_function(&d).unwrap();
    assert_relative_eq!(
        rho,
        x1.support_function(&d1).unwrap() + x2.support_function(&d2).unwrap()
    );

    // and the support vector is the concatenation of the factor optima
    let sigma = product.support_vector(&d).unwrap();
    let expected = DVector::from_iterator(
        3,
        x1.support_vector(&d1)
            .unwrap()
            .iter()
            .chain(x2.support_vector(&d2).unwrap().iter())
            .copied(),
    );
    assert_relative_eq!(sigma, expected);
    assert_relative_eq!(sigma.dot(&d), rho);
}

#[test]
fn test_linear_map_pullback() {
    let z = Zonotope::new(dvector![1.0, 0.0], dmatrix![1.0, 0.5; 0.0, 1.0]).unwrap();
    let m = dmatrix![2.0, -1.0; 1.0, 3.0];
    let image = LinearMap::of(m.clone(), z.clone()).unwrap();

    for d in [
        dvector![1.0, 0.0],
        dvector![0.0, -1.0],
        dvector![1.0, 1.0],
        dvector![-2.0, 0.5],
    ] {
        // rho(d, M X) = rho(M^T d, X)
        let pulled = m.tr_mul(&d);
        assert_relative_eq!(
            image.support_function(&d).unwrap(),
            z.support_function(&pulled).unwrap()
        );
        // sigma(d, M X) = M sigma(M^T d, X)
        assert_relative_eq!(
            image.support_vector(&d).unwrap(),
            &m * z.support_vector(&pulled).unwrap()
        );
    }
}

#[test]
fn test_membership_through_nested_composites() {
    let x = Hyperrectangle::new(dvector![0.0, 0.0], dvector![1.0, 1.0]).unwrap();
    let rotated = LinearMap::of(dmatrix![0.0, -1.0; 1.0, 0.0], x).unwrap();
    let shifted = AffineMap::new(
        DMatrix::identity(2, 2),
        Box::new(rotated),
        dvector![10.0, 0.0],
    )
    .unwrap();

    assert!(shifted.contains(&dvector![10.0, 0.0]).unwrap());
    assert!(shifted.contains(&dvector![11.0, 1.0]).unwrap());
    assert!(!shifted.contains(&dvector![11.5, 0.0]).unwrap());
}

#[test]
fn test_constraint_materialization_roundtrip() {
    let h = Hyperrectangle::new(dvector![1.0, 2.0], dvector![0.5, 1.5]).unwrap();
    let constraints = h.constraints_list().unwrap();
    let vertices = h.vertices_list().unwrap();
    assert_eq!(constraints.len(), 4);
    assert_eq!(vertices.len(), 4);

    // every vertex satisfies every constraint, tightly on its two facets
    for v in &vertices {
        let mut tight = 0;
        for c in &constraints {
            assert!(c.contains(v).unwrap());
            if c.is_tight(v).unwrap() {
                tight += 1;
            }
        }
        assert_eq!(tight, 2);
    }
}

#[test]
fn test_line_constraints_in_three_dimensions() {
    let line = Line::new(dvector![-1.0, 2.0, 3.0], dvector![3.0, 0.0, -1.0]).unwrap();
    let constraints = line.constraints_list().unwrap();
    // a line in R^3 is cut out by 2 * (3 - 1) opposing half-spaces
    assert_eq!(constraints.len(), 4);

    for t in [-2.0, 0.0, 1.5] {
        let on_line = line.point() + line.direction() * t;
        for c in &constraints {
            assert!(c.contains(&on_line).unwrap());
            assert!(c.is_tight(&on_line).unwrap());
        }
    }

    // a point off the line violates at least one constraint
    let off_line = dvector![0.0, 0.0, 0.0];
    assert!(constraints.iter().any(|c| !c.contains(&off_line).unwrap()));
}

#[test]
fn test_degenerate_line_image_is_a_point() {
    // the map kills the line's direction, so the image collapses
    let line = Line::new(dvector![0.0, 1.0], dvector![1.0, 0.0]).unwrap();
    let image = line.linear_map(&dmatrix![0.0, 0.0; 0.0, 1.0]).unwrap();

    assert_eq!(image.set_name(), "Singleton");
    assert!(image.is_bounded());
    assert!(image.contains(&dvector![0.0, 1.0]).unwrap());
    assert_relative_eq!(
        image.support_vector(&dvector![1.0, 1.0]).unwrap(),
        dvector![0.0, 1.0]
    );
}

#[test]
fn test_translate_then_inverse_translate() {
    let z = Zonotope::new(dvector![1.0, -1.0], dmatrix![1.0, 0.0; 0.5, 2.0]).unwrap();
    let v = dvector![3.0, -7.0];
    let back = z.translate(&v).unwrap().translate(&(-&v)).unwrap();

    for d in [dvector![1.0, 0.0], dvector![-1.0, 2.0]] {
        assert_relative_eq!(
            back.support_function(&d).unwrap(),
            z.support_function(&d).unwrap(),
            epsilon = ABSZTOL
        );
    }
}

#[test]
fn test_empty_factor_empties_the_product() {
    let array: CartesianProductArray<f64> = CartesianProductArray::new(vec![
        boxed(Hyperrectangle::new(dvector![0.0], dvector![1.0]).unwrap()),
        boxed(EmptySet::new(2)),
    ]);

    assert!(array.is_empty());
    assert!(!array.contains(&dvector![0.0, 0.0, 0.0]).unwrap());
    // the support function of an empty set is -inf in every direction
    assert_eq!(
        array.support_function(&dvector![1.0, 1.0, 1.0]).unwrap(),
        f64::NEG_INFINITY
    );
    // and a support-vector query reports the one maximizer-free error kind
    assert!(matches!(
        array.support_vector(&dvector![1.0, 1.0, 1.0]),
        Err(SetError::UnboundedDirection { .. })
    ));
}

#[test]
fn test_blockwise_projection() {
    let array: CartesianProductArray<f64> = CartesianProductArray::new(vec![
        boxed(Interval::new(-1.0, 2.0).unwrap()),
        boxed(Hyperrectangle::new(dvector![0.0, 5.0], dvector![1.0, 1.0]).unwrap()),
    ]);

    // dims {1, 2} select the hyperrectangle block exactly
    let projected = array.project(&[1, 2]).unwrap();
    assert_eq!(projected.dim(), 2);
    assert_eq!(projected.set_name(), "Hyperrectangle");
    assert_relative_eq!(projected.center().unwrap(), dvector![0.0, 5.0]);

    // dims {0, 2} cross block boundaries and mix both children
    let mixed = array.project(&[0, 2]).unwrap();
    assert_eq!(mixed.dim(), 2);
    assert_relative_eq!(mixed.support_function(&dvector![1.0, 0.0]).unwrap(), 2.0);
    assert_relative_eq!(mixed.support_function(&dvector![0.0, 1.0]).unwrap(), 6.0);
}

#[test]
fn test_product_vertex_enumeration_with_pruning() {
    let product = CartesianProduct::new(
        Interval::new(0.0, 1.0).unwrap(),
        Interval::new(2.0, 3.0).unwrap(),
    );

    let raw = product.vertices_list().unwrap();
    assert_eq!(raw.len(), 4);

    let pruned = product
        .vertices_list_with(&VerticesConfig { prune: true })
        .unwrap();
    assert_eq!(pruned.len(), 4);
    for v in [
        dvector![0.0, 2.0],
        dvector![1.0, 2.0],
        dvector![0.0, 3.0],
        dvector![1.0, 3.0],
    ] {
        assert!(pruned.iter().any(|p| vector_approx_eq(p, &v)));
    }
}

#[test]
fn test_array_concatenate_and_substitute() {
    let a: CartesianProductArray<f64> = CartesianProductArray::new(vec![
        boxed(Interval::new(0.0, 1.0).unwrap()),
        boxed(Interval::new(2.0, 3.0).unwrap()),
    ]);
    let b: CartesianProductArray<f64> =
        CartesianProductArray::new(vec![boxed(Interval::new(10.0, 11.0).unwrap())]);

    let joined = a.concatenate(&b);
    assert_eq!(joined.dim(), 3);
    assert_eq!(joined.block_structure().num_blocks(), 3);
    assert_relative_eq!(
        joined.support_function(&dvector![0.0, 0.0, 1.0]).unwrap(),
        11.0
    );

    // overwrite the second block of `a` with the block from `b`
    let patched = a.substitute_blocks(&b, &[(1, 0)]).unwrap();
    assert_relative_eq!(patched.center().unwrap(), dvector![0.5, 10.5]);
}

#[test]
fn test_random_sets_respect_support_duality() {
    let mut rng = seeded_rng(2024);
    for _ in 0..20 {
        let z: Zonotope<f64> = Zonotope::rand(3, &mut rng).unwrap();
        let d = dvector![1.0, -1.0, 0.5];
        let rho = z.support_function(&d).unwrap();
        let sigma = z.support_vector(&d).unwrap();
        // the support vector attains the support function value
        assert_relative_eq!(sigma.dot(&d), rho, epsilon = 1e-9);
    }
}

#[test]
fn test_unbounded_queries_fail_cleanly() {
    let h = HalfSpace::new(dvector![1.0, 0.0], 5.0).unwrap();

    // along the normal the half-space is bounded
    assert_relative_eq!(h.support_function(&dvector![2.0, 0.0]).unwrap(), 10.0);

    // any other direction is unbounded and support vectors do not exist
    assert_eq!(
        h.support_function(&dvector![0.0, 1.0]).unwrap(),
        f64::INFINITY
    );
    assert!(matches!(
        h.support_vector(&dvector![0.0, 1.0]),
        Err(SetError::UnboundedDirection { .. })
    ));
}

#[test]
fn test_dimension_mismatches_are_reported() {
    let h = Hyperrectangle::new(dvector![0.0, 0.0], dvector![1.0, 1.0]).unwrap();
    assert!(matches!(
        h.support_function(&dvector![1.0, 0.0, 0.0]),
        Err(SetError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        LinearMap::of(dmatrix![1.0, 0.0, 0.0; 0.0, 1.0, 0.0], h),
        Err(SetError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_projection_killed_line_spans_the_axis() {
    // projecting a 3-D line onto a single coordinate it spans
    let line = Line::new(dvector![0.0, 0.0, 0.0], dvector![0.0, 1.0, 0.0]).unwrap();
    let shadow = line.project(&[1]).unwrap();
    assert_eq!(shadow.set_name(), "Universe");
    assert!(!shadow.is_bounded());
    assert!(shadow.contains(&dvector![123.0]).unwrap());
}
