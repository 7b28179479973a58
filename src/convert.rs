//! Eager conversions and concrete operations between leaf representations.
//!
//! The lazy operators in [`crate::ops`] are the general mechanism; the
//! closed forms here exist for the few pairings where an explicit result is
//! as cheap as the lazy wrapper.

use crate::errors::{check_dim, SetResult};
use crate::set::{LazySet, Numeric};
use crate::sets::{Hyperrectangle, Interval, Zonotope};
use nalgebra::{dvector, DMatrix};

/// View a one-dimensional interval as a hyperrectangle.
pub fn interval_to_hyperrectangle<N: Numeric>(x: &Interval<N>) -> SetResult<Hyperrectangle<N>> {
    // a near-flat interval may carry a radius that is negative within
    // tolerance; clamp it rather than reject
    Hyperrectangle::new(
        dvector![(x.lo() + x.hi()) / (N::one() + N::one())],
        dvector![x.radius().max(N::zero())],
    )
}

/// View a hyperrectangle as a zonotope with one axis-aligned generator per
/// non-flat dimension.
pub fn hyperrectangle_to_zonotope<N: Numeric>(x: &Hyperrectangle<N>) -> SetResult<Zonotope<N>> {
    let n = x.dim();
    let generators = DMatrix::from_fn(n, n, |i, j| if i == j { x.radius()[i] } else { N::zero() });
    let center = x.center()?;
    Zonotope::new(center, generators)
}

/// Concrete Minkowski sum of two zonotopes: centers add, generators
/// concatenate.
pub fn zonotope_minkowski_sum<N: Numeric>(
    a: &Zonotope<N>,
    b: &Zonotope<N>,
) -> SetResult<Zonotope<N>> {
    check_dim("zonotope_minkowski_sum", a.dim(), b.dim())?;
    let center = a.center()? + b.center()?;
    let mut generators = DMatrix::zeros(a.dim(), a.ngens() + b.ngens());
    generators
        .columns_mut(0, a.ngens())
        .copy_from(a.generators());
    generators
        .columns_mut(a.ngens(), b.ngens())
        .copy_from(b.generators());
    Zonotope::new(center, generators)
}

/// Concrete Minkowski sum of two hyperrectangles: centers and radii add.
pub fn hyperrectangle_minkowski_sum<N: Numeric>(
    a: &Hyperrectangle<N>,
    b: &Hyperrectangle<N>,
) -> SetResult<Hyperrectangle<N>> {
    check_dim("hyperrectangle_minkowski_sum", a.dim(), b.dim())?;
    Hyperrectangle::new(a.center()? + b.center()?, a.radius() + b.radius())
}

/// Concrete intersection of two intervals; `None` when they are disjoint.
pub fn interval_intersection<N: Numeric>(
    a: &Interval<N>,
    b: &Interval<N>,
) -> Option<Interval<N>> {
    let lo = a.lo().max(b.lo());
    let hi = a.hi().min(b.hi());
    Interval::new(lo, hi).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_interval_to_hyperrectangle() {
        let x = Interval::new(-1.0, 3.0).unwrap();
        let h = interval_to_hyperrectangle(&x).unwrap();
        assert_eq!(h.center().unwrap(), dvector![1.0]);
        assert_eq!(*h.radius(), dvector![2.0]);
    }

    #[test]
    fn test_box_to_zonotope_same_support() {
        let h = Hyperrectangle::new(dvector![1.0, -2.0], dvector![0.5, 3.0]).unwrap();
        let z = hyperrectangle_to_zonotope(&h).unwrap();
        for d in [dvector![1.0, 1.0], dvector![-2.0, 0.5], dvector![0.0, -1.0]] {
            assert_eq!(
                h.support_function(&d).unwrap(),
                z.support_function(&d).unwrap()
            );
        }
    }

    #[test]
    fn test_zonotope_minkowski_sum() {
        let a = Zonotope::new(dvector![1.0], DMatrix::from_row_slice(1, 1, &[1.0])).unwrap();
        let b = Zonotope::new(dvector![2.0], DMatrix::from_row_slice(1, 2, &[0.5, 0.25])).unwrap();
        let s = zonotope_minkowski_sum(&a, &b).unwrap();
        assert_eq!(s.ngens(), 3);
        // rho of the sum is the sum of the rhos
        assert_eq!(
            s.support_function(&dvector![1.0]).unwrap(),
            a.support_function(&dvector![1.0]).unwrap()
                + b.support_function(&dvector![1.0]).unwrap()
        );
    }

    #[test]
    fn test_interval_intersection() {
        let a = Interval::new(0.0, 2.0).unwrap();
        let b = Interval::new(1.0, 5.0).unwrap();
        let c = interval_intersection(&a, &b).unwrap();
        assert_eq!(c.lo(), 1.0);
        assert_eq!(c.hi(), 2.0);
        let d = Interval::new(3.0, 4.0).unwrap();
        assert!(interval_intersection(&a, &d).is_none());
    }
}
