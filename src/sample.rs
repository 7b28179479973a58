//! Random set generation for property tests and benchmarks.
//!
//! Every generator takes an explicit random-generator handle; there is no
//! hidden global state, so repeated runs with the same seed reproduce the
//! same sets.

use crate::errors::{check_dim, SetResult};
use crate::set::Numeric;
use crate::sets::{HalfSpace, Hyperrectangle, Interval, Line, Singleton, Zonotope};
use nalgebra::{convert, DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A reproducible generator for the given seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Set types that can be drawn at random in a given dimension.
pub trait RandomSet<N: Numeric>: Sized {
    /// Draw a random instance of ambient dimension `dim`.
    fn rand<R: Rng>(dim: usize, rng: &mut R) -> SetResult<Self>;
}

fn rand_scalar<N: Numeric, R: Rng>(rng: &mut R, lo: f64, hi: f64) -> N {
    convert(rng.gen_range(lo..hi))
}

fn rand_vector<N: Numeric, R: Rng>(rng: &mut R, dim: usize, lo: f64, hi: f64) -> DVector<N> {
    DVector::from_fn(dim, |_, _| rand_scalar(rng, lo, hi))
}

impl<N: Numeric> RandomSet<N> for Interval<N> {
    fn rand<R: Rng>(dim: usize, rng: &mut R) -> SetResult<Self> {
        check_dim("Interval::rand", 1, dim)?;
        let a: N = rand_scalar(rng, -10.0, 10.0);
        let b: N = rand_scalar(rng, -10.0, 10.0);
        Interval::new(a.min(b), a.max(b))
    }
}

impl<N: Numeric> RandomSet<N> for Hyperrectangle<N> {
    fn rand<R: Rng>(dim: usize, rng: &mut R) -> SetResult<Self> {
        let center = rand_vector(rng, dim, -10.0, 10.0);
        let radius = rand_vector(rng, dim, 0.0, 5.0);
        Hyperrectangle::new(center, radius)
    }
}

impl<N: Numeric> RandomSet<N> for Zonotope<N> {
    fn rand<R: Rng>(dim: usize, rng: &mut R) -> SetResult<Self> {
        let ngens = rng.gen_range(1..=2 * dim.max(1));
        let center = rand_vector(rng, dim, -10.0, 10.0);
        let generators =
            DMatrix::from_fn(dim, ngens, |_, _| rand_scalar::<N, _>(rng, -1.0, 1.0));
        Zonotope::new(center, generators)
    }
}

impl<N: Numeric> RandomSet<N> for HalfSpace<N> {
    fn rand<R: Rng>(dim: usize, rng: &mut R) -> SetResult<Self> {
        // resample until the normal is clearly nonzero
        loop {
            let normal = rand_vector::<N, _>(rng, dim, -1.0, 1.0);
            if normal.norm() > convert(0.1) {
                return HalfSpace::new(normal, rand_scalar(rng, -10.0, 10.0));
            }
        }
    }
}

impl<N: Numeric> RandomSet<N> for Line<N> {
    fn rand<R: Rng>(dim: usize, rng: &mut R) -> SetResult<Self> {
        let point = rand_vector(rng, dim, -10.0, 10.0);
        loop {
            let direction = rand_vector::<N, _>(rng, dim, -1.0, 1.0);
            if direction.norm() > convert(0.1) {
                return Line::new(point, direction);
            }
        }
    }
}

impl<N: Numeric> RandomSet<N> for Singleton<N> {
    fn rand<R: Rng>(dim: usize, rng: &mut R) -> SetResult<Self> {
        Ok(Singleton::new(rand_vector(rng, dim, -10.0, 10.0)))
    }
}
