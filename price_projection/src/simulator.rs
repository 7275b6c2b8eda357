//! Monte Carlo path simulation.
//!
//! Each step draws `r ~ N(0, σ)` and moves the price to `price * (1 + r)`.
//! The return is applied to the price level, not to the log price, so a path
//! can in principle cross zero when σ is large; the model keeps that
//! behaviour unchanged.

use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    errors::ProjectionError,
    models::{ensemble::SimulationEnsemble, returns::Volatility},
};

/// Simulates `path_count` independent paths of `horizon_steps` steps each,
/// drawing from `rng` path by path.
///
/// The whole stream is consumed in path order (all steps of path 0, then
/// path 1, ...), so the same seeded generator always yields the same
/// ensemble.
pub fn simulate<R>(
    last_price: f64,
    volatility: Volatility,
    horizon_steps: usize,
    path_count: usize,
    rng: &mut R,
) -> Result<SimulationEnsemble, ProjectionError>
where
    R: rand::Rng + ?Sized,
{
    validate(last_price, horizon_steps, path_count)?;
    debug!(
        last_price,
        volatility = volatility.value(),
        horizon_steps,
        path_count,
        "simulating paths"
    );

    let paths = (0..path_count)
        .map(|_| simulate_path(last_price, volatility, horizon_steps, rng))
        .collect();

    Ok(SimulationEnsemble::from_paths(horizon_steps, paths))
}

/// Same model as [`simulate`], with paths spread over the rayon pool.
///
/// Path `i` draws from its own [`StdRng`] seeded with [`path_seed`]`(seed, i)`,
/// so the ensemble depends only on `seed` and not on thread count or
/// scheduling. It is not the ensemble [`simulate`] would produce from
/// `StdRng::seed_from_u64(seed)`.
pub fn simulate_parallel(
    last_price: f64,
    volatility: Volatility,
    horizon_steps: usize,
    path_count: usize,
    seed: u64,
) -> Result<SimulationEnsemble, ProjectionError> {
    validate(last_price, horizon_steps, path_count)?;
    debug!(
        last_price,
        volatility = volatility.value(),
        horizon_steps,
        path_count,
        seed,
        "simulating paths in parallel"
    );

    let paths = (0..path_count)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(path_seed(seed, i as u64));
            simulate_path(last_price, volatility, horizon_steps, &mut rng)
        })
        .collect();

    Ok(SimulationEnsemble::from_paths(horizon_steps, paths))
}

/// Seed for path `index` of a parallel run started from `seed`.
pub fn path_seed(seed: u64, index: u64) -> u64 {
    splitmix64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn simulate_path<R>(start: f64, volatility: Volatility, steps: usize, rng: &mut R) -> Vec<f64>
where
    R: rand::Rng + ?Sized,
{
    let sigma = volatility.value();
    let mut path = Vec::with_capacity(steps);
    let mut price = start;
    for _ in 0..steps {
        let z: f64 = StandardNormal.sample(rng);
        price *= 1.0 + sigma * z;
        path.push(price);
    }
    path
}

fn validate(
    last_price: f64,
    horizon_steps: usize,
    path_count: usize,
) -> Result<(), ProjectionError> {
    if horizon_steps == 0 {
        return Err(ProjectionError::invalid("horizon_steps", "must be greater than zero"));
    }
    if path_count == 0 {
        return Err(ProjectionError::invalid("path_count", "must be greater than zero"));
    }
    if !last_price.is_finite() || last_price <= 0.0 {
        return Err(ProjectionError::invalid(
            "last_price",
            format!("{last_price} is not a positive finite price"),
        ));
    }
    Ok(())
}
