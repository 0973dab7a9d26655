//! Distribution sampling helpers
//!
//! Thin wrappers over `rand_distr` used by the activity generators. All
//! helpers clamp degenerate parameters and out-of-range draws to valid
//! values: tail events are expected and never surface as errors.

use rand::Rng;
use rand_distr::{Distribution, Gamma, LogNormal, Normal, Poisson};

/// Sample from a normal distribution; a non-positive std collapses to the mean
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    match Normal::new(mean, std.max(f64::EPSILON)) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}

/// Sample a Poisson count; a non-positive mean yields zero
pub fn poisson<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> u32 {
    if mean <= 0.0 {
        return 0;
    }
    match Poisson::new(mean) {
        Ok(dist) => {
            let draw: f64 = dist.sample(rng);
            draw.max(0.0) as u32
        }
        Err(_) => 0,
    }
}

/// Sample from a gamma distribution (right-skewed volumes)
pub fn gamma<R: Rng + ?Sized>(rng: &mut R, shape: f64, scale: f64) -> f64 {
    match Gamma::new(shape.max(f64::EPSILON), scale.max(f64::EPSILON)) {
        Ok(dist) => dist.sample(rng).max(0.0),
        Err(_) => shape * scale,
    }
}

/// Sample from a lognormal distribution (heavy-tailed volumes)
pub fn lognormal<R: Rng + ?Sized>(rng: &mut R, mu: f64, sigma: f64) -> f64 {
    match LogNormal::new(mu, sigma.max(f64::EPSILON)) {
        Ok(dist) => dist.sample(rng).max(0.0),
        Err(_) => mu.exp(),
    }
}

/// Clamp a ratio into [0, 1]
pub fn clamp_ratio(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
