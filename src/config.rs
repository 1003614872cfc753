//! Configuration of the operation-duration model and of the inference engine used to query it.

use crate::inference::{ExactEngine, InferenceEngine, MonteCarloEngine};

use clap::ValueEnum;
use rand::{SeedableRng, StdRng};

/// The constants of the operation-duration model
#[derive(Clone, Debug, PartialEq)]
pub struct DurationConfig {

    /// Mean of the Gaussian prior over the initial duration factor
    pub prior_mean: f64,

    /// Variance of the Gaussian prior over the initial duration factor
    pub prior_variance: f64,

    /// Multiplier applied on a night shift
    pub night_factor: f64,

    /// Multiplier applied on any other shift
    pub day_factor: f64,

    /// Returned by a query when the inferred marginal is not Gaussian
    pub fallback: f64

}

impl Default for DurationConfig {

    fn default() -> Self {
        DurationConfig {
            prior_mean: 1.0,
            prior_variance: 0.01,
            night_factor: 1.1,
            day_factor: 1.0,
            fallback: 1.0
        }
    }

}


/// The available inference engines
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// Closed-form propagation of the marginals
    Exact,
    /// Forward sampling with moment matching
    MonteCarlo
}

impl EngineKind {

    /// Construct the engine. `particles` and `seed` only apply to sampling engines.
    pub fn build(self, particles: usize, seed: Option<u64>) -> Box<dyn InferenceEngine> {
        match (self, seed) {
            (EngineKind::Exact, _) => Box::new(ExactEngine::new()),
            (EngineKind::MonteCarlo, Some(seed)) => {
                let rng = StdRng::from_seed(&[seed as usize][..]);
                Box::new(MonteCarloEngine::with_rng(rng, particles))
            },
            (EngineKind::MonteCarlo, None) => Box::new(MonteCarloEngine::new(particles))
        }
    }

}
