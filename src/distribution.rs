//! Distributions returned by an `InferenceEngine` as the marginal of a queried node.

use crate::util::{ModelError, Result};
use crate::variable::Value;

use rand::Rng;
use rand::distributions::{IndependentSample, Normal};


/// A univariate Gaussian, parameterized by mean and variance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaussian {
    mean: f64,
    variance: f64
}

impl Gaussian {

    /// Create a new `Gaussian`.
    ///
    /// # Returns
    /// `ModelError::InvalidPrior` unless the mean is finite and the variance is finite and
    /// non-negative. A variance of zero is a point mass at `mean`.
    pub fn new(mean: f64, variance: f64) -> Result<Self> {
        if ! mean.is_finite() || ! variance.is_finite() || variance < 0.0 {
            return Err(ModelError::InvalidPrior);
        }

        Ok(Gaussian { mean, variance })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// The distribution of `c * X` where `X ~ self`, i.e. ```N(c * mu, c^2 * sigma^2)```
    pub fn scale(&self, c: f64) -> Self {
        Gaussian { mean: c * self.mean, variance: c * c * self.variance }
    }

    /// Draw a single sample
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.variance == 0.0 {
            return self.mean;
        }

        Normal::new(self.mean, self.std_dev()).ind_sample(rng)
    }

}


/// The marginal distribution of a single node.
#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {

    /// A continuous, Gaussian-shaped marginal
    Gaussian(Gaussian),

    /// A marginal that is known exactly. Observed inputs, constants and anything computed
    /// deterministically from them end up here.
    PointMass(Value),

    /// A boolean marginal with ```P(true) = p```
    Bernoulli(f64),

    /// A weighted mixture of distributions. The weights sum to one.
    Mixture(Vec<(f64, Distribution)>)

}

impl Distribution {

    pub fn as_gaussian(&self) -> Option<&Gaussian> {
        match self {
            Distribution::Gaussian(g) => Some(g),
            _ => None
        }
    }

    /// The expected value of a real- or boolean-valued marginal. `None` for enumerated labels.
    pub fn mean(&self) -> Option<f64> {
        match self {
            Distribution::Gaussian(g) => Some(g.mean()),
            Distribution::PointMass(Value::Real(x)) => Some(*x),
            Distribution::PointMass(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
            Distribution::PointMass(Value::Label(_)) => None,
            Distribution::Bernoulli(p) => Some(*p),
            Distribution::Mixture(components) => {
                components.iter()
                          .map(|(w, d)| d.mean().map(|m| w * m))
                          .sum()
            }
        }
    }

}
