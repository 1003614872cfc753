//! Defines an `InferenceEngine` for approximate inference using particle-based approximations.
//!
//! Every node is forward sampled in topological order, with observed inputs clamped to the
//! evidence, and the particles of the queried node are summarized by moment matching.

use crate::distribution::{Distribution, Gaussian};
use crate::model::{Kind, Model, Node, NodeId};
use crate::util::{ModelError, Result};
use crate::variable::{Assignment, Value};
use super::{observed, InferenceEngine};

use indexmap::IndexMap;
use itertools::izip;
use log::debug;
use ndarray::Array1;
use rand::{self, Rng, ThreadRng};

/// The particles of a single node. Booleans are encoded as `0.0`/`1.0` and labels as their index.
type Particles = Array1<f64>;

/// An `InferenceEngine` that forward samples a fixed number of particles per query
pub struct MonteCarloEngine<R: Rng> {

    rng: R,

    /// The number of particles to draw
    particles: usize

}

impl MonteCarloEngine<ThreadRng> {

    pub fn new(particles: usize) -> Self {
        MonteCarloEngine::with_rng(rand::thread_rng(), particles)
    }

}

impl<R: Rng> MonteCarloEngine<R> {

    pub fn with_rng(rng: R, particles: usize) -> Self {
        MonteCarloEngine { rng, particles }
    }

    fn sample_node(&mut self, model: &Model, evidence: &Assignment, id: NodeId, drawn: &IndexMap<NodeId, Particles>) -> Result<Particles> {
        let n = self.particles;
        let node = model.node(id).ok_or(ModelError::UnknownNode)?;

        let particles = match *node {
            Node::Input(ref var) => Particles::from_elem(n, encode(observed(model, evidence, id, var)?)),
            Node::GaussianPrior(g) => {
                let rng = &mut self.rng;
                Particles::from_shape_fn(n, |_| g.sample(&mut *rng))
            },
            Node::Constant(val) => Particles::from_elem(n, encode(val)),
            Node::Equals(p, val) => {
                let target = encode(val);
                drawn[&p].mapv(|x| if x == target { 1.0 } else { 0.0 })
            },
            Node::IfElse { condition, then, otherwise } => {
                Particles::from_iter(
                    izip!(drawn[&condition].iter(), drawn[&then].iter(), drawn[&otherwise].iter())
                        .map(|(&c, &t, &o)| if c != 0.0 { t } else { o })
                )
            },
            Node::Product(a, b) => &drawn[&a] * &drawn[&b]
        };

        Ok(particles)
    }

}

impl<R: Rng> InferenceEngine for MonteCarloEngine<R> {

    fn infer(&mut self, model: &Model, evidence: &Assignment, target: NodeId) -> Result<Distribution> {
        if self.particles < 2 {
            return Err(ModelError::NotEnoughData);
        }

        let mut drawn: IndexMap<NodeId, Particles> = IndexMap::new();
        for id in model.ancestors(target)? {
            let particles = self.sample_node(model, evidence, id, &drawn)?;
            drawn.insert(id, particles);
        }

        let particles = drawn.swap_remove(&target).ok_or(ModelError::UnknownNode)?;
        let kind = model.kind(target).ok_or(ModelError::UnknownNode)?;

        debug!("summarizing {} particles of {}", particles.len(), target);
        summarize(&particles, kind)
    }

}

fn encode(val: Value) -> f64 {
    match val {
        Value::Real(x) => x,
        Value::Label(l) => l as f64,
        Value::Bool(b) => if b { 1.0 } else { 0.0 }
    }
}

/// Fit a `Distribution` of the given kind to the particles
fn summarize(particles: &Particles, kind: Kind) -> Result<Distribution> {
    let n = particles.len() as f64;
    let mean = particles.scalar_sum() / n;

    match kind {
        Kind::Real => {
            // zero-variance particles stay Gaussian, the same as a degenerate prior in the
            // exact engine
            let variance = particles.mapv(|x| (x - mean).powi(2)).scalar_sum() / (n - 1.0);
            Ok(Distribution::Gaussian(Gaussian::new(mean, variance)?))
        },
        Kind::Bool => {
            if mean == 1.0 || mean == 0.0 {
                Ok(Distribution::PointMass(Value::Bool(mean == 1.0)))
            } else {
                Ok(Distribution::Bernoulli(mean))
            }
        },
        Kind::Label => {
            let mut counts: IndexMap<usize, f64> = IndexMap::new();
            for &x in particles.iter() {
                *counts.entry(x as usize).or_insert(0.0) += 1.0;
            }

            if counts.len() == 1 {
                let (&label, _) = counts.iter().next().ok_or(ModelError::NotEnoughData)?;
                Ok(Distribution::PointMass(Value::Label(label)))
            } else {
                Ok(Distribution::Mixture(
                    counts.into_iter()
                          .map(|(l, c)| (c / n, Distribution::PointMass(Value::Label(l))))
                          .collect()
                ))
            }
        }
    }
}
