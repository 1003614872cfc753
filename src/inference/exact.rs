//! Defines an `InferenceEngine` that computes marginals in closed form.
//!
//! Every node is evaluated once, in topological order, into a `Distribution`. Observed inputs and
//! constants are point masses, Gaussian priors stay Gaussian under scaling by a point mass, and
//! a conditional with a known condition collapses to the selected branch.

use crate::distribution::Distribution;
use crate::model::{Model, Node, NodeId};
use crate::util::{ModelError, Result};
use crate::variable::{Assignment, Value};
use super::{observed, InferenceEngine};

use indexmap::IndexMap;
use log::trace;

/// A stateless `InferenceEngine` for exact inference
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactEngine;

impl ExactEngine {

    pub fn new() -> Self {
        ExactEngine
    }

}

impl InferenceEngine for ExactEngine {

    fn infer(&mut self, model: &Model, evidence: &Assignment, target: NodeId) -> Result<Distribution> {
        let mut marginals: IndexMap<NodeId, Distribution> = IndexMap::new();

        for id in model.ancestors(target)? {
            // ancestors() only yields nodes of this model, and parents precede their children
            let node = model.node(id).ok_or(ModelError::UnknownNode)?;

            let dist = match *node {
                Node::Input(ref var) => Distribution::PointMass(observed(model, evidence, id, var)?),
                Node::GaussianPrior(g) => Distribution::Gaussian(g),
                Node::Constant(val) => Distribution::PointMass(val),
                Node::Equals(p, val) => equals(&marginals[&p], val)?,
                Node::IfElse { condition, then, otherwise } => {
                    if_else(&marginals[&condition], &marginals[&then], &marginals[&otherwise])?
                },
                Node::Product(a, b) => product(&marginals[&a], &marginals[&b])?
            };

            trace!("{} = {:?}", id, dist);
            marginals.insert(id, dist);
        }

        marginals.swap_remove(&target).ok_or(ModelError::UnknownNode)
    }

}

fn equals(parent: &Distribution, val: Value) -> Result<Distribution> {
    match *parent {
        Distribution::PointMass(v) => Ok(Distribution::PointMass(Value::Bool(v == val))),
        _ => Err(ModelError::UnsupportedOperation("comparison of a random quantity"))
    }
}

fn if_else(condition: &Distribution, then: &Distribution, otherwise: &Distribution) -> Result<Distribution> {
    match *condition {
        Distribution::PointMass(Value::Bool(true)) => Ok(then.clone()),
        Distribution::PointMass(Value::Bool(false)) => Ok(otherwise.clone()),
        Distribution::Bernoulli(p) if p >= 1.0 => Ok(then.clone()),
        Distribution::Bernoulli(p) if p <= 0.0 => Ok(otherwise.clone()),
        Distribution::Bernoulli(p) => {
            Ok(Distribution::Mixture(vec![(p, then.clone()), (1.0 - p, otherwise.clone())]))
        },
        _ => Err(ModelError::UnsupportedOperation("non-boolean condition"))
    }
}

fn product(lhs: &Distribution, rhs: &Distribution) -> Result<Distribution> {
    match (lhs, rhs) {
        (&Distribution::PointMass(Value::Real(a)), &Distribution::PointMass(Value::Real(b))) => {
            Ok(Distribution::PointMass(Value::Real(a * b)))
        },
        (other, &Distribution::PointMass(Value::Real(c))) |
        (&Distribution::PointMass(Value::Real(c)), other) => scale(other, c),
        _ => Err(ModelError::UnsupportedOperation("product of two random quantities"))
    }
}

/// The distribution of `c * X` where `X ~ dist`
fn scale(dist: &Distribution, c: f64) -> Result<Distribution> {
    match *dist {
        Distribution::Gaussian(g) => Ok(Distribution::Gaussian(g.scale(c))),
        Distribution::PointMass(Value::Real(x)) => Ok(Distribution::PointMass(Value::Real(c * x))),
        Distribution::Mixture(ref components) => {
            let scaled = components.iter()
                                   .map(|&(w, ref d)| scale(d, c).map(|d| (w, d)))
                                   .collect::<Result<Vec<_>>>()?;
            Ok(Distribution::Mixture(scaled))
        },
        _ => Err(ModelError::UnsupportedOperation("product of a non-real quantity"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Gaussian;

    #[test]
    fn scale_mixture() {
        let mix = Distribution::Mixture(vec![
            (0.5, Distribution::Gaussian(Gaussian::new(1.0, 0.01).unwrap())),
            (0.5, Distribution::PointMass(Value::Real(1.0)))
        ]);

        let scaled = product(&mix, &Distribution::PointMass(Value::Real(2.0))).unwrap();
        assert_eq!(scaled, Distribution::Mixture(vec![
            (0.5, Distribution::Gaussian(Gaussian::new(2.0, 0.04).unwrap())),
            (0.5, Distribution::PointMass(Value::Real(2.0)))
        ]));
    }

    #[test]
    fn product_of_gaussians() {
        let g = Distribution::Gaussian(Gaussian::new(1.0, 0.01).unwrap());
        assert!(product(&g, &g).is_err());
    }

    #[test]
    fn bernoulli_condition() {
        let a = Distribution::PointMass(Value::Real(1.1));
        let b = Distribution::PointMass(Value::Real(1.0));

        assert_eq!(if_else(&Distribution::Bernoulli(1.0), &a, &b).unwrap(), a);
        assert_eq!(if_else(&Distribution::Bernoulli(0.0), &a, &b).unwrap(), b);
        assert_eq!(
            if_else(&Distribution::Bernoulli(0.25), &a, &b).unwrap(),
            Distribution::Mixture(vec![(0.25, a.clone()), (0.75, b.clone())])
        );
        assert!(if_else(&Distribution::PointMass(Value::Real(1.0)), &a, &b).is_err());
    }

}
