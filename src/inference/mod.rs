//! Defines the interface to inference engines

use crate::distribution::Distribution;
use crate::model::{Model, NodeId};
use crate::util::{ModelError, Result};
use crate::variable::{Assignment, Value, Variable};

mod exact;
mod monte_carlo;

pub use self::exact::ExactEngine;
pub use self::monte_carlo::MonteCarloEngine;


/// An `InferenceEngine` answers marginal queries of the form ```P(target | E = e)``` over a
/// `Model`, where the evidence `e` binds values to the model's free inputs.
///
/// Engines take `&mut self` since sampling engines own their random number generator.
pub trait InferenceEngine {

    /// Infer the marginal distribution of the node `target` given the evidence
    fn infer(&mut self, model: &Model, evidence: &Assignment, target: NodeId) -> Result<Distribution>;

}

impl<'a, E: InferenceEngine + ?Sized> InferenceEngine for &'a mut E {

    fn infer(&mut self, model: &Model, evidence: &Assignment, target: NodeId) -> Result<Distribution> {
        (**self).infer(model, evidence, target)
    }

}

impl<E: InferenceEngine + ?Sized> InferenceEngine for Box<E> {

    fn infer(&mut self, model: &Model, evidence: &Assignment, target: NodeId) -> Result<Distribution> {
        (**self).infer(model, evidence, target)
    }

}

/// Look up the observed value of the input node `id`, bound to `var`
fn observed(model: &Model, evidence: &Assignment, id: NodeId, var: &Variable) -> Result<Value> {
    match evidence.get(var) {
        Some(val) => Ok(*val),
        None => {
            let name = model.lookup_name(id).cloned().unwrap_or_else(|| var.to_string());
            Err(ModelError::IncompleteAssignment(name))
        }
    }
}


#[cfg(test)]
/// Tests for the inference engines in this module. Tests are hoisted here to avoid duplication.
/// Any tests specific to the inference engine are held within that submodule's tests module.
///
/// The example is a small "fast lane" model: a Gaussian travel time that is halved when an
/// enumerated lane input takes its second value.
mod tests {
    use super::*;
    use crate::model::ModelBuilder;

    use rand::{SeedableRng, StdRng};

    /// Utility function to build the lane example
    fn build_lane_example() -> (Variable, Variable, Model, NodeId) {
        let lane = Variable::enumerated(3);
        let weather = Variable::continuous();

        let model = ModelBuilder::new()
            .with_input("Lane", &lane)
            .with_input("Weather", &weather)
            .with_gaussian("Travel", 4.0, 0.25)
            .with_constant("Fast", Value::Real(0.5))
            .with_constant("Normal", Value::Real(1.0))
            .with_equals("Is Fast Lane", "Lane", Value::Label(1))
            .with_if_else("Lane Factor", "Is Fast Lane", "Fast", "Normal")
            .with_product("Time", "Travel", "Lane Factor")
            .build()
            .unwrap();

        let time = model.lookup_node("Time").unwrap();
        (lane, weather, model, time)
    }

    /// Utility method to test the actual inference task
    fn test_inference(engine: &mut dyn InferenceEngine, precision: f64) {
        let (lane, _, model, time) = build_lane_example();

        for &(label, mean, variance) in [(0, 4.0, 0.25), (1, 2.0, 0.0625), (2, 4.0, 0.25)].iter() {
            let mut evidence = Assignment::new();
            evidence.set(&lane, Value::Label(label)).unwrap();

            let dist = engine.infer(&model, &evidence, time).unwrap();
            let g = dist.as_gaussian().unwrap();
            assert!((g.mean() - mean).abs() < precision, "mean = {}", g.mean());
            assert!((g.variance() - variance).abs() < precision, "variance = {}", g.variance());
        }
    }

    #[test]
    /// Test exact inference
    fn exact() {
        let mut engine = ExactEngine::new();

        // the result should be the same on subsequent iterations
        for _ in 0..10 {
            test_inference(&mut engine, 1e-12);
        }
    }

    #[test]
    /// Test Monte Carlo inference
    fn monte_carlo() {
        let rng = StdRng::from_seed(&[4usize, 2][..]);
        let mut engine = MonteCarloEngine::with_rng(rng, 20_000);

        for _ in 0..3 {
            test_inference(&mut engine, 0.02);
        }
    }

    #[test]
    /// Unused inputs do not need to be observed, used ones do
    fn incomplete_evidence() {
        let (lane, weather, model, time) = build_lane_example();
        let mut engine = ExactEngine::new();

        let mut evidence = Assignment::new();
        evidence.set(&weather, Value::Real(-3.0)).unwrap();
        assert_eq!(
            engine.infer(&model, &evidence, time).err(),
            Some(ModelError::IncompleteAssignment(String::from("Lane")))
        );

        let mut evidence = Assignment::new();
        evidence.set(&lane, Value::Label(0)).unwrap();
        assert!(engine.infer(&model, &evidence, time).is_ok());
    }

    #[test]
    /// Boolean nodes are inferred as point masses when their inputs are observed
    fn deterministic_condition() {
        let (lane, _, model, _) = build_lane_example();
        let is_fast = model.lookup_node("Is Fast Lane").unwrap();

        let mut evidence = Assignment::new();
        evidence.set(&lane, Value::Label(1)).unwrap();

        let exact = ExactEngine::new().infer(&model, &evidence, is_fast).unwrap();
        assert_eq!(exact, Distribution::PointMass(Value::Bool(true)));

        let rng = StdRng::from_seed(&[9usize][..]);
        let sampled = MonteCarloEngine::with_rng(rng, 100).infer(&model, &evidence, is_fast).unwrap();
        assert_eq!(sampled, exact);
    }

    #[test]
    /// Engines can be used through references and boxes
    fn indirection() {
        let (lane, _, model, time) = build_lane_example();
        let mut evidence = Assignment::new();
        evidence.set(&lane, Value::Label(2)).unwrap();

        fn run<E: InferenceEngine>(mut engine: E, model: &Model, evidence: &Assignment, target: NodeId) -> Distribution {
            engine.infer(model, evidence, target).unwrap()
        }

        let boxed: Box<dyn InferenceEngine> = Box::new(ExactEngine::new());
        let mut inner = ExactEngine::new();

        let a = run(boxed, &model, &evidence, time);
        let b = run(&mut inner, &model, &evidence, time);
        assert_eq!(a, b);
    }

}
