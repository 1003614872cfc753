//! The operation-duration model.
//!
//! The duration factor of an operation is a Gaussian base factor multiplied by a constant that
//! depends on the shift the operation runs in:
//!
//! ```text
//! base     ~ N(1, 0.01)
//! factor   = if shift == Night { 1.1 } else { 1.0 }
//! duration = base * factor
//! ```
//!
//! The number of days since the last interrupt is an observed input of the model, but it does not
//! take part in the product. Queries accept it and bind it, and it has no effect on the result.

use crate::config::DurationConfig;
use crate::distribution::Distribution;
use crate::inference::{ExactEngine, InferenceEngine};
use crate::model::{Model, ModelBuilder, NodeId};
use crate::util::{ModelError, Result};
use crate::variable::{Assignment, Value, Variable};

use log::{debug, info, warn};
use rand::{self, Rng};

use std::fmt;
use std::str::FromStr;

const DAYS_SINCE_LAST_INTERRUPT: &str = "Days Since Last Interrupt";
const SHIFT: &str = "Shift";
const INITIAL_DURATION: &str = "Initial Operation duration factor";
const NIGHT_FACTOR: &str = "Night Shift Factor";
const DAY_FACTOR: &str = "Day Shift Factor";
const IS_NIGHT_SHIFT: &str = "Is Night Shift";
const SHIFT_FACTOR: &str = "Night Shift Weekend Factor";
const DURATION: &str = "Operation duration factor";


/// The shift an operation runs in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shift {
    Day,
    Night
}

impl Shift {

    pub const ALL: [Shift; 2] = [Shift::Day, Shift::Night];

    /// The label of this `Shift` in the enumerated domain of the shift input
    pub fn label(&self) -> usize {
        match *self {
            Shift::Day => 0,
            Shift::Night => 1
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Shift::Day => "Day",
            Shift::Night => "Night"
        }
    }

}

impl fmt::Display for Shift {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }

}

impl FromStr for Shift {

    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Shift::ALL.iter()
                  .find(|shift| shift.name().eq_ignore_ascii_case(s.trim()))
                  .cloned()
                  .ok_or(ModelError::InvalidValue)
    }

}


/// The observed values of a single query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObservedInputs {
    pub days_since_last_interrupt: f64,
    pub shift: Shift
}

impl ObservedInputs {

    pub fn new(days_since_last_interrupt: f64, shift: Shift) -> Self {
        ObservedInputs { days_since_last_interrupt, shift }
    }

}


/// The operation-duration `Model` together with the engine used to query it.
///
/// The model is built once. Every query binds a fresh `Assignment`, so no state is carried from
/// one query to the next.
pub struct DurationModel<E: InferenceEngine> {

    model: Model,

    /// The free inputs of the model
    days: Variable,
    shift: Variable,

    /// The queried node
    duration: NodeId,

    engine: E,

    fallback: f64

}

impl DurationModel<ExactEngine> {

    /// Build the model with the default constants and an `ExactEngine`
    pub fn new() -> Result<Self> {
        DurationModel::with_engine(ExactEngine::new(), &DurationConfig::default())
    }

}

impl<E: InferenceEngine> DurationModel<E> {

    /// Build the model with the given constants, queried through `engine`
    pub fn with_engine(engine: E, config: &DurationConfig) -> Result<Self> {
        let days = Variable::continuous();
        let shift = Variable::enumerated(Shift::ALL.len());

        let model = build_model(&days, &shift, config)?;
        let duration = model.lookup_node(DURATION).ok_or(ModelError::UnknownNode)?;
        info!("built operation duration model ({} nodes)", model.num_nodes());

        Ok(DurationModel { model, days, shift, duration, engine, fallback: config.fallback })
    }

    /// Infer the marginal distribution of the operation duration factor
    pub fn marginal(&mut self, inputs: &ObservedInputs) -> Result<Distribution> {
        let mut evidence = Assignment::new();
        evidence.set(&self.days, Value::Real(inputs.days_since_last_interrupt))?;
        evidence.set(&self.shift, Value::Label(inputs.shift.label()))?;

        let dist = self.engine.infer(&self.model, &evidence, self.duration)?;
        debug!("P({} | {:?}) = {:?}", DURATION, inputs, dist);
        Ok(dist)
    }

    /// Draw a single sample of the operation duration factor
    pub fn infer(&mut self, days_since_last_interrupt: f64, shift: Shift) -> Result<f64> {
        let mut rng = rand::thread_rng();
        self.infer_with(&mut rng, &ObservedInputs::new(days_since_last_interrupt, shift))
    }

    /// Draw a single sample of the operation duration factor, using `rng` as the source of
    /// randomness.
    ///
    /// # Returns
    /// the configured fallback value if the inferred marginal is not Gaussian
    pub fn infer_with<R: Rng>(&mut self, rng: &mut R, inputs: &ObservedInputs) -> Result<f64> {
        match self.marginal(inputs)? {
            Distribution::Gaussian(g) => Ok(g.sample(rng)),
            other => {
                warn!("non-Gaussian marginal {:?}, falling back to {}", other, self.fallback);
                Ok(self.fallback)
            }
        }
    }

}

/// The line reported for an inferred duration factor
pub fn report(duration: f64) -> String {
    format!("Inferred Operation Duration: {}", duration)
}

/// Build the operation duration `Model` over the given inputs
fn build_model(days: &Variable, shift: &Variable, config: &DurationConfig) -> Result<Model> {
    // `days` is declared as an input but takes no part in the product
    ModelBuilder::new()
        .with_input(DAYS_SINCE_LAST_INTERRUPT, days)
        .with_input(SHIFT, shift)
        .with_gaussian(INITIAL_DURATION, config.prior_mean, config.prior_variance)
        .with_constant(NIGHT_FACTOR, Value::Real(config.night_factor))
        .with_constant(DAY_FACTOR, Value::Real(config.day_factor))
        .with_equals(IS_NIGHT_SHIFT, SHIFT, Value::Label(Shift::Night.label()))
        .with_if_else(SHIFT_FACTOR, IS_NIGHT_SHIFT, NIGHT_FACTOR, DAY_FACTOR)
        .with_product(DURATION, INITIAL_DURATION, SHIFT_FACTOR)
        .build()
}
