pub mod config;
pub mod distribution;
pub mod duration;
pub mod inference;
pub mod model;
pub mod util;
pub mod variable;

pub use config::{DurationConfig, EngineKind};
pub use distribution::{Distribution, Gaussian};
pub use duration::{report, DurationModel, ObservedInputs, Shift};
pub use inference::{ExactEngine, InferenceEngine, MonteCarloEngine};
pub use model::{Model, ModelBuilder, Node, NodeId};
pub use util::{ModelError, Result};
pub use variable::{Assignment, Domain, Value, Variable};
