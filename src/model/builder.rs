//! An implementation of the [builder pattern] for creating a `Model`.
//!
//! Models must be assembled in topological order: every parent is referenced by the name it was
//! given when it was added, so it must already be present in the builder.
//!
//! [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern

use crate::distribution::Gaussian;
use crate::util::{ModelError, Result};
use crate::variable::{Value, Variable};
use super::{Kind, Model, Node, NodeId};

use bidir_map::BidirMap;
use indexmap::IndexMap;

use log::debug;


pub struct ModelBuilder {

    /// The `Node`s added so far
    graph: IndexMap<NodeId, Node>,

    /// The type of value each `Node` takes
    kinds: IndexMap<NodeId, Kind>,

    /// The names of each `Node`
    names: BidirMap<NodeId, String>,

    /// The error state of the builder
    err: Option<ModelError>

}

impl ModelBuilder {

    /// Construct a new `ModelBuilder` representing an empty `Model`
    pub fn new() -> Self {
        ModelBuilder {
            graph: IndexMap::new(),
            kinds: IndexMap::new(),
            names: BidirMap::new(),
            err: None
        }
    }

    /// Add a free input, bound to `var` at query time.
    pub fn with_input(self, name: &str, var: &Variable) -> Self {
        let kind = Kind::of_domain(var.domain());
        self.add_node(name, Node::Input(*var), kind)
    }

    /// Add a latent real-valued quantity distributed as ```N(mean, variance)```.
    pub fn with_gaussian(self, name: &str, mean: f64, variance: f64) -> Self {
        match Gaussian::new(mean, variance) {
            Ok(g) => self.add_node(name, Node::GaussianPrior(g), Kind::Real),
            Err(e) => self.fail(e)
        }
    }

    /// Add a constant. Real constants must be finite.
    pub fn with_constant(self, name: &str, val: Value) -> Self {
        match val {
            Value::Real(x) if ! x.is_finite() => self.fail(ModelError::InvalidValue),
            _ => self.add_node(name, Node::Constant(val), Kind::of_value(&val))
        }
    }

    /// Add a boolean quantity that is `true` iff the node `parent` takes the value `val`.
    pub fn with_equals(self, name: &str, parent: &str, val: Value) -> Self {
        let p = match self.resolve(parent) {
            Some(p) => p,
            None => return self.fail(ModelError::MissingParent)
        };

        let valid = match self.graph.get(&p) {
            Some(Node::Input(var)) => var.accepts(&val),
            _ => self.kinds.get(&p) == Some(&Kind::of_value(&val))
        };

        if ! valid {
            return self.fail(ModelError::InvalidValue);
        }

        self.add_node(name, Node::Equals(p, val), Kind::Bool)
    }

    /// Add a quantity that takes the value of `then` if the boolean node `condition` is `true`
    /// and the value of `otherwise` if it is not.
    pub fn with_if_else(self, name: &str, condition: &str, then: &str, otherwise: &str) -> Self {
        let (c, t, o) = match (self.resolve(condition), self.resolve(then), self.resolve(otherwise)) {
            (Some(c), Some(t), Some(o)) => (c, t, o),
            _ => return self.fail(ModelError::MissingParent)
        };

        if self.kinds[&c] != Kind::Bool {
            return self.fail(
                ModelError::General(format!("Condition '{}' of '{}' is not boolean", condition, name))
            );
        }

        let kind = self.kinds[&t];
        if self.kinds[&o] != kind {
            return self.fail(
                ModelError::General(format!("Branches of '{}' have different types", name))
            );
        }

        self.add_node(name, Node::IfElse { condition: c, then: t, otherwise: o }, kind)
    }

    /// Add the product of two real-valued nodes.
    pub fn with_product(self, name: &str, lhs: &str, rhs: &str) -> Self {
        let (a, b) = match (self.resolve(lhs), self.resolve(rhs)) {
            (Some(a), Some(b)) => (a, b),
            _ => return self.fail(ModelError::MissingParent)
        };

        if self.kinds[&a] != Kind::Real || self.kinds[&b] != Kind::Real {
            return self.fail(
                ModelError::General(format!("Factors of '{}' must be real-valued", name))
            );
        }

        self.add_node(name, Node::Product(a, b), Kind::Real)
    }

    /// Complete building the model.
    ///
    /// # Returns
    /// the `Model`, or the first error generated during the building process
    pub fn build(self) -> Result<Model> {
        if let Some(e) = self.err {
            Err(e)
        } else {
            debug!("built model with {} nodes", self.graph.len());
            Ok(Model { graph: self.graph, kinds: self.kinds, names: self.names })
        }
    }

    fn resolve(&self, name: &str) -> Option<NodeId> {
        self.names.get_by_second(&String::from(name)).cloned()
    }

    /// Latch the first error. Later errors are dropped.
    fn fail(mut self, err: ModelError) -> Self {
        if self.err.is_none() {
            self.err = Some(err);
        }
        self
    }

    /// Internal function that actually does the node addition to the model
    fn add_node(mut self, name: &str, node: Node, kind: Kind) -> Self {
        // if we are in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        if self.resolve(name).is_some() {
            return self.fail(ModelError::DuplicateVariable(String::from(name)));
        }

        let id = NodeId(self.graph.len());
        self.graph.insert(id, node);
        self.kinds.insert(id, kind);
        self.names.insert(id, String::from(name));

        self
    }
}
