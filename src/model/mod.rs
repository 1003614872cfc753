//! Defines a `Model`, a symbolic expression graph over declared quantities.
//!
//! # Representation
//! Every quantity in the model is a `Node`. A `Node` refers to its parents by `NodeId`, and the
//! nodes are held in topological order (parents are always added before their children), so an
//! inference engine can evaluate the graph in a single forward pass.

use crate::distribution::Gaussian;
use crate::util::{ModelError, Result};
use crate::variable::{Domain, Value, Variable};

use bidir_map::BidirMap;
use indexmap::IndexMap;

use std::collections::HashSet;
use std::fmt;

mod builder;

pub use self::builder::ModelBuilder;


/// Identifies a `Node` within a single `Model`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }

}


/// The type of value a `Node` takes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Real,
    Label,
    Bool
}

impl Kind {

    pub fn of_value(val: &Value) -> Self {
        match *val {
            Value::Real(_) => Kind::Real,
            Value::Label(_) => Kind::Label,
            Value::Bool(_) => Kind::Bool
        }
    }

    pub fn of_domain(domain: Domain) -> Self {
        match domain {
            Domain::Continuous => Kind::Real,
            Domain::Enumerated(_) => Kind::Label,
            Domain::Binary => Kind::Bool
        }
    }

}


/// A single quantity of a `Model`
#[derive(Clone, Debug, PartialEq)]
pub enum Node {

    /// A free input. Its value is bound by the evidence at query time.
    Input(Variable),

    /// A latent real-valued quantity with a Gaussian prior
    GaussianPrior(Gaussian),

    /// A fixed value
    Constant(Value),

    /// `true` iff the parent takes the given value
    Equals(NodeId, Value),

    /// Takes the value of `then` if `condition` is `true`, and the value of `otherwise` if not
    IfElse {
        condition: NodeId,
        then: NodeId,
        otherwise: NodeId
    },

    /// The product of two real-valued parents
    Product(NodeId, NodeId)

}

impl Node {

    /// The parents of this `Node`, in the order they are referenced
    pub fn parents(&self) -> Vec<NodeId> {
        match *self {
            Node::Input(_) | Node::GaussianPrior(_) | Node::Constant(_) => vec![],
            Node::Equals(p, _) => vec![p],
            Node::IfElse { condition, then, otherwise } => vec![condition, then, otherwise],
            Node::Product(a, b) => vec![a, b]
        }
    }

}


pub struct Model {

    /// The `Node`s of the model in topological order
    graph: IndexMap<NodeId, Node>,

    /// The type of value each `Node` takes
    kinds: IndexMap<NodeId, Kind>,

    /// The user-defined names of each `Node`. This is a two way lookup ```(`NodeId`->Name)```
    /// and ```(Name->`NodeId`)```
    names: BidirMap<NodeId, String>

}

impl Model {

    /// Get the `Node` with the given id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.get(&id)
    }

    /// Get the type of value the `Node` with the given id takes
    pub fn kind(&self, id: NodeId) -> Option<Kind> {
        self.kinds.get(&id).cloned()
    }

    /// Get a topological order of the `Model`
    pub fn topological_order(&self) -> Vec<NodeId> {
        self.graph.keys().cloned().collect()
    }

    /// Lookup a `Node` based on the name
    pub fn lookup_node(&self, name: &str) -> Option<NodeId> {
        self.names.get_by_second(&String::from(name)).cloned()
    }

    /// Lookup a `Node`'s name
    pub fn lookup_name(&self, id: NodeId) -> Option<&String> {
        self.names.get_by_first(&id)
    }

    /// Get the number of `Node`s in the `Model`
    pub fn num_nodes(&self) -> usize {
        self.graph.len()
    }

    /// Get `target` and every `Node` it (transitively) depends on, in topological order.
    ///
    /// # Returns
    /// `ModelError::UnknownNode` if `target` is not part of this `Model`
    pub fn ancestors(&self, target: NodeId) -> Result<Vec<NodeId>> {
        if ! self.graph.contains_key(&target) {
            return Err(ModelError::UnknownNode);
        }

        let mut marked = HashSet::new();
        let mut stack = vec![target];
        while let Some(id) = stack.pop() {
            if marked.insert(id) {
                stack.extend(self.graph[&id].parents());
            }
        }

        Ok(self.graph.keys().filter(|id| marked.contains(*id)).cloned().collect())
    }

}
