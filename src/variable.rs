//! Definition of the variable module
//!
//! A `Variable` represents a declared quantity of a model: either a free input whose value is
//! observed at query time, or a latent random quantity. `Variable`s are lightweight handles;
//! the human-readable names live in the `Model`.

use crate::util::{ModelError, Result};

use indexmap::IndexMap;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// The range of values over which a `Variable` is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {

    /// Can take on the values `true` and `false`
    Binary,

    /// An enumerated set of values. The labels are the indices `0..n`
    Enumerated(usize),

    /// All real numbers, represented by a floating point value
    Continuous

}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    id: usize,
    domain: Domain
}

impl Variable {

    fn new(domain: Domain) -> Self {
        Variable { id: NEXT_ID.fetch_add(1, Ordering::Relaxed), domain }
    }

    /// Construct a new `Variable` with a domain of `Domain::Binary`
    pub fn binary() -> Self {
        Variable::new(Domain::Binary)
    }

    /// Construct a new `Variable` with a domain of `Domain::Enumerated`
    pub fn enumerated(count: usize) -> Self {
        Variable::new(Domain::Enumerated(count))
    }

    /// Construct a new `Variable` with a domain of `Domain::Continuous`
    pub fn continuous() -> Self {
        Variable::new(Domain::Continuous)
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Check if `val` lies in the domain of this `Variable`
    pub fn accepts(&self, val: &Value) -> bool {
        match (self.domain, *val) {
            (Domain::Binary, Value::Bool(_)) => true,
            (Domain::Enumerated(n), Value::Label(l)) => l < n,
            (Domain::Continuous, Value::Real(x)) => x.is_finite(),
            _ => false
        }
    }

}

impl fmt::Display for Variable {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "V{}", self.id)
    }

}


/// A concrete value of a `Variable`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Real(f64),
    Label(usize),
    Bool(bool)
}

/// A (partial) assignment of observed values to `Variable`s.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    values: IndexMap<Variable, Value>
}

impl Assignment {

    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Bind `val` to `var`, replacing any earlier binding.
    ///
    /// # Returns
    /// `ModelError::InvalidValue` if `val` is outside the domain of `var`
    pub fn set(&mut self, var: &Variable, val: Value) -> Result<()> {
        if ! var.accepts(&val) {
            return Err(ModelError::InvalidValue);
        }

        self.values.insert(*var, val);
        Ok(())
    }

    pub fn get(&self, var: &Variable) -> Option<&Value> {
        self.values.get(var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Value)> {
        self.values.iter()
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn unique() {
        let a = Variable::continuous();
        let b = Variable::continuous();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn observe() {
        let shift = Variable::enumerated(2);
        let days = Variable::continuous();

        let mut a = Assignment::new();
        assert!(a.is_empty());

        a.set(&shift, Value::Label(1)).unwrap();
        a.set(&days, Value::Real(10.0)).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.get(&shift), Some(&Value::Label(1)));
        assert_eq!(a.get(&days), Some(&Value::Real(10.0)));

        // rebinding replaces the old value
        a.set(&days, Value::Real(0.0)).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.get(&days), Some(&Value::Real(0.0)));
    }

    #[test]
    fn observe_err() {
        let shift = Variable::enumerated(2);
        let days = Variable::continuous();
        let flag = Variable::binary();

        let mut a = Assignment::new();
        assert_eq!(a.set(&shift, Value::Label(2)), Err(ModelError::InvalidValue));
        assert_eq!(a.set(&shift, Value::Real(1.0)), Err(ModelError::InvalidValue));
        assert_eq!(a.set(&days, Value::Real(std::f64::NAN)), Err(ModelError::InvalidValue));
        assert_eq!(a.set(&flag, Value::Label(0)), Err(ModelError::InvalidValue));
        assert!(a.is_empty());
    }

}
