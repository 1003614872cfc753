//! Defines the `Error` type for the opfactor library

use std::error::Error;
use std::fmt;
use std::result;

pub type Result<T> = result::Result<T, ModelError>;

#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {

    /// Represents an incomplete assignment where a complete assignment was required.
    /// The value is the name of the input that was not observed.
    IncompleteAssignment(String),

    /// Represents a value that lies outside of the domain of the `Variable` it was bound to
    InvalidValue,

    /// Represents an error where there was a parent node expected, but not found
    MissingParent,

    /// Represents a name that was present multiple times in a situation where it should only
    /// have been present once
    DuplicateVariable(String),

    /// Represents a prior with parameters that do not describe a distribution (e.g. a negative
    /// variance)
    InvalidPrior,

    /// A node was referenced that does not belong to the model
    UnknownNode,

    /// The inference engine cannot express the result of combining the given distributions
    UnsupportedOperation(&'static str),

    /// There is not enough data provided
    NotEnoughData,

    /// A general error with the given description
    General(String)

}

impl Error for ModelError {}

impl fmt::Display for ModelError {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::IncompleteAssignment(name) => write!(f, "Missing an observed value for '{}'", name),
            ModelError::InvalidValue => write!(f, "Value is outside the domain of the variable"),
            ModelError::MissingParent => write!(f, "Missing a parent from the model"),
            ModelError::DuplicateVariable(name) => write!(f, "The name '{}' was encountered twice", name),
            ModelError::InvalidPrior => write!(f, "An invalid prior was provided"),
            ModelError::UnknownNode => write!(f, "The node does not belong to this model"),
            ModelError::UnsupportedOperation(op) => write!(f, "Unsupported operation: {}", op),
            ModelError::NotEnoughData => write!(f, "Not enough data has been provided"),
            ModelError::General(err) => write!(f, "{}", err)
        }
    }

}
