pub mod kind;

use std::fmt;

/// A value that would break the invariants of an expression node if it were constructed.
///
/// Every constructor in [`expr`](crate::symbolic::expr) validates its input and returns this
/// error instead of building the node.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantError {
    /// Numbers must be nonnegative.
    NegativeNumber(f64),

    /// Numbers must be finite.
    NonFiniteNumber(f64),

    /// Variable names must be a nonempty run of ASCII letters.
    InvalidVariableName(String),

    /// Only `+` and `*` are operators.
    UnknownOperator(char),
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeNumber(value) => write!(f, "number `{}` is negative", value),
            Self::NonFiniteNumber(value) => write!(f, "number `{}` is not finite", value),
            Self::InvalidVariableName(name) if name.is_empty() => write!(f, "variable name is empty"),
            Self::InvalidVariableName(name) => {
                write!(f, "variable name `{}` must only contain the letters a-z and A-Z", name)
            },
            Self::UnknownOperator(op) => write!(f, "`{}` is not an operator; expected `+` or `*`", op),
        }
    }
}

impl std::error::Error for InvariantError {}
