use symdiff_attrs::ErrorKind;
use symdiff_error::ErrorKind;
use super::InvariantError;

/// A literal in the syntax tree could not be turned into an expression node.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid literal: {}", reason),
    labels = ["this literal"],
)]
pub struct InvalidLiteral {
    /// Why the literal was rejected.
    pub reason: InvariantError,
}
