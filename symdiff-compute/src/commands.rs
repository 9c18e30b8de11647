//! String-in, string-out operations composed from [`parse`], [`Expr::derivative`], and
//! rendering.

use crate::symbolic::{error::InvariantError, expr::Variable, parse, Expr};
use std::{fmt, io};
use symdiff_error::Error;
use tracing::debug;

/// An error returned by a command.
#[derive(Debug)]
pub enum CommandError {
    /// The expression could not be parsed. The syntax error is passed through unchanged.
    Parse(Error),

    /// The variable to differentiate with respect to is not a valid variable name.
    InvalidVariable(InvariantError),
}

impl CommandError {
    /// Reports this error to stderr. Syntax errors are rendered as a report annotating `input`,
    /// the source code the command was given.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        match self {
            Self::Parse(err) => err.report_to_stderr(src_id, input),
            Self::InvalidVariable(_) => {
                eprintln!("Error: {}", self);
                Ok(())
            },
        }
    }
}

impl From<Error> for CommandError {
    fn from(err: Error) -> Self {
        Self::Parse(err)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "syntax error: {}", err),
            Self::InvalidVariable(err) => write!(f, "cannot differentiate: {}", err),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidVariable(err) => Some(err),
        }
    }
}

/// Parses `expression`, differentiates it with respect to `variable`, and renders the result.
///
/// The expression is parsed first, so a malformed expression is reported even if `variable` is
/// also invalid.
///
/// ```
/// use symdiff_compute::commands::differentiate;
///
/// assert_eq!(differentiate("1 + x", "x").unwrap(), "(0.0 + 1.0)");
/// ```
pub fn differentiate(expression: &str, variable: &str) -> Result<String, CommandError> {
    let expr: Expr = parse(expression)?;
    let variable = Variable::new(variable).map_err(CommandError::InvalidVariable)?;
    let derivative = expr.derivative(variable.name()).to_string();
    debug!(%derivative, "differentiated");
    Ok(derivative)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symdiff_parser::parser::error::kind;

    #[test]
    fn constant() {
        assert_eq!(differentiate("1", "x").unwrap(), "0.0");
    }

    #[test]
    fn same_variable() {
        assert_eq!(differentiate("x", "x").unwrap(), "1.0");
    }

    #[test]
    fn sum() {
        assert_eq!(differentiate("1 + x", "x").unwrap(), "(0.0 + 1.0)");
    }

    #[test]
    fn product_with_constant() {
        assert_eq!(differentiate("x * 1", "x").unwrap(), "((1.0 * 1.0) + (x * 0.0))");
    }

    #[test]
    fn product_with_other_variable() {
        assert_eq!(differentiate("x * y", "x").unwrap(), "((1.0 * y) + (x * 0.0))");
    }

    #[test]
    fn nested_with_respect_to_x() {
        assert_eq!(
            differentiate("(1.0 + x) * (x * 1.0)", "x").unwrap(),
            "(((0.0 + 1.0) * (x * 1.0)) + ((1.0 + x) * ((1.0 * 1.0) + (x * 0.0))))",
        );
    }

    #[test]
    fn nested_with_respect_to_y() {
        assert_eq!(
            differentiate("(1.0 + x) * (x * 1.0)", "y").unwrap(),
            "(((0.0 + 0.0) * (x * 1.0)) + ((1.0 + x) * ((0.0 * 1.0) + (x * 0.0))))",
        );
    }

    #[test]
    fn syntax_error_passes_through() {
        match differentiate("3 x", "x") {
            Err(CommandError::Parse(err)) => {
                assert!(err.is_kind::<kind::MissingOperator>());
                assert_eq!(err.spans, vec![0..1, 2..3]);
            },
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn display_messages() {
        let err = differentiate("3 x", "x").unwrap_err();
        assert_eq!(err.to_string(), "syntax error: missing operator between expressions");

        let err = differentiate("x", "x1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot differentiate: variable name `x1` must only contain the letters a-z and A-Z",
        );
    }

    #[test]
    fn syntax_error_before_variable() {
        assert!(matches!(differentiate("(", "1"), Err(CommandError::Parse(_))));
    }

    #[test]
    fn invalid_variable() {
        assert!(matches!(
            differentiate("x", ""),
            Err(CommandError::InvalidVariable(InvariantError::InvalidVariableName(_))),
        ));
        assert!(matches!(
            differentiate("x", "x1"),
            Err(CommandError::InvalidVariable(InvariantError::InvalidVariableName(_))),
        ));
    }
}
