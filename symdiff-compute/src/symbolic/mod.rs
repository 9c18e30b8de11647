//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions in this module are represented as a tree of [`Expr`] nodes. It is similar to the
//! [`symdiff_parser::parser::ast::Expr`] nodes produced by [`symdiff_parser`], with the main
//! difference being that [`Expr`] nodes carry no span information and no parentheses. The grouping
//! that parentheses expressed in the source code is kept by the shape of the tree alone.
//!
//! For example, the expression `(x + y) * z` is represented as an [`Expr::Operation`]
//! multiplying an addition of `x` and `y` by `z`:
//!
//! ```
//! use symdiff_compute::symbolic::{expr::Expr, parse};
//!
//! let expr = parse("(x + y) * z").unwrap();
//! assert_eq!(expr, Expr::mul(
//!     Expr::add(Expr::variable("x").unwrap(), Expr::variable("y").unwrap()),
//!     Expr::variable("z").unwrap(),
//! ));
//! ```
//!
//! Unlike the syntax tree, every node upholds its invariants: numbers are finite and
//! nonnegative, and variable names are made of ASCII letters only. Invalid nodes can't be
//! constructed.
//!
//! # Differentiation
//!
//! The [`derivative()`] function (and the [`Expr::derivative`] method) computes the partial
//! derivative of an expression with respect to a variable, using the sum and product rules. The
//! result is not simplified.
//!
//! ```
//! use symdiff_compute::symbolic::parse;
//!
//! let expr = parse("1 + x").unwrap();
//! assert_eq!(expr.derivative("x").to_string(), "(0.0 + 1.0)");
//! ```

pub mod derivative;
pub mod error;
pub mod expr;
mod proptests;

pub use derivative::derivative;
pub use expr::Expr;

use symdiff_error::Error;
use symdiff_parser::parser::{ast::Expr as AstExpr, Parser};
use tracing::debug;

/// Parses the given source code into an [`Expr`].
///
/// Returns the syntax error produced by the parser if the source code is malformed.
pub fn parse(input: &str) -> Result<Expr, Error> {
    debug!(input, "parsing expression");
    let ast = Parser::new(input).try_parse_full::<AstExpr>()?;
    let expr = Expr::try_from(ast)?;
    debug!(%expr, "lowered syntax tree");
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symdiff_parser::parser::error::kind;

    #[test]
    fn parse_number() {
        assert_eq!(parse("5").unwrap(), Expr::number(5.0).unwrap());
        assert_eq!(parse("0.5").unwrap().to_string(), "0.5");
        assert_eq!(parse("007").unwrap().to_string(), "7.0");
    }

    #[test]
    fn parse_precedence() {
        assert_eq!(parse("1 + 2 * x").unwrap().to_string(), "(1.0 + (2.0 * x))");
        assert_eq!(parse("1 * 2 + x").unwrap().to_string(), "((1.0 * 2.0) + x)");
        assert_eq!(parse("(1 + 2) * x").unwrap().to_string(), "((1.0 + 2.0) * x)");
    }

    #[test]
    fn parse_multi_letter_variable() {
        assert_eq!(parse("xyz").unwrap(), Expr::variable("xyz").unwrap());
    }

    #[test]
    fn parse_errors() {
        assert!(parse("3 x").unwrap_err().is_kind::<kind::MissingOperator>());
        assert!(parse("").unwrap_err().is_kind::<kind::UnexpectedEof>());
        assert!(parse("1 +").unwrap_err().is_kind::<kind::UnexpectedEof>());
        assert!(parse("(1 + x").unwrap_err().is_kind::<kind::UnclosedParenthesis>());
        assert!(parse("()").unwrap_err().is_kind::<kind::EmptyParenthesis>());
        assert!(parse("1 - x").unwrap_err().is_kind::<kind::UnexpectedToken>());
    }

    #[test]
    fn parse_overflowing_number() {
        let input = format!("{}.0", "9".repeat(400));
        assert!(parse(&input).unwrap_err().is_kind::<kind::InvalidNumber>());
    }
}
