//! Symbolic differentiation of expressions.
//!
//! The derivative is built from the sum and product rules, and is **not** simplified afterwards.
//! Differentiating `x * 1` with respect to `x` gives `(1 * 1) + (x * 0)` rather than `1`,
//! so the shape of the result always mirrors the shape of the input.

use super::expr::{Expr, Number, OpKind};
use tracing::debug;

/// `(f + g)' = f' + g'`
fn sum_rule(df: Expr, dg: Expr) -> Expr {
    Expr::add(df, dg)
}

/// `(f * g)' = f' * g + f * g'`
fn product_rule(f: &Expr, df: Expr, g: &Expr, dg: Expr) -> Expr {
    Expr::add(Expr::mul(df, g.clone()), Expr::mul(f.clone(), dg))
}

/// The derivative of a number or variable.
fn leaf_derivative(leaf: &Expr, with: &str) -> Expr {
    match leaf {
        Expr::Variable(variable) if variable.name() == with => Expr::Number(Number::ONE),
        _ => Expr::Number(Number::ZERO),
    }
}

/// Computes the partial derivative of the given expression with respect to the variable named
/// `with`. Every other variable is treated as a constant.
///
/// This never fails: a name that no [`Variable`](super::expr::Variable) can have simply matches
/// nothing, and the result has zeros in every leaf.
pub fn derivative(f: &Expr, with: &str) -> Expr {
    // differentiate the leftmost leaf, then apply the rule of each operation on the left spine
    // from the innermost outwards; only right operands recurse
    let (spine, leaf) = f.left_spine();
    spine.into_iter().rev().fold(leaf_derivative(leaf, with), |df, operation| {
        let dg = derivative(operation.right(), with);
        match operation.op() {
            OpKind::Add => sum_rule(df, dg),
            OpKind::Mul => product_rule(operation.left(), df, operation.right(), dg),
        }
    })
}

impl Expr {
    /// Computes the partial derivative of this expression with respect to the variable named
    /// `with`. See [`derivative()`] for details.
    ///
    /// ```
    /// use symdiff_compute::symbolic::expr::Expr;
    ///
    /// let expr: Expr = "x * y".parse().unwrap();
    /// assert_eq!(expr.derivative("x").to_string(), "((1.0 * y) + (x * 0.0))");
    /// ```
    pub fn derivative(&self, with: &str) -> Expr {
        debug!(expr = %self, with, "computing derivative");
        derivative(self, with)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        input.parse().unwrap()
    }

    /// Differentiates the expression and renders the result.
    fn d(input: &str, with: &str) -> String {
        parse(input).derivative(with).to_string()
    }

    #[test]
    fn constant() {
        assert_eq!(d("1", "x"), "0.0");
        assert_eq!(d("2.5", "y"), "0.0");
    }

    #[test]
    fn variable() {
        assert_eq!(d("x", "x"), "1.0");
        assert_eq!(d("x", "y"), "0.0");
        assert_eq!(d("xy", "x"), "0.0");
        assert_eq!(d("X", "x"), "0.0");
    }

    #[test]
    fn sum() {
        assert_eq!(d("1 + x", "x"), "(0.0 + 1.0)");
        assert_eq!(d("x + x + y", "x"), "((1.0 + 1.0) + 0.0)");
    }

    #[test]
    fn product() {
        assert_eq!(d("x * 1", "x"), "((1.0 * 1.0) + (x * 0.0))");
        assert_eq!(d("x * y", "x"), "((1.0 * y) + (x * 0.0))");
        assert_eq!(d("x * y", "y"), "((0.0 * y) + (x * 1.0))");
    }

    #[test]
    fn nested() {
        assert_eq!(
            d("(1.0 + x) * (x * 1.0)", "x"),
            "(((0.0 + 1.0) * (x * 1.0)) + ((1.0 + x) * ((1.0 * 1.0) + (x * 0.0))))",
        );
        assert_eq!(
            d("(1.0 + x) * (x * 1.0)", "y"),
            "(((0.0 + 0.0) * (x * 1.0)) + ((1.0 + x) * ((0.0 * 1.0) + (x * 0.0))))",
        );
    }

    #[test]
    fn invalid_name_matches_nothing() {
        assert_eq!(d("x * x", ""), "((0.0 * x) + (x * 0.0))");
        assert_eq!(d("x + 1", "x1"), "(0.0 + 0.0)");
    }

    #[test]
    fn input_untouched() {
        let expr = parse("x * (y + x)");
        let copy = expr.clone();
        let _ = expr.derivative("x");
        assert_eq!(expr, copy);
    }

    #[test]
    fn long_flat_sum() {
        let input = vec!["x"; 50_000].join(" + ");
        let expr = parse(&input);

        let rendered = format!("{}x{}", "(".repeat(49_999), " + x)".repeat(49_999));
        assert!(expr.to_string() == rendered);

        let derivative = format!("{}1.0{}", "(".repeat(49_999), " + 1.0)".repeat(49_999));
        assert!(expr.derivative("x").to_string() == derivative);
    }

    #[test]
    fn free_function_matches_method() {
        let expr = parse("a * b + c");
        assert_eq!(derivative(&expr, "b"), expr.derivative("b"));
    }
}
