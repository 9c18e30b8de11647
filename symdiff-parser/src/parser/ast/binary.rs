use crate::{
    parser::{
        ast::{expr::{Expr, Primary}, literal::{LitNum, Literal}},
        error::Error,
        token::op::{BinOp, BinOpKind, Precedence},
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, mem, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Consumes the binary expression, returning the left-hand side, the operator, and the
    /// right-hand side.
    pub fn into_parts(mut self) -> (Expr, BinOp, Expr) {
        let lhs = mem::replace(&mut *self.lhs, placeholder());
        let rhs = mem::replace(&mut *self.rhs, placeholder());
        (lhs, self.op.clone(), rhs)
    }

    /// Moves the operands that are binary expressions themselves onto `stack`, leaving
    /// placeholders behind.
    fn take_nested(&mut self, stack: &mut Vec<Binary>) {
        for operand in [&mut self.lhs, &mut self.rhs] {
            if let Expr::Binary(_) = **operand {
                if let Expr::Binary(binary) = mem::replace(&mut **operand, placeholder()) {
                    stack.push(binary);
                }
            }
        }
    }

    /// Returns the kind of the next operator in the stream, without consuming it.
    fn peek_op(input: &Parser) -> Option<BinOpKind> {
        match input.peek_token()?.kind {
            TokenKind::Add => Some(BinOpKind::Add),
            TokenKind::Mul => Some(BinOpKind::Mul),
            _ => None,
        }
    }

    /// After parsing the left-hand side, the operator, and the right-hand side of a potential
    /// binary expression, parse ahead to see if the right-hand side is incomplete.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        // before creating the `lhs op rhs` node, check the precedence of the following operator,
        // if any: in `3 + 4 * 5`, `4 * 5` must become the right-hand side of `+`
        while let Some(next_op) = Self::peek_op(input) {
            if next_op.precedence() > op.precedence() {
                rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
            } else {
                // equal precedence is left-associative: `1 * 2 * 3` is `(1 * 2) * 3`, so let the
                // caller fold `lhs op rhs` first
                break;
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// Parses the operators and operands following `lhs`, as long as the operators bind at least
    /// as tightly as `precedence`. The result is a left-leaning chain of binary expressions.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while Self::peek_op(input).is_some_and(|op| op.precedence() >= precedence) {
            let op = input.try_parse::<BinOp>()?;
            let rhs = input.try_parse::<Primary>()?.into();
            lhs = Self::complete_rhs(input, lhs, op, rhs)?;
        }

        Ok(lhs)
    }
}

/// A cheap expression to leave behind when an operand is moved out.
fn placeholder() -> Expr {
    Expr::Literal(Literal::Number(LitNum { value: 0.0, span: 0..0 }))
}

/// A chain like `x + x + ... + x` nests once per operator, so it is torn down with a stack
/// rather than by recursing into each operand.
impl Drop for Binary {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_nested(&mut stack);
        while let Some(mut binary) = stack.pop() {
            binary.take_nested(&mut stack);
        }
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.kind, self.rhs)
    }
}
