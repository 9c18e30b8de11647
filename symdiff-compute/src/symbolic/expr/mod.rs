//! A representation of mathematical expressions that is easier to manipulate than the syntax tree.
//!
//! The [`Expr`](symdiff_parser::parser::ast::Expr) type from `symdiff_parser` remembers where
//! every node came from in the source code, and keeps the parentheses that were written. That is
//! convenient for reporting errors, but not for manipulating the expression.
//!
//! This module defines a separate [`Expr`] with exactly three kinds of nodes:
//!
//! - [`Number`]: a finite, nonnegative number,
//! - [`Variable`]: a nonempty name made of ASCII letters,
//! - [`Operation`]: a sum or product of exactly two operands.
//!
//! Every node validates its invariants when it is constructed, and no node can be modified
//! afterwards. A sum of three terms is always a sum nested in another sum; the tree is never
//! flattened.
//!
//! # Structural equality
//!
//! The [`PartialEq`], [`Eq`], and [`Hash`] implementations for [`Expr`] compare the **structure**
//! of two expressions: the same kind of node, with equal values, names, operators, and operands
//! in the same order. `x + y` and `y + x` are not equal, and neither are `x` and `x * 1`.
//!
//! # Rendering
//!
//! The [`Display`](fmt::Display) implementation renders a fully parenthesized form that parses
//! back to the same expression:
//!
//! ```
//! use symdiff_compute::symbolic::expr::Expr;
//!
//! let expr: Expr = "1 + x * y".parse().unwrap();
//! assert_eq!(expr.to_string(), "(1.0 + (x * y))");
//! assert_eq!(expr.to_string().parse::<Expr>().unwrap(), expr);
//! ```

mod iter;

use crate::symbolic::error::{kind::InvalidLiteral, InvariantError};
pub use iter::ExprIter;
use std::{fmt, hash::{Hash, Hasher}, mem, str::FromStr};
use symdiff_error::Error;
use symdiff_parser::parser::{
    ast::{expr::Expr as AstExpr, literal::Literal},
    token::op::BinOpKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A finite, nonnegative number.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(try_from = "f64", into = "f64"))]
pub struct Number(f64);

impl Number {
    /// The number `0`.
    pub const ZERO: Self = Self(0.0);

    /// The number `1`.
    pub const ONE: Self = Self(1.0);

    /// Creates a number, checking that it is finite and nonnegative. `-0.0` is stored as `0.0`.
    pub fn new(value: f64) -> Result<Self, InvariantError> {
        if !value.is_finite() {
            Err(InvariantError::NonFiniteNumber(value))
        } else if value < 0.0 {
            Err(InvariantError::NegativeNumber(value))
        } else if value == 0.0 {
            Ok(Self::ZERO)
        } else {
            Ok(Self(value))
        }
    }

    /// Returns the value of the number.
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Numbers are never `NaN`, so equality is reflexive.
impl Eq for Number {}

/// Equal numbers have equal bits, since `-0.0` is never stored.
impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Number {
    type Error = InvariantError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Number> for f64 {
    fn from(number: Number) -> Self {
        number.0
    }
}

/// Always renders a fractional part (`5.0`, `0.25`), and never uses exponent notation.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A variable, named by a nonempty run of the letters `a-z` and `A-Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(try_from = "String", into = "String"))]
pub struct Variable(String);

impl Variable {
    /// Creates a variable, checking that the name is valid.
    pub fn new(name: impl Into<String>) -> Result<Self, InvariantError> {
        let name = name.into();
        if Self::is_valid_name(&name) {
            Ok(Self(name))
        } else {
            Err(InvariantError::InvalidVariableName(name))
        }
    }

    /// Returns true if the given string can name a variable.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Variable {
    type Error = InvariantError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<Variable> for String {
    fn from(variable: Variable) -> Self {
        variable.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The operator of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpKind {
    /// Addition, `+`.
    Add,

    /// Multiplication, `*`.
    Mul,
}

impl OpKind {
    /// Returns the character used to write the operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Mul => '*',
        }
    }
}

impl TryFrom<char> for OpKind {
    type Error = InvariantError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '+' => Ok(Self::Add),
            '*' => Ok(Self::Mul),
            other => Err(InvariantError::UnknownOperator(other)),
        }
    }
}

impl From<BinOpKind> for OpKind {
    fn from(kind: BinOpKind) -> Self {
        match kind {
            BinOpKind::Add => Self::Add,
            BinOpKind::Mul => Self::Mul,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A sum or product of two operands. The operation owns both operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    op: OpKind,
    left: Box<Expr>,
    right: Box<Expr>,
}

impl Operation {
    /// Creates an operation applying `op` to `left` and `right`.
    pub fn new(op: OpKind, left: Expr, right: Expr) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the operator.
    pub fn op(&self) -> OpKind {
        self.op
    }

    /// Returns the left operand.
    pub fn left(&self) -> &Expr {
        &self.left
    }

    /// Returns the right operand.
    pub fn right(&self) -> &Expr {
        &self.right
    }

    /// Consumes the operation, returning the operator and both operands.
    pub fn into_parts(mut self) -> (OpKind, Expr, Expr) {
        let left = mem::replace(&mut *self.left, Expr::Number(Number::ZERO));
        let right = mem::replace(&mut *self.right, Expr::Number(Number::ZERO));
        (self.op, left, right)
    }

    /// Moves the operands that are operations themselves onto `stack`, leaving zeros behind.
    fn take_nested(&mut self, stack: &mut Vec<Operation>) {
        for operand in [&mut self.left, &mut self.right] {
            if operand.is_operation() {
                if let Expr::Operation(operation) = mem::replace(&mut **operand, Expr::Number(Number::ZERO)) {
                    stack.push(operation);
                }
            }
        }
    }
}

/// A sum like `x + x + ... + x` nests once per term, so it is torn down with a stack rather than
/// by recursing into each operand.
impl Drop for Operation {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_nested(&mut stack);
        while let Some(mut operation) = stack.pop() {
            operation.take_nested(&mut stack);
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `((a + b) + c)`: open one parenthesis per operation on the left spine, then close them
        // from the innermost outwards
        let (spine, leaf) = Expr::left_spine_of(self);
        for _ in &spine {
            f.write_str("(")?;
        }
        write!(f, "{}", leaf)?;
        for operation in spine.iter().rev() {
            write!(f, " {} {})", operation.op, operation.right)?;
        }
        Ok(())
    }
}

/// An immutable expression tree.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A nonnegative number, such as `2.0` or `0.5`.
    Number(Number),

    /// A variable, such as `x` or `xyz`.
    Variable(Variable),

    /// A sum or product of two expressions.
    Operation(Operation),
}

impl Expr {
    /// Creates an [`Expr::Number`], checking that the value is finite and nonnegative.
    pub fn number(value: f64) -> Result<Self, InvariantError> {
        Number::new(value).map(Self::Number)
    }

    /// Creates an [`Expr::Variable`], checking that the name is valid.
    pub fn variable(name: impl Into<String>) -> Result<Self, InvariantError> {
        Variable::new(name).map(Self::Variable)
    }

    /// Creates the sum `left + right`.
    pub fn add(left: Expr, right: Expr) -> Self {
        Self::Operation(Operation::new(OpKind::Add, left, right))
    }

    /// Creates the product `left * right`.
    pub fn mul(left: Expr, right: Expr) -> Self {
        Self::Operation(Operation::new(OpKind::Mul, left, right))
    }

    /// If the expression is an [`Expr::Number`], returns the contained number.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// If the expression is an [`Expr::Variable`], returns a reference to the contained variable.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    /// If the expression is an [`Expr::Operation`], returns a reference to the contained
    /// operation.
    pub fn as_operation(&self) -> Option<&Operation> {
        match self {
            Self::Operation(operation) => Some(operation),
            _ => None,
        }
    }

    /// Returns true if the expression is an [`Expr::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if the expression is an [`Expr::Variable`].
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Returns true if the expression is an [`Expr::Operation`].
    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }

    /// Returns true if the variable with the given name appears anywhere in the expression.
    pub fn contains_variable(&self, name: &str) -> bool {
        self.post_order_iter()
            .any(|expr| expr.as_variable().is_some_and(|variable| variable.name() == name))
    }

    /// Returns the operations reached by repeatedly taking the left operand, outermost first,
    /// together with the leaf at the bottom of that chain.
    ///
    /// `a + b + c` is `(a + b) + c`, so a long sum or product written without parentheses is a
    /// long left spine. Walking it with a loop keeps such chains off the call stack.
    pub(crate) fn left_spine(&self) -> (Vec<&Operation>, &Expr) {
        match self {
            Self::Operation(operation) => Self::left_spine_of(operation),
            leaf => (Vec::new(), leaf),
        }
    }

    fn left_spine_of(operation: &Operation) -> (Vec<&Operation>, &Expr) {
        let mut spine = vec![operation];
        let mut leaf = operation.left();
        while let Self::Operation(operation) = leaf {
            spine.push(operation);
            leaf = operation.left();
        }
        (spine, leaf)
    }

    /// Compares the nodes themselves, ignoring their operands.
    fn node_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Variable(a), Self::Variable(b)) => a == b,
            (Self::Operation(a), Self::Operation(b)) => a.op == b.op,
            _ => false,
        }
    }
}

/// Two trees are equal if their post-order sequences of nodes are equal. Every operation has
/// exactly two operands, so the sequence determines the shape of the tree.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut lhs = self.post_order_iter();
        let mut rhs = other.post_order_iter();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.node_eq(b) => (),
                _ => return false,
            }
        }
    }
}

impl Eq for Expr {}

impl Clone for Expr {
    fn clone(&self) -> Self {
        let (spine, leaf) = self.left_spine();
        let leaf = match leaf {
            Self::Number(number) => Self::Number(*number),
            Self::Variable(variable) => Self::Variable(variable.clone()),
            // the spine always ends at a number or variable
            Self::Operation(operation) => Self::Operation(operation.clone()),
        };
        spine.into_iter().rev().fold(leaf, |left, operation| {
            Self::Operation(Operation::new(operation.op, left, operation.right().clone()))
        })
    }
}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in self.post_order_iter() {
            mem::discriminant(node).hash(state);
            match node {
                Self::Number(number) => number.hash(state),
                Self::Variable(variable) => variable.hash(state),
                Self::Operation(operation) => operation.op.hash(state),
            }
        }
    }
}

impl From<Number> for Expr {
    fn from(number: Number) -> Self {
        Self::Number(number)
    }
}

impl From<Variable> for Expr {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<Operation> for Expr {
    fn from(operation: Operation) -> Self {
        Self::Operation(operation)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Variable(variable) => write!(f, "{}", variable),
            Self::Operation(operation) => write!(f, "{}", operation),
        }
    }
}

/// Lowers a literal of the syntax tree.
///
/// The parser only produces literals that satisfy the invariants of [`Number`] and [`Variable`],
/// but a rejected literal is still reported as an [`InvalidLiteral`] error pointing at its span.
fn lower_literal(literal: Literal) -> Result<Expr, Error> {
    match literal {
        Literal::Number(num) => Expr::number(num.value)
            .map_err(|reason| Error::new(vec![num.span], InvalidLiteral { reason })),
        Literal::Symbol(sym) => Expr::variable(sym.name)
            .map_err(|reason| Error::new(vec![sym.span], InvalidLiteral { reason })),
    }
}

/// Lowers a syntax tree into an expression, dropping spans and parentheses.
impl TryFrom<AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        // walk the left spine with a loop, then fold it back up from the leftmost operand; only
        // right-hand sides recurse
        let mut spine = Vec::new();
        let mut current = expr;
        let leftmost = loop {
            match current {
                AstExpr::Literal(literal) => break lower_literal(literal)?,
                AstExpr::Paren(paren) => current = paren.into_innermost(),
                AstExpr::Binary(binary) => {
                    let (lhs, op, rhs) = binary.into_parts();
                    spine.push((op.kind, rhs));
                    current = lhs;
                },
            }
        };

        spine.into_iter().rev().try_fold(leftmost, |left, (kind, rhs)| -> Result<Expr, Error> {
            Ok(Expr::Operation(Operation::new(kind.into(), left, Expr::try_from(rhs)?)))
        })
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::symbolic::parse(s)
    }
}
