use crate::{
    parser::{
        ast::{binary::Binary, literal::Literal, paren::Paren},
        error::{kind, Error},
        token::op::Precedence,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general expression.
///
/// ```text
/// expression := term ( '+' term )*
/// term       := primary ( '*' primary )*
/// primary    := number | variable | '(' expression ')'
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            _ => self,
        }
    }
}

impl<'source> Parse<'source> for Expr {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let lhs = input.try_parse::<Primary>()?.into();
        let expr = Binary::parse_expr(input, lhs, Precedence::Any)?;

        // no operator follows, but another operand does: `3 x`
        if let Some(token) = input.peek_token().filter(|token| token.kind.starts_primary()) {
            return Err(Error::new(vec![expr.span(), token.span.clone()], kind::MissingOperator));
        }

        Ok(expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Paren(paren) => write!(f, "{}", paren),
            Expr::Binary(binary) => write!(f, "{}", binary),
        }
    }
}

/// Represents a primary expression.
///
/// Primary expressions are the simplest expressions, and are the operands of binary expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
        }
    }
}

impl<'source> Parse<'source> for Primary {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let Some((found, span)) = input.peek_token().map(|token| (token.kind, token.span.clone())) else {
            return Err(Error::new(vec![input.eof_span()], kind::UnexpectedEof));
        };

        match found {
            TokenKind::Int | TokenKind::Float | TokenKind::Name => {
                input.try_parse::<Literal>().map(Self::Literal)
            },
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Self::Paren),
            TokenKind::CloseParen if input.open_parens() == 0 => Err(Error::new(
                vec![span],
                kind::UnclosedParenthesis { opening: false },
            )),
            _ => Err(Error::new(vec![span], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name, TokenKind::OpenParen],
                found,
            })),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
        }
    }
}
