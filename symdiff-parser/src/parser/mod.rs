pub mod ast;
pub mod error;
pub mod token;

use error::{Error, kind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;
use tracing::trace;

/// A high-level parser for expressions. This is the type to use to parse an arbitrary piece of
/// source into an abstract syntax tree.
///
/// The parser owns the full token stream and a cursor into it. Every [`Parse`] implementation
/// receives the parser by mutable reference, so the cursor is the only state threaded between
/// parse functions.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        let tokens = tokenize_complete(source);
        trace!(tokens = tokens.len(), "tokenized input");
        Self { tokens, cursor: 0 }
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the number of opening parentheses before the cursor that have not been closed yet.
    pub fn open_parens(&self) -> usize {
        self.tokens[..self.cursor.min(self.tokens.len())]
            .iter()
            .fold(0, |depth: usize, token| match token.kind {
                TokenKind::OpenParen => depth + 1,
                TokenKind::CloseParen => depth.saturating_sub(1),
                _ => depth,
            })
    }

    /// Returns the next non-whitespace token without moving the cursor. Returns [`None`] if only
    /// whitespace remains.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(Error::new(vec![self.eof_span()], kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse<'source>>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The cursor is restored if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens (except
    /// trailing whitespace) must be consumed by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse<'source>>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;

        match self.peek_token() {
            None => {
                self.cursor = self.tokens.len();
                Ok(value)
            },
            Some(token) if token.kind == TokenKind::CloseParen => Err(Error::new(
                vec![token.span.clone()],
                kind::UnclosedParenthesis { opening: false },
            )),
            // operators are consumed by the expression and operands raise `MissingOperator`, so
            // only unknown symbols remain
            Some(token) => Err(Error::new(
                vec![token.span.clone()],
                kind::UnexpectedToken {
                    expected: &[TokenKind::Add, TokenKind::Mul],
                    found: token.kind,
                },
            )),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse<'source>: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Binary, Expr, Literal, LitNum, LitSym, Paren};
    use token::op::{BinOp, BinOpKind};

    /// Parses the full input, panicking on failure.
    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    /// Parses the full input, panicking on success.
    fn parse_err(input: &str) -> Error {
        Parser::new(input).try_parse_full::<Expr>().unwrap_err()
    }

    fn num(value: f64, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value, span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn binary(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), num(16.0, 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14"), num(3.14, 0..4));
    }

    #[test]
    fn int_and_float_have_same_value() {
        let (Expr::Literal(Literal::Number(int)), Expr::Literal(Literal::Number(float))) = (parse("1"), parse("1.0")) else {
            panic!("expected number literals");
        };
        assert_eq!(int.value, float.value);
    }

    #[test]
    fn literal_symbol() {
        assert_eq!(parse("xyz"), sym("xyz", 0..3));
    }

    #[test]
    fn surrounding_whitespace() {
        assert_eq!(parse("  \tx \n"), sym("x", 3..4));
    }

    #[test]
    fn binary_left_associative_add() {
        assert_eq!(parse("a + b + c"), binary(
            binary(sym("a", 0..1), BinOpKind::Add, 2..3, sym("b", 4..5)),
            BinOpKind::Add,
            6..7,
            sym("c", 8..9),
        ));
    }

    #[test]
    fn binary_left_associative_mul() {
        assert_eq!(parse("a*b*c"), binary(
            binary(sym("a", 0..1), BinOpKind::Mul, 1..2, sym("b", 2..3)),
            BinOpKind::Mul,
            3..4,
            sym("c", 4..5),
        ));
    }

    #[test]
    fn binary_precedence() {
        // 1 + (2 * 3) + 4
        assert_eq!(parse("1+2*3+4"), binary(
            binary(
                num(1.0, 0..1),
                BinOpKind::Add,
                1..2,
                binary(num(2.0, 2..3), BinOpKind::Mul, 3..4, num(3.0, 4..5)),
            ),
            BinOpKind::Add,
            5..6,
            num(4.0, 6..7),
        ));
    }

    #[test]
    fn binary_precedence_mul_first() {
        // (x * y) + z
        assert_eq!(parse("x*y+z"), binary(
            binary(sym("x", 0..1), BinOpKind::Mul, 1..2, sym("y", 2..3)),
            BinOpKind::Add,
            3..4,
            sym("z", 4..5),
        ));
    }

    #[test]
    fn parenthesized() {
        let inner = binary(num(1.0, 1..2), BinOpKind::Add, 3..4, sym("x", 5..6));
        assert_eq!(parse("(1 + x) * y"), binary(
            Expr::Paren(Paren { expr: Box::new(inner), span: 0..7 }),
            BinOpKind::Mul,
            8..9,
            sym("y", 10..11),
        ));
    }

    #[test]
    fn long_chain() {
        let input = vec!["x"; 50_000].join(" * ");
        let Expr::Binary(binary) = parse(&input) else {
            panic!("expected a binary expression");
        };
        assert_eq!(binary.span(), 0..input.len());

        let (lhs, op, rhs) = binary.into_parts();
        assert_eq!(op.kind, BinOpKind::Mul);
        assert_eq!(lhs.span(), 0..input.len() - 4);
        assert_eq!(rhs, sym("x", input.len() - 1..input.len()));
    }

    #[test]
    fn nested_parens() {
        let expr = parse("((x))");
        let Expr::Paren(paren) = &expr else {
            panic!("expected a parenthesized expression");
        };
        assert_eq!(paren.innermost(), &sym("x", 2..3));
        assert_eq!(expr.span(), 0..5);
    }

    #[test]
    fn empty_input() {
        let err = parse_err("");
        assert!(err.is_kind::<kind::UnexpectedEof>());
        assert_eq!(err.spans, vec![0..0]);
    }

    #[test]
    fn blank_input() {
        let err = parse_err("   ");
        assert!(err.is_kind::<kind::UnexpectedEof>());
        assert_eq!(err.spans, vec![3..3]);
    }

    #[test]
    fn adjacent_primaries() {
        let err = parse_err("3 x");
        assert!(err.is_kind::<kind::MissingOperator>());
        assert_eq!(err.spans, vec![0..1, 2..3]);
    }

    #[test]
    fn adjacent_primaries_no_space() {
        assert!(parse_err("3x").is_kind::<kind::MissingOperator>());
        assert!(parse_err("(1)(2)").is_kind::<kind::MissingOperator>());
        assert!(parse_err("(x y)").is_kind::<kind::MissingOperator>());
    }

    #[test]
    fn missing_right_operand() {
        let err = parse_err("1 +");
        assert!(err.is_kind::<kind::UnexpectedEof>());
        assert_eq!(err.spans, vec![3..3]);
    }

    #[test]
    fn missing_left_operand() {
        let err = parse_err("* 2");
        assert_eq!(err.downcast_kind::<kind::UnexpectedToken>().map(|kind| kind.found), Some(TokenKind::Mul));
    }

    #[test]
    fn double_operator() {
        let err = parse_err("1 + * 2");
        assert_eq!(err.downcast_kind::<kind::UnexpectedToken>().map(|kind| kind.found), Some(TokenKind::Mul));
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn unclosed_open_paren() {
        let err = parse_err("(1 + x");
        assert_eq!(err.downcast_kind::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis { opening: true }));
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn unclosed_close_paren() {
        let err = parse_err("1 + x)");
        assert_eq!(err.downcast_kind::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis { opening: false }));
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn leading_close_paren() {
        let err = parse_err(")x");
        assert_eq!(err.downcast_kind::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis { opening: false }));
    }

    #[test]
    fn missing_operand_before_matched_close_paren() {
        let err = parse_err("(x + )");
        assert_eq!(err.downcast_kind::<kind::UnexpectedToken>().map(|kind| kind.found), Some(TokenKind::CloseParen));
        assert_eq!(err.spans, vec![5..6]);

        let err = parse_err("(1 * )");
        assert_eq!(err.downcast_kind::<kind::UnexpectedToken>().map(|kind| kind.found), Some(TokenKind::CloseParen));
        assert_eq!(err.spans, vec![5..6]);

        let err = parse_err("((x) + )");
        assert!(err.is_kind::<kind::UnexpectedToken>());
    }

    #[test]
    fn missing_operand_before_stray_close_paren() {
        let err = parse_err("x + )");
        assert_eq!(err.downcast_kind::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis { opening: false }));
        assert_eq!(err.spans, vec![4..5]);

        let err = parse_err("(x) + )");
        assert_eq!(err.downcast_kind::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis { opening: false }));
    }

    #[test]
    fn unknown_symbol_after_expression() {
        let err = parse_err("x $");
        assert_eq!(err.downcast_kind::<kind::UnexpectedToken>().map(|kind| kind.found), Some(TokenKind::Symbol));
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn empty_parens() {
        let err = parse_err("x * ()");
        assert!(err.is_kind::<kind::EmptyParenthesis>());
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn invalid_tokens() {
        for input in ["x - 1", "x_y", "2 ^ 3", "$", "1.", "-1", "x / y"] {
            let err = parse_err(input);
            assert!(
                err.is_kind::<kind::UnexpectedToken>(),
                "expected an unexpected token error for {:?}, got {:?}",
                input,
                err,
            );
        }
    }

    #[test]
    fn number_too_large() {
        let input = "9".repeat(400);
        let err = Parser::new(&input).try_parse_full::<Expr>().unwrap_err();
        assert!(err.is_kind::<kind::InvalidNumber>());
        assert_eq!(err.spans, vec![0..400]);
    }

    #[test]
    fn report_for_missing_operator() {
        let err = parse_err("3 x");
        let mut buf = Vec::new();
        err.write_report("input", "3 x", &mut buf).unwrap();
        let report = String::from_utf8_lossy(&buf);
        assert!(report.contains("missing operator between expressions"));
    }
}
