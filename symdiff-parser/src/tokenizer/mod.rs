pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<'_, TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot match is kept as [`TokenKind::Symbol`] tokens, so the parser reports it
/// instead of silently dropping it.
pub fn tokenize_complete(input: &str) -> Box<[Token<'_>]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + x",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
            ],
        );
    }

    #[test]
    fn float_and_parens() {
        compare_tokens(
            "(1.0 + xyz)*\t0.25",
            [
                (TokenKind::OpenParen, "("),
                (TokenKind::Float, "1.0"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "xyz"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Mul, "*"),
                (TokenKind::Whitespace, "\t"),
                (TokenKind::Float, "0.25"),
            ],
        );
    }

    #[test]
    fn number_then_name() {
        compare_tokens(
            "3x",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Name, "x"),
            ],
        );
    }

    #[test]
    fn unknown_symbols() {
        compare_tokens(
            "- x_y",
            [
                (TokenKind::Symbol, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
                (TokenKind::Symbol, "_"),
                (TokenKind::Name, "y"),
            ],
        );
    }

    #[test]
    fn complete_keeps_spans() {
        let tokens = tokenize_complete("ab *\n2");
        let kinds = tokens.iter().map(|token| (token.kind, token.span.clone())).collect::<Vec<_>>();

        assert_eq!(kinds, vec![
            (TokenKind::Name, 0..2),
            (TokenKind::Whitespace, 2..3),
            (TokenKind::Mul, 3..4),
            (TokenKind::Whitespace, 4..5),
            (TokenKind::Int, 5..6),
        ]);
    }

    #[test]
    fn lexemes_borrow_input() {
        let input = String::from("x + 12");
        let tokens = tokenize_complete(&input);
        let range = input.as_bytes().as_ptr_range();

        for token in tokens.iter() {
            assert_eq!(token.lexeme, &input[token.span.clone()]);
            assert!(range.contains(&token.lexeme.as_ptr()));
        }
    }
}
