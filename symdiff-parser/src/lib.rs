//! Tokenizer and recursive-descent parser for expressions built from nonnegative numbers,
//! variables, `+`, `*`, and parentheses.
//!
//! ```
//! use symdiff_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("2 * (x + y)");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2 * (x + y)");
//! ```

pub mod parser;
pub mod tokenizer;
