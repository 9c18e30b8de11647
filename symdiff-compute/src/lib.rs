//! Immutable expression trees built from numbers, variables, `+`, and `*`, together with their
//! symbolic derivatives.
//!
//! Most users want [`parse`] and [`Expr::derivative`], or the string-based
//! [`commands::differentiate`]:
//!
//! ```
//! use symdiff_compute::parse;
//!
//! let expr = parse("x * y").unwrap();
//! assert_eq!(expr.to_string(), "(x * y)");
//! assert_eq!(expr.derivative("y").to_string(), "((0.0 * y) + (x * 1.0))");
//! ```

pub mod commands;
pub mod symbolic;

pub use symbolic::{derivative, parse, Expr};
