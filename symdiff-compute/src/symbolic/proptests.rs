//! Property-based tests for expressions and their derivatives.
