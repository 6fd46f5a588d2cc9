//! The type system.
//!
//! `Type` is the semantic type attached to expressions, `BinOp`/`UnOp`
//! the operator vocabulary, and `binary_result`/`unary_result` the
//! operator tables consulted by the checker.

pub mod types;
