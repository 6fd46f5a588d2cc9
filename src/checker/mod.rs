//! Semantic analysis.
//!
//! `check` resolves names through a scope stack, enforces the typing
//! rules, annotates every expression with its type, and inserts the
//! implicit int-to-float conversions for mixed arithmetic.

pub mod checker;
pub mod symbols;

#[cfg(test)]
mod tests;
