//! Syntax analysis.
//!
//! A Pratt parser over the token stream: statement handlers keyed by
//! leading token, NUD/LED handler tables with binding powers for
//! expressions, and recursive descent for declarations. `parse` is the
//! entry point.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
