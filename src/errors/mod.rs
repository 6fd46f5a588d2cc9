//! Error types for the front end.
//!
//! One error kind per pass:
//!
//! - `LexError` for scanning (recoverable, accumulated)
//! - `SyntaxError` for parsing (fatal to the parse)
//! - `CheckError` for semantic analysis (fatal to the pass)
//!
//! plus `PassError`, the umbrella returned by the pipeline entry point.

pub mod errors;

#[cfg(test)]
mod tests;
