//! Lexical analysis.
//!
//! `tokenize` turns source text into an EOF-terminated token stream. The
//! scanner is a table of anchored regex patterns paired with handler
//! functions; lexical errors are accumulated rather than aborting the
//! scan, so one pass reports every bad literal and stray character.

pub mod lexer;
pub mod tokens;
