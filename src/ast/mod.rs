//! The syntax tree.
//!
//! Nodes are closed enums matched exhaustively by the checker and the
//! renderer; adding a node form is a compile error at every consumer
//! until it is handled.

pub mod expressions;
pub mod render;
pub mod statements;
