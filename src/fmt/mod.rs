//! Pretty-printing for expression trees.
//!
//! Types print themselves (see [`crate::types::Type::pretty`]); this module
//! renders expressions in the notation used in semantics textbooks.

pub mod expr;
