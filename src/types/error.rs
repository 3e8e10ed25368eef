//! # Type Error Definitions
//!
//! Errors raised while deriving or specializing types:
//!
//! - [`AlignmentError`] - a polymorphic type could not be specialized against a
//!   concrete one (see [`crate::types::align`])
//! - [`TypeError`] - a well-formed expression tree has no valid type derivation
//!   (see [`crate::expr::typing`])
//!
//! Both carry the offending types and, where there is one, the offending
//! subexpression so callers can render a precise message.

use thiserror::Error;

use super::ty::Type;
use crate::expr::{Expr, Identifier};

/// Failure to align a variable-sided type against a concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// The two types have different shapes at the same position,
    /// e.g. an atomic type against a composite one.
    #[error("cannot align {expected} with {found}: incompatible shapes")]
    ShapeMismatch { expected: Type, found: Type },

    /// Two constant types at the same position differ.
    #[error("cannot align {expected} with {found}")]
    ConstantClash { expected: Type, found: Type },

    /// A type variable would have to stand for two different types.
    #[error("type variable '{var} is bound to {bound} but must also be {found}")]
    ConflictingBinding { var: char, bound: Type, found: Type },

    /// A type variable would have to stand for a type containing itself.
    #[error("type variable '{var} cannot stand for {ty}, which contains it")]
    OccursCheck { var: char, ty: Type },
}

/// Type evaluation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// An operand's type is not compatible with what its operator requires.
    #[error("type mismatch in {expr}: expected {expected}, found {found}")]
    Mismatch {
        expected: Type,
        found: Type,
        expr: Expr,
    },

    /// Something that is not of a function type was applied to an argument.
    #[error("{function} is of type {found} and cannot be applied to an argument")]
    NotAFunction { function: Expr, found: Type },

    /// A binder tried to bind a constant.
    #[error("{identifier} is a constant, but binders can only bind variables")]
    ConstantWhereVariableExpected { identifier: Identifier },

    /// No naming convention gives the identifier a type.
    #[error("no type is known for identifier {name}")]
    UnknownIdentifier { name: String },

    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

impl TypeError {
    pub fn mismatch(expected: Type, found: Type, expr: &Expr) -> Self {
        TypeError::Mismatch {
            expected,
            found,
            expr: expr.clone(),
        }
    }
}
