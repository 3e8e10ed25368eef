//! # lambda-semantics - A Typed Lambda Calculus for Compositional Semantics
//!
//! This crate is the engine behind exercises in formal semantics: students build
//! the meanings of syntax-tree nodes out of the meanings of their daughters, and
//! the engine checks the types, picks the composition rule and performs the
//! lambda conversions.
//!
//! ## Architecture Overview
//!
//! 1. **Types** (`types`) - constant, variable and composite types, the
//!    directional compatibility relation and alignment of polymorphic types
//! 2. **Expressions** (`expr`) - identifiers, binders, connectives, equality and
//!    function application, with type derivation and naming conventions
//! 3. **Composition** (`compose`) - Function Application, Predicate Modification
//!    and Lambda Abstraction for sister nodes
//! 4. **Conversion** (`convert`) - capture-avoiding beta reduction, stepwise or
//!    to normal form
//! 5. **Persistence** (`serialize`) - the binary record format of saved exercises
//!
//! ## Pipeline Flow
//!
//! ```text
//! Surface text (external parser)
//!     ↓
//! [Expression tree] ──→ type_of() / IdentifierTyper
//!     ↓
//! [Composition] → meaning of the mother node, e.g. (λx[Happy(x)])(John)
//!     ↓
//! [Lambda Conversion] → Happy(John)
//!     ↓
//! [Serializer] ⇄ saved exercise
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Compatibility Is Not Equality
//! Two types are compatible when they agree up to type variables, checked in the
//! direction expected → provided. Compatibility is not transitive (`e` and `t`
//! are both compatible with `'a`), so it is never used as `PartialEq`; the derived
//! equality on [`types::Type`] is plain structural identity.
//!
//! ### Immutable Trees
//! Expression trees carry no parent links and are never mutated. Each reduction
//! step returns a new tree, so a caller can keep the whole derivation as history
//! and stop between steps at any time.
//!
//! ### Explicit Configuration
//! The step granularity of lambda conversion ([`convert::ConverterConfig`]), the
//! available composition rules ([`compose::CompositionConfig`]) and the naming
//! conventions ([`expr::IdentifierTyper`]) are values owned by the caller's
//! session. Nothing is global.
//!
//! ## Example
//!
//! ```
//! use lambda_semantics::compose::{CompositionRule, resolve};
//! use lambda_semantics::convert::reduce_fully;
//! use lambda_semantics::expr::{Expr, Identifier};
//! use lambda_semantics::types::{ENTITY, Type};
//!
//! let x = Identifier::variable("x", ENTITY);
//! let happy = Expr::lambda(
//!     x.clone(),
//!     Expr::apply(Expr::constant("Happy", Type::predicate()), x.into()),
//! );
//! let john = Expr::constant("John", ENTITY);
//!
//! let outcome = resolve(&happy, &john).unwrap();
//! assert_eq!(outcome.rule(), CompositionRule::FunctionApplication);
//!
//! let meaning = reduce_fully(outcome.meaning().unwrap()).unwrap();
//! assert_eq!(meaning.to_string(), "Happy(John)");
//! ```

pub mod compose;
pub mod convert;
pub mod error;
pub mod expr;
pub mod fmt;
pub mod serialize;
pub mod types;

pub use error::{Error, Result};
