//! # Exercise Persistence
//!
//! A stable binary encoding of types and expressions. Every node is written as
//! a record:
//!
//! ```text
//! tag:      u16 byte length + UTF-8 bytes   ("CompositeType", "Lambda", ...)
//! version:  i16, big-endian                  (only FORMAT_VERSION is accepted)
//! fields:   variant-specific, fixed order
//! ```
//!
//! | tag                                   | fields                         |
//! |---------------------------------------|--------------------------------|
//! | `ConstType`, `VarType`                | symbol (one UTF-16 code unit)  |
//! | `CompositeType`                       | domain, range                  |
//! | `Const`, `Var`                        | name, type                     |
//! | `Lambda`, `Exists`, `ForAll`, `Iota`  | bound identifier record, body  |
//! | `And`, `Or`, `If`, `Iff`, `Equality`  | left, right                    |
//! | `Not`                                 | operand                        |
//! | `FunctionApplication`                 | function, argument             |
//!
//! Readers reject versions they do not implement with
//! [`SerializeError::UnsupportedFormatVersion`] instead of guessing at the layout.

pub mod read;
pub mod write;

use std::io;

use thiserror::Error;

pub use read::{MAX_NESTING_DEPTH, Reader, read_expr, read_type};
pub use write::{Writer, write_expr, write_type};

pub const FORMAT_VERSION: i16 = 0;

pub(crate) const CONST_TYPE: &str = "ConstType";
pub(crate) const VAR_TYPE: &str = "VarType";
pub(crate) const COMPOSITE_TYPE: &str = "CompositeType";

pub(crate) const CONST: &str = "Const";
pub(crate) const VAR: &str = "Var";
pub(crate) const LAMBDA: &str = "Lambda";
pub(crate) const EXISTS: &str = "Exists";
pub(crate) const FOR_ALL: &str = "ForAll";
pub(crate) const IOTA: &str = "Iota";
pub(crate) const AND: &str = "And";
pub(crate) const OR: &str = "Or";
pub(crate) const IF: &str = "If";
pub(crate) const IFF: &str = "Iff";
pub(crate) const NOT: &str = "Not";
pub(crate) const EQUALITY: &str = "Equality";
pub(crate) const FUNCTION_APPLICATION: &str = "FunctionApplication";

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error(
        "record {tag} has format version {version}, only version {} is supported",
        FORMAT_VERSION
    )]
    UnsupportedFormatVersion { tag: String, version: i16 },

    #[error("unknown record tag {tag:?}")]
    UnknownTag { tag: String },

    #[error("malformed stream: {0}")]
    Malformed(String),

    #[error("symbol {0:?} cannot be stored as a single UTF-16 code unit")]
    SymbolOutOfRange(char),

    #[error(transparent)]
    Io(#[from] io::Error),
}
