//! # Error Taxonomy
//!
//! Every failure the engine reports is a typed, recoverable value:
//!
//! | error                                   | raised by                         |
//! |-----------------------------------------|-----------------------------------|
//! | [`SyntaxError`]                         | the surface parser (external)     |
//! | [`TypeError`]                           | type derivation, identifier typer |
//! | [`AlignmentError`]                      | type alignment                    |
//! | [`MeaningError`]                        | lambda conversion                 |
//! | [`SerializeError`]                      | exercise persistence              |
//!
//! Failures are deterministic given the same input, so nothing is retried
//! internally. [`Error`] gathers them for callers that want a single type.

use lachs::Span;
use thiserror::Error;

pub use crate::convert::MeaningError;
pub use crate::serialize::SerializeError;
pub use crate::types::{AlignmentError, TypeError};

/// Malformed surface input, reported by the parser that builds expression
/// trees. The engine only carries it to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.span, .message))]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            message: message.into(),
            span,
        }
    }

    /// Line and column where the offending input starts.
    pub fn position(&self) -> (usize, usize) {
        self.span.start
    }
}

fn render(span: &Span, message: &str) -> String {
    if span.source.is_empty() {
        format!("Syntax error: {}", message)
    } else {
        span.to_string(message)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error(transparent)]
    Meaning(#[from] MeaningError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_without_source() {
        let err = SyntaxError::new("unexpected ']'", Span::default());
        assert_eq!(err.to_string(), "Syntax error: unexpected ']'");
    }

    #[test]
    fn test_syntax_error_position() {
        let span = Span {
            start: (3, 7),
            end: (3, 8),
            source: String::new(),
        };
        assert_eq!(SyntaxError::new("unexpected ']'", span).position(), (3, 7));
    }

    #[test]
    fn test_conversions_into_crate_error() {
        let err: Error = MeaningError::StepLimitExceeded { limit: 3 }.into();
        assert!(matches!(err, Error::Meaning(_)));

        let err: Error = TypeError::UnknownIdentifier {
            name: "x".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "no type is known for identifier x");
    }
}
