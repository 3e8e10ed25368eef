use thiserror::Error;

use crate::expr::Expr;
use crate::types::TypeError;

/// Failure of a requested lambda conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeaningError {
    /// The requested target contains no beta redex.
    #[error("{expr} cannot be lambda-converted")]
    NotReducible { expr: Expr },

    #[error("conversion did not reach a normal form within {limit} steps")]
    StepLimitExceeded { limit: usize },

    #[error(transparent)]
    Type(#[from] TypeError),
}
