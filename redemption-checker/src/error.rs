use shape_redemption_utils::QueryError;
use thiserror::Error;

pub type CheckerResult<T> = Result<T, CheckerError>;

/// Every way a check can fail. The display text is what the operator sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckerError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("{message}")]
    LookupFailed { message: String },

    #[error("A lookup is already in progress")]
    LookupInFlight,
}

impl CheckerError {
    /// Validation failures never reached the resolver.
    pub fn is_validation(&self) -> bool {
        matches!(self, CheckerError::Query(_))
    }
}
