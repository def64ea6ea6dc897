/// error type returned by every resolver implementation.
///
/// the display text of each variant is what ends up in front of the operator,
/// so `Rejected` carries the resolver's own wording untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    #[error("client error: {0}")]
    ClientError(String),
    #[error("{0}")]
    Rejected(String),
    #[error("rate limit exceeded")]
    RateLimitExceeded,
    #[error("parse error: {0}")]
    ParseError(String),
}
