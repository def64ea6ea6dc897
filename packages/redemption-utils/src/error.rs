use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type QueryResult<T> = Result<T, QueryError>;

/// Which resolver operation a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    Single,
    Batch,
}

impl LookupMode {
    pub fn missing_id_message(&self) -> &'static str {
        match self {
            LookupMode::Single => "Please enter an NFT ID",
            LookupMode::Batch => "Please add at least one NFT ID",
        }
    }
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupMode::Single => write!(f, "single"),
            LookupMode::Batch => write!(f, "batch"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundSide {
    Lower,
    Upper,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::Lower => write!(f, "lower"),
            BoundSide::Upper => write!(f, "upper"),
        }
    }
}

/// Shape errors detected while turning raw input into a lookup request.
/// None of these ever reach the resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{}", .0.missing_id_message())]
    MissingNftId(LookupMode),

    #[error("Invalid state version: {0}")]
    InvalidStateVersion(String),

    #[error("Invalid {side} price bound: {reason}")]
    InvalidPriceBound { side: BoundSide, reason: String },
}

impl QueryError {
    pub fn invalid_bound(side: BoundSide, reason: impl Into<String>) -> Self {
        QueryError::InvalidPriceBound {
            side,
            reason: reason.into(),
        }
    }
}
