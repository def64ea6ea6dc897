use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One position's redemption snapshot at the queried state version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionResult {
    /// decimal amount as text, never re-parsed
    pub x_token: String,
    pub y_token: String,
    pub is_active: bool,
}

impl RedemptionResult {
    pub fn status(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// NFT id to result, iterated in the order the resolver returned them.
pub type BatchResultMap = IndexMap<String, RedemptionResult>;

/// Raw resolver output for either lookup mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResponse {
    Single(RedemptionResult),
    Batch(BatchResultMap),
}
