use std::fmt;

use serde::Serialize;

use crate::result::{LookupResponse, RedemptionResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRecord {
    pub nft_id: String,
    #[serde(flatten)]
    pub result: RedemptionResult,
}

/// Presentation model for a finished lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "results", rename_all = "snake_case")]
pub enum RedemptionView {
    Single(RedemptionResult),
    Batch(Vec<RedemptionRecord>),
}

/// Flattens a resolver response for display. Batch entries keep the
/// resolver's own order.
pub fn normalize(response: LookupResponse) -> RedemptionView {
    match response {
        LookupResponse::Single(result) => RedemptionView::Single(result),
        LookupResponse::Batch(map) => RedemptionView::Batch(
            map.into_iter()
                .map(|(nft_id, result)| RedemptionRecord { nft_id, result })
                .collect(),
        ),
    }
}

fn write_amounts(f: &mut fmt::Formatter<'_>, result: &RedemptionResult) -> fmt::Result {
    writeln!(f, "X Token Amount: {}", result.x_token)?;
    writeln!(f, "Y Token Amount: {}", result.y_token)?;
    writeln!(f, "Status: {}", result.status())
}

impl fmt::Display for RedemptionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedemptionView::Single(result) => write_amounts(f, result),
            RedemptionView::Batch(records) => {
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "NFT: {}", record.nft_id)?;
                    write_amounts(f, &record.result)?;
                }
                Ok(())
            }
        }
    }
}
