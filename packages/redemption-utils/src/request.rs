use serde::Serialize;

use crate::{
    error::{LookupMode, QueryError, QueryResult},
    input::InputState,
    price_bounds::{resolve_price_bounds, PartialBoundsPolicy, PriceBounds},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleLookup {
    pub component_address: String,
    pub nft_id: String,
    pub state_version: i64,
    #[serde(skip_serializing_if = "PriceBounds::is_unbounded")]
    pub price_bounds: PriceBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchLookup {
    pub component_address: String,
    pub nft_ids: Vec<String>,
    pub state_version: i64,
    #[serde(skip_serializing_if = "PriceBounds::is_unbounded")]
    pub price_bounds: PriceBounds,
}

/// A fully validated lookup, built fresh for every dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupRequest {
    Single(SingleLookup),
    Batch(BatchLookup),
}

impl LookupRequest {
    pub fn mode(&self) -> LookupMode {
        match self {
            LookupRequest::Single(_) => LookupMode::Single,
            LookupRequest::Batch(_) => LookupMode::Batch,
        }
    }
}

/// Builds a request for `mode` from the current input.
///
/// Checks run in a fixed order and the first failure is returned: NFT id
/// presence, then state version, then price bounds. The component address is
/// passed through as typed.
pub fn build_request(
    input: &InputState,
    mode: LookupMode,
    policy: PartialBoundsPolicy,
) -> QueryResult<LookupRequest> {
    let component_address = input.component_address().clone();

    match mode {
        LookupMode::Single => {
            let nft_id = input.single_nft_id().trim();
            if nft_id.is_empty() {
                return Err(QueryError::MissingNftId(LookupMode::Single));
            }
            let nft_id = nft_id.to_string();
            let state_version = parse_state_version(input.state_version())?;
            let price_bounds = bounds_from(input, policy)?;

            Ok(LookupRequest::Single(SingleLookup {
                component_address,
                nft_id,
                state_version,
                price_bounds,
            }))
        }
        LookupMode::Batch => {
            let nft_ids: Vec<String> = input
                .batch_nft_ids()
                .iter()
                .filter(|id| !id.trim().is_empty())
                .cloned()
                .collect();
            if nft_ids.is_empty() {
                return Err(QueryError::MissingNftId(LookupMode::Batch));
            }
            let state_version = parse_state_version(input.state_version())?;
            let price_bounds = bounds_from(input, policy)?;

            Ok(LookupRequest::Batch(BatchLookup {
                component_address,
                nft_ids,
                state_version,
                price_bounds,
            }))
        }
    }
}

fn parse_state_version(raw: &str) -> QueryResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QueryError::InvalidStateVersion(raw.to_string()))
}

fn bounds_from(input: &InputState, policy: PartialBoundsPolicy) -> QueryResult<PriceBounds> {
    resolve_price_bounds(input.lower_price_bound(), input.upper_price_bound(), policy)
}
