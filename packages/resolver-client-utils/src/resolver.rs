use async_trait::async_trait;
use shape_redemption_utils::{BatchLookup, BatchResultMap, RedemptionResult, SingleLookup};

use crate::common::error::ResolverError;

/// the two operations exposed by a redemption-value resolution service.
///
/// implementations only move requests and responses; computing the redemption
/// value and checking that the component or nft exists is the service's job.
#[async_trait]
pub trait RedemptionResolver: Send + Sync {
    async fn get_redemption_value(
        &self,
        params: &SingleLookup,
    ) -> Result<RedemptionResult, ResolverError>;

    async fn get_redemption_values(
        &self,
        params: &BatchLookup,
    ) -> Result<BatchResultMap, ResolverError>;
}
