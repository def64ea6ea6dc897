use std::sync::Mutex;

use async_trait::async_trait;
use shape_redemption_utils::{
    BatchLookup, BatchResultMap, LookupRequest, RedemptionResult, SingleLookup,
};

use crate::{common::error::ResolverError, resolver::RedemptionResolver};

/// In-memory resolver for tests.
///
/// Without a predefined answer it returns a zero-amount active position for
/// every requested id, in request order. Every call is recorded.
#[derive(Debug, Default)]
pub struct MockResolver {
    single: Option<RedemptionResult>,
    batch: Option<BatchResultMap>,
    failure: Option<ResolverError>,
    calls: Mutex<Vec<LookupRequest>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_single(mut self, result: RedemptionResult) -> Self {
        self.single = Some(result);
        self
    }

    pub fn with_batch(mut self, results: BatchResultMap) -> Self {
        self.batch = Some(results);
        self
    }

    /// Every call fails with `error`.
    pub fn failing(mut self, error: ResolverError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<LookupRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    fn record(&self, request: LookupRequest) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
    }
}

pub fn empty_position() -> RedemptionResult {
    RedemptionResult {
        x_token: "0".to_string(),
        y_token: "0".to_string(),
        is_active: true,
    }
}

#[async_trait]
impl RedemptionResolver for MockResolver {
    async fn get_redemption_value(
        &self,
        params: &SingleLookup,
    ) -> Result<RedemptionResult, ResolverError> {
        self.record(LookupRequest::Single(params.clone()));

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        Ok(self.single.clone().unwrap_or_else(empty_position))
    }

    async fn get_redemption_values(
        &self,
        params: &BatchLookup,
    ) -> Result<BatchResultMap, ResolverError> {
        self.record(LookupRequest::Batch(params.clone()));

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        if let Some(results) = &self.batch {
            return Ok(results.clone());
        }

        Ok(params
            .nft_ids
            .iter()
            .map(|id| (id.clone(), empty_position()))
            .collect())
    }
}
