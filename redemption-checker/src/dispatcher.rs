use shape_redemption_utils::{LookupRequest, LookupResponse};
use shape_resolver_client_utils::{RedemptionResolver, ResolverError};

use crate::error::{CheckerError, CheckerResult};

pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Routes built requests to the matching resolver operation.
///
/// Holds no per-request state, so concurrent calls are safe; keeping a single
/// lookup outstanding is the controller's job.
#[derive(Debug)]
pub struct LookupDispatcher<R> {
    resolver: R,
}

impl<R: RedemptionResolver> LookupDispatcher<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub async fn dispatch(&self, request: &LookupRequest) -> CheckerResult<LookupResponse> {
        let response = match request {
            LookupRequest::Single(params) => {
                log::debug!("single check params: {params:?}");
                self.resolver
                    .get_redemption_value(params)
                    .await
                    .map(LookupResponse::Single)
            }
            LookupRequest::Batch(params) => {
                log::debug!("batch check params: {params:?}");
                self.resolver
                    .get_redemption_values(params)
                    .await
                    .map(LookupResponse::Batch)
            }
        };

        match response {
            Ok(response) => {
                log::debug!("{} check result: {response:?}", request.mode());
                Ok(response)
            }
            Err(e) => {
                log::error!("{} check error: {e:?}", request.mode());
                Err(lookup_failed(e))
            }
        }
    }
}

fn lookup_failed(error: ResolverError) -> CheckerError {
    let message = error.to_string();
    let message = if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    };

    CheckerError::LookupFailed { message }
}
