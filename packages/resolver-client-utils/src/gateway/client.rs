use std::time::Duration;

use async_trait::async_trait;
use shape_redemption_utils::{BatchLookup, BatchResultMap, RedemptionResult, SingleLookup};

use crate::{common::error::ResolverError, resolver::RedemptionResolver};

use super::{http_client::HttpResolverClient, BATCH_LOOKUP_PATH, SINGLE_LOOKUP_PATH};

/// client for a redemption-value resolver reachable over http
#[derive(Debug, Clone)]
pub struct GatewayResolverClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GatewayResolverClient {
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ResolverError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResolverError::ClientError(format!("failed to build http client: {e}")))?;

        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            client,
        })
    }
}

#[async_trait]
impl HttpResolverClient for GatewayResolverClient {
    fn base_url(&self) -> String {
        self.base_url.to_string()
    }

    fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }

    fn http_client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl RedemptionResolver for GatewayResolverClient {
    async fn get_redemption_value(
        &self,
        params: &SingleLookup,
    ) -> Result<RedemptionResult, ResolverError> {
        self.post_json(SINGLE_LOOKUP_PATH, params).await
    }

    async fn get_redemption_values(
        &self,
        params: &BatchLookup,
    ) -> Result<BatchResultMap, ResolverError> {
        self.post_json(BATCH_LOOKUP_PATH, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client =
            GatewayResolverClient::new("http://127.0.0.1:8080/", None, Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            client.endpoint(SINGLE_LOOKUP_PATH),
            "http://127.0.0.1:8080/redemption-value"
        );
        assert_eq!(
            client.endpoint("/redemption-values"),
            "http://127.0.0.1:8080/redemption-values"
        );
    }
}
