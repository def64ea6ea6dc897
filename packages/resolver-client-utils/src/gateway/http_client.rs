use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::common::error::ResolverError;

use super::{errors::rejection_message, API_KEY_HEADER};

/// http transport trait for resolver clients. implementors provide the
/// endpoint settings and a configured client; posting json and turning error
/// responses into [`ResolverError`]s comes for free.
#[async_trait]
pub trait HttpResolverClient {
    fn base_url(&self) -> String;
    fn api_key(&self) -> Option<String>;
    fn http_client(&self) -> &reqwest::Client;

    /// joins `path` onto the base url without doubling slashes
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ResolverError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);

        let mut request_builder = self.http_client().post(&url).json(body);
        if let Some(api_key) = self.api_key() {
            request_builder = request_builder.header(API_KEY_HEADER, api_key);
        }

        let response = request_builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            log::warn!("resolver at {url} is rate limiting requests");
            return Err(ResolverError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = rejection_message(status, &body);
            log::warn!("resolver at {url} rejected request with {status}: {message}");
            return Err(ResolverError::Rejected(message));
        }

        let bytes = response.bytes().await?;
        let parsed: T = serde_json::from_slice(&bytes)?;

        Ok(parsed)
    }
}
