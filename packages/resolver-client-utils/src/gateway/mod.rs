pub mod client;
pub mod errors;
pub mod http_client;

pub(crate) const SINGLE_LOOKUP_PATH: &str = "redemption-value";
pub(crate) const BATCH_LOOKUP_PATH: &str = "redemption-values";
pub(crate) const API_KEY_HEADER: &str = "x-api-key";
