pub mod common;
pub mod gateway;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod resolver;

pub use common::error::ResolverError;
pub use gateway::client::GatewayResolverClient;
pub use resolver::RedemptionResolver;
