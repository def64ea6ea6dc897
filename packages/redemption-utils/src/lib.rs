pub mod error;
pub mod input;
pub mod normalize;
pub mod price_bounds;
pub mod request;
pub mod result;

pub use error::{BoundSide, LookupMode, QueryError, QueryResult};
pub use input::InputState;
pub use normalize::{normalize, RedemptionRecord, RedemptionView};
pub use price_bounds::{resolve_price_bounds, PartialBoundsPolicy, PriceBounds};
pub use request::{build_request, BatchLookup, LookupRequest, SingleLookup};
pub use result::{BatchResultMap, LookupResponse, RedemptionResult};
