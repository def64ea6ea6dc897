use serde::{ser::SerializeTuple, Deserialize, Serialize, Serializer};

use crate::error::{BoundSide, QueryError, QueryResult};

/// Price window handed to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PriceBounds {
    #[default]
    Unbounded,
    /// kept in the order entered, `low > high` included
    Range { low: f64, high: f64 },
}

impl PriceBounds {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, PriceBounds::Unbounded)
    }

    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            PriceBounds::Unbounded => None,
            PriceBounds::Range { low, high } => Some((*low, *high)),
        }
    }
}

// resolvers take the range as a bare `[low, high]` pair
impl Serialize for PriceBounds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_pair() {
            None => serializer.serialize_none(),
            Some((low, high)) => {
                let mut pair = serializer.serialize_tuple(2)?;
                pair.serialize_element(&low)?;
                pair.serialize_element(&high)?;
                pair.end()
            }
        }
    }
}

/// What to do when only one of the two bounds was filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialBoundsPolicy {
    /// drop the lone bound and query unbounded
    #[default]
    Discard,
    /// refuse to build the request
    Reject,
}

/// Resolves the raw lower/upper text into a [`PriceBounds`].
///
/// Bounds are all-or-nothing: a range is only produced when both sides are
/// present, and neither side is parsed unless both are.
pub fn resolve_price_bounds(
    lower: &str,
    upper: &str,
    policy: PartialBoundsPolicy,
) -> QueryResult<PriceBounds> {
    let lower = present(lower);
    let upper = present(upper);

    match (lower, upper) {
        (Some(lower), Some(upper)) => Ok(PriceBounds::Range {
            low: parse_bound(BoundSide::Lower, lower)?,
            high: parse_bound(BoundSide::Upper, upper)?,
        }),
        (None, None) => Ok(PriceBounds::Unbounded),
        (Some(_), None) | (None, Some(_)) if policy == PartialBoundsPolicy::Discard => {
            Ok(PriceBounds::Unbounded)
        }
        (Some(_), None) => Err(QueryError::invalid_bound(
            BoundSide::Upper,
            "missing, both bounds must be given together",
        )),
        (None, Some(_)) => Err(QueryError::invalid_bound(
            BoundSide::Lower,
            "missing, both bounds must be given together",
        )),
    }
}

fn present(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_bound(side: BoundSide, raw: &str) -> QueryResult<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(QueryError::invalid_bound(side, raw)),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1.5", "2.5", 1.5, 2.5)]
    #[case(" 10 ", "\t20\n", 10.0, 20.0)]
    #[case("3", "1", 3.0, 1.0)]
    #[case("-0.5", "1e3", -0.5, 1000.0)]
    fn both_present_keeps_input_order(
        #[case] lower: &str,
        #[case] upper: &str,
        #[case] low: f64,
        #[case] high: f64,
    ) {
        let bounds = resolve_price_bounds(lower, upper, PartialBoundsPolicy::Discard).unwrap();
        assert_eq!(bounds, PriceBounds::Range { low, high });
    }

    #[rstest]
    #[case("", "")]
    #[case("1.5", "")]
    #[case("", "2.5")]
    #[case("   ", "not a number")]
    #[case("garbage", " ")]
    fn any_side_absent_is_unbounded(#[case] lower: &str, #[case] upper: &str) {
        let bounds = resolve_price_bounds(lower, upper, PartialBoundsPolicy::Discard).unwrap();
        assert_eq!(bounds, PriceBounds::Unbounded);
    }

    #[rstest]
    #[case("abc", "2", BoundSide::Lower)]
    #[case("1", "2.5x", BoundSide::Upper)]
    #[case("NaN", "2", BoundSide::Lower)]
    #[case("1", "inf", BoundSide::Upper)]
    fn unparseable_bound_is_rejected(
        #[case] lower: &str,
        #[case] upper: &str,
        #[case] side: BoundSide,
    ) {
        let err = resolve_price_bounds(lower, upper, PartialBoundsPolicy::Discard).unwrap_err();
        assert!(
            matches!(err, QueryError::InvalidPriceBound { side: s, .. } if s == side),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn reject_policy_names_missing_side() {
        let err = resolve_price_bounds("1.5", "", PartialBoundsPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidPriceBound {
                side: BoundSide::Upper,
                ..
            }
        ));

        let err = resolve_price_bounds("", "2.5", PartialBoundsPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidPriceBound {
                side: BoundSide::Lower,
                ..
            }
        ));

        assert_eq!(
            resolve_price_bounds("", "", PartialBoundsPolicy::Reject).unwrap(),
            PriceBounds::Unbounded
        );
    }

    #[test]
    fn range_serializes_as_pair() {
        let bounds = PriceBounds::Range {
            low: 1.5,
            high: 2.5,
        };
        assert_eq!(serde_json::to_string(&bounds).unwrap(), "[1.5,2.5]");
        assert_eq!(
            serde_json::to_string(&PriceBounds::Unbounded).unwrap(),
            "null"
        );
    }
}
