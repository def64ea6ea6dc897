use std::sync::Arc;

use async_trait::async_trait;
use shape_redemption_checker::{CheckerError, RedemptionChecker};
use shape_redemption_utils::{
    BatchLookup, BatchResultMap, InputState, LookupRequest, PartialBoundsPolicy, PriceBounds,
    QueryError, RedemptionResult, RedemptionView, SingleLookup,
};
use shape_resolver_client_utils::{
    mock::{empty_position, MockResolver},
    RedemptionResolver, ResolverError,
};
use tokio::sync::Notify;

const COMPONENT: &str = "component_rdx1cpqcstnjnj5cpag7wc04y6t4azrfxjtr3g53jdpv4y72m0lpp8qkf4";

fn position(x: &str, y: &str, active: bool) -> RedemptionResult {
    RedemptionResult {
        x_token: x.to_string(),
        y_token: y.to_string(),
        is_active: active,
    }
}

fn checker(resolver: MockResolver) -> RedemptionChecker<MockResolver> {
    RedemptionChecker::new(
        resolver,
        InputState::new(COMPONENT, "282256254"),
        PartialBoundsPolicy::Discard,
    )
}

#[tokio::test]
async fn test_single_check_sends_expected_query() {
    let checker = checker(MockResolver::new().with_single(position("12.5", "3", true)));
    checker.update_input(|input| {
        input.set_single_nft_id("#123#".to_string());
    });

    let view = checker.check_single().await.unwrap();

    assert_eq!(view, RedemptionView::Single(position("12.5", "3", true)));
    assert_eq!(
        checker.resolver().calls(),
        vec![LookupRequest::Single(SingleLookup {
            component_address: COMPONENT.to_string(),
            nft_id: "#123#".to_string(),
            state_version: 282256254,
            price_bounds: PriceBounds::Unbounded,
        })]
    );
    assert_eq!(
        checker.state().single,
        Some(position("12.5", "3", true))
    );
}

#[tokio::test]
async fn test_batch_check_skips_blank_rows() {
    let checker = checker(MockResolver::new());
    checker.update_input(|input| {
        input
            .set_batch_nft_ids(vec!["#1#".into(), "".into(), "#2#".into()])
            .set_lower_price_bound("1.5".to_string())
            .set_upper_price_bound("2.5".to_string());
    });

    checker.check_batch().await.unwrap();

    assert_eq!(
        checker.resolver().calls(),
        vec![LookupRequest::Batch(BatchLookup {
            component_address: COMPONENT.to_string(),
            nft_ids: vec!["#1#".to_string(), "#2#".to_string()],
            state_version: 282256254,
            price_bounds: PriceBounds::Range {
                low: 1.5,
                high: 2.5
            },
        })]
    );
    let records = checker.state().batch.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].nft_id, "#1#");
    assert_eq!(records[1].result, empty_position());
}

/// Answers once `release` is notified, so a lookup can be held open.
struct GatedResolver {
    release: Notify,
    inner: MockResolver,
    fail: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl RedemptionResolver for GatedResolver {
    async fn get_redemption_value(
        &self,
        params: &SingleLookup,
    ) -> Result<RedemptionResult, ResolverError> {
        self.release.notified().await;
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(ResolverError::Rejected("ledger state not found".into()));
        }
        self.inner.get_redemption_value(params).await
    }

    async fn get_redemption_values(
        &self,
        params: &BatchLookup,
    ) -> Result<BatchResultMap, ResolverError> {
        self.release.notified().await;
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(ResolverError::Rejected("ledger state not found".into()));
        }
        self.inner.get_redemption_values(params).await
    }
}

fn gated_checker() -> Arc<RedemptionChecker<GatedResolver>> {
    let mut input = InputState::new(COMPONENT, "282256254");
    input.set_single_nft_id("#1#".to_string());
    input.push_batch_nft_id("#1#");

    Arc::new(RedemptionChecker::new(
        GatedResolver {
            release: Notify::new(),
            inner: MockResolver::new(),
            fail: Default::default(),
        },
        input,
        PartialBoundsPolicy::Discard,
    ))
}

async fn wait_for_loading(checker: &RedemptionChecker<GatedResolver>) {
    let mut updates = checker.subscribe();
    updates.wait_for(|state| state.loading).await.unwrap();
}

#[tokio::test]
async fn test_second_check_while_loading_is_rejected() {
    let checker = gated_checker();

    let first = tokio::spawn({
        let checker = checker.clone();
        async move { checker.check_single().await }
    });
    wait_for_loading(&checker).await;

    let err = checker.check_batch().await.unwrap_err();
    assert_eq!(err, CheckerError::LookupInFlight);
    assert!(checker.state().loading);

    checker.resolver().release.notify_one();
    first.await.unwrap().unwrap();

    let state = checker.state();
    assert!(!state.loading);
    assert!(state.single.is_some());
    assert!(state.batch.is_none());
    assert!(!checker.is_busy());
}

#[tokio::test]
async fn test_failure_after_success_retains_results() {
    let checker = gated_checker();

    let run = |checker: Arc<RedemptionChecker<GatedResolver>>| {
        tokio::spawn(async move { checker.check_batch().await })
    };

    let first = run(checker.clone());
    wait_for_loading(&checker).await;
    checker.resolver().release.notify_one();
    first.await.unwrap().unwrap();
    let shown = checker.state().batch.clone();
    assert!(shown.is_some());

    checker
        .resolver()
        .fail
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let second = run(checker.clone());
    wait_for_loading(&checker).await;
    assert_eq!(checker.state().error, None);
    checker.resolver().release.notify_one();
    let err = second.await.unwrap().unwrap_err();

    assert_eq!(err.to_string(), "ledger state not found");
    let state = checker.state();
    assert_eq!(state.error.as_deref(), Some("ledger state not found"));
    assert_eq!(state.batch, shown);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_invalid_state_version_never_reaches_resolver() {
    let checker = checker(MockResolver::new());
    checker.update_input(|input| {
        input
            .set_single_nft_id("#123#".to_string())
            .set_state_version("abc".to_string());
    });

    let err = checker.check_single().await.unwrap_err();

    assert_eq!(
        err,
        CheckerError::Query(QueryError::InvalidStateVersion("abc".to_string()))
    );
    assert_eq!(checker.resolver().call_count(), 0);
    assert_eq!(
        checker.state().error.as_deref(),
        Some("Invalid state version: abc")
    );
}

#[tokio::test]
async fn test_reject_policy_blocks_lone_bound() {
    let checker = RedemptionChecker::new(
        MockResolver::new(),
        InputState::new(COMPONENT, "282256254"),
        PartialBoundsPolicy::Reject,
    );
    checker.update_input(|input| {
        input
            .set_single_nft_id("#123#".to_string())
            .set_upper_price_bound("2.5".to_string());
    });

    let err = checker.check_single().await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(checker.resolver().call_count(), 0);
}
