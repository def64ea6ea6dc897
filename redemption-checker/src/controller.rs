use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
};

use shape_redemption_utils::{
    build_request, normalize, InputState, LookupMode, PartialBoundsPolicy, RedemptionRecord,
    RedemptionResult, RedemptionView,
};
use shape_resolver_client_utils::RedemptionResolver;
use tokio::sync::watch;

use crate::{
    dispatcher::LookupDispatcher,
    error::{CheckerError, CheckerResult},
};

/// Everything a front end renders besides the input form.
///
/// Results of each mode live in their own slot and are only replaced by a
/// later successful lookup of that mode; a failure sets `error` and leaves
/// them as they were.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultState {
    pub single: Option<RedemptionResult>,
    pub batch: Option<Vec<RedemptionRecord>>,
    pub error: Option<String>,
    pub loading: bool,
    /// lookups sent to the resolver so far, still advances when `loading`
    /// flips on and off between two reads
    pub dispatches: u64,
}

/// Owns the input form and the result slot, and runs checks against a
/// resolver with at most one lookup outstanding.
pub struct RedemptionChecker<R> {
    input: Mutex<InputState>,
    dispatcher: LookupDispatcher<R>,
    policy: PartialBoundsPolicy,
    state: watch::Sender<ResultState>,
    busy: AtomicBool,
}

/// Held for the lifetime of one check. Dropping it clears the loading flag
/// and frees the slot, whichever way the check ended.
struct InFlight<'a> {
    busy: &'a AtomicBool,
    state: &'a watch::Sender<ResultState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            let was_loading = state.loading;
            state.loading = false;
            was_loading
        });
        self.busy.store(false, Ordering::Release);
    }
}

impl<R: RedemptionResolver> RedemptionChecker<R> {
    pub fn new(resolver: R, input: InputState, policy: PartialBoundsPolicy) -> Self {
        let (state, _) = watch::channel(ResultState::default());

        Self {
            input: Mutex::new(input),
            dispatcher: LookupDispatcher::new(resolver),
            policy,
            state,
            busy: AtomicBool::new(false),
        }
    }

    /// Receiver notified on every result state change.
    pub fn subscribe(&self) -> watch::Receiver<ResultState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ResultState {
        self.state.borrow().clone()
    }

    pub fn input(&self) -> InputState {
        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies an edit to the input form.
    pub fn update_input<T>(&self, edit: impl FnOnce(&mut InputState) -> T) -> T {
        let mut input = self.input.lock().unwrap_or_else(PoisonError::into_inner);
        edit(&mut input)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn resolver(&self) -> &R {
        self.dispatcher.resolver()
    }

    pub async fn check_single(&self) -> CheckerResult<RedemptionView> {
        self.check(LookupMode::Single).await
    }

    pub async fn check_batch(&self) -> CheckerResult<RedemptionView> {
        self.check(LookupMode::Batch).await
    }

    pub async fn check(&self, mode: LookupMode) -> CheckerResult<RedemptionView> {
        let Some(_in_flight) = self.begin() else {
            log::warn!("{mode} check rejected, another lookup is still running");
            return Err(CheckerError::LookupInFlight);
        };

        let request = match build_request(&self.input(), mode, self.policy) {
            Ok(request) => request,
            Err(e) => {
                log::info!("{mode} check not sent: {e}");
                let message = e.to_string();
                self.state.send_modify(|state| state.error = Some(message));
                return Err(e.into());
            }
        };

        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
            state.dispatches += 1;
        });

        match self.dispatcher.dispatch(&request).await {
            Ok(response) => {
                let view = normalize(response);
                self.state.send_modify(|state| match &view {
                    RedemptionView::Single(result) => state.single = Some(result.clone()),
                    RedemptionView::Batch(records) => state.batch = Some(records.clone()),
                });
                Ok(view)
            }
            Err(e) => {
                let message = e.to_string();
                self.state.send_modify(|state| state.error = Some(message));
                Err(e)
            }
        }
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                busy: &self.busy,
                state: &self.state,
            })
    }
}
