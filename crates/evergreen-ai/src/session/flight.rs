//! The generic single-flight request session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use evergreen_common::SessionId;
use tracing::{debug, warn};

use crate::{GenerationClient, GenerationError};

use super::types::{BusyGuard, IgnoreReason, SubmitOutcome};

/// How a session turns input into a backend call and folds the answer
/// back into its state.
#[async_trait]
pub trait FlightPolicy: Send + 'static {
    /// Everything `dispatch` needs, captured while the state is locked.
    type Request: Send + 'static;
    type Reply: Send + 'static;

    /// Short label for logs.
    const KIND: &'static str;

    /// Apply the optimistic state change for accepted `input` and build
    /// the request.
    fn issue(&mut self, input: &str) -> Self::Request;

    async fn dispatch(
        client: &dyn GenerationClient,
        request: Self::Request,
    ) -> Result<Self::Reply, GenerationError>;

    /// Fold the result into state. Must not fail.
    fn settle(&mut self, result: Result<Self::Reply, GenerationError>);
}

struct Shared<P> {
    id: SessionId,
    client: Arc<dyn GenerationClient>,
    busy: AtomicBool,
    state: Mutex<FlightState<P>>,
}

struct FlightState<P> {
    policy: P,
    last_error: Option<GenerationError>,
}

/// A session that admits one request at a time.
///
/// Cloning yields another handle to the same session, so a host can read
/// state while a `submit` is awaiting the backend. If every other handle
/// is dropped mid-request, the request still settles into the (now
/// unreachable) state and is discarded with it.
pub struct FlightSession<P: FlightPolicy> {
    shared: Arc<Shared<P>>,
}

impl<P: FlightPolicy> Clone for FlightSession<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<P: FlightPolicy> FlightSession<P> {
    pub fn with_policy(client: Arc<dyn GenerationClient>, policy: P) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: SessionId::new(),
                client,
                busy: AtomicBool::new(false),
                state: Mutex::new(FlightState {
                    policy,
                    last_error: None,
                }),
            }),
        }
    }

    /// Submit user input.
    ///
    /// Blank input, or input while another request is in flight, is
    /// ignored without touching state. Otherwise the policy's optimistic
    /// change is applied at once, the backend is called, and the result
    /// is settled before the busy flag clears. Backend errors never
    /// escape; they are recorded in [`last_error`](Self::last_error).
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() {
            debug!(session = %self.shared.id, kind = P::KIND, "ignoring empty input");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        let Some(guard) = BusyGuard::acquire(&self.shared.busy) else {
            debug!(session = %self.shared.id, kind = P::KIND, "ignoring input while busy");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        };

        let request = {
            let mut state = self.lock();
            state.last_error = None;
            state.policy.issue(input)
        };

        debug!(session = %self.shared.id, kind = P::KIND, "request issued");
        let result = P::dispatch(self.shared.client.as_ref(), request).await;

        let outcome = {
            let mut state = self.lock();
            let outcome = match &result {
                Ok(_) => SubmitOutcome::Completed,
                Err(e) => {
                    warn!(session = %self.shared.id, kind = P::KIND, error = %e, "request failed");
                    state.last_error = Some(e.clone());
                    SubmitOutcome::Failed
                }
            };
            state.policy.settle(result);
            outcome
        };

        drop(guard);
        debug!(session = %self.shared.id, kind = P::KIND, ?outcome, "request settled");
        outcome
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.shared.busy.load(Ordering::Acquire)
    }

    /// The error behind the most recent failed request, cleared when the
    /// next request is issued.
    pub fn last_error(&self) -> Option<GenerationError> {
        self.lock().last_error.clone()
    }

    pub fn session_id(&self) -> &SessionId {
        &self.shared.id
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.lock().policy)
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        f(&mut self.lock().policy)
    }

    fn lock(&self) -> MutexGuard<'_, FlightState<P>> {
        // State is only touched by non-panicking policy hooks.
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
