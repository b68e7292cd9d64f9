//! Session outcome types and the busy guard.

use std::sync::atomic::{AtomicBool, Ordering};

/// What happened to a `submit` call.
///
/// Nothing here is an error the caller must handle; a `Failed` request
/// has already been folded into session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The input was not accepted and state is untouched.
    Ignored(IgnoreReason),
    /// The backend answered.
    Completed,
    /// The backend failed; the session recorded its fallback.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Input was empty after trimming.
    EmptyInput,
    /// A request is already in flight.
    Busy,
}

impl SubmitOutcome {
    pub fn was_accepted(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the submit future is dropped mid-request.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to take the flag. Returns `None` if already busy.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
