//! Cooperative shutdown of the poller.

use crate::provider::CaptureProvider;
use std::{
    ops::{Deref, DerefMut},
    sync::{
        atomic::{AtomicBool, AtomicU8, Ordering},
        Arc,
    },
};
use strum::Display;
use tracing::debug;

/// Lifecycle of a poller.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
#[strum(serialize_all = "snake_case")]
pub enum PollerState {
    Stopped = 0,
    Initializing,
    Running,
    Stopping,
}

impl PollerState {
    fn from_u8(n: u8) -> Self {
        match n {
            1 => PollerState::Initializing,
            2 => PollerState::Running,
            3 => PollerState::Stopping,
            _ => PollerState::Stopped,
        }
    }
}

#[derive(Debug)]
struct Shared {
    /// Set by the controller, read by the loop at the top of every tick.
    stop: AtomicBool,
    /// Published by the loop, for observation only.
    state: AtomicU8,
}

/// Controller side of a poller.
///
/// Stopping never blocks. Join the poller to know when the provider has been
/// cleaned up.
#[derive(Clone, Debug)]
pub struct StopHandle {
    shared: Arc<Shared>,
}

impl StopHandle {
    pub(crate) fn new() -> Self {
        let shared = Shared {
            stop: AtomicBool::new(false),
            state: AtomicU8::new(PollerState::Stopped as u8),
        };
        Self {
            shared: Arc::new(shared),
        }
    }

    /// Requests the poller to stop after its current tick.
    ///
    /// Safe to call at any time, any number of times.
    pub fn stop(&self) {
        if !self.shared.stop.swap(true, Ordering::AcqRel) {
            debug!("stop requested");
        }
    }

    pub fn is_stop_requested(&self) -> bool {
        self.shared.stop.load(Ordering::Acquire)
    }

    pub fn state(&self) -> PollerState {
        PollerState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: PollerState) {
        let old = self.shared.state.swap(state as u8, Ordering::AcqRel);
        debug!(from = %PollerState::from_u8(old), to = %state, "poller state changed");
    }

    /// Consumes a pending stop request so the next run starts fresh.
    pub(crate) fn reset(&self) {
        self.shared.stop.store(false, Ordering::Release);
    }
}

/// Guard for an initialized provider.
///
/// Calls [CaptureProvider::cleanup] on drop, so cleanup happens exactly once
/// whether the loop returns, fails, or unwinds. The pending stop request is
/// consumed afterwards and the state goes back to [PollerState::Stopped].
pub(crate) struct CleanupGuard<'a, P>
where
    P: CaptureProvider,
{
    provider: &'a mut P,
    stop: &'a StopHandle,
}

impl<'a, P> CleanupGuard<'a, P>
where
    P: CaptureProvider,
{
    /// `provider` must have been successfully initialized.
    pub(crate) fn new(provider: &'a mut P, stop: &'a StopHandle) -> Self {
        Self { provider, stop }
    }
}

impl<P> Deref for CleanupGuard<'_, P>
where
    P: CaptureProvider,
{
    type Target = P;

    fn deref(&self) -> &Self::Target {
        self.provider
    }
}

impl<P> DerefMut for CleanupGuard<'_, P>
where
    P: CaptureProvider,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.provider
    }
}

impl<P> Drop for CleanupGuard<'_, P>
where
    P: CaptureProvider,
{
    fn drop(&mut self) {
        self.stop.set_state(PollerState::Stopping);
        self.provider.cleanup();
        debug!("provider cleaned up");
        self.stop.reset();
        self.stop.set_state(PollerState::Stopped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::VirtualProvider;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn test_stop_is_idempotent() {
        let handle = StopHandle::new();
        assert!(!handle.is_stop_requested());
        handle.stop();
        handle.clone().stop();
        assert!(handle.is_stop_requested());
        assert_eq!(handle.state(), PollerState::Stopped);

        handle.reset();
        assert!(!handle.is_stop_requested());
    }

    #[test]
    fn test_guard_cleans_up_once_on_unwind() {
        let handle = StopHandle::new();
        let mut provider = VirtualProvider::new();
        let stats = provider.clone();

        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = CleanupGuard::new(&mut provider, &handle);
            panic!("boom");
        }));

        assert!(res.is_err());
        assert_eq!(stats.stats().cleanup_calls, 1);
        assert_eq!(handle.state(), PollerState::Stopped);
    }
}
