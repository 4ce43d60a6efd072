//! The polling loop.
//!
//! Every tick attempts one pull per kind, always in the order mouse move,
//! mouse button, mouse scroll, keyboard. A pulled record is decoded and
//! dispatched before the next kind is pulled. Between ticks the loop sleeps
//! for [PollerConfig::interval], which is its only yield point.

pub mod config;

pub use self::config::{FaultPolicy, PollerConfig};

use crate::{
    error::Error,
    event::InputEvent,
    handler::{dispatch, InputHandler},
    log_error,
    provider::CaptureProvider,
    shutdown::{CleanupGuard, PollerState, StopHandle},
};
use std::thread;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace};

/// Owns a capture provider and pumps its records into a handler.
#[derive(Debug)]
pub struct Poller<P> {
    provider: P,
    config: PollerConfig,
    stop: StopHandle,
}

impl<P> Poller<P>
where
    P: CaptureProvider,
{
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, PollerConfig::default())
    }

    pub fn with_config(provider: P, config: PollerConfig) -> Self {
        Self {
            provider,
            config,
            stop: StopHandle::new(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> PollerState {
        self.stop.state()
    }

    /// Runs the loop on the current thread until stopped.
    ///
    /// Fails with [Error::Initialization] without calling cleanup if the
    /// provider can't be initialized. Once initialized, cleanup is called
    /// exactly once however the loop ends, including a panicking handler.
    ///
    /// A stop requested before this is called is honored: the provider is not
    /// initialized at all and `Ok` is returned.
    pub fn run<H>(&mut self, handler: &mut H) -> Result<(), Error>
    where
        H: InputHandler + ?Sized,
    {
        if self.stop.is_stop_requested() {
            debug!("stop requested before run, not starting");
            self.stop.reset();
            return Ok(());
        }

        self.stop.set_state(PollerState::Initializing);
        if !self.provider.initialize() {
            error!("failed to initialize raw input");
            // nothing to clean up, but a stop raised meanwhile is still consumed
            self.stop.reset();
            self.stop.set_state(PollerState::Stopped);
            return Err(Error::Initialization);
        }

        info!("raw input poller started");

        let res = {
            let mut provider = CleanupGuard::new(&mut self.provider, &self.stop);
            self.stop.set_state(PollerState::Running);
            poll_until_stopped(&mut *provider, handler, &self.stop, &self.config)
        };

        match &res {
            Ok(ticks) => info!(ticks, "raw input poller stopped"),
            Err(err) => log_error!(err),
        }

        res.map(|_| ())
    }
}

impl<P> Poller<P>
where
    P: CaptureProvider + Send + 'static,
{
    /// Runs the loop on a dedicated blocking task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<H>(mut self, mut handler: H) -> PollerTask
    where
        H: InputHandler + Send + 'static,
    {
        let stop = self.stop_handle();
        let handle = task::spawn_blocking(move || self.run(&mut handler));
        PollerTask { stop, handle }
    }
}

/// Handle to a spawned poller.
#[derive(Debug)]
pub struct PollerTask {
    stop: StopHandle,
    handle: JoinHandle<Result<(), Error>>,
}

impl PollerTask {
    /// Requests the poller to stop. Doesn't wait for it.
    pub fn stop(&self) {
        self.stop.stop()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> PollerState {
        self.stop.state()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the poller to end.
    ///
    /// After this returns the provider has been cleaned up, if it was ever
    /// initialized.
    pub async fn join(self) -> Result<(), Error> {
        self.handle.await?
    }
}

/// Ticks until a stop is requested. Returns the number of ticks completed.
fn poll_until_stopped<P, H>(
    provider: &mut P,
    handler: &mut H,
    stop: &StopHandle,
    config: &PollerConfig,
) -> Result<u64, Error>
where
    P: CaptureProvider + ?Sized,
    H: InputHandler + ?Sized,
{
    let interval = config.interval();
    let mut ticks = 0;
    while !stop.is_stop_requested() {
        let dispatched = tick(provider, handler, config.on_handler_error)?;
        if dispatched > 0 {
            trace!(dispatched, "tick dispatched events");
        }
        ticks += 1;
        thread::sleep(interval);
    }
    Ok(ticks)
}

/// Pulls at most one record per kind and dispatches it.
///
/// Returns the number of events dispatched.
fn tick<P, H>(provider: &mut P, handler: &mut H, policy: FaultPolicy) -> Result<usize, Error>
where
    P: CaptureProvider + ?Sized,
    H: InputHandler + ?Sized,
{
    let mut dispatched = 0;

    if let Some(record) = provider.try_get_mouse_move() {
        deliver(handler, record.decode().into(), policy)?;
        dispatched += 1;
    }

    if let Some(record) = provider.try_get_mouse_button() {
        deliver(handler, record.decode().into(), policy)?;
        dispatched += 1;
    }

    if let Some(record) = provider.try_get_mouse_scroll() {
        deliver(handler, record.decode().into(), policy)?;
        dispatched += 1;
    }

    if let Some(record) = provider.try_get_keyboard() {
        deliver(handler, record.decode().into(), policy)?;
        dispatched += 1;
    }

    Ok(dispatched)
}

fn deliver<H>(handler: &mut H, event: InputEvent, policy: FaultPolicy) -> Result<(), Error>
where
    H: InputHandler + ?Sized,
{
    trace!(?event, "dispatching input event");

    let source = match dispatch(handler, event) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    let err = Error::Handler {
        kind: event.kind(),
        source,
    };

    match policy {
        FaultPolicy::Propagate => Err(err),
        FaultPolicy::Isolate => {
            log_error!(err, kind = %event.kind());
            Ok(())
        }
    }
}
