//! Bridge between a native raw input capture provider and application
//! handlers.
//!
//! A [Poller] owns a [CaptureProvider], pulls mouse and keyboard records from
//! it on a fixed cadence, decodes them, and dispatches them to an
//! [InputHandler] in a fixed per-tick order.

mod error;
mod shutdown;
mod typing;

pub mod config;
pub mod event;
pub mod handler;
pub mod logging;
pub mod poller;
pub mod provider;
pub mod record;
pub mod state;

pub use self::{
    error::Error,
    handler::{Callbacks, Forwarder, InputHandler},
    poller::{FaultPolicy, Poller, PollerConfig, PollerTask},
    provider::CaptureProvider,
    shutdown::{PollerState, StopHandle},
};
