use crate::event::EventKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The capture provider refused to initialize.
    ///
    /// Cleanup is never called in this case since nothing was acquired.
    #[error("failed to initialize raw input")]
    Initialization,

    /// A registered handler failed while the poller was dispatching to it.
    #[error("{kind} handler failed")]
    Handler {
        kind: EventKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("missing handler for {0}")]
    MissingHandler(EventKind),

    #[error("handler for {0} is already registered")]
    DuplicateHandler(EventKind),

    /// Another native provider instance is alive in this process.
    #[error("raw input provider is already in use")]
    ProviderInUse,

    #[error("polling task did not complete")]
    Join(#[from] tokio::task::JoinError),
}
