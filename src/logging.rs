use cfg_if::cfg_if;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_thread_ids(true)
        .init();
}

fn env_filter() -> EnvFilter {
    let builder = EnvFilter::builder();

    cfg_if! {
        if #[cfg(debug_assertions)] {
            use tracing::metadata::LevelFilter;
            let builder = builder.with_default_directive(LevelFilter::DEBUG.into());
        } else {
            use tracing::metadata::LevelFilter;
            let builder = builder.with_default_directive(LevelFilter::INFO.into());
        }
    }

    builder.from_env_lossy()
}

/// Logs an error along with its cause.
///
/// Extra `tracing` fields may follow the error, e.g.
/// `log_error!(err, kind = %event.kind())`.
#[macro_export]
macro_rules! log_error {
    ($err:expr $(, $($field:tt)+)?) => {{
        #[allow(unused)]
        use std::error::Error;
        let err = &$err;
        match err.source() {
            Some(cause) => tracing::error!($($($field)+,)? ?cause, "{}", err),
            None => tracing::error!($($($field)+,)? "{}", err),
        }
    }};
}
