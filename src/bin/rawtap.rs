use anyhow::Error;
use cfg_if::cfg_if;
use rawtap::{config::Config, logging::init_tracing, state::InputState, Forwarder, Poller};
use tokio::{pin, select, signal, time};
use tracing::{debug, info};

cfg_if! {
    if #[cfg(all(target_os = "windows", feature = "native"))] {
        use rawtap::provider::NativeProvider;

        fn open_provider() -> Result<NativeProvider, Error> {
            Ok(NativeProvider::new()?)
        }
    } else {
        use rawtap::provider::VirtualProvider;

        fn open_provider() -> Result<VirtualProvider, Error> {
            anyhow::bail!(
                "native raw input provider is unavailable, build on windows with the `native` feature"
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::get().await?;
    debug!(?config, "loaded config");

    let provider = open_provider()?;

    let (forwarder, mut event_rx) = Forwarder::channel();
    let poller = Poller::with_config(provider, config.poller.clone()).spawn(forwarder);

    // the host loop owns the presentation state, the poller only feeds it
    let mut state = InputState::new();
    let mut ticker = time::interval(config.host.interval());

    let ctrl_c = signal::ctrl_c();
    pin!(ctrl_c);

    loop {
        select! {
            _ = &mut ctrl_c => {
                info!("received interrupt, stopping");
                break;
            }
            _ = ticker.tick() => {
                let mut changed = false;
                while let Ok(event) = event_rx.try_recv() {
                    changed |= state.apply(&event);
                }
                if changed {
                    info!(%state, "input state changed");
                }
                if poller.is_finished() {
                    debug!("poller finished on its own");
                    break;
                }
            }
        }
    }

    poller.stop();
    poller.join().await?;

    info!("bye");

    Ok(())
}
