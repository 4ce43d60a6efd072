//! Application configuration.

use crate::poller::PollerConfig;
use anyhow::{ensure, Error};
use serde::Deserialize;
use std::{
    env,
    io::ErrorKind,
    path::PathBuf,
    time::Duration,
};
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncReadExt},
};
use tracing::{debug, info};

/// Data structure representing config file scheme.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub poller: PollerConfig,
    pub host: HostConfig,
}

/// Settings of the loop consuming events on the host side.
#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct HostConfig {
    /// Host loop cadence, in milliseconds.
    pub interval_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { interval_ms: 10 }
    }
}

impl HostConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Reads the first config file found, or falls back to defaults.
    pub async fn get() -> Result<Self, Error> {
        for path in config_paths() {
            match File::open(&path).await {
                Ok(mut file) => {
                    info!(?path, "found config file");
                    return Self::from_reader(&mut file).await;
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    debug!(?path, "config file not found");
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!("no config file found, using defaults");
        Ok(Self::default())
    }

    async fn from_reader(r: &mut (impl AsyncRead + Unpin)) -> Result<Self, Error> {
        let mut buf = String::new();
        r.read_to_string(&mut buf).await?;

        let config: Self = toml::from_str(&buf)?;
        ensure!(
            config.host.interval_ms > 0,
            "host.interval_ms must be at least 1"
        );

        Ok(config)
    }
}

fn config_paths() -> impl Iterator<Item = PathBuf> {
    let from_env = env::var_os("RAWTAP_CONFIG").map(PathBuf::from);
    from_env.into_iter().chain(["./rawtap.toml".into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::FaultPolicy;

    #[tokio::test]
    async fn test_parse_example() {
        let mut file = File::open(concat!(env!("CARGO_MANIFEST_DIR"), "/example.rawtap.toml"))
            .await
            .unwrap();
        let config = Config::from_reader(&mut file).await.unwrap();
        assert_eq!(config.poller.interval(), Duration::from_millis(1));
        assert_eq!(config.poller.on_handler_error, FaultPolicy::Propagate);
        assert_eq!(config.host.interval(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_missing_keys_use_defaults() {
        let mut input = "[poller]\non_handler_error = \"isolate\"\n".as_bytes();
        let config = Config::from_reader(&mut input).await.unwrap();
        assert_eq!(config.poller.interval_ms, 1);
        assert_eq!(config.poller.on_handler_error, FaultPolicy::Isolate);
        assert_eq!(config.host.interval_ms, 10);

        let mut input = "".as_bytes();
        let config = Config::from_reader(&mut input).await.unwrap();
        assert_eq!(config.poller.interval_ms, 1);
    }

    #[tokio::test]
    async fn test_reject_unknown_policy() {
        let mut input = "[poller]\non_handler_error = \"retry\"\n".as_bytes();
        assert!(Config::from_reader(&mut input).await.is_err());
    }

    #[tokio::test]
    async fn test_reject_zero_host_interval() {
        let mut input = "[host]\ninterval_ms = 0\n".as_bytes();
        let err = Config::from_reader(&mut input).await.unwrap_err();
        assert!(err.to_string().contains("host.interval_ms"));

        // a zero poller interval only means no sleep between ticks
        let mut input = "[poller]\ninterval_ms = 0\n".as_bytes();
        let config = Config::from_reader(&mut input).await.unwrap();
        assert_eq!(config.poller.interval(), Duration::ZERO);
    }

    // the only test touching RAWTAP_CONFIG, so it owns the variable
    #[tokio::test]
    async fn test_get_from_env_or_defaults() {
        let path = env::temp_dir().join(format!("rawtap-{}.toml", std::process::id()));
        tokio::fs::write(&path, "[host]\ninterval_ms = 25\n")
            .await
            .unwrap();

        env::set_var("RAWTAP_CONFIG", &path);
        let config = Config::get().await.unwrap();
        assert_eq!(config.host.interval(), Duration::from_millis(25));
        assert_eq!(config.poller.interval_ms, 1);

        tokio::fs::remove_file(&path).await.unwrap();
        let config = Config::get().await.unwrap();
        assert_eq!(config.host.interval_ms, 10);
        assert_eq!(config.poller.on_handler_error, FaultPolicy::Propagate);

        env::remove_var("RAWTAP_CONFIG");
    }
}
