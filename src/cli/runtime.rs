use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// `RUST_LOG` wins over `level`; `debug` forces DEBUG. Logs go to stderr so
/// command output on stdout stays machine-readable.
pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
}

fn default_config_path() -> Option<PathBuf> {
    // Priority: ./config/autofiller.yaml > <config dir>/autofiller/config.yaml
    let local_config = PathBuf::from("config/autofiller.yaml");
    if local_config.exists() {
        return Some(local_config);
    }
    dirs::config_dir().map(|mut path| {
        path.push("autofiller");
        path.push("config.yaml");
        path
    })
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                warn!("No config directory available, using defaults");
                return Ok(LoadedConfig {
                    config: Config::default(),
                    path: PathBuf::new(),
                });
            }
        },
    };

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        info!("Loaded configuration from: {}", config_path.display());
        Ok(LoadedConfig {
            config,
            path: config_path,
        })
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        Ok(LoadedConfig {
            config: Config::default(),
            path: config_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autofiller.yaml");
        std::fs::write(&path, "toast_duration_ms: 1200\n").unwrap();
        let loaded = load_config(Some(&path)).await.unwrap();
        assert_eq!(loaded.config.toast_duration_ms, 1200);
        assert_eq!(loaded.path, path);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let path = PathBuf::from("/nonexistent/autofiller.yaml");
        let loaded = load_config(Some(&path)).await.unwrap();
        assert_eq!(loaded.config.settle_delay_ms, 1000);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "settle_delay_ms: [not, a, number]\n").unwrap();
        assert!(load_config(Some(&path)).await.is_err());
    }
}
