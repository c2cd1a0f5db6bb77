use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use autofill_flow::{MemoryProfileStore, ProfileStore};
use field_catalog::ProfileRecord;
use tracing::{debug, warn};

use crate::config::Config;
use crate::profile_file::FileProfileStore;

pub struct CliContext {
    config: Arc<Config>,
    config_path: PathBuf,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `--profile` wins over the configured path. With neither, the engine
    /// runs against an empty profile.
    pub fn profile_store(&self, explicit: Option<&Path>) -> Arc<dyn ProfileStore> {
        match explicit.or(self.config.profile_path.as_deref()) {
            Some(path) => {
                debug!(path = %path.display(), "using profile file");
                Arc::new(FileProfileStore::new(path))
            }
            None => {
                warn!("no profile configured; only fixed answers will be filled");
                Arc::new(MemoryProfileStore::new(ProfileRecord::new()))
            }
        }
    }

    /// Like [`Self::profile_store`] but fails loudly, for commands whose whole
    /// output depends on the profile.
    pub async fn load_profile(&self, explicit: Option<&Path>) -> Result<ProfileRecord> {
        self.profile_store(explicit)
            .snapshot()
            .await
            .context("Failed to load profile")
    }
}
