//! Profile store backed by a JSON or YAML file on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use autofill_flow::ProfileStore;
use field_catalog::{ProfileError, ProfileRecord};
use tracing::debug;

/// Re-reads the file on every snapshot so edits between passes are picked up.
#[derive(Clone, Debug)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_yaml(&self) -> bool {
        matches!(
            self.path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        )
    }
}

pub fn parse_profile(raw: &str, yaml: bool) -> Result<ProfileRecord, ProfileError> {
    if yaml {
        serde_yaml::from_str(raw).map_err(|err| ProfileError::Decode(err.to_string()))
    } else {
        ProfileRecord::from_json(raw)
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn snapshot(&self) -> Result<ProfileRecord, ProfileError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| {
                ProfileError::Unavailable(format!("{}: {err}", self.path.display()))
            })?;
        let record = parse_profile(&raw, self.is_yaml())?;
        debug!(path = %self.path.display(), keys = record.len(), "profile loaded");
        Ok(record)
    }
}
