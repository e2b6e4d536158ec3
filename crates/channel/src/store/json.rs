//! JSON file store, the on-disk counterpart of browser local storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::report::HazardReport;
use crate::models::types::{ChannelError, Result};
use crate::store::traits::ReportStore;

/// Reports stored as a pretty-printed JSON array in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<HazardReport>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ChannelError::Storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let reports: Vec<HazardReport> = serde_json::from_str(&content).map_err(|e| {
            ChannelError::Serialization(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), count = reports.len(), "read reports");

        Ok(Some(reports))
    }

    fn save(&self, reports: &[HazardReport]) -> Result<()> {
        let json = serde_json::to_string_pretty(reports)
            .map_err(|e| ChannelError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ChannelError::Storage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&self.path, json).map_err(|e| {
            ChannelError::Storage(format!("failed to write {}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), count = reports.len(), "wrote reports");

        Ok(())
    }
}
