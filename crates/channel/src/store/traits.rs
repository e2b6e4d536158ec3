//! Storage traits for hazard reports.
//!
//! External crates implement [`ReportStore`] to keep reports wherever suits
//! them; the whole list is read and written at once.

use std::sync::Mutex;

use crate::models::report::HazardReport;
use crate::models::types::{ChannelError, Result};

/// Load and save the full list of reports
pub trait ReportStore: Send + Sync {
    /// `Ok(None)` when nothing has ever been saved
    fn load(&self) -> Result<Option<Vec<HazardReport>>>;

    fn save(&self, reports: &[HazardReport]) -> Result<()>;
}

/// Store that keeps reports in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: Mutex<Option<Vec<HazardReport>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<HazardReport>>> {
        let reports = self
            .reports
            .lock()
            .map_err(|e| ChannelError::Storage(e.to_string()))?;
        Ok(reports.clone())
    }

    fn save(&self, reports: &[HazardReport]) -> Result<()> {
        let mut stored = self
            .reports
            .lock()
            .map_err(|e| ChannelError::Storage(e.to_string()))?;
        *stored = Some(reports.to_vec());
        Ok(())
    }
}
