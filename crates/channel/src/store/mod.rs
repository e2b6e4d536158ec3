//! Pluggable persistence for hazard reports.

pub mod traits;

#[cfg(feature = "serde")]
pub mod json;

pub use traits::{MemoryStore, ReportStore};

#[cfg(feature = "serde")]
pub use json::JsonFileStore;
