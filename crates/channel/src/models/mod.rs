//! Channel data models and types.

pub mod buoy;
pub mod report;
pub mod types;

// Re-exports for convenience
pub use buoy::{Buoy, BuoyKind, Placement, SnappedBuoy};
pub use report::{HazardReport, NewReport, ReportKind, ReportStatus, Severity};
pub use types::{ChannelError, GeoPoint, Result, SnapConfig, SnapResult, DEFAULT_SNAP_THRESHOLD_M};
