//! # hidrovia-channel
//!
//! Waterway channel geometry: snap navigation buoys onto a channel
//! centerline and keep track of hazard reports along the way.
//!
//! ## Features
//!
//! - **Snapping**: nearest point on a polyline, with a distance threshold
//! - **Haversine distances**: great-circle meters on a 6371 km sphere
//! - **Hazard reports**: file, confirm and resolve reports, query by radius
//! - **Pluggable storage**: implement [`store::ReportStore`] or use the JSON
//!   file store (`serde` feature)
//!
//! Projection onto segments uses a local equirectangular approximation,
//! which is accurate over a few kilometers at low and moderate latitudes.
//!
//! ## Example
//!
//! ```
//! use hidrovia_channel::prelude::*;
//!
//! let channel = Channel::new(
//!     "Barra Bonita",
//!     vec![GeoPoint::new(-22.4750, -48.5400), GeoPoint::new(-22.4855, -48.5485)],
//! )?;
//!
//! let snap = channel
//!     .snap(GeoPoint::new(-22.4800, -48.5440), &SnapConfig::default())?
//!     .expect("channel has a segment");
//!
//! assert!(snap.within_threshold);
//! assert!(snap.distance_m < 50.0);
//! # Ok::<(), hidrovia_channel::ChannelError>(())
//! ```

pub mod channel;
pub mod identifiers;
pub mod models;
pub mod reports;
pub mod spatial;
pub mod store;

// Re-exports for convenience
pub mod prelude {
    pub use crate::channel::Channel;
    pub use crate::identifiers::*;
    pub use crate::models::{buoy::*, report::*, types::*};
    pub use crate::reports::ReportRegistry;
    pub use crate::spatial::queries::{
        distance_meters, nearest_point_on_polyline, project_point_onto_segment,
    };
    pub use crate::store::{MemoryStore, ReportStore};

    #[cfg(feature = "serde")]
    pub use crate::store::JsonFileStore;
}

pub use prelude::*;
