//! Navigation markers placed along the channel.

use std::sync::Arc;

use crate::identifiers::BuoyIdentifier;
use crate::models::types::GeoPoint;

/// Marker role (Brazilian inland signalling codes)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuoyKind {
    /// Bombordo (port side), code `BB`
    #[cfg_attr(feature = "serde", serde(rename = "BB"))]
    Port,
    /// Boreste (starboard side), code `EB`
    #[cfg_attr(feature = "serde", serde(rename = "EB"))]
    Starboard,
    /// Special mark, code `ESP`
    #[cfg_attr(feature = "serde", serde(rename = "ESP"))]
    Special,
}

impl BuoyKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "BB" => Some(Self::Port),
            "EB" => Some(Self::Starboard),
            "ESP" => Some(Self::Special),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Port => "BB",
            Self::Starboard => "EB",
            Self::Special => "ESP",
        }
    }
}

/// A buoy with its surveyed (approximate) position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buoy {
    pub id: BuoyIdentifier,
    pub name: Arc<str>,
    pub kind: BuoyKind,
    /// Free-text condition as reported by the survey (e.g. "Boa")
    pub condition: Arc<str>,
    pub position: GeoPoint,
}

impl Buoy {
    /// "Boa" anywhere in the condition text counts as good.
    pub fn is_in_good_condition(&self) -> bool {
        self.condition.to_lowercase().contains("boa")
    }
}

/// Where a buoy ended up after snapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "placement", rename_all = "snake_case"))]
pub enum Placement {
    /// Relocated onto the channel; distance rounded to whole meters
    Snapped { distance_m: u32 },
    /// Too far from the channel (or no channel segment); surveyed position kept
    Unsnapped,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnappedBuoy {
    pub buoy: Buoy,
    /// Snapped position, or the surveyed one when unsnapped
    pub position: GeoPoint,
    pub placement: Placement,
}

impl SnappedBuoy {
    pub fn is_snapped(&self) -> bool {
        matches!(self.placement, Placement::Snapped { .. })
    }

    pub fn snap_distance_m(&self) -> Option<u32> {
        match self.placement {
            Placement::Snapped { distance_m } => Some(distance_m),
            Placement::Unsnapped => None,
        }
    }
}
