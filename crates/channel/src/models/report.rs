//! Hazard reports filed by navigators.

use std::sync::Arc;

use crate::identifiers::ReportIdentifier;
use crate::models::types::GeoPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportKind {
    #[cfg_attr(feature = "serde", serde(rename = "PERIGO"))]
    Hazard,
    #[cfg_attr(feature = "serde", serde(rename = "BOIA_DANIFICADA"))]
    DamagedBuoy,
    #[cfg_attr(feature = "serde", serde(rename = "ANOMALIA"))]
    Anomaly,
}

impl ReportKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PERIGO" => Some(Self::Hazard),
            "BOIA_DANIFICADA" => Some(Self::DamagedBuoy),
            "ANOMALIA" => Some(Self::Anomaly),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Hazard => "PERIGO",
            Self::DamagedBuoy => "BOIA_DANIFICADA",
            Self::Anomaly => "ANOMALIA",
        }
    }

    /// Human-readable label, used when a report has no title
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hazard => "Perigo",
            Self::DamagedBuoy => "Boia danificada",
            Self::Anomaly => "Anomalia",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    #[cfg_attr(feature = "serde", serde(rename = "BAIXA"))]
    Low,
    #[cfg_attr(feature = "serde", serde(rename = "MEDIA"))]
    Medium,
    #[cfg_attr(feature = "serde", serde(rename = "ALTA"))]
    High,
}

impl Severity {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "BAIXA" => Some(Self::Low),
            "MEDIA" => Some(Self::Medium),
            "ALTA" => Some(Self::High),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Low => "BAIXA",
            Self::Medium => "MEDIA",
            Self::High => "ALTA",
        }
    }
}

/// Reports are removed when resolved, so only the active state is stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportStatus {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ATIVO"))]
    Active,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardReport {
    pub id: ReportIdentifier,
    pub kind: ReportKind,
    pub title: Arc<str>,
    pub description: Arc<str>,
    pub severity: Severity,
    pub position: GeoPoint,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: ReportStatus,
    /// Number of "still there" confirmations from other navigators
    #[cfg_attr(feature = "serde", serde(default))]
    pub confirmations: u32,
    /// Unix epoch milliseconds of the last change
    pub updated_at_ms: i64,
}

impl HazardReport {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            self.kind.label()
        } else {
            &self.title
        }
    }
}

/// Input for filing a new report.
#[derive(Clone, Debug, PartialEq)]
pub struct NewReport {
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub position: GeoPoint,
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
