//! In-memory hazard report registry with spatial lookup.

use std::collections::HashSet;
use std::fmt;

use rstar::RTree;
use tracing::{debug, info};

use crate::identifiers::ReportIdentifier;
use crate::models::report::{HazardReport, NewReport, ReportKind, ReportStatus, Severity};
use crate::models::types::{ChannelError, GeoPoint, Result};
use crate::spatial::index::ReportNode;
use crate::spatial::queries::{distance_meters, search_bounds};
use crate::store::ReportStore;

/// Active hazard reports, kept in filing order.
#[derive(Clone, Default)]
pub struct ReportRegistry {
    reports: Vec<HazardReport>,
    tree: RTree<ReportNode>,
}

impl fmt::Debug for ReportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportRegistry")
            .field("reports", &self.reports)
            .finish_non_exhaustive()
    }
}

impl ReportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from previously stored reports
    pub fn from_reports(reports: Vec<HazardReport>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(reports.len());
        for report in &reports {
            report.position.validate()?;
            if !seen.insert(report.id.clone()) {
                return Err(ChannelError::InvalidData(format!(
                    "duplicate report id {}",
                    report.id
                )));
            }
        }

        let tree = RTree::bulk_load(
            reports
                .iter()
                .map(|r| ReportNode::new(r.position, r.id.clone()))
                .collect(),
        );

        Ok(Self { reports, tree })
    }

    /// Registry holding the demonstration report shown on a fresh install
    pub fn seeded(now_ms: i64) -> Self {
        let report = HazardReport {
            id: ReportIdentifier::generate(),
            kind: ReportKind::Hazard,
            title: "Tronco submerso".into(),
            description: "Visível na margem esquerda em baixa vazão".into(),
            severity: Severity::High,
            position: GeoPoint::new(-22.5002, -48.5668),
            status: ReportStatus::Active,
            confirmations: 0,
            updated_at_ms: now_ms,
        };

        let mut tree = RTree::new();
        tree.insert(ReportNode::new(report.position, report.id.clone()));

        Self {
            reports: vec![report],
            tree,
        }
    }

    /// Load stored reports, falling back to [`seeded`](Self::seeded) when the
    /// store has never been written. The seed is saved right away.
    pub fn load_or_seed(store: &dyn ReportStore, now_ms: i64) -> Result<Self> {
        match store.load()? {
            Some(reports) => {
                debug!(count = reports.len(), "loaded stored reports");
                Self::from_reports(reports)
            }
            None => {
                info!("no stored reports, seeding demonstration data");
                let registry = Self::seeded(now_ms);
                registry.persist(store)?;
                Ok(registry)
            }
        }
    }

    pub fn persist(&self, store: &dyn ReportStore) -> Result<()> {
        store.save(&self.reports)
    }

    pub fn add(&mut self, new: NewReport, now_ms: i64) -> Result<&HazardReport> {
        new.position.validate()?;

        let report = HazardReport {
            id: ReportIdentifier::generate(),
            kind: new.kind,
            title: new.title.trim().into(),
            description: new.description.trim().into(),
            severity: new.severity,
            position: new.position,
            status: ReportStatus::Active,
            confirmations: 0,
            updated_at_ms: now_ms,
        };
        info!(id = %report.id, kind = report.kind.code(), "report filed");

        self.tree.insert(ReportNode::new(report.position, report.id.clone()));
        self.reports.push(report);
        Ok(&self.reports[self.reports.len() - 1])
    }

    /// Record that the hazard is still present
    pub fn confirm(&mut self, id: &ReportIdentifier, now_ms: i64) -> Result<&HazardReport> {
        let index = self.index_of(id)?;
        let report = &mut self.reports[index];
        report.confirmations = report.confirmations.saturating_add(1);
        report.updated_at_ms = now_ms;
        debug!(id = %report.id, confirmations = report.confirmations, "report confirmed");
        Ok(report)
    }

    /// Remove a report whose hazard is gone
    pub fn resolve(&mut self, id: &ReportIdentifier) -> Result<HazardReport> {
        let index = self.index_of(id)?;
        let report = self.reports.remove(index);
        self.tree.remove(&ReportNode::new(report.position, report.id.clone()));
        info!(id = %report.id, "report resolved");
        Ok(report)
    }

    pub fn get(&self, id: &ReportIdentifier) -> Option<&HazardReport> {
        self.reports.iter().find(|r| &r.id == id)
    }

    pub fn all(&self) -> &[HazardReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Reports within `radius_m` meters of `point`, in filing order
    pub fn reports_near(&self, point: GeoPoint, radius_m: f64) -> Vec<&HazardReport> {
        // Validate radius is positive
        if radius_m <= 0.0 || !radius_m.is_finite() || !point.is_finite() {
            return Vec::new();
        }

        // Circle around the cap's bounding box, in degree space
        let [min, max] = search_bounds(point, radius_m);
        let center = [(min[0] + max[0]) * 0.5, (min[1] + max[1]) * 0.5];
        let half = [(max[0] - min[0]) * 0.5, (max[1] - min[1]) * 0.5];

        let ids: HashSet<&ReportIdentifier> = self
            .tree
            .locate_within_distance(center, half[0] * half[0] + half[1] * half[1])
            .filter(|node| distance_meters(point, node.position()) <= radius_m)
            .map(|node| &node.id)
            .collect();

        self.reports.iter().filter(|r| ids.contains(&r.id)).collect()
    }

    fn index_of(&self, id: &ReportIdentifier) -> Result<usize> {
        self.reports
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| ChannelError::ReportNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn new_report(title: &str, lat: f64, lng: f64) -> NewReport {
        NewReport {
            kind: ReportKind::Anomaly,
            title: title.into(),
            description: "  ".into(),
            severity: Severity::Low,
            position: GeoPoint::new(lat, lng),
        }
    }

    #[test]
    fn test_add_confirm_resolve() {
        let mut registry = ReportRegistry::new();

        let id = registry
            .add(new_report("  Banco de areia ", -22.5010, -48.5660), 1_000)
            .unwrap()
            .id
            .clone();
        assert_eq!(registry.len(), 1);

        let report = registry.get(&id).unwrap();
        assert_eq!(&*report.title, "Banco de areia");
        assert_eq!(&*report.description, "");
        assert_eq!(report.confirmations, 0);
        assert_eq!(report.status, ReportStatus::Active);

        let confirmed = registry.confirm(&id, 2_000).unwrap();
        assert_eq!(confirmed.confirmations, 1);
        assert_eq!(confirmed.updated_at_ms, 2_000);

        let resolved = registry.resolve(&id).unwrap();
        assert_eq!(resolved.id, id);
        assert!(registry.is_empty());
        assert!(registry.reports_near(GeoPoint::new(-22.5010, -48.5660), 1_000.0).is_empty());
    }

    #[test]
    fn test_unknown_id() {
        let mut registry = ReportRegistry::seeded(0);
        let missing = ReportIdentifier::new("id-missing");

        assert!(matches!(registry.confirm(&missing, 1), Err(ChannelError::ReportNotFound(_))));
        assert!(matches!(registry.resolve(&missing), Err(ChannelError::ReportNotFound(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_rejects_non_finite_position() {
        let mut registry = ReportRegistry::new();
        assert!(registry.add(new_report("x", f64::NAN, -48.5), 0).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reports_near() {
        let mut registry = ReportRegistry::new();
        registry.add(new_report("close", -22.5002, -48.5668), 0).unwrap();
        registry.add(new_report("across", -22.5030, -48.5668), 0).unwrap();
        registry.add(new_report("far", -22.5250, -48.5930), 0).unwrap();

        let center = GeoPoint::new(-22.5000, -48.5668);
        let titles: Vec<_> = registry
            .reports_near(center, 500.0)
            .iter()
            .map(|r| r.title.to_string())
            .collect();
        assert_eq!(titles, ["close", "across"]);

        assert!(registry.reports_near(center, 0.0).is_empty());
        assert!(registry.reports_near(center, f64::NAN).is_empty());
    }

    #[test]
    fn test_from_reports_rejects_duplicate_ids() {
        let report = ReportRegistry::seeded(0).all()[0].clone();

        let err = ReportRegistry::from_reports(vec![report.clone(), report.clone()]).unwrap_err();
        assert!(matches!(err, ChannelError::InvalidData(_)));

        let registry = ReportRegistry::from_reports(vec![report.clone()]).unwrap();
        assert_eq!(registry.reports_near(report.position, 100.0).len(), 1);
    }

    #[test]
    fn test_confirm_saturates() {
        let mut report = ReportRegistry::seeded(0).all()[0].clone();
        report.confirmations = u32::MAX;
        let id = report.id.clone();

        let mut registry = ReportRegistry::from_reports(vec![report]).unwrap();
        assert_eq!(registry.confirm(&id, 5).unwrap().confirmations, u32::MAX);
        assert_eq!(registry.get(&id).unwrap().updated_at_ms, 5);
    }

    #[test]
    fn test_load_or_seed() {
        let store = MemoryStore::new();

        let seeded = ReportRegistry::load_or_seed(&store, 42).unwrap();
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded.all()[0].display_title(), "Tronco submerso");
        assert_eq!(seeded.all()[0].updated_at_ms, 42);

        // Second load reads back what the seed saved
        let mut loaded = ReportRegistry::load_or_seed(&store, 99).unwrap();
        assert_eq!(loaded.all(), seeded.all());

        let id = loaded.all()[0].id.clone();
        loaded.resolve(&id).unwrap();
        loaded.persist(&store).unwrap();

        // An empty stored list stays empty rather than re-seeding
        assert!(ReportRegistry::load_or_seed(&store, 100).unwrap().is_empty());
    }
}
