//! Metric catalog
//!
//! The catalog is an immutable table of every metric the app can chart. Each
//! entry carries its presentation metadata and the native record type it maps
//! to on each platform. A metric is available on a platform exactly when it
//! names a record type there.
//!
//! Lookups by id go through an index built once on first use and shared
//! read-only afterwards.

mod definitions;

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::types::{MetricCategory, Platform, VisualKind};

use definitions::METRICS;

/// Definition of a single trackable metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDefinition {
    /// Stable snake_case identifier
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: MetricCategory,
    pub unit: &'static str,
    pub visual_kind: VisualKind,
    /// HealthKit type identifier
    pub healthkit_type: Option<&'static str>,
    /// Health Connect record type
    pub health_connect_type: Option<&'static str>,
    /// Optional daily target
    pub goal: Option<f64>,
}

impl MetricDefinition {
    pub const fn new(
        id: &'static str,
        display_name: &'static str,
        category: MetricCategory,
        unit: &'static str,
        visual_kind: VisualKind,
    ) -> Self {
        Self {
            id,
            display_name,
            category,
            unit,
            visual_kind,
            healthkit_type: None,
            health_connect_type: None,
            goal: None,
        }
    }

    pub const fn healthkit(mut self, record_type: &'static str) -> Self {
        self.healthkit_type = Some(record_type);
        self
    }

    pub const fn health_connect(mut self, record_type: &'static str) -> Self {
        self.health_connect_type = Some(record_type);
        self
    }

    pub const fn goal(mut self, goal: f64) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Native record type on the given platform, if any
    pub fn record_type(&self, platform: Platform) -> Option<&'static str> {
        match platform {
            Platform::HealthKit => self.healthkit_type,
            Platform::HealthConnect => self.health_connect_type,
        }
    }

    pub fn is_available_on(&self, platform: Platform) -> bool {
        self.record_type(platform).is_some()
    }
}

/// Every metric in declaration order
pub fn all() -> &'static [MetricDefinition] {
    METRICS
}

fn index() -> &'static HashMap<&'static str, &'static MetricDefinition> {
    static INDEX: OnceLock<HashMap<&'static str, &'static MetricDefinition>> = OnceLock::new();
    INDEX.get_or_init(|| METRICS.iter().map(|m| (m.id, m)).collect())
}

/// Look up a metric by id; unknown ids return `None`
pub fn lookup(id: &str) -> Option<&'static MetricDefinition> {
    index().get(id).copied()
}

pub fn list_by_category(category: MetricCategory) -> Vec<&'static MetricDefinition> {
    METRICS.iter().filter(|m| m.category == category).collect()
}

pub fn list_for_platform(platform: Platform) -> Vec<&'static MetricDefinition> {
    METRICS
        .iter()
        .filter(|m| m.is_available_on(platform))
        .collect()
}

/// Integrity problem found in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogIssue {
    DuplicateId(&'static str),
    NoNativeSource(&'static str),
}

/// Check catalog invariants: unique ids and at least one native source each
pub fn validate_catalog() -> Vec<CatalogIssue> {
    validate_definitions(METRICS)
}

fn validate_definitions(definitions: &[MetricDefinition]) -> Vec<CatalogIssue> {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for def in definitions {
        if !seen.insert(def.id) {
            issues.push(CatalogIssue::DuplicateId(def.id));
        }
        if def.healthkit_type.is_none() && def.health_connect_type.is_none() {
            issues.push(CatalogIssue::NoNativeSource(def.id));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_integrity() {
        assert_eq!(validate_catalog(), Vec::<CatalogIssue>::new());
        assert_eq!(all().len(), 117);
    }

    #[test]
    fn test_every_entry_has_a_native_source() {
        for def in all() {
            assert!(
                def.is_available_on(Platform::HealthKit)
                    || def.is_available_on(Platform::HealthConnect),
                "{} has no native source",
                def.id
            );
        }
    }

    #[test]
    fn test_ids_are_snake_case() {
        for def in all() {
            assert!(
                def.id
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "{} is not snake_case",
                def.id
            );
        }
    }

    #[test]
    fn test_lookup() {
        let steps = lookup("steps").unwrap();
        assert_eq!(steps.category, MetricCategory::Activity);
        assert_eq!(steps.goal, Some(10_000.0));
        assert_eq!(steps.visual_kind, VisualKind::ScalarBar);

        let bp = lookup("blood_pressure").unwrap();
        assert_eq!(bp.visual_kind, VisualKind::DualComponentLine);
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        assert!(lookup("not_a_metric").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("Steps").is_none());
    }

    #[test]
    fn test_every_category_is_populated() {
        let mut total = 0;
        for category in MetricCategory::ALL {
            let metrics = list_by_category(category);
            assert!(!metrics.is_empty(), "{} is empty", category);
            assert!(metrics.iter().all(|m| m.category == category));
            total += metrics.len();
        }
        assert_eq!(total, all().len());
    }

    #[test]
    fn test_list_by_category_keeps_declaration_order() {
        let ids: Vec<&str> = list_by_category(MetricCategory::Sleep)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids.first(), Some(&"sleep_duration"));
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_list_for_platform() {
        let hk = list_for_platform(Platform::HealthKit);
        let hc = list_for_platform(Platform::HealthConnect);

        assert!(hk.iter().all(|m| m.healthkit_type.is_some()));
        assert!(hc.iter().all(|m| m.health_connect_type.is_some()));

        // HealthKit-only and Health Connect-only metrics exist
        assert!(hk.iter().any(|m| m.id == "mood"));
        assert!(!hc.iter().any(|m| m.id == "mood"));
        assert!(hc.iter().any(|m| m.id == "total_calories"));
        assert!(!hk.iter().any(|m| m.id == "total_calories"));

        let union: HashSet<&str> = hk.iter().chain(hc.iter()).map(|m| m.id).collect();
        assert_eq!(union.len(), all().len());
    }

    #[test]
    fn test_concurrent_first_lookup() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| lookup("hrv").map(|m| m.unit)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some("ms"));
        }
    }

    #[test]
    fn test_validate_reports_problems() {
        let broken = [
            MetricDefinition::new("a", "A", MetricCategory::Body, "kg", VisualKind::ScalarBar)
                .healthkit("HKA"),
            MetricDefinition::new("a", "A", MetricCategory::Body, "kg", VisualKind::ScalarBar)
                .health_connect("A"),
            MetricDefinition::new("b", "B", MetricCategory::Body, "kg", VisualKind::ScalarBar),
        ];
        assert_eq!(
            validate_definitions(&broken),
            vec![
                CatalogIssue::DuplicateId("a"),
                CatalogIssue::NoNativeSource("b"),
            ]
        );
    }
}
