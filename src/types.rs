//! Core types for the Synheart Vitals resolution engine
//!
//! This module defines the data structures shared by the catalog, the source
//! adapters and the resolver: platform and category tags, time windows,
//! canonical data points, aggregate statistics and the resolved series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::VitalsError;

/// Native health platform a metric can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Apple HealthKit (primary platform)
    HealthKit,
    /// Android Health Connect
    HealthConnect,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::HealthKit => "health_kit",
            Platform::HealthConnect => "health_connect",
        }
    }

    /// Whether this is the primary platform
    pub fn is_primary(&self) -> bool {
        matches!(self, Platform::HealthKit)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "health_kit" | "healthkit" | "ios" => Ok(Platform::HealthKit),
            "health_connect" | "healthconnect" | "android" => Ok(Platform::HealthConnect),
            other => Err(VitalsError::InvalidPlatform(other.to_string())),
        }
    }
}

/// Metric category (exactly one per metric)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Activity,
    Body,
    Heart,
    Vitals,
    Sleep,
    Nutrition,
    Cycle,
    Wellness,
    Mobility,
    Environment,
}

impl MetricCategory {
    pub const ALL: [MetricCategory; 10] = [
        MetricCategory::Activity,
        MetricCategory::Body,
        MetricCategory::Heart,
        MetricCategory::Vitals,
        MetricCategory::Sleep,
        MetricCategory::Nutrition,
        MetricCategory::Cycle,
        MetricCategory::Wellness,
        MetricCategory::Mobility,
        MetricCategory::Environment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricCategory::Activity => "activity",
            MetricCategory::Body => "body",
            MetricCategory::Heart => "heart",
            MetricCategory::Vitals => "vitals",
            MetricCategory::Sleep => "sleep",
            MetricCategory::Nutrition => "nutrition",
            MetricCategory::Cycle => "cycle",
            MetricCategory::Wellness => "wellness",
            MetricCategory::Mobility => "mobility",
            MetricCategory::Environment => "environment",
        }
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricCategory {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        MetricCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or(VitalsError::InvalidCategory(wanted))
    }
}

/// Preferred chart style for a metric.
///
/// Only the rendering layer dispatches on this; resolution ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualKind {
    ScalarBar,
    ContinuousLine,
    RangedLine,
    DualComponentLine,
    SegmentedStack,
    ThresholdedLine,
    DayIntensityGrid,
    DayEventGrid,
    MoodScale,
    SingleLatestValue,
    BarLineOverlay,
}

/// Selectable query window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Instant,
    Day,
    Week,
    Month,
    SixMonths,
    Year,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::Instant,
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::SixMonths,
        TimeWindow::Year,
    ];

    /// Short label shown in window pickers
    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Instant => "Now",
            TimeWindow::Day => "1D",
            TimeWindow::Week => "1W",
            TimeWindow::Month => "1M",
            TimeWindow::SixMonths => "6M",
            TimeWindow::Year => "1Y",
        }
    }

    /// Number of days covered; `start = anchor - days`
    pub fn days(&self) -> i64 {
        match self {
            TimeWindow::Instant => 0,
            TimeWindow::Day => 1,
            TimeWindow::Week => 7,
            TimeWindow::Month => 30,
            TimeWindow::SixMonths => 180,
            TimeWindow::Year => 365,
        }
    }

    fn key(&self) -> &'static str {
        match self {
            TimeWindow::Instant => "instant",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::SixMonths => "six_months",
            TimeWindow::Year => "year",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TimeWindow {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.key() == wanted || w.label().eq_ignore_ascii_case(&wanted))
            .ok_or(VitalsError::InvalidWindow(s.to_string()))
    }
}

/// Canonical measurement produced from any raw record shape.
///
/// Identity covers `(timestamp, value, range_min, range_max)`; the component
/// breakdown is derived from `value` and excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    /// Primary reading (rollup when components are present)
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<BTreeMap<String, f64>>,
}

impl DataPoint {
    pub fn scalar(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp,
            value,
            range_min: None,
            range_max: None,
            components: None,
        }
    }

    pub fn ranged(timestamp: DateTime<Utc>, value: f64, min: f64, max: f64) -> Self {
        Self {
            range_min: Some(min),
            range_max: Some(max),
            ..Self::scalar(timestamp, value)
        }
    }

    pub fn with_components(
        timestamp: DateTime<Utc>,
        value: f64,
        components: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            components: Some(components),
            ..Self::scalar(timestamp, value)
        }
    }

    /// Look up a named component
    pub fn component(&self, name: &str) -> Option<f64> {
        self.components.as_ref().and_then(|c| c.get(name).copied())
    }

    fn identity(&self) -> (i64, u32, u64, Option<u64>, Option<u64>) {
        (
            self.timestamp.timestamp(),
            self.timestamp.timestamp_subsec_nanos(),
            self.value.to_bits(),
            self.range_min.map(f64::to_bits),
            self.range_max.map(f64::to_bits),
        )
    }
}

impl PartialEq for DataPoint {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for DataPoint {}

impl Hash for DataPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// Aggregate statistics over a series, all rounded to two decimals.
///
/// Produced by [`crate::stats::compute_stats`]; the default value is the
/// canonical "no data" result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
    /// Late-quartile mean vs early-quartile mean, in percent
    pub trend_percent: f64,
}

impl AggregateStats {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A fully resolved, ready-to-render series for one metric over one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub metric_id: String,
    pub window: TimeWindow,
    /// Chronological, possibly empty
    pub points: Vec<DataPoint>,
    pub stats: AggregateStats,
}

impl Series {
    /// The canonical empty result: no points and zeroed stats
    pub fn empty(metric_id: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            metric_id: metric_id.into(),
            window,
            points: Vec::new(),
            stats: AggregateStats::zero(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value of the most recent point
    pub fn latest_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }
}
