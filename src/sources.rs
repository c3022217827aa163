//! Source reader interfaces
//!
//! The native platform bridge and the cloud analytics service are external
//! collaborators. This module defines the asynchronous read API the resolver
//! consumes from them, plus the raw record shapes they return.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SourceResult;

/// Quantities read as one cumulative total per calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyQuantity {
    Steps,
    ActiveEnergy,
    TotalEnergy,
    Distance,
    FlightsClimbed,
    DietaryEnergy,
}

impl DailyQuantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DailyQuantity::Steps => "steps",
            DailyQuantity::ActiveEnergy => "active_energy",
            DailyQuantity::TotalEnergy => "total_energy",
            DailyQuantity::Distance => "distance",
            DailyQuantity::FlightsClimbed => "flights_climbed",
            DailyQuantity::DietaryEnergy => "dietary_energy",
        }
    }
}

/// Quantities read as the single most recent sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatestQuantity {
    Weight,
    BodyFat,
    RestingHeartRate,
    HeartRateVariability,
    HeartRate,
    Vo2Max,
    OxygenSaturation,
    RespiratoryRate,
}

impl LatestQuantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            LatestQuantity::Weight => "weight",
            LatestQuantity::BodyFat => "body_fat",
            LatestQuantity::RestingHeartRate => "resting_heart_rate",
            LatestQuantity::HeartRateVariability => "heart_rate_variability",
            LatestQuantity::HeartRate => "heart_rate",
            LatestQuantity::Vo2Max => "vo2_max",
            LatestQuantity::OxygenSaturation => "oxygen_saturation",
            LatestQuantity::RespiratoryRate => "respiratory_rate",
        }
    }
}

/// One raw sleep segment as recorded by the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepSegment {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SleepSegment {
    /// Segment length in hours; inverted segments count as zero
    pub fn hours(&self) -> f64 {
        ((self.end - self.start).num_seconds() as f64 / 3600.0).max(0.0)
    }
}

/// Latest blood pressure reading (mmHg)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    pub systolic: f64,
    #[serde(default)]
    pub diastolic: Option<f64>,
}

/// Asynchronous reader over the device's native health store.
///
/// Implementations return `Ok(None)` or an empty list for "no data". They may
/// be slow or never resolve; the resolver bounds every call with a timeout.
#[async_trait]
pub trait NativeHealthReader: Send + Sync {
    /// Cumulative total for a quantity over one local calendar day
    async fn daily_total(&self, quantity: DailyQuantity, day: NaiveDate)
        -> SourceResult<Option<f64>>;

    /// Most recent sample of a quantity
    async fn latest_sample(&self, quantity: LatestQuantity) -> SourceResult<Option<f64>>;

    /// Sleep segments overlapping `[start, end)`
    async fn sleep_segments(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SourceResult<Vec<SleepSegment>>;

    /// Most recent blood pressure reading
    async fn latest_blood_pressure(&self) -> SourceResult<Option<BloodPressureReading>>;
}

/// Parallel date/value arrays for one weekly trend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// `YYYY-MM-DD` strings
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

/// The cloud service's 7-day trend bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrends {
    #[serde(default)]
    pub steps: TrendSeries,
    #[serde(default)]
    pub calories_out: TrendSeries,
    #[serde(default)]
    pub calories_in: TrendSeries,
    #[serde(default)]
    pub sleep_hours: TrendSeries,
}

/// The cloud service's flat single-day summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub steps: Option<f64>,
    pub calories_out: Option<f64>,
    pub calories_in: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub distance_km: Option<f64>,
    pub resting_heart_rate: Option<f64>,
    pub weight_kg: Option<f64>,
}

/// Asynchronous reader over the remote analytics service.
///
/// Expected to fail when the service is unreachable.
#[async_trait]
pub trait CloudAnalyticsReader: Send + Sync {
    /// Trend arrays for the last seven days
    async fn weekly_trends(&self) -> SourceResult<WeeklyTrends>;

    /// Summary for one calendar day
    async fn daily_summary(&self, day: NaiveDate) -> SourceResult<DailySummary>;
}
