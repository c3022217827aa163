//! Recorded sources
//!
//! Reader implementations that replay a JSON fixture instead of talking to a
//! device or a server. The CLI resolves against these, and they double as a
//! compact way to describe source behavior in tests.
//!
//! ```json
//! {
//!   "native": {
//!     "daily": { "steps": { "2024-03-10": 8500 } },
//!     "latest": { "weight": 72.4 },
//!     "sleep_segments": [{ "start": "2024-03-09T22:00:00Z", "end": "2024-03-10T06:00:00Z" }],
//!     "blood_pressure": { "systolic": 118, "diastolic": 76 }
//!   },
//!   "cloud": {
//!     "weekly": { "steps": { "dates": ["2024-03-10"], "values": [9000] } },
//!     "daily": { "2024-03-10": { "steps": 9100 } }
//!   }
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{SourceError, SourceResult, VitalsError};
use crate::sources::{
    BloodPressureReading, CloudAnalyticsReader, DailyQuantity, DailySummary, LatestQuantity,
    NativeHealthReader, SleepSegment, WeeklyTrends,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A full fixture: native store contents plus an optional cloud service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub native: RecordedNative,
    /// Absent means the resolver runs without a cloud fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<RecordedCloud>,
}

impl Recording {
    pub fn from_json(json: &str) -> Result<Self, VitalsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VitalsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Split into shareable reader handles
    pub fn into_readers(
        self,
    ) -> (
        Arc<dyn NativeHealthReader>,
        Option<Arc<dyn CloudAnalyticsReader>>,
    ) {
        let cloud = self
            .cloud
            .map(|c| Arc::new(c) as Arc<dyn CloudAnalyticsReader>);
        (Arc::new(self.native), cloud)
    }
}

/// Replayed native health store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedNative {
    /// Quantity name -> `YYYY-MM-DD` -> daily total
    pub daily: BTreeMap<String, BTreeMap<String, f64>>,
    /// Quantity name -> latest sample
    pub latest: BTreeMap<String, f64>,
    pub sleep_segments: Vec<SleepSegment>,
    pub blood_pressure: Option<BloodPressureReading>,
    /// Every read pends forever
    pub unresponsive: bool,
    /// Every read fails
    pub failing: bool,
}

impl RecordedNative {
    async fn gate(&self, what: &str) -> SourceResult<()> {
        if self.unresponsive {
            std::future::pending::<()>().await;
        }
        if self.failing {
            return Err(SourceError::Backend(format!("recorded failure reading {}", what)));
        }
        Ok(())
    }
}

#[async_trait]
impl NativeHealthReader for RecordedNative {
    async fn daily_total(
        &self,
        quantity: DailyQuantity,
        day: NaiveDate,
    ) -> SourceResult<Option<f64>> {
        self.gate(quantity.as_str()).await?;
        let key = day.format(DATE_FORMAT).to_string();
        Ok(self
            .daily
            .get(quantity.as_str())
            .and_then(|days| days.get(&key))
            .copied())
    }

    async fn latest_sample(&self, quantity: LatestQuantity) -> SourceResult<Option<f64>> {
        self.gate(quantity.as_str()).await?;
        Ok(self.latest.get(quantity.as_str()).copied())
    }

    async fn sleep_segments(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SourceResult<Vec<SleepSegment>> {
        self.gate("sleep").await?;
        Ok(self
            .sleep_segments
            .iter()
            .filter(|s| s.end > start && s.start < end)
            .copied()
            .collect())
    }

    async fn latest_blood_pressure(&self) -> SourceResult<Option<BloodPressureReading>> {
        self.gate("blood pressure").await?;
        Ok(self.blood_pressure)
    }
}

/// Replayed cloud analytics service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedCloud {
    pub weekly: Option<WeeklyTrends>,
    /// `YYYY-MM-DD` -> summary
    pub daily: BTreeMap<String, DailySummary>,
    /// Every read fails as if the service were unreachable
    pub unavailable: bool,
}

#[async_trait]
impl CloudAnalyticsReader for RecordedCloud {
    async fn weekly_trends(&self) -> SourceResult<WeeklyTrends> {
        if self.unavailable {
            return Err(SourceError::Unavailable("recorded cloud is offline".to_string()));
        }
        self.weekly
            .clone()
            .ok_or_else(|| SourceError::NoFixture("weekly trends".to_string()))
    }

    async fn daily_summary(&self, day: NaiveDate) -> SourceResult<DailySummary> {
        if self.unavailable {
            return Err(SourceError::Unavailable("recorded cloud is offline".to_string()));
        }
        let key = day.format(DATE_FORMAT).to_string();
        self.daily
            .get(&key)
            .cloned()
            .ok_or(SourceError::NoFixture(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::resolver::MetricResolver;
    use crate::types::TimeWindow;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const FIXTURE: &str = r#"{
        "native": {
            "daily": { "steps": { "2024-03-09": 8500, "2024-03-10": 4200 } },
            "latest": { "weight": 72.4 },
            "sleep_segments": [
                { "start": "2024-03-01T22:00:00Z", "end": "2024-03-02T06:00:00Z" },
                { "start": "2024-03-09T22:00:00Z", "end": "2024-03-10T06:00:00Z" }
            ],
            "blood_pressure": { "systolic": 118, "diastolic": 76 }
        },
        "cloud": {
            "weekly": { "calories_in": { "dates": ["2024-03-09"], "values": [2300] } },
            "daily": { "2024-03-10": { "steps": 9100 } }
        }
    }"#;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_native_replay() {
        let recording = Recording::from_json(FIXTURE).unwrap();
        let native = &recording.native;

        assert_eq!(
            native.daily_total(DailyQuantity::Steps, day(9)).await.unwrap(),
            Some(8_500.0)
        );
        assert_eq!(native.daily_total(DailyQuantity::Steps, day(8)).await.unwrap(), None);
        assert_eq!(
            native.latest_sample(LatestQuantity::Weight).await.unwrap(),
            Some(72.4)
        );
        assert_eq!(native.latest_sample(LatestQuantity::BodyFat).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sleep_segments_filtered_to_range() {
        let recording = Recording::from_json(FIXTURE).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

        let segments = recording.native.sleep_segments(start, end).await.unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].hours(), 8.0);
    }

    #[tokio::test]
    async fn test_failing_native_errors() {
        let native = RecordedNative {
            failing: true,
            ..Default::default()
        };
        let result = native.latest_blood_pressure().await;
        assert!(matches!(result, Err(SourceError::Backend(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_native_never_resolves() {
        let native = RecordedNative {
            unresponsive: true,
            ..Default::default()
        };
        let read = native.latest_sample(LatestQuantity::HeartRate);
        assert!(tokio::time::timeout(Duration::from_secs(60), read).await.is_err());
    }

    #[tokio::test]
    async fn test_cloud_missing_fixture() {
        let cloud = RecordedCloud::default();
        assert!(matches!(
            cloud.weekly_trends().await,
            Err(SourceError::NoFixture(_))
        ));
        assert!(matches!(
            cloud.daily_summary(day(1)).await,
            Err(SourceError::NoFixture(_))
        ));

        let offline = RecordedCloud {
            unavailable: true,
            ..Default::default()
        };
        assert!(matches!(
            offline.weekly_trends().await,
            Err(SourceError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_resolver_over_recording() {
        let (native, cloud) = Recording::from_json(FIXTURE).unwrap().into_readers();
        let resolver = MetricResolver::new(native, cloud, ResolverConfig::default()).unwrap();
        let anchor = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();

        let steps = resolver
            .resolve_series_at("steps", TimeWindow::Week, anchor, anchor)
            .await;
        let values: Vec<f64> = steps.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![8_500.0, 4_200.0]);

        // Nothing native for dietary energy, so the weekly cloud series answers
        let intake = resolver
            .resolve_series_at("dietary_energy", TimeWindow::Week, anchor, anchor)
            .await;
        assert_eq!(intake.latest_value(), Some(2_300.0));

        let sleep = resolver
            .resolve_series_at("sleep_duration", TimeWindow::Week, anchor, anchor)
            .await;
        assert_eq!(sleep.latest_value(), Some(8.0));
    }

    #[test]
    fn test_empty_document_is_valid() {
        let recording = Recording::from_json("{}").unwrap();
        assert!(recording.cloud.is_none());
        assert!(!recording.native.unresponsive);
    }
}
