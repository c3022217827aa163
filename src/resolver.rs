//! Metric resolution engine
//!
//! [`MetricResolver`] decides, per request, which source to read and folds
//! the result into a [`Series`]:
//!
//! 1. catalog lookup and platform availability check
//! 2. native read, bounded by the configured timeout
//! 3. cloud fallback, only when native produced nothing
//! 4. statistics over whichever source answered
//!
//! Public operations never fail. Errors, timeouts and genuinely empty reads
//! all collapse into an empty series (or an absent snapshot key) and are only
//! told apart in the logs.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::timeout;
use uuid::Uuid;

use crate::adapters::{cloud, local_date, local_time, native, NativeRule, QueryRange};
use crate::catalog;
use crate::config::ResolverConfig;
use crate::error::{SourceError, VitalsError};
use crate::sources::{CloudAnalyticsReader, NativeHealthReader};
use crate::stats::compute_stats;
use crate::types::{DataPoint, Series, TimeWindow};

/// Outcome of one source read, kept distinct for logging
#[derive(Debug)]
enum ReadOutcome {
    Points(Vec<DataPoint>),
    Empty,
    Failed(SourceError),
    TimedOut,
}

impl ReadOutcome {
    fn from_points(points: Vec<DataPoint>) -> Self {
        if points.is_empty() {
            ReadOutcome::Empty
        } else {
            ReadOutcome::Points(points)
        }
    }

    fn log(&self, request_id: &Uuid, source: &str, metric_id: &str) {
        match self {
            ReadOutcome::Points(points) => {
                debug!("[{}] {} {}: {} points", request_id, source, metric_id, points.len())
            }
            ReadOutcome::Empty => debug!("[{}] {} {}: no data", request_id, source, metric_id),
            ReadOutcome::Failed(e) => {
                warn!("[{}] {} {} failed: {}", request_id, source, metric_id, e)
            }
            ReadOutcome::TimedOut => {
                warn!("[{}] {} {} timed out", request_id, source, metric_id)
            }
        }
    }
}

/// Resolves metric series and today's snapshot values.
///
/// Cheap to share behind an `Arc`; every call is independent. Must be driven
/// from inside a tokio runtime.
pub struct MetricResolver {
    native: Arc<dyn NativeHealthReader>,
    cloud: Option<Arc<dyn CloudAnalyticsReader>>,
    config: ResolverConfig,
}

impl MetricResolver {
    /// Build a resolver; rejects configurations that fail
    /// [`ResolverConfig::validate`]
    pub fn new(
        native: Arc<dyn NativeHealthReader>,
        cloud: Option<Arc<dyn CloudAnalyticsReader>>,
        config: ResolverConfig,
    ) -> Result<Self, VitalsError> {
        config.validate()?;
        Ok(Self {
            native,
            cloud,
            config,
        })
    }

    /// Resolver with no cloud fallback
    pub fn native_only(
        native: Arc<dyn NativeHealthReader>,
        config: ResolverConfig,
    ) -> Result<Self, VitalsError> {
        Self::new(native, None, config)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a metric over a window ending at `anchor` (default: now)
    pub async fn resolve_series(
        &self,
        metric_id: &str,
        window: TimeWindow,
        anchor: Option<DateTime<Utc>>,
    ) -> Series {
        let now = Utc::now();
        self.resolve_series_at(metric_id, window, anchor.unwrap_or(now), now)
            .await
    }

    /// Resolve with an explicit clock; `now` stamps latest-value points
    pub async fn resolve_series_at(
        &self,
        metric_id: &str,
        window: TimeWindow,
        anchor: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Series {
        let request_id = Uuid::new_v4();

        let Some(definition) = catalog::lookup(metric_id) else {
            debug!("[{}] unknown metric {}", request_id, metric_id);
            return Series::empty(metric_id, window);
        };
        if !definition.is_available_on(self.config.platform) {
            debug!(
                "[{}] {} is not available on {}",
                request_id, metric_id, self.config.platform
            );
            return Series::empty(metric_id, window);
        }

        let range = QueryRange::for_window(window, anchor, now, self.config.offset());

        // Native is authoritative; cloud is only consulted once it came back empty
        let outcome = self.read_native(metric_id, &range).await;
        outcome.log(&request_id, "native", metric_id);
        if let ReadOutcome::Points(points) = outcome {
            return finish(metric_id, window, points);
        }

        let outcome = self.read_cloud(metric_id, window, &range).await;
        outcome.log(&request_id, "cloud", metric_id);
        match outcome {
            ReadOutcome::Points(points) => finish(metric_id, window, points),
            _ => Series::empty(metric_id, window),
        }
    }

    async fn read_native(&self, metric_id: &str, range: &QueryRange) -> ReadOutcome {
        let Some(rule) = NativeRule::for_metric(metric_id) else {
            return ReadOutcome::Empty;
        };

        let read = native::read_series(self.native.as_ref(), rule, range);
        match timeout(self.config.native_timeout(), read).await {
            Ok(Ok(points)) => ReadOutcome::from_points(points),
            Ok(Err(e)) => ReadOutcome::Failed(e),
            Err(_) => ReadOutcome::TimedOut,
        }
    }

    async fn read_cloud(
        &self,
        metric_id: &str,
        window: TimeWindow,
        range: &QueryRange,
    ) -> ReadOutcome {
        let Some(reader) = &self.cloud else {
            return ReadOutcome::Empty;
        };

        match cloud::read_series(reader.as_ref(), metric_id, window, range).await {
            Ok(points) => ReadOutcome::from_points(points),
            Err(e) => ReadOutcome::Failed(e),
        }
    }

    /// Today's value for each metric, read concurrently from the native store.
    ///
    /// Only strictly positive values are returned; a missing key means no data.
    pub async fn resolve_today_snapshots<S: AsRef<str>>(
        &self,
        metric_ids: &[S],
    ) -> HashMap<String, f64> {
        self.resolve_today_snapshots_at(metric_ids, Utc::now()).await
    }

    pub async fn resolve_today_snapshots_at<S: AsRef<str>>(
        &self,
        metric_ids: &[S],
        now: DateTime<Utc>,
    ) -> HashMap<String, f64> {
        let offset = self.config.offset();
        let today = local_date(now, offset);
        let nightly = self.nightly_window(today, now);
        let limit = self.config.native_timeout();

        let mut seen = HashSet::new();
        let mut tasks = JoinSet::new();

        for id in metric_ids {
            let metric_id: &str = id.as_ref();
            if !seen.insert(metric_id) {
                continue;
            }
            let Some(rule) = self.snapshot_rule(metric_id) else {
                continue;
            };

            let reader = Arc::clone(&self.native);
            let metric_id = metric_id.to_string();
            tasks.spawn(async move {
                let read = native::read_today_value(reader.as_ref(), rule, today, nightly);
                (metric_id, timeout(limit, read).await)
            });
        }

        let mut values = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((metric_id, Ok(Ok(Some(value))))) if value > 0.0 => {
                    values.insert(metric_id, value);
                }
                Ok((metric_id, Ok(Ok(_)))) => debug!("snapshot {}: no data", metric_id),
                Ok((metric_id, Ok(Err(e)))) => warn!("snapshot {} failed: {}", metric_id, e),
                Ok((metric_id, Err(_))) => warn!("snapshot {} timed out", metric_id),
                Err(e) => warn!("snapshot task aborted: {}", e),
            }
        }
        values
    }

    /// Rule for a metric that can be snapshotted on this platform
    fn snapshot_rule(&self, metric_id: &str) -> Option<NativeRule> {
        let definition = catalog::lookup(metric_id)?;
        if !definition.is_available_on(self.config.platform) {
            return None;
        }
        NativeRule::for_metric(metric_id)
    }

    /// Window that attributes last night's sleep to `today`
    fn nightly_window(
        &self,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let anchor_time =
            NaiveTime::from_hms_opt(self.config.nightly_anchor_hour, 0, 0).unwrap_or(NaiveTime::MIN);
        let end = local_time(today, anchor_time, self.config.offset()).unwrap_or(now);
        (end - self.config.nightly_lookback(), end)
    }
}

fn finish(metric_id: &str, window: TimeWindow, mut points: Vec<DataPoint>) -> Series {
    points.sort_by_key(|p| p.timestamp);
    let stats = compute_stats(&points);
    Series {
        metric_id: metric_id.to_string(),
        window,
        points,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceResult;
    use crate::sources::{
        BloodPressureReading, DailyQuantity, DailySummary, LatestQuantity, SleepSegment,
        TrendSeries, WeeklyTrends,
    };
    use crate::types::{AggregateStats, Platform};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct MockNative {
        daily: HashMap<DailyQuantity, f64>,
        failing_daily: Vec<DailyQuantity>,
        latest: HashMap<LatestQuantity, f64>,
        segments: Vec<SleepSegment>,
        blood_pressure: Option<BloodPressureReading>,
        hang_daily: bool,
        hang_latest: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NativeHealthReader for MockNative {
        async fn daily_total(
            &self,
            quantity: DailyQuantity,
            _day: NaiveDate,
        ) -> SourceResult<Option<f64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_daily {
                std::future::pending::<()>().await;
            }
            if self.failing_daily.contains(&quantity) {
                return Err(SourceError::Backend(quantity.as_str().to_string()));
            }
            Ok(self.daily.get(&quantity).copied())
        }

        async fn latest_sample(&self, quantity: LatestQuantity) -> SourceResult<Option<f64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_latest {
                std::future::pending::<()>().await;
            }
            Ok(self.latest.get(&quantity).copied())
        }

        async fn sleep_segments(
            &self,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> SourceResult<Vec<SleepSegment>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.segments.clone())
        }

        async fn latest_blood_pressure(&self) -> SourceResult<Option<BloodPressureReading>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.blood_pressure)
        }
    }

    #[derive(Default)]
    struct MockCloud {
        weekly: WeeklyTrends,
        daily: DailySummary,
        unavailable: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CloudAnalyticsReader for MockCloud {
        async fn weekly_trends(&self) -> SourceResult<WeeklyTrends> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable {
                return Err(SourceError::Unavailable("offline".into()));
            }
            Ok(self.weekly.clone())
        }

        async fn daily_summary(&self, _day: NaiveDate) -> SourceResult<DailySummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable {
                return Err(SourceError::Unavailable("offline".into()));
            }
            Ok(self.daily.clone())
        }
    }

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap()
    }

    fn cloud_steps() -> WeeklyTrends {
        WeeklyTrends {
            steps: TrendSeries {
                dates: vec!["2024-03-08".to_string(), "2024-03-09".to_string()],
                values: vec![8_000.0, 10_000.0],
            },
            ..Default::default()
        }
    }

    fn resolver(native: Arc<MockNative>, cloud: Option<Arc<MockCloud>>) -> MetricResolver {
        MetricResolver::new(
            native,
            cloud.map(|c| c as Arc<dyn CloudAnalyticsReader>),
            ResolverConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_native_precedence_skips_cloud() {
        let mut native = MockNative::default();
        native.daily.insert(DailyQuantity::Steps, 5_000.0);
        let native = Arc::new(native);
        let cloud = Arc::new(MockCloud {
            weekly: cloud_steps(),
            ..Default::default()
        });

        let resolver = resolver(native, Some(Arc::clone(&cloud)));
        let series = resolver
            .resolve_series_at("steps", TimeWindow::Week, anchor(), anchor())
            .await;

        assert_eq!(series.points.len(), 7);
        assert!(series.points.iter().all(|p| p.value == 5_000.0));
        assert_eq!(series.stats.total, 35_000.0);
        assert_eq!(cloud.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cloud_fallback_when_native_empty() {
        let cloud = Arc::new(MockCloud {
            weekly: cloud_steps(),
            ..Default::default()
        });
        let resolver = resolver(Arc::new(MockNative::default()), Some(Arc::clone(&cloud)));

        let series = resolver
            .resolve_series_at("steps", TimeWindow::Week, anchor(), anchor())
            .await;

        let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![8_000.0, 10_000.0]);
        assert_eq!(series.stats.average, 9_000.0);
        assert_eq!(series.stats.total, 18_000.0);
        assert_eq!(series.stats.trend_percent, 25.0);
        assert_eq!(cloud.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_day_window_falls_back_to_daily_summary() {
        let mut cloud = MockCloud::default();
        cloud.daily.steps = Some(9_100.0);
        let cloud = Arc::new(cloud);
        let resolver = resolver(Arc::new(MockNative::default()), Some(Arc::clone(&cloud)));

        let series = resolver
            .resolve_series_at("steps", TimeWindow::Day, anchor(), anchor())
            .await;

        assert_eq!(
            series.points,
            vec![DataPoint::scalar(
                Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
                9_100.0
            )]
        );
        assert_eq!(series.stats.total, 9_100.0);
        assert_eq!(cloud.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let zero_timeout = ResolverConfig {
            native_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            MetricResolver::native_only(Arc::new(MockNative::default()), zero_timeout),
            Err(VitalsError::InvalidConfig(_))
        ));

        let bad_anchor = ResolverConfig {
            nightly_anchor_hour: 24,
            ..Default::default()
        };
        assert!(matches!(
            MetricResolver::new(Arc::new(MockNative::default()), None, bad_anchor),
            Err(VitalsError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_cloud_errors_become_empty_series() {
        let cloud = Arc::new(MockCloud {
            unavailable: true,
            ..Default::default()
        });
        let resolver = resolver(Arc::new(MockNative::default()), Some(cloud));

        let series = resolver
            .resolve_series_at("steps", TimeWindow::Week, anchor(), anchor())
            .await;
        assert_eq!(series, Series::empty("steps", TimeWindow::Week));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_native_times_out_as_empty() {
        let native = Arc::new(MockNative {
            hang_daily: true,
            ..Default::default()
        });
        let resolver = resolver(native, None);

        let started = tokio::time::Instant::now();
        let series = resolver
            .resolve_series_at("steps", TimeWindow::Week, anchor(), anchor())
            .await;

        assert!(series.is_empty());
        assert_eq!(series.stats, AggregateStats::zero());
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(5));
        assert!(waited < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_still_falls_back_to_cloud() {
        let native = Arc::new(MockNative {
            hang_daily: true,
            ..Default::default()
        });
        let cloud = Arc::new(MockCloud {
            weekly: cloud_steps(),
            ..Default::default()
        });
        let resolver = resolver(native, Some(cloud));

        let series = resolver
            .resolve_series_at("steps", TimeWindow::Week, anchor(), anchor())
            .await;
        assert_eq!(series.points.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_metric_touches_no_source() {
        let native = Arc::new(MockNative::default());
        let cloud = Arc::new(MockCloud::default());
        let resolver = resolver(Arc::clone(&native), Some(Arc::clone(&cloud)));

        let series = resolver
            .resolve_series("not_a_metric", TimeWindow::Day, None)
            .await;

        assert_eq!(series, Series::empty("not_a_metric", TimeWindow::Day));
        assert_eq!(native.calls.load(Ordering::SeqCst), 0);
        assert_eq!(cloud.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_metric_unavailable_on_platform() {
        let mut native = MockNative::default();
        native.daily.insert(DailyQuantity::TotalEnergy, 2_000.0);
        let native = Arc::new(native);

        // total_calories only exists on Health Connect
        let ios = resolver(Arc::clone(&native), None);
        let series = ios
            .resolve_series_at("total_calories", TimeWindow::Day, anchor(), anchor())
            .await;
        assert!(series.is_empty());
        assert_eq!(native.calls.load(Ordering::SeqCst), 0);

        let android = MetricResolver::native_only(
            native,
            ResolverConfig::for_platform(Platform::HealthConnect),
        )
        .unwrap();
        let series = android
            .resolve_series_at("total_calories", TimeWindow::Day, anchor(), anchor())
            .await;
        assert_eq!(series.points.len(), 1);
    }

    #[tokio::test]
    async fn test_sleep_segments_summed_per_day() {
        let at = |h, m| Utc.with_ymd_and_hms(2024, 3, 9, h, m, 0).unwrap();
        let native = Arc::new(MockNative {
            segments: vec![
                SleepSegment {
                    start: at(0, 30),
                    end: at(4, 30),
                },
                SleepSegment {
                    start: at(5, 0),
                    end: at(8, 30),
                },
            ],
            ..Default::default()
        });
        let resolver = resolver(native, None);

        let series = resolver
            .resolve_series_at("sleep_duration", TimeWindow::Week, anchor(), anchor())
            .await;

        assert_eq!(
            series.points,
            vec![DataPoint::scalar(
                Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap(),
                7.5
            )]
        );
    }

    #[tokio::test]
    async fn test_blood_pressure_gating() {
        let native = Arc::new(MockNative {
            blood_pressure: Some(BloodPressureReading {
                systolic: 0.0,
                diastolic: Some(80.0),
            }),
            ..Default::default()
        });
        let resolver = resolver(native, None);

        let series = resolver
            .resolve_series_at("blood_pressure", TimeWindow::Instant, anchor(), anchor())
            .await;
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_latest_value_stamped_now() {
        let mut native = MockNative::default();
        native.latest.insert(LatestQuantity::Weight, 72.4);
        let resolver = resolver(Arc::new(native), None);
        let now = anchor() + chrono::Duration::minutes(5);

        let series = resolver
            .resolve_series_at("weight", TimeWindow::Month, anchor(), now)
            .await;
        assert_eq!(series.points, vec![DataPoint::scalar(now, 72.4)]);
        assert_eq!(series.latest_value(), Some(72.4));
    }

    #[tokio::test]
    async fn test_snapshot_omits_non_positive_values() {
        let mut native = MockNative::default();
        native.daily.insert(DailyQuantity::Steps, 0.0);
        native.latest.insert(LatestQuantity::Weight, -1.0);
        native.latest.insert(LatestQuantity::RestingHeartRate, 55.0);
        let resolver = resolver(Arc::new(native), None);

        let values = resolver
            .resolve_today_snapshots_at(
                &["steps", "weight", "resting_heart_rate", "not_a_metric"],
                anchor(),
            )
            .await;

        let mut expected = HashMap::new();
        expected.insert("resting_heart_rate".to_string(), 55.0);
        assert_eq!(values, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_failures_are_isolated() {
        let at = |d, h| Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap();
        let mut native = MockNative {
            failing_daily: vec![DailyQuantity::Distance],
            hang_latest: true,
            segments: vec![SleepSegment {
                start: at(9, 23),
                end: at(10, 7),
            }],
            ..Default::default()
        };
        native.daily.insert(DailyQuantity::ActiveEnergy, 450.0);
        let resolver = resolver(Arc::new(native), None);

        let values = resolver
            .resolve_today_snapshots_at(
                &["distance", "weight", "active_calories", "sleep_duration"],
                anchor(),
            )
            .await;

        let mut expected = HashMap::new();
        expected.insert("active_calories".to_string(), 450.0);
        expected.insert("sleep_duration".to_string(), 8.0);
        assert_eq!(values, expected);
    }

    #[tokio::test]
    async fn test_snapshot_reads_each_metric_once() {
        let mut native = MockNative::default();
        native.daily.insert(DailyQuantity::Steps, 4_200.0);
        let native = Arc::new(native);
        let resolver = resolver(Arc::clone(&native), None);

        let ids = vec!["steps".to_string(), "steps".to_string()];
        let values = resolver.resolve_today_snapshots_at(&ids, anchor()).await;

        assert_eq!(values.get("steps"), Some(&4_200.0));
        assert_eq!(native.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nightly_window_ends_at_local_noon() {
        let config = ResolverConfig {
            utc_offset_minutes: -300,
            ..ResolverConfig::default()
        };
        let resolver =
            MetricResolver::native_only(Arc::new(MockNative::default()), config).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let (start, end) = resolver.nightly_window(today, anchor());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 10, 17, 0, 0).unwrap());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 9, 23, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_resolutions_are_independent() {
        let mut native = MockNative::default();
        native.daily.insert(DailyQuantity::Steps, 6_000.0);
        native.latest.insert(LatestQuantity::HeartRateVariability, 48.0);
        let resolver = Arc::new(resolver(Arc::new(native), None));

        let mut tasks = JoinSet::new();
        for metric_id in ["steps", "hrv", "steps", "hrv"] {
            let resolver = Arc::clone(&resolver);
            tasks.spawn(async move {
                resolver
                    .resolve_series_at(metric_id, TimeWindow::Day, anchor(), anchor())
                    .await
            });
        }

        let mut resolved = 0;
        while let Some(joined) = tasks.join_next().await {
            let series = joined.unwrap();
            assert!(!series.is_empty(), "{} came back empty", series.metric_id);
            resolved += 1;
        }
        assert_eq!(resolved, 4);
    }
}
