//! Native store conversions
//!
//! Reads the device health store through a [`NativeHealthReader`] and folds
//! the raw records into canonical points according to a [`NativeRule`].

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use futures::future::join_all;
use log::debug;
use std::collections::{BTreeMap, HashMap};

use super::{local_date, local_midnight, NativeRule, QueryRange};
use crate::error::{SourceError, SourceResult};
use crate::sources::{BloodPressureReading, DailyQuantity, NativeHealthReader, SleepSegment};
use crate::stats::round1;
use crate::types::DataPoint;

const MAX_SLEEP_HOURS: f64 = 24.0;

/// Read a metric's series from the native store.
///
/// Returns points in chronological order. An empty vector means the store
/// holds nothing usable for the range.
pub async fn read_series(
    reader: &dyn NativeHealthReader,
    rule: NativeRule,
    range: &QueryRange,
) -> SourceResult<Vec<DataPoint>> {
    match rule {
        NativeRule::DailyTotal(quantity) => read_daily_totals(reader, quantity, range).await,
        NativeRule::Latest(quantity) => {
            let sample = reader.latest_sample(quantity).await?;
            Ok(positive(sample)
                .map(|value| vec![DataPoint::scalar(range.now, value)])
                .unwrap_or_default())
        }
        NativeRule::SleepDuration => {
            let segments = reader.sleep_segments(range.start, range.end).await?;
            Ok(sleep_points(&segments, range))
        }
        NativeRule::BloodPressure => {
            let reading = reader.latest_blood_pressure().await?;
            Ok(reading
                .and_then(|r| blood_pressure_point(r, range.now))
                .into_iter()
                .collect())
        }
    }
}

/// Read a single "today" value for the snapshot view.
///
/// `nightly` is the window used to attribute last night's sleep to today.
pub async fn read_today_value(
    reader: &dyn NativeHealthReader,
    rule: NativeRule,
    today: NaiveDate,
    nightly: (DateTime<Utc>, DateTime<Utc>),
) -> SourceResult<Option<f64>> {
    match rule {
        NativeRule::DailyTotal(quantity) => reader.daily_total(quantity, today).await,
        NativeRule::Latest(quantity) => reader.latest_sample(quantity).await,
        NativeRule::SleepDuration => {
            let (start, end) = nightly;
            let segments = reader.sleep_segments(start, end).await?;
            Ok(Some(nightly_sleep_hours(&segments, start, end)))
        }
        NativeRule::BloodPressure => Ok(reader
            .latest_blood_pressure()
            .await?
            .and_then(|r| blood_pressure_point(r, nightly.1))
            .map(|p| p.value)),
    }
}

/// One call per local day; a failing day contributes nothing.
///
/// The whole read only fails when every day failed.
async fn read_daily_totals(
    reader: &dyn NativeHealthReader,
    quantity: DailyQuantity,
    range: &QueryRange,
) -> SourceResult<Vec<DataPoint>> {
    let days = range.days();
    if days.is_empty() {
        return Ok(Vec::new());
    }

    let reads = days.iter().map(|(day, midnight)| async move {
        (*midnight, reader.daily_total(quantity, *day).await)
    });
    let results = join_all(reads).await;

    let mut points = Vec::new();
    let mut first_error: Option<SourceError> = None;
    let mut failures = 0;

    for (midnight, result) in results {
        match result {
            Ok(total) => {
                if let Some(value) = positive(total) {
                    points.push(DataPoint::scalar(midnight, value));
                }
            }
            Err(e) => {
                debug!("{} read for {} failed: {}", quantity.as_str(), midnight, e);
                failures += 1;
                first_error.get_or_insert(e);
            }
        }
    }

    if failures == days.len() {
        if let Some(e) = first_error {
            return Err(e);
        }
    }

    Ok(points)
}

/// Group segments by the local day they started, summing hours per day
fn sleep_points(segments: &[SleepSegment], range: &QueryRange) -> Vec<DataPoint> {
    let first_day = range.first_day();
    let last_day = range.anchor_day();
    let hours_by_day = hours_by_start_day(segments, range.offset);

    hours_by_day
        .into_iter()
        .filter(|(day, _)| (first_day..=last_day).contains(day))
        .filter_map(|(day, hours)| {
            let midnight = local_midnight(day, range.offset)?;
            let hours = round1(hours.clamp(0.0, MAX_SLEEP_HOURS));
            (hours > 0.0).then(|| DataPoint::scalar(midnight, hours))
        })
        .collect()
}

fn hours_by_start_day(segments: &[SleepSegment], offset: FixedOffset) -> BTreeMap<NaiveDate, f64> {
    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for segment in segments {
        *by_day.entry(local_date(segment.start, offset)).or_insert(0.0) += segment.hours();
    }
    by_day.into_iter().collect()
}

/// Hours of sleep inside `[start, end)`, clipping segments at the edges
fn nightly_sleep_hours(segments: &[SleepSegment], start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let total: f64 = segments
        .iter()
        .map(|s| SleepSegment {
            start: s.start.max(start),
            end: s.end.min(end),
        })
        .map(|s| s.hours())
        .sum();
    round1(total.clamp(0.0, MAX_SLEEP_HOURS))
}

/// A reading becomes a point only with a positive systolic and a diastolic
fn blood_pressure_point(reading: BloodPressureReading, now: DateTime<Utc>) -> Option<DataPoint> {
    let systolic = positive(Some(reading.systolic))?;
    let diastolic = reading.diastolic?;

    let mut components = BTreeMap::new();
    components.insert("systolic".to_string(), systolic);
    components.insert("diastolic".to_string(), diastolic);
    Some(DataPoint::with_components(now, systolic, components))
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}
