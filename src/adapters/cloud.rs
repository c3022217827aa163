//! Cloud analytics conversions
//!
//! The cloud service only covers a handful of metrics and only two window
//! shapes: the 7-day trend arrays and the single-day summary. Every other
//! window has no cloud coverage.

use chrono::{FixedOffset, NaiveDate};
use log::debug;

use super::{local_midnight, CloudField, QueryRange};
use crate::error::SourceResult;
use crate::sources::{CloudAnalyticsReader, DailySummary, TrendSeries, WeeklyTrends};
use crate::types::{DataPoint, TimeWindow};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a metric's series from the cloud service.
///
/// The reader is not called at all when the metric or window has no
/// coverage.
pub async fn read_series(
    reader: &dyn CloudAnalyticsReader,
    metric_id: &str,
    window: TimeWindow,
    range: &QueryRange,
) -> SourceResult<Vec<DataPoint>> {
    let Some(field) = CloudField::for_metric(metric_id) else {
        return Ok(Vec::new());
    };

    match window {
        TimeWindow::Week => {
            if !has_weekly_series(field) {
                return Ok(Vec::new());
            }
            let trends = reader.weekly_trends().await?;
            Ok(weekly_series(&trends, field)
                .map(|series| trend_points(series, range.offset))
                .unwrap_or_default())
        }
        TimeWindow::Day => {
            let day = range.anchor_day();
            let summary = reader.daily_summary(day).await?;
            Ok(summary_field(&summary, field)
                .filter(|v| *v > 0.0)
                .and_then(|v| Some(DataPoint::scalar(local_midnight(day, range.offset)?, v)))
                .into_iter()
                .collect())
        }
        _ => Ok(Vec::new()),
    }
}

/// Only four series exist in the weekly bundle
fn has_weekly_series(field: CloudField) -> bool {
    matches!(
        field,
        CloudField::Steps | CloudField::CaloriesOut | CloudField::CaloriesIn | CloudField::SleepHours
    )
}

fn weekly_series(trends: &WeeklyTrends, field: CloudField) -> Option<&TrendSeries> {
    match field {
        CloudField::Steps => Some(&trends.steps),
        CloudField::CaloriesOut => Some(&trends.calories_out),
        CloudField::CaloriesIn => Some(&trends.calories_in),
        CloudField::SleepHours => Some(&trends.sleep_hours),
        CloudField::DistanceKm | CloudField::RestingHeartRate | CloudField::WeightKg => None,
    }
}

fn summary_field(summary: &DailySummary, field: CloudField) -> Option<f64> {
    match field {
        CloudField::Steps => summary.steps,
        CloudField::CaloriesOut => summary.calories_out,
        CloudField::CaloriesIn => summary.calories_in,
        CloudField::SleepHours => summary.sleep_hours,
        CloudField::DistanceKm => summary.distance_km,
        CloudField::RestingHeartRate => summary.resting_heart_rate,
        CloudField::WeightKg => summary.weight_kg,
    }
}

/// Zip the parallel arrays, keeping positive values with parseable dates
fn trend_points(series: &TrendSeries, offset: FixedOffset) -> Vec<DataPoint> {
    let mut points: Vec<DataPoint> = series
        .dates
        .iter()
        .zip(series.values.iter())
        .filter(|(_, value)| **value > 0.0)
        .filter_map(|(date, value)| {
            let day = match NaiveDate::parse_from_str(date, DATE_FORMAT) {
                Ok(day) => day,
                Err(e) => {
                    debug!("skipping cloud trend entry with date {:?}: {}", date, e);
                    return None;
                }
            };
            Some(DataPoint::scalar(local_midnight(day, offset)?, *value))
        })
        .collect();

    points.sort_by_key(|p| p.timestamp);
    points
}
