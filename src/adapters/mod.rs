//! Raw-to-canonical adapters
//!
//! This module maps raw native and cloud records to canonical data points.
//! Which conversion applies to a metric is decided by a closed dispatch table:
//! metrics without a rule fall through to "no data".

pub mod cloud;
pub mod native;

use chrono::{DateTime, Days, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::sources::{DailyQuantity, LatestQuantity};
use crate::types::TimeWindow;

/// How a metric is read from the native store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeRule {
    /// One call per calendar day, sparse positive totals
    DailyTotal(DailyQuantity),
    /// One call for the latest sample, stamped "now"
    Latest(LatestQuantity),
    /// Segments grouped by start day and summed
    SleepDuration,
    /// Latest systolic/diastolic pair
    BloodPressure,
}

impl NativeRule {
    /// Conversion rule for a metric id; `None` for unsupported metrics
    pub fn for_metric(metric_id: &str) -> Option<Self> {
        use DailyQuantity as D;
        use LatestQuantity as L;

        let rule = match metric_id {
            "steps" => NativeRule::DailyTotal(D::Steps),
            "active_calories" => NativeRule::DailyTotal(D::ActiveEnergy),
            "total_calories" => NativeRule::DailyTotal(D::TotalEnergy),
            "distance" => NativeRule::DailyTotal(D::Distance),
            "flights_climbed" => NativeRule::DailyTotal(D::FlightsClimbed),
            "dietary_energy" => NativeRule::DailyTotal(D::DietaryEnergy),
            "weight" => NativeRule::Latest(L::Weight),
            "body_fat" => NativeRule::Latest(L::BodyFat),
            "resting_heart_rate" => NativeRule::Latest(L::RestingHeartRate),
            "hrv" => NativeRule::Latest(L::HeartRateVariability),
            "heart_rate" => NativeRule::Latest(L::HeartRate),
            "vo2_max" => NativeRule::Latest(L::Vo2Max),
            "oxygen_saturation" => NativeRule::Latest(L::OxygenSaturation),
            "respiratory_rate" => NativeRule::Latest(L::RespiratoryRate),
            "sleep_duration" => NativeRule::SleepDuration,
            "blood_pressure" => NativeRule::BloodPressure,
            _ => return None,
        };
        Some(rule)
    }
}

/// Field of the cloud analytics data a metric maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudField {
    Steps,
    CaloriesOut,
    CaloriesIn,
    SleepHours,
    DistanceKm,
    RestingHeartRate,
    WeightKg,
}

impl CloudField {
    /// Cloud field for a metric id; `None` when the cloud has no coverage
    pub fn for_metric(metric_id: &str) -> Option<Self> {
        let field = match metric_id {
            "steps" => CloudField::Steps,
            // Both calorie metrics read the same calories-out series
            "active_calories" | "total_calories" => CloudField::CaloriesOut,
            "dietary_energy" => CloudField::CaloriesIn,
            "sleep_duration" => CloudField::SleepHours,
            "distance" => CloudField::DistanceKm,
            "resting_heart_rate" => CloudField::RestingHeartRate,
            "weight" => CloudField::WeightKg,
            _ => return None,
        };
        Some(field)
    }
}

/// Absolute and local bounds of one resolution request
#[derive(Debug, Clone, Copy)]
pub struct QueryRange {
    /// Local midnight of the first calendar day covered
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Wall-clock time of the request, used to stamp latest-value points
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl QueryRange {
    /// Range covering the `window.days()` local calendar days that end on the
    /// anchor's day. `Instant` covers the anchor's day only.
    pub fn for_window(
        window: TimeWindow,
        anchor: DateTime<Utc>,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Self {
        let anchor_day = local_date(anchor, offset);
        let span = Days::new(window.days().max(1) as u64 - 1);
        let start = anchor_day
            .checked_sub_days(span)
            .and_then(|first| local_midnight(first, offset))
            .unwrap_or(anchor - Duration::days(window.days()));

        Self {
            start,
            end: anchor,
            now,
            offset,
        }
    }

    /// Local calendar day containing the end of the range
    pub fn anchor_day(&self) -> NaiveDate {
        local_date(self.end, self.offset)
    }

    /// First local calendar day covered
    pub fn first_day(&self) -> NaiveDate {
        local_date(self.start, self.offset)
    }

    /// Every covered local day with its midnight, oldest first
    pub fn days(&self) -> Vec<(NaiveDate, DateTime<Utc>)> {
        let last = self.anchor_day();
        self.first_day()
            .iter_days()
            .take_while(|day| *day <= last)
            .filter_map(|day| Some((day, local_midnight(day, self.offset)?)))
            .collect()
    }
}

/// Calendar date of an instant in the given offset
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Local midnight of a date, as an absolute instant
pub fn local_midnight(day: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    local_time(day, NaiveTime::MIN, offset)
}

/// Local wall-clock time on a date, as an absolute instant
pub fn local_time(day: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&day.and_time(time))
        .single()
        .map(|local| local.with_timezone(&Utc))
}
