//! Aggregate statistics
//!
//! Average, min, max and total come from a single pass over the points. The
//! trend compares the mean of the last quartile against the mean of the first
//! quartile, with quartile size `ceil(n / 4)` clamped to `1..=n`.

use crate::types::{AggregateStats, DataPoint};

/// Compute aggregate statistics for an ordered list of points.
///
/// Empty input yields [`AggregateStats::zero`].
pub fn compute_stats(points: &[DataPoint]) -> AggregateStats {
    if points.is_empty() {
        return AggregateStats::zero();
    }

    let mut total = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in points {
        total += point.value;
        min = min.min(point.value);
        max = max.max(point.value);
    }
    let average = total / points.len() as f64;

    AggregateStats {
        average: round2(average),
        min: round2(min),
        max: round2(max),
        total: round2(total),
        trend_percent: round2(trend_percent(points)),
    }
}

/// Percent change of the late-quartile mean over the early-quartile mean
fn trend_percent(points: &[DataPoint]) -> f64 {
    let n = points.len();
    let quartile = n.div_ceil(4).clamp(1, n);

    let early = mean(&points[..quartile]);
    let late = mean(&points[n - quartile..]);

    if early == 0.0 {
        return 0.0;
    }
    ((late - early) / early) * 100.0
}

fn mean(points: &[DataPoint]) -> f64 {
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
