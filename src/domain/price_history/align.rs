//! Alignment of two independently sampled series onto one shared x-axis.
//!
//! The primary series defines the timeline. Each primary sample is paired with
//! the secondary sample closest in time, provided the gap is at most half the
//! primary's modal sampling interval. Secondary samples that match no primary
//! sample produce no rows.

use super::PricePoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One merged sample consumed by the renderer.
///
/// Every row carries at least one price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub timestamp: i64,
    pub primary: Option<f64>,
    pub secondary: Option<f64>,
}

/// How the compare series is paired with the primary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AlignStrategy {
    /// Nearest timestamp within half the primary's modal interval.
    #[default]
    Nearest,
    /// Point `i` with point `i`, regardless of timestamps. Only for
    /// reproducing charts built the legacy way; misaligns series of different
    /// density.
    ByIndex,
}

impl AlignStrategy {
    pub fn align(&self, primary: &[PricePoint], secondary: Option<&[PricePoint]>) -> Vec<AlignedRow> {
        match self {
            AlignStrategy::Nearest => align(primary, secondary),
            AlignStrategy::ByIndex => align_by_index(primary, secondary),
        }
    }
}

/// Merge `secondary` onto the timeline of `primary` by nearest timestamp.
pub fn align(primary: &[PricePoint], secondary: Option<&[PricePoint]>) -> Vec<AlignedRow> {
    let secondary = match secondary {
        Some(s) if !s.is_empty() => s,
        _ => return primary_only(primary),
    };
    let tolerance = match_tolerance(primary);

    primary
        .iter()
        .map(|p| AlignedRow {
            timestamp: p.timestamp,
            primary: Some(p.price),
            secondary: nearest(secondary, p.timestamp, tolerance).map(|s| s.price),
        })
        .collect()
}

/// Legacy pairing: row `i` takes secondary point `i` if there is one.
pub fn align_by_index(primary: &[PricePoint], secondary: Option<&[PricePoint]>) -> Vec<AlignedRow> {
    let secondary = secondary.unwrap_or_default();
    primary
        .iter()
        .enumerate()
        .map(|(i, p)| AlignedRow {
            timestamp: p.timestamp,
            primary: Some(p.price),
            secondary: secondary.get(i).map(|s| s.price),
        })
        .collect()
}

/// Rows for a chart where only the compare series is available.
pub fn secondary_only(secondary: &[PricePoint]) -> Vec<AlignedRow> {
    secondary
        .iter()
        .map(|s| AlignedRow {
            timestamp: s.timestamp,
            primary: None,
            secondary: Some(s.price),
        })
        .collect()
}

fn primary_only(primary: &[PricePoint]) -> Vec<AlignedRow> {
    primary
        .iter()
        .map(|p| AlignedRow {
            timestamp: p.timestamp,
            primary: Some(p.price),
            secondary: None,
        })
        .collect()
}

/// Most frequent gap between consecutive samples, in ms.
///
/// When every gap is distinct (provider timestamps jitter by a few ms), the
/// median gap is used instead. Ties between equally frequent gaps resolve to
/// the smaller gap. `None` for fewer than two samples.
pub fn modal_interval(points: &[PricePoint]) -> Option<i64> {
    if points.len() < 2 {
        return None;
    }

    let gaps: Vec<i64> = points
        .windows(2)
        .map(|w| w[1].timestamp.saturating_sub(w[0].timestamp))
        .collect();

    let mut counts: HashMap<i64, usize> = HashMap::new();
    for gap in &gaps {
        *counts.entry(*gap).or_default() += 1;
    }

    let (mode, count) = counts
        .iter()
        .max_by(|(gap_a, count_a), (gap_b, count_b)| {
            count_a.cmp(count_b).then(gap_b.cmp(gap_a))
        })
        .map(|(gap, count)| (*gap, *count))?;

    if count > 1 || gaps.len() == 1 {
        return Some(mode);
    }

    let mut sorted = gaps;
    sorted.sort_unstable();
    Some(sorted[sorted.len() / 2])
}

/// Largest timestamp gap (inclusive) at which two samples still pair up.
///
/// A single-sample primary has no interval, so only exact matches pair.
pub fn match_tolerance(primary: &[PricePoint]) -> i64 {
    modal_interval(primary).map(|gap| gap.max(0) / 2).unwrap_or(0)
}

/// Closest sample to `t` in an ascending series, if within `tolerance`.
/// Equidistant candidates resolve to the earlier sample.
fn nearest(series: &[PricePoint], t: i64, tolerance: i64) -> Option<&PricePoint> {
    let idx = series.partition_point(|p| p.timestamp < t);
    let before = idx.checked_sub(1).and_then(|i| series.get(i));
    let after = series.get(idx);

    let best = match (before, after) {
        (Some(b), Some(a)) => {
            if t.abs_diff(b.timestamp) <= a.timestamp.abs_diff(t) {
                b
            } else {
                a
            }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => return None,
    };

    (best.timestamp.abs_diff(t) <= tolerance.unsigned_abs()).then_some(best)
}
