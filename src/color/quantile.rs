//! Quantile selection of representative histogram centers
//!
//! The cumulative histogram mass is split into `k` equal groups and the
//! midpoint of each group becomes a center. Sparse histograms can put several
//! midpoints into the same bucket, so the raw picks are nudged apart until
//! they are strictly increasing.

use crate::color::histogram::{HueHistogram, ValueHistogram};
use crate::constants::tables::{HUE_BUCKETS, VALUE_BUCKETS};

/// Pick `k` hue centers (degrees, 0..=359)
///
/// An empty histogram falls back to evenly spaced hues `floor(i * 360 / k)`.
/// `k` is expected to lie in `1..=360`; larger values are capped.
pub fn pick_hue_centers_by_quantiles(hist: &HueHistogram, k: usize) -> Vec<usize> {
    let k = k.min(HUE_BUCKETS);
    if hist.total() == 0 {
        return (0..k).map(|i| i * HUE_BUCKETS / k).collect();
    }
    quantile_centers(&hist.cumulative(), k)
}

/// Pick `k` value centers (percent, 0..=100)
///
/// An empty histogram falls back to evenly spaced values
/// `floor(i * 100 / (k - 1))`, or `[0]` for a single level.
pub fn pick_value_centers_by_quantiles(hist: &ValueHistogram, k: usize) -> Vec<usize> {
    let k = k.min(VALUE_BUCKETS);
    if hist.total() == 0 {
        if k <= 1 {
            return vec![0; k];
        }
        let top = VALUE_BUCKETS - 1;
        return (0..k).map(|i| i * top / (k - 1)).collect();
    }
    quantile_centers(&hist.cumulative(), k)
}

/// Quantile picks over a cumulative distribution, made strictly increasing
fn quantile_centers(cdf: &[u64], k: usize) -> Vec<usize> {
    let last = cdf.len() - 1;
    let total = cdf[last];

    let mut centers: Vec<usize> = (0..k)
        .map(|i| {
            let target = (total as f64 * ((i as f64 + 0.5) / k as f64)) as u64;
            cdf.iter().position(|&acc| acc >= target).unwrap_or(last).min(last)
        })
        .collect();
    centers.sort_unstable();

    separate_centers(&mut centers, last);
    centers
}

/// Shift colliding centers forward, then repair the tail backwards
///
/// Requires `centers.len() <= max + 1`. Afterwards the sequence is strictly
/// increasing and within `0..=max`.
fn separate_centers(centers: &mut [usize], max: usize) {
    for i in 1..centers.len() {
        if centers[i] <= centers[i - 1] {
            centers[i] = (centers[i - 1] + 1).min(max);
        }
    }

    for i in (0..centers.len().saturating_sub(1)).rev() {
        if centers[i] >= centers[i + 1] {
            centers[i] = centers[i + 1].saturating_sub(1);
        }
    }
}
