//! Hue and value frequency histograms
//!
//! Built once from the blurred sample surface by scanning it on a fixed pixel
//! stride. Near-gray and near-black pixels carry no useful hue, so they are
//! excluded from the hue histogram; the value histogram only drops the
//! darkest noise floor.

use image::RgbImage;

use crate::color::conversion::rgb_to_hsv;
use crate::constants::tables::{HUE_BUCKETS, VALUE_BUCKETS};

/// Fixed-size ordered array of bucket counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<const N: usize> {
    counts: [u64; N],
}

/// 360 buckets, one per hue degree
pub type HueHistogram = Histogram<HUE_BUCKETS>;

/// 101 buckets, value percent 0..=100
pub type ValueHistogram = Histogram<VALUE_BUCKETS>;

impl<const N: usize> Histogram<N> {
    /// Build a histogram directly from counts
    pub fn from_counts(counts: [u64; N]) -> Self {
        Self { counts }
    }

    pub fn empty() -> Self {
        Self { counts: [0; N] }
    }

    pub fn counts(&self) -> &[u64; N] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Running sum of the counts
    pub fn cumulative(&self) -> Vec<u64> {
        self.counts
            .iter()
            .scan(0u64, |acc, &c| {
                *acc += c;
                Some(*acc)
            })
            .collect()
    }
}

impl Histogram<HUE_BUCKETS> {
    /// Accumulate hues of qualifying pixels
    ///
    /// # Arguments
    ///
    /// * `image` - Sample surface to scan
    /// * `step` - Pixel stride in both directions (0 is treated as 1)
    /// * `min_saturation` - Pixels below this saturation are skipped
    /// * `min_value` - Pixels below this value are skipped
    pub fn from_image(image: &RgbImage, step: u32, min_saturation: f64, min_value: f64) -> Self {
        let mut counts = [0u64; HUE_BUCKETS];
        for_each_sample(image, step, |rgb| {
            let hsv = rgb_to_hsv(rgb[0], rgb[1], rgb[2]);
            if hsv.saturation < min_saturation || hsv.value < min_value {
                return;
            }
            counts[hsv.hue_bucket()] += 1;
        });
        Self { counts }
    }
}

impl Histogram<VALUE_BUCKETS> {
    /// Accumulate value percentages of pixels above the noise floor
    pub fn from_image(image: &RgbImage, step: u32, min_value: f64) -> Self {
        let mut counts = [0u64; VALUE_BUCKETS];
        for_each_sample(image, step, |rgb| {
            let hsv = rgb_to_hsv(rgb[0], rgb[1], rgb[2]);
            if hsv.value < min_value {
                return;
            }
            counts[hsv.value_bucket()] += 1;
        });
        Self { counts }
    }
}

fn for_each_sample(image: &RgbImage, step: u32, mut visit: impl FnMut([u8; 3])) {
    let step = step.max(1) as usize;
    let (width, height) = image.dimensions();
    for y in (0..height).step_by(step) {
        for x in (0..width).step_by(step) {
            visit(image.get_pixel(x, y).0);
        }
    }
}
