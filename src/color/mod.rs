//! Color conversion and histogram module
//!
//! This module handles RGB/HSV conversion, frequency histograms over the
//! sampled artwork, and quantile selection of representative centers.

pub mod conversion;
pub mod histogram;
pub mod quantile;

pub use conversion::{hsv_triplet, rgb_delta, rgb_to_hex, rgb_to_hsv, HsvReading};
pub use histogram::{HueHistogram, ValueHistogram};
pub use quantile::{pick_hue_centers_by_quantiles, pick_value_centers_by_quantiles};
