//! Color space conversion utilities
//!
//! Provides the conversions the kiosk needs between the 8-bit RGB samples
//! read from the artwork and the HSV form used by the table builder and the
//! `/hsv` channel:
//! - RGB (0-255) to HSV (degrees, unit saturation/value)
//! - HSV to the integer triplet sent over OSC
//! - Manhattan RGB distance used for change thresholding
//! - Hex color representation

use palette::{encoding, FromColor, Hsv, Srgb};

/// HSV reading of a single pixel
///
/// Components are kept in `f64` so that whole-degree and whole-percent
/// truncation lands on the same side of exact boundaries (e.g. a saturation
/// of exactly 0.6) every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvReading {
    /// Hue in degrees, [0, 360)
    pub hue: f64,
    /// Saturation, [0, 1]
    pub saturation: f64,
    /// Value, [0, 1]
    pub value: f64,
}

impl HsvReading {
    /// Hue histogram bucket: whole degrees, wrapped into 0..360
    pub fn hue_bucket(&self) -> usize {
        (self.hue.max(0.0) as usize) % 360
    }

    /// Value histogram bucket: whole percent, clamped to 0..=100
    pub fn value_bucket(&self) -> usize {
        ((self.value * 100.0).max(0.0) as usize).min(100)
    }

    /// Integer triplet `(degrees, percent, percent)` as sent on `/hsv`
    pub fn triplet(&self) -> [u16; 3] {
        [
            self.hue_bucket() as u16,
            ((self.saturation * 100.0).max(0.0) as u16).min(100),
            self.value_bucket() as u16,
        ]
    }
}

/// Convert RGB (0-255) to HSV
///
/// # Arguments
///
/// * `r`, `g`, `b` - RGB values in range [0, 255]
///
/// # Returns
///
/// Hue in positive degrees, saturation and value in [0, 1]. Grays have hue 0.
///
/// Saturation and value come from `palette`. The hue is derived as a fraction
/// of a turn from the sextant offsets and only then scaled to degrees, which
/// is the rounding path the audio engine's tables were tuned against.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> HsvReading {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let hsv = Hsv::<encoding::Srgb, f64>::from_color(Srgb::new(r, g, b));

    HsvReading {
        hue: hue_turns(r, g, b) * 360.0,
        saturation: hsv.saturation,
        value: hsv.value,
    }
}

/// Hue as a fraction of a full turn, [0, 1)
fn hue_turns(r: f64, g: f64, b: f64) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0.0;
    }
    let range = max - min;
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;

    let sextant = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    (sextant / 6.0).rem_euclid(1.0)
}

/// Integer HSV triplet for an RGB sample
pub fn hsv_triplet(rgb: [u8; 3]) -> [u16; 3] {
    rgb_to_hsv(rgb[0], rgb[1], rgb[2]).triplet()
}

/// Manhattan distance between two RGB colors
pub fn rgb_delta(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as i32 - y as i32).unsigned_abs())
        .sum()
}

/// Convert RGB to hexadecimal color string (e.g. "#FF0000")
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        let red = rgb_to_hsv(255, 0, 0);
        assert!(red.hue < 0.5 || red.hue > 359.5);
        assert!((red.saturation - 1.0).abs() < 1e-5);
        assert!((red.value - 1.0).abs() < 1e-5);

        let green = rgb_to_hsv(0, 255, 0);
        assert!((green.hue - 120.0).abs() < 0.01);

        let blue = rgb_to_hsv(0, 0, 255);
        assert!((blue.hue - 240.0).abs() < 0.01);
    }

    #[test]
    fn test_gray_has_zero_hue_and_saturation() {
        let gray = rgb_to_hsv(128, 128, 128);
        assert_eq!(gray.hue, 0.0);
        assert_eq!(gray.saturation, 0.0);
        assert!((gray.value - 128.0 / 255.0).abs() < 1e-5);
    }

    #[test]
    fn test_black_buckets() {
        let black = rgb_to_hsv(0, 0, 0);
        assert_eq!(black.hue_bucket(), 0);
        assert_eq!(black.value_bucket(), 0);
        assert_eq!(black.triplet(), [0, 0, 0]);
    }

    #[test]
    fn test_white_value_bucket_is_100() {
        assert_eq!(rgb_to_hsv(255, 255, 255).value_bucket(), 100);
        assert_eq!(hsv_triplet([255, 255, 255]), [0, 0, 100]);
    }

    #[test]
    fn test_hsv_triplet_truncates() {
        assert_eq!(hsv_triplet([0, 0, 255]), [240, 100, 100]);
        // v = 128/255 = 0.50196
        assert_eq!(hsv_triplet([0, 0, 128]), [240, 100, 50]);
    }

    #[test]
    fn test_hsv_triplet_exact_boundaries() {
        // saturation is exactly 3/5
        assert_eq!(hsv_triplet([2, 2, 5]), [240, 60, 1]);
        // hues that sit a hair below a whole degree truncate down
        assert_eq!(hsv_triplet([0, 1, 6]), [229, 100, 2]);
        assert_eq!(hsv_triplet([0, 3, 20]), [230, 100, 7]);
        assert_eq!(hsv_triplet([10, 200, 40]), [129, 95, 78]);
        assert_eq!(hsv_triplet([250, 0, 3]), [359, 100, 98]);
    }

    #[test]
    fn test_hue_bucket_follows_triplet() {
        let reading = rgb_to_hsv(0, 1, 6);
        assert_eq!(reading.hue_bucket(), 229);
        assert_eq!(rgb_to_hsv(2, 2, 5).hue_bucket(), 240);
    }

    #[test]
    fn test_rgb_delta() {
        assert_eq!(rgb_delta([10, 20, 30], [10, 20, 30]), 0);
        assert_eq!(rgb_delta([0, 0, 0], [255, 255, 255]), 765);
        assert_eq!(rgb_delta([10, 20, 30], [15, 10, 30]), 15);
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex([255, 0, 0]), "#FF0000");
        assert_eq!(rgb_to_hex([0, 15, 255]), "#000FFF");
    }
}
