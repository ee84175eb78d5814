//! Installation constants and reference values
//!
//! Compile-time defaults for the table builder, pointer sampling, OSC
//! addressing and screen layout. [`crate::config::KioskConfig`] starts from
//! these values; a JSON config file can override most of them.

/// Lookup table generation
pub mod tables {
    /// Number of hue buckets (one per degree)
    pub const HUE_BUCKETS: usize = 360;

    /// Number of value buckets (0..=100 percent)
    pub const VALUE_BUCKETS: usize = 101;

    /// Entries in the hue→bin table
    pub const HUE_TABLE_LEN: usize = 360;

    /// Entries in the value→intensity table (values 0..=99)
    pub const VALUE_TABLE_LEN: usize = 100;

    /// Pixel stride used when scanning the sample surface
    pub const SCAN_STEP_PX: u32 = 2;

    /// Hue histogram: pixels below this saturation are treated as gray
    pub const HUE_MIN_SATURATION: f64 = 0.12;

    /// Hue histogram: pixels below this value are treated as black
    pub const HUE_MIN_VALUE: f64 = 0.10;

    /// Value histogram: near-black noise floor
    pub const VALUE_MIN_VALUE: f64 = 0.02;

    /// Hue cluster count (table entries are 0..HUE_CLUSTERS)
    pub const HUE_CLUSTERS: usize = 9;

    /// Representative value levels
    pub const VALUE_LEVELS: usize = 16;

    /// Output intensity range (velocity-like, 0 excluded)
    pub const INTENSITY_MIN: u16 = 1;
    pub const INTENSITY_MAX: u16 = 128;

    /// Leading keyword of every table line
    pub const LINE_PREFIX: &str = "table";

    pub const HUE_FILE_NAME: &str = "Hue.txt";
    pub const VALUE_FILE_NAME: &str = "Value.txt";
}

/// Pointer sampling and change thresholds
pub mod sampling {
    use std::time::Duration;

    /// Pointer coordinates are snapped to this grid before sampling
    pub const SAMPLE_STEP_PX: u32 = 4;

    /// Minimum Manhattan RGB distance before a new colour is sent
    pub const RGB_DELTA_THRESHOLD: u32 = 14;

    /// Downscale factor of the blurred sample surface (0 disables the blur)
    pub const BLUR_DOWNSCALE: u32 = 12;

    /// Minimum time between two colour sends
    pub const MIN_SEND_INTERVAL: Duration = Duration::from_millis(50);
}

/// OSC endpoint and channel addresses
pub mod osc {
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8000;

    pub const TABLES_READY: &str = "/txt";
    pub const SOUND_MODE: &str = "/MODES";
    pub const DELAY: &str = "/delay";
    pub const TEMPO: &str = "/TEMPO";
    pub const RGB: &str = "/rgb";
    pub const HSV: &str = "/hsv";

    /// Constant argument of the completion notice
    pub const TABLES_READY_ARG: i32 = 1;
}

/// Responsive layout reference values
pub mod layout {
    /// Reference resolution the UI metrics were designed for
    pub const REFERENCE_WIDTH: f64 = 1440.0;
    pub const REFERENCE_HEIGHT: f64 = 900.0;

    /// UI scale is clamped to this range
    pub const MIN_UI_SCALE: f64 = 0.85;
    pub const MAX_UI_SCALE: f64 = 1.35;

    pub const TOP_MARGIN: i32 = 100;
    pub const BOTTOM_UI_RESERVED: i32 = 300;
    pub const FRAME_PAD: i32 = 40;

    /// Artwork may use at most this fraction of the screen width
    pub const MAX_IMAGE_WIDTH_FRACTION: f64 = 0.72;

    pub const MIN_IMAGE_WIDTH: i32 = 160;
    pub const MIN_IMAGE_HEIGHT: i32 = 120;

    pub const DEFAULT_FRAME_RATE: u32 = 60;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_dimensions() {
        assert_eq!(tables::HUE_BUCKETS, tables::HUE_TABLE_LEN);
        assert_eq!(tables::VALUE_BUCKETS, tables::VALUE_TABLE_LEN + 1);
        assert!(tables::HUE_CLUSTERS <= tables::HUE_BUCKETS);
        assert!(tables::VALUE_LEVELS <= tables::VALUE_BUCKETS);
    }

    #[test]
    fn test_threshold_ranges() {
        assert!(tables::INTENSITY_MIN >= 1);
        assert!(tables::INTENSITY_MIN < tables::INTENSITY_MAX);
        assert!(tables::VALUE_MIN_VALUE < tables::HUE_MIN_VALUE);
        assert!(layout::MIN_UI_SCALE < layout::MAX_UI_SCALE);
    }

    #[test]
    fn test_send_interval_shorter_than_a_second() {
        assert!(sampling::MIN_SEND_INTERVAL.as_millis() > 0);
        assert!(sampling::MIN_SEND_INTERVAL.as_millis() < 1000);
    }
}
