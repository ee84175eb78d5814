//! Configuration structures for the kiosk.
//!
//! This module defines every tunable parameter of the installation,
//! organized into the asset, output, network, display, sampling and
//! lookup-table groups.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use artwork_sonify::KioskConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = KioskConfig::from_json_file(Path::new("kiosk.json"))?;
//!
//! // Or use the exhibition defaults
//! let config = KioskConfig::default_installation();
//! # Ok::<(), artwork_sonify::KioskError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{layout, osc, sampling, tables};
use crate::error::{KioskError, Result};

/// Complete kiosk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KioskConfig {
    /// Image assets
    pub assets: AssetConfig,

    /// Where the lookup tables are written
    pub output: OutputConfig,

    /// Audio engine endpoint
    pub osc: OscConfig,

    /// Screen geometry and frame pacing
    pub display: DisplayConfig,

    /// Pointer sampling thresholds
    pub sampling: SamplingConfig,

    /// Hue→bin table generation
    pub hue_table: HueTableConfig,

    /// Value→intensity table generation
    pub value_table: ValueTableConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Full-screen background image
    pub background_path: PathBuf,

    /// The artwork itself
    pub artwork_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Folder shared with the audio engine patch
    pub directory: PathBuf,

    pub hue_file_name: String,

    pub value_file_name: String,
}

impl OutputConfig {
    pub fn hue_path(&self) -> PathBuf {
        self.directory.join(&self.hue_file_name)
    }

    pub fn value_path(&self) -> PathBuf {
        self.directory.join(&self.value_file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscConfig {
    pub host: String,
    pub port: u16,
}

impl OscConfig {
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Screen geometry used for the responsive layout
///
/// The kiosk runs fullscreen; without a window the resolution has to be
/// configured so the artwork is scaled the way the visitor sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub screen_width: u32,
    pub screen_height: u32,

    /// Target frames per second of the runtime loop
    pub frame_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Pointer position is snapped to this grid (<= 1 disables snapping)
    pub sample_step_px: u32,

    /// Minimum Manhattan RGB change before a new colour is sent
    pub rgb_delta_threshold: u32,

    /// Blur factor of the sample surface (0 disables the blur)
    pub blur_downscale: u32,

    /// Minimum milliseconds between colour sends
    pub min_send_interval_ms: u64,
}

impl SamplingConfig {
    pub fn min_send_interval(&self) -> Duration {
        Duration::from_millis(self.min_send_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HueTableConfig {
    /// Pixel stride of the histogram scan
    pub scan_step_px: u32,

    /// Pixels below this saturation (0.0-1.0) are ignored
    pub min_saturation: f64,

    /// Pixels below this value (0.0-1.0) are ignored
    pub min_value: f64,

    /// Number of hue bins (1-360)
    pub clusters: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTableConfig {
    /// Pixel stride of the histogram scan
    pub scan_step_px: u32,

    /// Pixels below this value (0.0-1.0) are ignored
    pub min_value: f64,

    /// Number of representative value levels (1-101)
    pub levels: usize,

    /// Output intensity range
    pub intensity_min: u16,
    pub intensity_max: u16,
}

impl KioskConfig {
    /// Create the exhibition configuration
    pub fn default_installation() -> Self {
        Self {
            assets: AssetConfig {
                background_path: PathBuf::from("Image/back.png"),
                artwork_path: PathBuf::from("Image_Main/main.jpg"),
            },
            output: OutputConfig {
                directory: PathBuf::from("."),
                hue_file_name: tables::HUE_FILE_NAME.to_string(),
                value_file_name: tables::VALUE_FILE_NAME.to_string(),
            },
            osc: OscConfig {
                host: osc::DEFAULT_HOST.to_string(),
                port: osc::DEFAULT_PORT,
            },
            display: DisplayConfig {
                screen_width: layout::REFERENCE_WIDTH as u32,
                screen_height: layout::REFERENCE_HEIGHT as u32,
                frame_rate: layout::DEFAULT_FRAME_RATE,
            },
            sampling: SamplingConfig {
                sample_step_px: sampling::SAMPLE_STEP_PX,
                rgb_delta_threshold: sampling::RGB_DELTA_THRESHOLD,
                blur_downscale: sampling::BLUR_DOWNSCALE,
                min_send_interval_ms: sampling::MIN_SEND_INTERVAL.as_millis() as u64,
            },
            hue_table: HueTableConfig {
                scan_step_px: tables::SCAN_STEP_PX,
                min_saturation: tables::HUE_MIN_SATURATION,
                min_value: tables::HUE_MIN_VALUE,
                clusters: tables::HUE_CLUSTERS,
            },
            value_table: ValueTableConfig {
                scan_step_px: tables::SCAN_STEP_PX,
                min_value: tables::VALUE_MIN_VALUE,
                levels: tables::VALUE_LEVELS,
                intensity_min: tables::INTENSITY_MIN,
                intensity_max: tables::INTENSITY_MAX,
            },
        }
    }

    /// Load configuration from JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| KioskError::config(format!("cannot read {}", path.display()), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| KioskError::config(format!("cannot parse {}", path.display()), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the exhibition defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default_installation()),
        }
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| KioskError::config("cannot serialize configuration", e))?;
        std::fs::write(path, json).map_err(|source| KioskError::OutputError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        let hue = &self.hue_table;
        if hue.clusters == 0 || hue.clusters > tables::HUE_BUCKETS {
            return Err(KioskError::invalid("hue_table.clusters", hue.clusters));
        }
        check_unit("hue_table.min_saturation", hue.min_saturation)?;
        check_unit("hue_table.min_value", hue.min_value)?;

        let value = &self.value_table;
        if value.levels == 0 || value.levels > tables::VALUE_BUCKETS {
            return Err(KioskError::invalid("value_table.levels", value.levels));
        }
        check_unit("value_table.min_value", value.min_value)?;
        if value.intensity_min > value.intensity_max {
            return Err(KioskError::invalid(
                "value_table.intensity_min",
                format!("{} > {}", value.intensity_min, value.intensity_max),
            ));
        }

        check_stride("sampling.sample_step_px", self.sampling.sample_step_px)?;
        check_stride("hue_table.scan_step_px", hue.scan_step_px)?;
        check_stride("value_table.scan_step_px", value.scan_step_px)?;

        if self.display.frame_rate == 0 {
            return Err(KioskError::invalid("display.frame_rate", 0));
        }
        if self.display.screen_width == 0 || self.display.screen_height == 0 {
            return Err(KioskError::invalid(
                "display",
                format!("{}x{}", self.display.screen_width, self.display.screen_height),
            ));
        }
        if self.output.hue_file_name == self.output.value_file_name {
            return Err(KioskError::invalid("output.value_file_name", &self.output.value_file_name));
        }
        Ok(())
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self::default_installation()
    }
}

fn check_unit(parameter: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(KioskError::invalid(parameter, value))
    }
}

fn check_stride(parameter: &str, step: u32) -> Result<()> {
    if step == 0 {
        return Err(KioskError::invalid(parameter, step));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_installation_is_valid() {
        let config = KioskConfig::default_installation();
        assert!(config.validate().is_ok());
        assert_eq!(config.osc.endpoint(), "127.0.0.1:8000");
        assert_eq!(config.output.hue_path(), PathBuf::from("./Hue.txt"));
        assert_eq!(config.sampling.min_send_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!("artwork_sonify_config_{}.json", std::process::id()));
        let mut config = KioskConfig::default_installation();
        config.osc.port = 9001;
        config.hue_table.clusters = 12;

        config.to_json_file(&path).unwrap();
        let loaded = KioskConfig::from_json_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_out_of_range_clusters() {
        let mut config = KioskConfig::default_installation();
        config.hue_table.clusters = 0;
        assert!(config.validate().is_err());

        config.hue_table.clusters = 361;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_intensity_range() {
        let mut config = KioskConfig::default_installation();
        config.value_table.intensity_min = 200;
        assert!(matches!(
            config.validate(),
            Err(KioskError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_threshold_outside_unit_range() {
        let mut config = KioskConfig::default_installation();
        config.hue_table.min_saturation = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_strides() {
        let mut config = KioskConfig::default_installation();
        config.sampling.sample_step_px = 0;
        match config.validate() {
            Err(KioskError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "sampling.sample_step_px")
            }
            other => panic!("Expected InvalidParameter, got: {:?}", other),
        }

        let mut config = KioskConfig::default_installation();
        config.hue_table.scan_step_px = 0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default_installation();
        config.value_table.scan_step_px = 0;
        assert!(config.validate().is_err());

        config.value_table.scan_step_px = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = KioskConfig::from_json_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, KioskError::ConfigError { .. }));
    }
}
