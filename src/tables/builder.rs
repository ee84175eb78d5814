//! Startup table generation
//!
//! Scans the blurred sample surface once, picks quantile centers for hue and
//! value, and derives the two lookup tables the audio engine loads.

use std::path::PathBuf;

use image::RgbImage;
use log::info;

use crate::color::{
    pick_hue_centers_by_quantiles, pick_value_centers_by_quantiles, HueHistogram, ValueHistogram,
};
use crate::config::{HueTableConfig, OutputConfig, ValueTableConfig};
use crate::constants::tables::{HUE_TABLE_LEN, VALUE_TABLE_LEN};
use crate::error::Result;
use crate::tables::lookup::LookupTable;
use crate::tables::mapping::{build_hue_to_bin_map, build_value_to_intensity_map};

/// Tables plus the centers they were derived from
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTables {
    pub hue_centers: Vec<usize>,
    pub value_centers: Vec<usize>,
    pub hue: LookupTable,
    pub value: LookupTable,
}

/// Paths of the written table files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTables {
    pub hue_path: PathBuf,
    pub value_path: PathBuf,
}

/// Table builder parameterised by the hue and value table settings
pub struct TableBuilder {
    hue: HueTableConfig,
    value: ValueTableConfig,
}

impl TableBuilder {
    pub fn new(hue: HueTableConfig, value: ValueTableConfig) -> Self {
        Self { hue, value }
    }

    /// Build both tables from the sample surface
    ///
    /// # Errors
    ///
    /// Returns `KioskError::TableLengthMismatch` if either table comes out
    /// with the wrong number of entries.
    pub fn generate(&self, sample: &RgbImage) -> Result<GeneratedTables> {
        let hue_hist = HueHistogram::from_image(
            sample,
            self.hue.scan_step_px,
            self.hue.min_saturation,
            self.hue.min_value,
        );
        let hue_centers = pick_hue_centers_by_quantiles(&hue_hist, self.hue.clusters);
        let hue = LookupTable::new("hue", build_hue_to_bin_map(&hue_centers), HUE_TABLE_LEN)?;

        let value_hist =
            ValueHistogram::from_image(sample, self.value.scan_step_px, self.value.min_value);
        let value_centers = pick_value_centers_by_quantiles(&value_hist, self.value.levels);
        let value = LookupTable::new(
            "value",
            build_value_to_intensity_map(
                &value_centers,
                self.value.intensity_min,
                self.value.intensity_max,
            ),
            VALUE_TABLE_LEN,
        )?;

        Ok(GeneratedTables {
            hue_centers,
            value_centers,
            hue,
            value,
        })
    }
}

impl GeneratedTables {
    /// Write both tables, overwriting previous runs
    pub fn write(&self, output: &OutputConfig) -> Result<WrittenTables> {
        let hue_path = output.hue_path();
        let value_path = output.value_path();

        self.hue.write_to(&hue_path)?;
        self.value.write_to(&value_path)?;

        info!("Hue table saved: {}", hue_path.display());
        info!("Value table saved: {}", value_path.display());
        info!("Hue centers: {:?}", self.hue_centers);
        info!("Value centers: {:?}", self.value_centers);

        Ok(WrittenTables {
            hue_path,
            value_path,
        })
    }
}
