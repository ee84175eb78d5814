//! Lookup table generation for the audio engine
//!
//! Hue→bin and value→intensity tables are derived from the artwork once at
//! startup and written as plain text.

pub mod builder;
pub mod lookup;
pub mod mapping;

pub use builder::{GeneratedTables, TableBuilder, WrittenTables};
pub use lookup::LookupTable;
pub use mapping::{
    build_hue_to_bin_map, build_value_to_intensity_map, circular_distance, intensity_levels,
};
