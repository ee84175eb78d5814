//! Fixed-length lookup tables and their text serialisation
//!
//! The audio engine reads each table as a single line:
//! `table v0 v1 ... vN` followed by a newline.

use std::fs;
use std::path::Path;

use crate::constants::tables::LINE_PREFIX;
use crate::error::{KioskError, Result};

/// Immutable table mapping every raw bucket to an output integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    name: &'static str,
    entries: Vec<u16>,
}

impl LookupTable {
    /// Wrap `entries`, checking them against the table's fixed length
    ///
    /// # Errors
    ///
    /// Returns `KioskError::TableLengthMismatch` when the length differs.
    /// Callers treat this as a fatal configuration fault.
    pub fn new(name: &'static str, entries: Vec<u16>, expected_len: usize) -> Result<Self> {
        if entries.len() != expected_len {
            return Err(KioskError::TableLengthMismatch {
                table: name,
                expected: expected_len,
                actual: entries.len(),
            });
        }
        Ok(Self { name, entries })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the newline-terminated table line
    pub fn to_line(&self) -> String {
        let mut line = String::from(LINE_PREFIX);
        for value in &self.entries {
            line.push(' ');
            line.push_str(&value.to_string());
        }
        line.push('\n');
        line
    }

    /// Write the table line to `path`, creating parent folders and
    /// replacing any previous file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| KioskError::OutputError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_line()).map_err(|source| KioskError::OutputError {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_enforced() {
        assert!(LookupTable::new("hue", vec![0; 360], 360).is_ok());

        let err = LookupTable::new("hue", vec![0; 359], 360).unwrap_err();
        match err {
            KioskError::TableLengthMismatch { table, expected, actual } => {
                assert_eq!(table, "hue");
                assert_eq!(expected, 360);
                assert_eq!(actual, 359);
            }
            other => panic!("Expected TableLengthMismatch, got: {:?}", other),
        }
    }

    #[test]
    fn test_line_format() {
        let table = LookupTable::new("value", vec![1, 9, 128], 3).unwrap();
        assert_eq!(table.to_line(), "table 1 9 128\n");
    }

    #[test]
    fn test_write_overwrites_and_creates_parents() {
        let dir = std::env::temp_dir()
            .join(format!("artwork_sonify_lookup_{}", std::process::id()))
            .join("nested");
        let path = dir.join("Hue.txt");

        LookupTable::new("hue", vec![3, 4], 2).unwrap().write_to(&path).unwrap();
        LookupTable::new("hue", vec![1, 2], 2).unwrap().write_to(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "table 1 2\n");
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }
}
