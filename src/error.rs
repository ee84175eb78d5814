//! Error types for the artwork_sonify library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for artwork_sonify operations
pub type Result<T> = std::result::Result<T, KioskError>;

/// Error types for table generation and the kiosk runtime
#[derive(Error, Debug)]
pub enum KioskError {
    /// Image asset could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A generated lookup table does not have its fixed length
    #[error("{table} table has {actual} entries (expected {expected})")]
    TableLengthMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Writing an output table failed
    #[error("Failed to write {}", path.display())]
    OutputError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Session script could not be parsed
    #[error("Script line {line}: {reason}")]
    ScriptError { line: usize, reason: String },

    /// OSC transport setup or send failed
    #[error("Transport error: {message}")]
    TransportError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl KioskError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error with context
    pub fn transport<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::TransportError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Only transport failures are recoverable: a missing receiver must not
    /// stop the installation. Everything else is a startup fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, KioskError::TransportError { .. })
    }

    /// Get operator-facing error description for the kiosk console
    pub fn user_message(&self) -> String {
        match self {
            KioskError::ImageLoadError { .. } => {
                "Could not load an image asset. Check the Image/ and Image_Main/ folders.".to_string()
            }
            KioskError::TableLengthMismatch { table, .. } => {
                format!("The {} lookup table came out malformed. Check the table settings.", table)
            }
            KioskError::ConfigError { .. } | KioskError::InvalidParameter { .. } => {
                "The configuration file is invalid. Regenerate it with generate-config.".to_string()
            }
            KioskError::OutputError { path, .. } => {
                format!("Could not write {}. Check folder permissions.", path.display())
            }
            KioskError::TransportError { .. } => {
                "The audio engine is unreachable; sound will resume once it is running.".to_string()
            }
            KioskError::ScriptError { line, .. } => {
                format!("The session script is invalid at line {}.", line)
            }
        }
    }
}
