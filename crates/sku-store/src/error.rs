//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("failed to {operation} configuration file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid configuration JSON.
    #[error("invalid configuration in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize configuration")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Temp file could not be renamed over the target.
    #[error("failed to complete save to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

impl StoreError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::Parse { path, source } => format!(
                "The file at {} is not a valid SKU configuration (line {}, column {})",
                path.display(),
                source.line(),
                source.column()
            ),
            Self::Serialization { .. } => {
                "An error occurred while encoding the configuration.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the configuration to {}.",
                target_path.display()
            ),
            Self::AlreadyExists { path } => {
                format!("A configuration already exists at {}", path.display())
            }
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } if *operation == "read" => {
                Some("Run `sku init` to create a configuration file, or pass --config.".into())
            }
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                Some("Check that you have permission to write to this location.".into())
            }
            Self::Parse { .. } => {
                Some("Restore the file from a backup or re-export it from the editor.".into())
            }
            Self::Serialization { .. } => None,
            Self::AlreadyExists { .. } => Some("Pass --force to overwrite it.".into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
