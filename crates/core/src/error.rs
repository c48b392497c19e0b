//! Error types for loading models and configuration and writing output.
//!
//! Generation itself is total: every formatter operation returns a string.
//! Only the edges that touch the filesystem or parse input can fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading inputs or writing generated sources.
#[derive(Debug, Error)]
pub enum GenError {
    /// A model or config file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A generated file or its directory could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// File or directory that failed to write
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The API model JSON did not deserialize.
    #[error("Failed to parse API model: {0}")]
    Model(#[from] serde_json::Error),

    /// The generator configuration did not deserialize.
    #[error("Failed to parse config {}: {source}", .path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Underlying TOML error
        source: Box<toml::de::Error>,
    },

    /// A language name that no formatter handles.
    #[error("Unknown target language '{0}' (expected one of: typescript, python)")]
    UnknownLanguage(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenError>;
