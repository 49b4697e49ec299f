//! Error types for asset generation

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for asset generation operations
pub type Result<T> = std::result::Result<T, AssetError>;

/// Errors that can abort an icon or screenshot run.
///
/// A missing or unreadable preferred font is deliberately absent: the text
/// layer absorbs it by falling back to the built-in bitmap font.
#[derive(Error, Debug)]
pub enum AssetError {
    /// A color string was not `#RRGGBB` / `#RRGGBBAA`
    #[error("invalid color {0:?} (expected #RRGGBB or #RRGGBBAA)")]
    InvalidColor(String),

    /// Destination directory could not be created
    #[error("create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding or the file write failed
    #[error("write image {path}: {source}")]
    WriteImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Plain file write failed (manifest)
    #[error("write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Asset catalog manifest could not be serialized
    #[error("serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid RON for `AssetConfig`
    #[error("parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}
