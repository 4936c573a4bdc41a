//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ChangetrailError`] which covers every fatal failure mode of
//! changetrail operations. It uses `thiserror` for ergonomic error definitions and
//! includes specialized error constructors for common failure scenarios.
//!
//! # Public API
//! - [`ChangetrailError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ChangetrailError>`
//!
//! # Error Categories
//! - **Bad root**: Workspace root missing or not a directory
//! - **Transient I/O**: The root itself could not be read during a scan
//! - **Cache corruption**: Persisted baseline unreadable or inconsistent
//! - **Configuration / changelog**: Reading, parsing and writing user-facing files
//!
//! Per-file problems found while scanning are never errors; they are logged and
//! recorded as warnings on the snapshot.

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for changetrail
#[derive(Error, Debug)]
pub enum ChangetrailError {
    // Workspace root errors
    #[error("Workspace root does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Workspace root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    #[error("I/O error while scanning '{path}': {source}")]
    ScanIo {
        path: PathBuf,
        source: std::io::Error,
    },

    // Baseline store errors
    #[error("Baseline cache at '{path}' is corrupted: {reason}")]
    CacheCorrupted { path: PathBuf, reason: String },

    #[error("Failed to write baseline cache '{path}': {source}")]
    BaselineWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine {kind} directory")]
    DirectoryNotFound { kind: String },

    // Configuration errors
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Changelog errors
    #[error("Failed to read changelog '{path}': {source}")]
    ChangelogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write changelog '{path}': {source}")]
    ChangelogWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using ChangetrailError
pub type Result<T> = std::result::Result<T, ChangetrailError>;

impl ChangetrailError {
    /// Create a root not found error
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    /// Create a root not a directory error
    pub fn root_not_directory(path: impl Into<PathBuf>) -> Self {
        Self::RootNotDirectory { path: path.into() }
    }

    /// Create a scan I/O error for a root-level failure
    pub fn scan_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ScanIo {
            path: path.into(),
            source,
        }
    }

    /// Create a cache corrupted error
    pub fn cache_corrupted(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CacheCorrupted {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a baseline write error
    pub fn baseline_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BaselineWrite {
            path: path.into(),
            source,
        }
    }

    pub fn directory_not_found(kind: impl Into<String>) -> Self {
        Self::DirectoryNotFound { kind: kind.into() }
    }

    /// Create a config read error
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a changelog read error
    pub fn changelog_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ChangelogRead {
            path: path.into(),
            source,
        }
    }

    /// Create a changelog write error
    pub fn changelog_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ChangelogWrite {
            path: path.into(),
            source,
        }
    }

    /// The workspace root itself is unusable; retrying will not help.
    pub fn is_bad_root(&self) -> bool {
        matches!(self, Self::RootNotFound { .. } | Self::RootNotDirectory { .. })
    }

    /// An I/O failure that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ScanIo { .. } | Self::Io(_))
    }

    /// Persisted state is unusable; a forced refresh recovers.
    pub fn is_cache_corruption(&self) -> bool {
        matches!(self, Self::CacheCorrupted { .. })
    }
}
