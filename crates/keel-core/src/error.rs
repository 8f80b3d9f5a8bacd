//! Error types for keel-core

use std::path::PathBuf;

/// Result type for keel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during layout resolution.
///
/// Only the caller-error class surfaces here; config and layout problems
/// are reported through the diagnostics sink instead (warnings for the
/// recoverable class, fatals for the terminating class).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The scan root handed in by the caller does not exist.
    #[error("Path you want to scan does not exist: {path}")]
    RootNotFound { path: PathBuf },

    /// Filesystem error from keel-fs
    #[error(transparent)]
    Fs(#[from] keel_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
