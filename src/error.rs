//! Error types for the interception layer.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial implementation

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the library.
///
/// Shape mismatches never appear here: unrecognized payloads pass through.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The real startup entry point was already bound.
    #[error("startup entry point is already bound")]
    AlreadyBound,

    /// The foreign app did not provide its type constants table.
    #[error("type constants unavailable for module '{module}'")]
    MissingConstants { module: String },

    /// The type constants table could not be parsed.
    #[error("invalid type constants: {0}")]
    InvalidConstants(#[source] serde_json::Error),

    /// Config file could not be read or parsed.
    #[error("failed to load config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing to a host channel failed.
    #[error("host channel write failed: {0}")]
    Channel(#[from] std::io::Error),

    /// Serializing an outbound event failed.
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InjectError>;
