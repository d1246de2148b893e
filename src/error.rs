// src/error.rs
// =============================================================================
// Error types for the checker modules.
//
// Broken links are NOT errors: they are ordinary results that end up in the
// report. The variants below are the failures that stop a run before it can
// produce a trustworthy report (missing content root, bad config, etc.).
//
// main.rs wraps these in anyhow::Error at the binary edge.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a link-check run.
#[derive(Error, Debug)]
pub enum Error {
    /// The content root does not exist or is not a directory.
    #[error("content root {path} does not exist or is not a directory")]
    ContentRootMissing {
        /// Path we were asked to scan.
        path: PathBuf,
    },

    /// A directory inside the content tree could not be listed.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        /// Directory that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// JSON report serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}
