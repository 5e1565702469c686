//! Error types for the star catalog pipeline.
//!
//! Errors come in two tiers:
//!
//! | Error | Scope | Effect |
//! |-------|-------|--------|
//! | [`LineParseError`] | one catalog line | line dropped, warning logged |
//! | [`ColorOutOfRange`] | one star | star dropped, warning logged |
//! | [`StarsError::EmptyPopulation`] | one export run | run fails |
//! | [`StarsError::UnsupportedFormat`] | one catalog | run fails before reading input |
//! | [`StarsError::Io`] / [`StarsError::Json`] / [`StarsError::Config`] | one run | run fails |
//!
//! Per-record errors never abort a run on their own. The pipeline wraps them
//! into [`StarsError`] while collecting rejections and logs them afterwards.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::{CatalogFormat, LineParseError};
use crate::photometry::ColorOutOfRange;

/// Unified error type for catalog processing and export.
#[derive(Error, Debug)]
pub enum StarsError {
    /// A single catalog line could not be turned into a star record.
    #[error(transparent)]
    LineParse(#[from] LineParseError),

    /// A star's B-V index maps to a temperature outside the chromaticity tables.
    #[error(transparent)]
    ColorOutOfRange(#[from] ColorOutOfRange),

    /// Export was requested for a population with no stars in it.
    #[error("no stars left to export for {catalog}")]
    EmptyPopulation { catalog: CatalogFormat },

    /// The catalog format has no parser.
    #[error("catalog format {0} is not supported")]
    UnsupportedFormat(CatalogFormat),

    /// File system failure, tagged with the path involved.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

/// Convenience alias for `Result<T, StarsError>`.
pub type StarsResult<T> = Result<T, StarsError>;

impl StarsError {
    /// Creates an [`Io`](Self::Io) error for `path`.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a [`Config`](Self::Config) error.
    pub fn config(message: &str) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Creates an [`EmptyPopulation`](Self::EmptyPopulation) error.
    pub fn empty_population(catalog: CatalogFormat) -> Self {
        Self::EmptyPopulation { catalog }
    }
}
