use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// LoadError – everything that can stop a load
// ---------------------------------------------------------------------------

/// Failure while loading and aligning a UV-vis dataset.
///
/// Every variant is fatal: the caller gets either a complete dataset or one
/// of these.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The spectral file has no usable table (no header line, no wavelength
    /// column, ragged rows).
    #[error("format error in {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    /// The sample description cannot be parsed or lacks a `sample` column.
    #[error("metadata error in {}: {reason}", path.display())]
    Metadata { path: PathBuf, reason: String },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cell of a joined column is neither empty nor a number.
    #[error("column '{column}', row {row}: '{value}' is not a number")]
    Numeric {
        column: String,
        row: usize,
        value: String,
    },

    /// Strict mode only: a spectral column whose base sample has no metadata.
    #[error("column '{column}': sample '{base}' has no metadata row")]
    UnmatchedSample { column: String, base: String },
}

impl LoadError {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LoadError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn metadata(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LoadError::Metadata {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
