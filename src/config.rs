use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Directory searched when the caller does not name one.
pub const DEFAULT_BASE_PATH: &str = "data/01_02_TEA-Spectra";

/// Spectral measurement table inside the base directory.
pub const TRIALS_FILE: &str = "The_trials.csv";

/// Semicolon-delimited sample description inside the base directory.
pub const METADATA_FILE: &str = "uv-vis sample description.csv";

/// Samples dropped from the description before joining.
pub const DEFAULT_EXCLUDED_SAMPLES: [&str; 2] = ["D3", "D4"];

// ---------------------------------------------------------------------------
// LoadOptions
// ---------------------------------------------------------------------------

/// Options for [`crate::load_uvvis_data`].
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Directory holding both input files.
    pub base_path: PathBuf,
    /// Base samples removed from the metadata before the join.
    pub excluded_samples: BTreeSet<String>,
    /// Fail on a spectral column with no metadata instead of skipping it.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            excluded_samples: DEFAULT_EXCLUDED_SAMPLES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strict: false,
        }
    }
}

impl LoadOptions {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self::default().with_base_path(base_path)
    }

    pub fn with_base_path(mut self, base_path: impl AsRef<Path>) -> Self {
        self.base_path = base_path.as_ref().to_path_buf();
        self
    }

    pub fn with_excluded_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_samples = samples.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn trials_path(&self) -> PathBuf {
        self.base_path.join(TRIALS_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.base_path.join(METADATA_FILE)
    }
}
