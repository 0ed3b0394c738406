//! Load the UV-vis tea trials: the wide spectral table exported by the
//! spectrometer and the semicolon-delimited sample description, aligned
//! into one numeric matrix with one metadata record per row.

pub mod config;
pub mod data;
pub mod error;

pub use config::LoadOptions;
pub use data::header::{locate_header, parse_spectral_table, read_spectral_table};
pub use data::join::join;
pub use data::metadata::{load_metadata, read_metadata, retain_samples};
pub use data::model::{
    ColumnType, MetadataRecord, MetadataValue, SampleRecord, SpectralTable, UvVisDataset,
};
pub use data::normalize::{normalize_column_name, normalize_columns};
pub use error::{LoadError, Result};

/// Read both files under `options.base_path` and join them.
///
/// Every call re-reads the files; nothing is cached.
pub fn load_uvvis_data(options: &LoadOptions) -> Result<UvVisDataset> {
    let mut table = parse_spectral_table(&options.trials_path())?;
    normalize_columns(&mut table);

    let metadata = load_metadata(&options.metadata_path(), &options.excluded_samples)?;
    join(&table, &metadata, options.strict)
}
