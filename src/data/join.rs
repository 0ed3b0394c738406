use std::collections::HashMap;

use ndarray::{Array1, Array2};

use crate::error::{LoadError, Result};

use super::model::{MetadataRecord, SampleRecord, SpectralTable, UvVisDataset, WAVELENGTH_COLUMN};
use super::normalize::{replicate, sample_base};

// ---------------------------------------------------------------------------
// Spectra × metadata join
// ---------------------------------------------------------------------------

/// Align the (normalized) spectral columns of `table` with `metadata`.
///
/// Each sample column becomes one matrix row, in column order. A column
/// whose base sample has no metadata row is skipped, or rejected with
/// [`LoadError::UnmatchedSample`] when `strict` is set. When several
/// metadata rows share a sample name the first one is used.
pub fn join(
    table: &SpectralTable,
    metadata: &[MetadataRecord],
    strict: bool,
) -> Result<UvVisDataset> {
    let wavelength_idx = table.position(WAVELENGTH_COLUMN).ok_or_else(|| {
        LoadError::format(
            &table.path,
            format!("no '{WAVELENGTH_COLUMN}' column (expected a header named 'x')"),
        )
    })?;
    let wavelengths = parse_column(table, wavelength_idx)?;

    let mut by_sample: HashMap<&str, &MetadataRecord> = HashMap::with_capacity(metadata.len());
    for rec in metadata {
        by_sample.entry(rec.sample.as_str()).or_insert(rec);
    }

    let mut spectra: Vec<Vec<f64>> = Vec::new();
    let mut samples = Vec::new();
    for (idx, id) in table.sample_columns() {
        let base = sample_base(id);
        let Some(rec) = by_sample.get(base) else {
            if strict {
                return Err(LoadError::UnmatchedSample {
                    column: id.to_string(),
                    base: base.to_string(),
                });
            }
            log::trace!("column '{id}': no metadata for '{base}', skipped");
            continue;
        };

        spectra.push(parse_column(table, idx)?);
        samples.push(SampleRecord {
            sample_id: id.to_string(),
            sample_base: base.to_string(),
            replicate: replicate(id).to_string(),
            brand: rec.brand.clone(),
            infusion: rec.infusion.clone(),
            sugar: rec.sugar.clone(),
        });
    }

    log::debug!(
        "joined {} of {} sample column(s) over {} wavelength(s)",
        samples.len(),
        table.sample_columns().count(),
        wavelengths.len()
    );

    let matrix = Array2::from_shape_fn((spectra.len(), wavelengths.len()), |(i, j)| {
        spectra[i][j]
    });
    Ok(UvVisDataset {
        matrix,
        wavelengths: Array1::from(wavelengths),
        samples,
    })
}

/// Parse every cell of column `idx` as a float; empty cells become NaN.
fn parse_column(table: &SpectralTable, idx: usize) -> Result<Vec<f64>> {
    table
        .column(idx)
        .enumerate()
        .map(|(row, cell)| {
            let cell = cell.trim();
            if cell.is_empty() {
                return Ok(f64::NAN);
            }
            cell.parse::<f64>().map_err(|_| LoadError::Numeric {
                column: table.columns[idx].clone(),
                row,
                value: cell.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MetadataValue;

    fn table(columns: &[&str], rows: &[&[&str]]) -> SpectralTable {
        SpectralTable {
            path: "The_trials.csv".into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn record(sample: &str, brand: &str) -> MetadataRecord {
        MetadataRecord {
            sample: sample.into(),
            brand: MetadataValue::String(brand.into()),
            infusion: MetadataValue::Integer(3),
            sugar: MetadataValue::Float(0.5),
        }
    }

    #[test]
    fn unmatched_columns_are_skipped_in_order() {
        let t = table(
            &["wavelength", "A1_a", "C9_a", "A2_b"],
            &[&["200", "1", "9", "2"], &["201", "3", "9", "4"]],
        );
        let ds = join(&t, &[record("A2", "Pickwick"), record("A1", "Lipton")], false).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.matrix.dim(), (2, 2));
        assert_eq!(ds.wavelengths.to_vec(), vec![200.0, 201.0]);
        assert_eq!(ds.matrix.row(0).to_vec(), vec![1.0, 3.0]);
        assert_eq!(ds.matrix.row(1).to_vec(), vec![2.0, 4.0]);

        let ids: Vec<_> = ds.samples.iter().map(|s| s.sample_id.as_str()).collect();
        assert_eq!(ids, vec!["A1_a", "A2_b"]);
        assert_eq!(ds.samples[0].brand, MetadataValue::String("Lipton".into()));
        assert_eq!(ds.samples[1].replicate, "b");
    }

    #[test]
    fn first_metadata_row_wins() {
        let t = table(&["wavelength", "A1_a"], &[&["200", "1"]]);
        let ds = join(&t, &[record("A1", "first"), record("A1", "second")], false).unwrap();
        assert_eq!(ds.samples[0].brand, MetadataValue::String("first".into()));
    }

    #[test]
    fn strict_mode_rejects_unmatched_columns() {
        let t = table(&["wavelength", "A1_a", "C9_a"], &[&["200", "1", "2"]]);
        let err = join(&t, &[record("A1", "Lipton")], true).unwrap_err();
        match err {
            LoadError::UnmatchedSample { column, base } => {
                assert_eq!(column, "C9_a");
                assert_eq!(base, "C9");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_cells_are_nan_and_text_is_rejected() {
        let t = table(&["wavelength", "A1_a"], &[&["200", ""], &["201", " 0.5 "]]);
        let ds = join(&t, &[record("A1", "Lipton")], false).unwrap();
        assert!(ds.matrix[[0, 0]].is_nan());
        assert_eq!(ds.matrix[[0, 1]], 0.5);

        let t = table(&["wavelength", "A1_a"], &[&["200", "n/a"]]);
        let err = join(&t, &[record("A1", "Lipton")], false).unwrap_err();
        assert!(matches!(err, LoadError::Numeric { row: 0, .. }), "{err}");
    }

    #[test]
    fn missing_wavelength_column_is_a_format_error() {
        let t = table(&["X", "A1_a"], &[&["200", "1"]]);
        let err = join(&t, &[record("A1", "Lipton")], false).unwrap_err();
        assert!(matches!(err, LoadError::Format { .. }));
    }

    #[test]
    fn no_matches_give_an_empty_matrix() {
        let t = table(&["wavelength", "Z1_a"], &[&["200", "1"], &["201", "2"]]);
        let ds = join(&t, &[record("A1", "Lipton")], false).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.matrix.dim(), (0, 2));
        assert_eq!(ds.wavelengths.len(), 2);
    }
}
