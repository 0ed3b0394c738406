use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{LoadError, Result};

use super::model::{is_na, ColumnType, MetadataRecord};

/// Field separator of the sample description.
pub const DELIMITER: u8 = b';';

pub const SAMPLE_COLUMN: &str = "sample";
pub const BRAND_COLUMN: &str = "brand";
pub const INFUSION_COLUMN: &str = "Infusion time (min)";
pub const SUGAR_COLUMN: &str = "sugar content (g/l)";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the sample description at `path`, drop rows without a sample name
/// and the `excluded` samples.
pub fn load_metadata(path: &Path, excluded: &BTreeSet<String>) -> Result<Vec<MetadataRecord>> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| LoadError::metadata(path, format!("not valid UTF-8: {e}")))?;
    let records = read_metadata(&text, path)?;
    Ok(retain_samples(records, excluded))
}

/// Parse the semicolon-delimited description. `path` is only used in error
/// messages.
///
/// Each column gets one [`ColumnType`], inferred over all rows before rows
/// with a missing `sample` cell are dropped. Columns other than `sample` may
/// be absent and then read as [`MetadataValue::Null`](crate::MetadataValue::Null).
pub fn read_metadata(text: &str, path: &Path) -> Result<Vec<MetadataRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::metadata(path, format!("reading header: {e}")))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let find = |name: &str| headers.iter().position(|h| h == name);
    let sample_idx = find(SAMPLE_COLUMN)
        .ok_or_else(|| LoadError::metadata(path, format!("missing '{SAMPLE_COLUMN}' column")))?;
    let field_idx = [find(BRAND_COLUMN), find(INFUSION_COLUMN), find(SUGAR_COLUMN)];

    let mut rows: Vec<(String, [String; 3])> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| LoadError::metadata(path, format!("row {row_no}: {e}")))?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .to_string()
        };
        rows.push((cell(Some(sample_idx)), field_idx.map(cell)));
    }

    let types: Vec<ColumnType> = (0..field_idx.len())
        .map(|f| ColumnType::infer(rows.iter().map(|(_, fields)| fields[f].as_str())))
        .collect();

    let records: Vec<MetadataRecord> = rows
        .into_iter()
        .filter(|(sample, _)| !is_na(sample))
        .map(|(sample, [brand, infusion, sugar])| MetadataRecord {
            sample,
            brand: types[0].value(&brand),
            infusion: types[1].value(&infusion),
            sugar: types[2].value(&sugar),
        })
        .collect();

    log::debug!("{}: {} sample row(s)", path.display(), records.len());
    Ok(records)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Drop every record whose sample name is in `excluded` (exact match).
pub fn retain_samples(
    records: Vec<MetadataRecord>,
    excluded: &BTreeSet<String>,
) -> Vec<MetadataRecord> {
    let before = records.len();
    let kept: Vec<MetadataRecord> = records
        .into_iter()
        .filter(|rec| !excluded.contains(&rec.sample))
        .collect();
    if kept.len() != before {
        log::debug!("excluded {} sample row(s)", before - kept.len());
    }
    kept
}
