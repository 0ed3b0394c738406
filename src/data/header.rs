use std::path::Path;

use crate::error::{LoadError, Result};

use super::model::{SpectralTable, WAVELENGTH_COLUMN};

/// Field separator of the trials file.
pub const DELIMITER: u8 = b',';

/// Raw name of the wavelength axis as exported by the instrument.
const RAW_WAVELENGTH_COLUMN: &str = "x";

/// Instrument bookkeeping columns that carry no spectrum.
const DROPPED_COLUMNS: [&str; 2] = ["capture", "colorimetry"];

// ---------------------------------------------------------------------------
// Header detection
// ---------------------------------------------------------------------------

/// Index of the first line with at least two delimiters.
///
/// Instrument preamble lines hold one value (or one `key,value` pair); the
/// first line with real columns is taken as the header. A preamble line with
/// two or more commas is therefore picked as the header too.
pub fn locate_header<'a, I>(lines: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let delimiter = DELIMITER as char;
    lines
        .into_iter()
        .position(|line| line.matches(delimiter).count() >= 2)
}

// ---------------------------------------------------------------------------
// Spectral table parser
// ---------------------------------------------------------------------------

/// Read and parse the trials file at `path`.
pub fn parse_spectral_table(path: &Path) -> Result<SpectralTable> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| LoadError::format(path, format!("not valid UTF-8: {e}")))?;
    read_spectral_table(&text, path)
}

/// Parse the trials file contents; `path` is recorded on the table and used
/// in error messages.
///
/// Skips the preamble, takes the located line as column names, renames `x`
/// to `wavelength` and drops the `capture` / `colorimetry` columns. Cells
/// are kept as text. Lines may end in `\n`, `\r\n` or a bare `\r`.
pub fn read_spectral_table(text: &str, path: &Path) -> Result<SpectralTable> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = text.lines().collect();
    let header_idx = locate_header(lines.iter().copied()).ok_or_else(|| {
        LoadError::format(
            path,
            format!(
                "no header line with at least two '{}' separators",
                DELIMITER as char
            ),
        )
    })?;
    log::debug!("{}: header found on line {header_idx}", path.display());

    let body = lines[header_idx..].join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(rec) => rec.map_err(|e| LoadError::format(path, format!("header line: {e}")))?,
        None => return Err(LoadError::format(path, "header line is empty")),
    };
    let mut columns: Vec<String> = header
        .iter()
        .map(|name| {
            if name == RAW_WAVELENGTH_COLUMN {
                WAVELENGTH_COLUMN.to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in records.enumerate() {
        let record =
            result.map_err(|e| LoadError::format(path, format!("data row {row_no}: {e}")))?;
        if record.len() > columns.len() {
            return Err(LoadError::format(
                path,
                format!(
                    "data row {row_no} has {} fields but the header has {}",
                    record.len(),
                    columns.len()
                ),
            ));
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    let keep: Vec<bool> = columns
        .iter()
        .map(|name| !DROPPED_COLUMNS.contains(&name.to_lowercase().as_str()))
        .collect();
    if keep.iter().any(|k| !k) {
        log::debug!(
            "{}: dropping {} instrument column(s)",
            path.display(),
            keep.iter().filter(|k| !**k).count()
        );
        columns = retain_flagged(columns, &keep);
        rows = rows
            .into_iter()
            .map(|row| retain_flagged(row, &keep))
            .collect();
    }

    Ok(SpectralTable {
        path: path.to_path_buf(),
        columns,
        rows,
    })
}

fn retain_flagged(values: Vec<String>, keep: &[bool]) -> Vec<String> {
    values
        .into_iter()
        .zip(keep)
        .filter(|(_, k)| **k)
        .map(|(v, _)| v)
        .collect()
}
