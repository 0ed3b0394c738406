use std::fmt;
use std::path::PathBuf;

use ndarray::{Array1, Array2};
use serde::Serialize;

/// Name given to the wavelength axis once the raw `x` header is renamed.
pub const WAVELENGTH_COLUMN: &str = "wavelength";

// ---------------------------------------------------------------------------
// MetadataValue – a single cell of the sample description
// ---------------------------------------------------------------------------

/// A dynamically-typed metadata cell. Its variant comes from the
/// [`ColumnType`] of the column it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Cells a dataframe reader treats as missing by default.
const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw text cell counts as missing.
pub fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

impl MetadataValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – one dtype per metadata column
// ---------------------------------------------------------------------------

/// Type shared by every cell of a metadata column.
///
/// Inferred over the whole column, blank rows included: a missing cell turns
/// an integer column into floats, and a non-numeric cell makes the column
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Bool,
    String,
}

impl ColumnType {
    /// Pick the narrowest type all `cells` fit.
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut has_na = false;
        let mut all_int = true;
        let mut all_float = true;
        let mut all_bool = true;
        for cell in cells {
            if is_na(cell) {
                has_na = true;
                continue;
            }
            all_int &= cell.parse::<i64>().is_ok();
            all_float &= cell.parse::<f64>().is_ok();
            all_bool &= parse_bool(cell).is_some();
        }
        match (all_int, all_float, all_bool) {
            (true, _, _) if !has_na => ColumnType::Integer,
            (_, true, _) => ColumnType::Float,
            (_, _, true) if !has_na => ColumnType::Bool,
            _ => ColumnType::String,
        }
    }

    /// Read one cell of a column of this type.
    pub fn value(self, cell: &str) -> MetadataValue {
        if is_na(cell) {
            return MetadataValue::Null;
        }
        let typed = match self {
            ColumnType::Integer => cell.parse().ok().map(MetadataValue::Integer),
            ColumnType::Float => cell.parse().ok().map(MetadataValue::Float),
            ColumnType::Bool => parse_bool(cell).map(MetadataValue::Bool),
            ColumnType::String => None,
        };
        typed.unwrap_or_else(|| MetadataValue::String(cell.to_string()))
    }
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// SpectralTable – the trials file as text
// ---------------------------------------------------------------------------

/// The spectral table as found on disk: one row per wavelength, one column
/// per sample replicate plus the wavelength column. Cells stay text.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralTable {
    /// File the table was read from.
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SpectralTable {
    /// Index of the first column called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of column `idx`, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[idx].as_str())
    }

    /// Sample columns in file order, i.e. everything but the wavelength axis.
    pub fn sample_columns(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, name)| name.as_str() != WAVELENGTH_COLUMN)
            .map(|(i, name)| (i, name.as_str()))
    }
}

// ---------------------------------------------------------------------------
// MetadataRecord – one row of the sample description
// ---------------------------------------------------------------------------

/// One base sample from the description table.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    pub sample: String,
    pub brand: MetadataValue,
    /// `Infusion time (min)`
    pub infusion: MetadataValue,
    /// `sugar content (g/l)`
    pub sugar: MetadataValue,
}

// ---------------------------------------------------------------------------
// SampleRecord / UvVisDataset – the joined output
// ---------------------------------------------------------------------------

/// Metadata for one row of the output matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    /// Normalized column name, e.g. `A1_a`.
    pub sample_id: String,
    /// e.g. `A1`
    pub sample_base: String,
    /// e.g. `a`
    pub replicate: String,
    pub brand: MetadataValue,
    pub infusion: MetadataValue,
    pub sugar: MetadataValue,
}

/// Spectra aligned with their metadata.
///
/// Row `i` of `matrix` belongs to `samples[i]`; column `j` to
/// `wavelengths[j]`.
#[derive(Debug, Clone)]
pub struct UvVisDataset {
    /// Shape `(samples.len(), wavelengths.len())`.
    pub matrix: Array2<f64>,
    pub wavelengths: Array1<f64>,
    pub samples: Vec<SampleRecord>,
}

impl UvVisDataset {
    /// Split into `(matrix, wavelengths, samples)`.
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>, Vec<SampleRecord>) {
        (self.matrix, self.wavelengths, self.samples)
    }

    /// Number of joined spectra.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_follows_every_cell() {
        assert_eq!(ColumnType::infer(["3", "5"]), ColumnType::Integer);
        assert_eq!(ColumnType::infer(["0", "2.5"]), ColumnType::Float);
        assert_eq!(ColumnType::infer(["3", ""]), ColumnType::Float);
        assert_eq!(ColumnType::infer(["True", "false"]), ColumnType::Bool);
        assert_eq!(ColumnType::infer(["Lipton", "7"]), ColumnType::String);
        assert_eq!(ColumnType::infer(["", "NA"]), ColumnType::Float);
    }

    #[test]
    fn cells_take_their_column_type() {
        assert_eq!(ColumnType::Float.value("0"), MetadataValue::Float(0.0));
        assert_eq!(ColumnType::Integer.value("5"), MetadataValue::Integer(5));
        assert_eq!(ColumnType::Bool.value("True"), MetadataValue::Bool(true));
        assert_eq!(
            ColumnType::String.value("7"),
            MetadataValue::String("7".into())
        );
        assert_eq!(ColumnType::String.value("n/a"), MetadataValue::Null);
        assert_eq!(MetadataValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(MetadataValue::Float(2.5).to_string(), "2.5");
        assert_eq!(MetadataValue::Null.to_string(), "<null>");
    }

    #[test]
    fn na_tokens_are_missing() {
        for cell in ["", "NA", "NaN", "null", "n/a", "N/A"] {
            assert!(is_na(cell), "{cell:?}");
        }
        assert!(!is_na("A1"));
        assert!(!is_na(" "));
    }

    #[test]
    fn sample_columns_skip_wavelength() {
        let table = SpectralTable {
            path: PathBuf::from("The_trials.csv"),
            columns: vec!["wavelength".into(), "A1_a".into(), "A2_b".into()],
            rows: vec![vec!["200".into(), "0.1".into(), "0.2".into()]],
        };
        let names: Vec<_> = table.sample_columns().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["A1_a", "A2_b"]);
        assert_eq!(table.column(2).collect::<Vec<_>>(), vec!["0.2"]);
    }

    #[test]
    fn records_serialize_flat() {
        let rec = SampleRecord {
            sample_id: "A1_a".into(),
            sample_base: "A1".into(),
            replicate: "a".into(),
            brand: MetadataValue::String("Lipton".into()),
            infusion: MetadataValue::Integer(3),
            sugar: MetadataValue::Null,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sample_id": "A1_a",
                "sample_base": "A1",
                "replicate": "a",
                "brand": "Lipton",
                "infusion": 3,
                "sugar": null,
            })
        );
    }
}
