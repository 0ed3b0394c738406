use super::model::SpectralTable;

/// Separator between base sample and replicate in a canonical identifier.
pub const SEPARATOR: char = '_';

/// Rewrite a raw sample column name as `{Letters}{Digits}_{Replicate}`.
///
/// `A-1_a` and `B_2-b` become `A1_a` and `B2_b`. Dashes are turned into
/// underscores and one round of `__` is collapsed. Names that do not start
/// with a letter part followed by a digit part are returned in that
/// dash-free form. Only the first two parts and the last survive, so
/// `A_1_x_b` becomes `A1_b`.
pub fn normalize_column_name(raw: &str) -> String {
    let name = raw.trim().replace('-', "_").replace("__", "_");
    let parts: Vec<&str> = name.split(SEPARATOR).collect();

    if parts.len() >= 2 && is_alphabetic(parts[0]) && is_digits(parts[1]) {
        let replicate = parts[parts.len() - 1];
        format!("{}{}{SEPARATOR}{replicate}", parts[0], parts[1])
    } else {
        name
    }
}

/// Normalize every sample column of `table` in place. The wavelength
/// column keeps its name.
pub fn normalize_columns(table: &mut SpectralTable) {
    let renamed: Vec<(usize, String)> = table
        .sample_columns()
        .map(|(idx, name)| (idx, normalize_column_name(name)))
        .collect();
    for (idx, name) in renamed {
        table.columns[idx] = name;
    }
}

/// `A1_a` → `A1`: everything before the first separator.
pub fn sample_base(id: &str) -> &str {
    id.split(SEPARATOR).next().unwrap_or(id)
}

/// `A1_a` → `a`: everything after the last separator.
pub fn replicate(id: &str) -> &str {
    id.rsplit(SEPARATOR).next().unwrap_or(id)
}

fn is_alphabetic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
