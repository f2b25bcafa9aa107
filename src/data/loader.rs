use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Raw CSV table
// ---------------------------------------------------------------------------

/// A fully loaded benchmark CSV: header labels plus all data rows as
/// positional string fields. Grouping needs the whole row set, so the file
/// is read in one batch.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

/// Read a semicolon-delimited benchmark CSV from `path`.
///
/// The result files pad every cell to a fixed width, so fields are
/// whitespace-trimmed. Rows may have any number of fields; nothing beyond
/// the delimiting is validated here.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    log::info!("reading benchmark results from {}", path.display());
    from_reader(file).with_context(|| format!("reading {}", path.display()))
}

/// Reader-based variant of [`read_table`].
pub fn from_reader<R: Read>(input: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let header: Vec<String> = reader
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(RawTable { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolon_delimited_padded_fields() {
        let header = "  Compression technique;  Absolute error; Compression ratio\n";
        let row = "             sz3_1_0.01;   8.000000e-04;      1.250000e+01\n";
        let table = from_reader(format!("{header}{row}").as_bytes()).unwrap();
        assert_eq!(
            table.header,
            vec!["Compression technique", "Absolute error", "Compression ratio"]
        );
        assert_eq!(
            table.rows,
            vec![vec!["sz3_1_0.01", "8.000000e-04", "1.250000e+01"]]
        );
    }

    #[test]
    fn accepts_variable_width_rows() {
        let input = "a;b;c\n1;2\n1;2;3;4\n";
        let table = from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.rows[0], vec!["1", "2"]);
        assert_eq!(table.rows[1], vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn field_values_are_not_type_checked() {
        let input = "a;b\nnot-a-number;5\n";
        let table = from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.rows[0][0], "not-a-number");
    }
}
