use serde::Deserialize;
use thiserror::Error;

use crate::color::Rgb;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure while turning raw CSV rows into technique series. There is no
/// recovery path: any of these aborts the current input file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A required logical column has no matching header label.
    #[error("missing column: no header cell matches \"{label}\"")]
    MissingColumn { label: String },
    /// A row is too short for a resolved column index.
    #[error("row {row}: no field for column \"{label}\"")]
    MissingField { row: usize, label: String },
    /// A numeric field failed to parse.
    #[error("row {row}: column \"{label}\": \"{value}\" is not a number")]
    InvalidNumber {
        row: usize,
        label: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Logical columns and header resolution
// ---------------------------------------------------------------------------

/// The logical columns the extractor reads from a result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Error,
    Ratio,
}

/// Header labels for each logical column.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub name: String,
    pub error: String,
    pub ratio: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        ColumnLabels {
            name: "Compression technique".into(),
            error: "Absolute error".into(),
            ratio: "Compression ratio".into(),
        }
    }
}

impl ColumnLabels {
    pub fn label(&self, column: Column) -> &str {
        match column {
            Column::Name => &self.name,
            Column::Error => &self.error,
            Column::Ratio => &self.ratio,
        }
    }
}

/// Resolved zero-based index of each logical column in a concrete header.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    name: Option<usize>,
    error: Option<usize>,
    ratio: Option<usize>,
    labels: ColumnLabels,
}

impl HeaderMap {
    /// Scan `header` left to right and record, per logical column, the
    /// first cell equal to its configured label. Comparison is exact and
    /// case-sensitive; columns without a match stay unresolved.
    pub fn resolve(header: &[String], labels: &ColumnLabels) -> Self {
        let find = |label: &str| header.iter().position(|h| h == label);
        HeaderMap {
            name: find(&labels.name),
            error: find(&labels.error),
            ratio: find(&labels.ratio),
            labels: labels.clone(),
        }
    }

    pub fn get(&self, column: Column) -> Option<usize> {
        match column {
            Column::Name => self.name,
            Column::Error => self.error,
            Column::Ratio => self.ratio,
        }
    }

    /// Index of a column the caller requires. An unresolved column is a
    /// mismatch between configuration and input and fails with the label
    /// that was expected in the header.
    pub fn require(&self, column: Column) -> Result<usize, DataError> {
        self.get(column).ok_or_else(|| DataError::MissingColumn {
            label: self.labels.label(column).to_string(),
        })
    }

    pub fn labels(&self) -> &ColumnLabels {
        &self.labels
    }
}

// ---------------------------------------------------------------------------
// Techniques and series
// ---------------------------------------------------------------------------

/// Marker drawn on each series point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    #[default]
    Cross,
    Plus,
    Circle,
    Diamond,
}

/// A compression technique under comparison. Rows are assigned to the
/// first technique whose `prefix` starts their name field.
#[derive(Debug, Clone, PartialEq)]
pub struct Technique {
    pub prefix: String,
    pub label: String,
    pub marker: Marker,
    pub color: Rgb,
}

/// One technique's extracted data: three positionally aligned vectors in
/// source-row order. Index `i` of all three refers to the same CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct TechniqueSeries {
    pub technique: Technique,
    /// Per-point identifier, the part of the run name after the prefix
    /// (usually the error bound the run was configured with).
    pub point_ids: Vec<String>,
    pub errors: Vec<f64>,
    pub ratios: Vec<f64>,
}

impl TechniqueSeries {
    pub fn new(technique: Technique) -> Self {
        TechniqueSeries {
            technique,
            point_ids: Vec::new(),
            errors: Vec::new(),
            ratios: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.point_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn resolves_indices_regardless_of_column_order() {
        let labels = ColumnLabels::default();
        let map = HeaderMap::resolve(
            &header(&["Compression ratio", "Compression technique", "Absolute error"]),
            &labels,
        );
        assert_eq!(map.get(Column::Name), Some(1));
        assert_eq!(map.get(Column::Error), Some(2));
        assert_eq!(map.get(Column::Ratio), Some(0));
    }

    #[test]
    fn first_matching_cell_wins() {
        let labels = ColumnLabels::default();
        let map = HeaderMap::resolve(
            &header(&["Absolute error", "Absolute error", "Compression technique"]),
            &labels,
        );
        assert_eq!(map.get(Column::Error), Some(0));
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let labels = ColumnLabels::default();
        let map = HeaderMap::resolve(
            &header(&["compression technique", "Absolute error!", "Compression ratio"]),
            &labels,
        );
        assert_eq!(map.get(Column::Name), None);
        assert_eq!(map.get(Column::Error), None);
        assert_eq!(map.get(Column::Ratio), Some(2));
    }

    #[test]
    fn missing_label_fails_with_the_expected_label() {
        let labels = ColumnLabels::default();
        let map = HeaderMap::resolve(&header(&["Compression technique"]), &labels);
        assert_eq!(
            map.require(Column::Ratio),
            Err(DataError::MissingColumn {
                label: "Compression ratio".into()
            })
        );
    }
}
