use super::loader::RawTable;
use super::model::{Column, DataError, HeaderMap, Technique, TechniqueSeries};

// ---------------------------------------------------------------------------
// Series extraction
// ---------------------------------------------------------------------------

/// Result of grouping one file's rows: a series per configured technique
/// plus the error of the uncompressed reference run, when present.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub series: Vec<TechniqueSeries>,
    pub baseline_error: Option<f64>,
}

/// Group `table`'s rows into per-technique series.
///
/// A single pass in row order: a row whose name starts with a technique
/// prefix (first match in `techniques` order wins) contributes one point to
/// that technique; a row named exactly `baseline_name` updates the baseline
/// error (the last such row wins); every other row is skipped.
///
/// All three logical columns are resolved up front, so a header mismatch
/// fails before any row is touched.
pub fn extract_series(
    table: &RawTable,
    techniques: &[Technique],
    header: &HeaderMap,
    baseline_name: &str,
) -> Result<Extraction, DataError> {
    let name_idx = header.require(Column::Name)?;
    let error_idx = header.require(Column::Error)?;
    let ratio_idx = header.require(Column::Ratio)?;

    let mut series: Vec<TechniqueSeries> = techniques
        .iter()
        .cloned()
        .map(TechniqueSeries::new)
        .collect();
    let mut baseline_error = None;

    for (i, row) in table.rows.iter().enumerate() {
        let row_no = i + 1;
        let name = field(row, row_no, name_idx, header, Column::Name)?;

        if let Some(matched) = series
            .iter_mut()
            .find(|s| name.starts_with(&s.technique.prefix))
        {
            let error = parse_field(row, row_no, error_idx, header, Column::Error)?;
            let ratio = parse_field(row, row_no, ratio_idx, header, Column::Ratio)?;
            let id = point_id(name, &matched.technique.prefix).to_string();
            matched.point_ids.push(id);
            matched.errors.push(error);
            matched.ratios.push(ratio);
        } else if name == baseline_name {
            baseline_error = Some(parse_field(row, row_no, error_idx, header, Column::Error)?);
        } else {
            log::trace!("row {row_no}: \"{name}\" matches no technique, skipped");
        }
    }

    Ok(Extraction {
        series,
        baseline_error,
    })
}

/// The part of a run name after the first `_` following the technique
/// prefix, or the empty string when no such `_` exists.
///
/// `sz3_1_0.01` with prefix `sz3_1` yields `0.01`; a name equal to its
/// prefix yields the empty string.
fn point_id<'a>(name: &'a str, prefix: &str) -> &'a str {
    let rest = &name[prefix.len()..];
    rest.find('_').map(|i| &rest[i + 1..]).unwrap_or("")
}

fn field<'a>(
    row: &'a [String],
    row_no: usize,
    idx: usize,
    header: &HeaderMap,
    column: Column,
) -> Result<&'a str, DataError> {
    row.get(idx)
        .map(String::as_str)
        .ok_or_else(|| DataError::MissingField {
            row: row_no,
            label: header.labels().label(column).to_string(),
        })
}

fn parse_field(
    row: &[String],
    row_no: usize,
    idx: usize,
    header: &HeaderMap,
    column: Column,
) -> Result<f64, DataError> {
    let raw = field(row, row_no, idx, header, column)?;
    raw.parse::<f64>().map_err(|_| DataError::InvalidNumber {
        row: row_no,
        label: header.labels().label(column).to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::data::model::{ColumnLabels, Marker};

    fn technique(prefix: &str) -> Technique {
        Technique {
            prefix: prefix.into(),
            label: prefix.to_uppercase(),
            marker: Marker::Cross,
            color: color::GREEN,
        }
    }

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable {
            header: ["Compression technique", "Absolute error", "Compression ratio"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|f| f.to_string()).collect())
                .collect(),
        }
    }

    fn resolve(table: &RawTable) -> HeaderMap {
        HeaderMap::resolve(&table.header, &ColumnLabels::default())
    }

    fn extract(table: &RawTable, techniques: &[Technique]) -> Result<Extraction, DataError> {
        extract_series(table, techniques, &resolve(table), "double")
    }

    #[test]
    fn groups_rows_into_series_and_baseline() {
        let table = table(&[
            &["double", "0.001", "1.0"],
            &["sz3_1_0.01", "0.0008", "12.5"],
            &["zfp_1_0.02", "0.0012", "9.3"],
        ]);
        let techniques = [technique("sz3_1"), technique("zfp_1")];
        let result = extract(&table, &techniques).unwrap();

        assert_eq!(result.baseline_error, Some(0.001));
        assert_eq!(result.series[0].point_ids, vec!["0.01"]);
        assert_eq!(result.series[0].errors, vec![0.0008]);
        assert_eq!(result.series[0].ratios, vec![12.5]);
        assert_eq!(result.series[1].point_ids, vec!["0.02"]);
        assert_eq!(result.series[1].errors, vec![0.0012]);
        assert_eq!(result.series[1].ratios, vec![9.3]);
    }

    #[test]
    fn preserves_row_order_per_technique() {
        let table = table(&[
            &["sz3_1_0.1", "0.08", "16.0"],
            &["zfp_1_0.1", "0.09", "11.0"],
            &["sz3_1_0.01", "0.008", "12.0"],
            &["sz3_1_0.001", "0.0008", "8.0"],
        ]);
        let techniques = [technique("sz3_1"), technique("zfp_1")];
        let result = extract(&table, &techniques).unwrap();

        assert_eq!(result.series[0].point_ids, vec!["0.1", "0.01", "0.001"]);
        assert_eq!(result.series[0].errors, vec![0.08, 0.008, 0.0008]);
        assert_eq!(result.series[1].point_ids, vec!["0.1"]);
    }

    #[test]
    fn unmatched_rows_are_skipped_and_leave_the_baseline_alone() {
        let table = table(&[
            &["unknown_tech", "5", "5"],
            &["sz3_1_0.1", "0.08", "16.0"],
        ]);
        let techniques = [technique("sz3_1")];
        let result = extract(&table, &techniques).unwrap();

        assert_eq!(result.baseline_error, None);
        assert_eq!(result.series[0].len(), 1);
    }

    #[test]
    fn last_baseline_row_wins() {
        let table = table(&[
            &["double", "0.001", "1.0"],
            &["double", "0.002", "1.0"],
        ]);
        let result = extract(&table, &[technique("sz3_1")]).unwrap();
        assert_eq!(result.baseline_error, Some(0.002));
    }

    #[test]
    fn first_technique_in_list_order_wins_for_overlapping_prefixes() {
        let table = table(&[&["sz3_1_0.5", "0.3", "4.0"]]);
        let techniques = [technique("sz3"), technique("sz3_1")];
        let result = extract(&table, &techniques).unwrap();

        assert_eq!(result.series[0].point_ids, vec!["1_0.5"]);
        assert!(result.series[1].is_empty());
    }

    #[test]
    fn point_id_is_empty_without_a_separator_after_the_prefix() {
        let table = table(&[
            &["sz3_1", "0.1", "2.0"],
            &["zfp_1x", "0.2", "3.0"],
        ]);
        let techniques = [technique("sz3_1"), technique("zfp_1")];
        let result = extract(&table, &techniques).unwrap();

        assert_eq!(result.series[0].point_ids, vec![""]);
        assert_eq!(result.series[1].point_ids, vec![""]);
    }

    #[test]
    fn malformed_numeric_field_names_row_and_column() {
        let table = table(&[&["sz3_1_0.1", "oops", "16.0"]]);
        let err = extract(&table, &[technique("sz3_1")]).unwrap_err();
        assert_eq!(
            err,
            DataError::InvalidNumber {
                row: 1,
                label: "Absolute error".into(),
                value: "oops".into(),
            }
        );
    }

    #[test]
    fn short_row_names_the_missing_column() {
        let table = table(&[&["sz3_1_0.1"]]);
        let err = extract(&table, &[technique("sz3_1")]).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingField {
                row: 1,
                label: "Absolute error".into(),
            }
        );
    }

    #[test]
    fn missing_column_fails_before_any_row_is_read() {
        // The malformed row would otherwise produce an InvalidNumber error.
        let table = RawTable {
            header: vec!["Compression technique".into(), "Absolute error".into()],
            rows: vec![vec!["sz3_1_0.1".into(), "oops".into()]],
        };
        let header = HeaderMap::resolve(&table.header, &ColumnLabels::default());
        let err = extract_series(&table, &[technique("sz3_1")], &header, "double").unwrap_err();
        assert_eq!(
            err,
            DataError::MissingColumn {
                label: "Compression ratio".into(),
            }
        );
    }

    #[test]
    fn extraction_is_a_pure_function_of_the_table() {
        let table = table(&[
            &["double", "0.001", "1.0"],
            &["sz3_1_0.01", "0.0008", "12.5"],
        ]);
        let techniques = [technique("sz3_1")];
        let first = extract(&table, &techniques).unwrap();
        let second = extract(&table, &techniques).unwrap();
        assert_eq!(first, second);
    }
}
