use crate::error::DataError;
use crate::series::{OperationSeries, Orientation};
use std::path::Path;

/// Timings parsed from one measurement file.
///
/// Rows are samples in file order, columns are operations in token order.
/// Every row has the same number of columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleMatrix {
    rows: Vec<Vec<i64>>,
    columns: usize,
}

impl SampleMatrix {
    /// Parse whitespace-delimited integer rows. Blank lines are skipped.
    ///
    /// `origin` only appears in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, DataError> {
        Self::parse_bytes(text.as_bytes(), origin)
    }

    /// Same as [`SampleMatrix::parse`], decoding each line as UTF-8 on its own
    /// so an undecodable line is reported by number.
    pub fn parse_bytes(bytes: &[u8], origin: &Path) -> Result<Self, DataError> {
        let mut rows: Vec<Vec<i64>> = Vec::new();
        let mut columns = 0;

        for (idx, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let line_no = idx + 1;
            let line = std::str::from_utf8(raw).map_err(|source| DataError::InvalidUtf8 {
                path: origin.to_path_buf(),
                line: line_no,
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<i64>().map_err(|source| DataError::InvalidToken {
                        path: origin.to_path_buf(),
                        line: line_no,
                        token: token.to_string(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if rows.is_empty() {
                columns = row.len();
            } else if row.len() != columns {
                return Err(DataError::RaggedRow {
                    path: origin.to_path_buf(),
                    line: line_no,
                    expected: columns,
                    found: row.len(),
                });
            }

            rows.push(row);
        }

        Ok(Self { rows, columns })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    pub fn get(&self, row: usize, column: usize) -> Option<i64> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }
}

/// Read and parse a measurement file.
///
/// The file is read in full and closed before parsing begins.
pub fn load(path: &Path) -> Result<SampleMatrix, DataError> {
    let bytes = std::fs::read(path).map_err(|source| DataError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let matrix = SampleMatrix::parse_bytes(&bytes, path)?;
    log::debug!(
        "Loaded {}: {} samples x {} operations",
        path.display(),
        matrix.row_count(),
        matrix.column_count()
    );
    Ok(matrix)
}

/// Load a measurement file and reorient it into per-operation series.
pub fn load_series(path: &Path, orientation: Orientation) -> Result<OperationSeries, DataError> {
    let matrix = load(path)?;
    Ok(OperationSeries::from_matrix(&matrix, orientation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec as prop_vec;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_two_rows() {
        let file = write_temp("1 2 3\n4 5 6\n");
        let matrix = load(file.path()).unwrap();

        assert_eq!(matrix.row_count(), 2);
        assert_eq!(matrix.column_count(), 3);
        assert_eq!(matrix.rows(), &[vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(matrix.get(1, 0), Some(4));
        assert_eq!(matrix.get(2, 0), None);
    }

    #[test]
    fn test_load_series_transposes() {
        let first = write_temp("1 2 3\n4 5 6\n");
        let second = write_temp("7 8 9\n");

        let a = load_series(first.path(), Orientation::Transpose).unwrap();
        let b = load_series(second.path(), Orientation::Transpose).unwrap();

        assert_eq!(a.operations(), &[vec![1, 4], vec![2, 5], vec![3, 6]]);
        assert_eq!(b.operations(), &[vec![7], vec![8], vec![9]]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let with_blanks = write_temp("1 2 3\n\n   \n4 5 6\n\t\n");
        let without = write_temp("1 2 3\n4 5 6\n");

        assert_eq!(
            load(with_blanks.path()).unwrap(),
            load(without.path()).unwrap()
        );
    }

    #[test]
    fn test_extra_whitespace_between_tokens() {
        let matrix = SampleMatrix::parse("  10\t20    30  \r\n", Path::new("mem")).unwrap();
        assert_eq!(matrix.rows(), &[vec![10, 20, 30]]);
    }

    #[test]
    fn test_invalid_token_reports_line() {
        let file = write_temp("1 two 3\n");
        let err = load(file.path()).unwrap_err();

        match &err {
            DataError::InvalidToken { line, token, .. } => {
                assert_eq!(*line, 1);
                assert_eq!(token.as_str(), "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("\"two\""));
    }

    #[test]
    fn test_invalid_token_line_counts_blank_lines() {
        let text = "1 2 3\n\n4 5 6\n7 8 9\n1 2 x\n";
        let err = SampleMatrix::parse(text, Path::new("bench.txt")).unwrap_err();

        assert!(matches!(err, DataError::InvalidToken { line: 5, .. }));
        assert!(err.to_string().starts_with("bench.txt:5:"));
    }

    #[test]
    fn test_float_token_is_rejected() {
        let err = SampleMatrix::parse("1 2.5 3\n", Path::new("mem")).unwrap_err();
        assert!(matches!(err, DataError::InvalidToken { line: 1, .. }));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = SampleMatrix::parse("1 2 3\n4 5\n", Path::new("mem")).unwrap_err();

        match err {
            DataError::RaggedRow {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"1 2 3\n\n4 \xff 6\n").unwrap();
        file.flush().unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, DataError::InvalidUtf8 { line: 3, .. }));
        assert!(err.to_string().contains(":3:"));
    }

    #[test]
    fn test_empty_file() {
        let file = write_temp("\n\n");
        let matrix = load(file.path()).unwrap();

        assert!(matrix.is_empty());
        assert_eq!(matrix.column_count(), 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, DataError::FileAccess { .. }));
    }

    proptest! {
        #[test]
        fn prop_transpose_preserves_positions(
            (columns, rows) in (1usize..6).prop_flat_map(|c| (Just(c), prop_vec(prop_vec(any::<i64>(), c), 0..20)))
        ) {
            let text: String = rows
                .iter()
                .map(|row| {
                    let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                    format!("{}\n", line.join(" "))
                })
                .collect();

            let matrix = SampleMatrix::parse(&text, Path::new("prop")).unwrap();
            prop_assert_eq!(matrix.rows(), rows.as_slice());

            let series = OperationSeries::from_matrix(&matrix, Orientation::Transpose);
            if rows.is_empty() {
                prop_assert_eq!(series.operation_count(), 0);
            } else {
                prop_assert_eq!(series.operation_count(), columns);
                for (r, row) in rows.iter().enumerate() {
                    for (c, value) in row.iter().enumerate() {
                        prop_assert_eq!(series.operation(c).unwrap()[r], *value);
                    }
                }
            }
        }

        #[test]
        fn prop_blank_lines_do_not_add_rows(rows in prop_vec(prop_vec(0i64..1_000, 3), 1..10), blanks in prop_vec(0usize..3, 1..10)) {
            let mut plain = String::new();
            let mut padded = String::new();
            for (i, row) in rows.iter().enumerate() {
                let line = format!("{} {} {}\n", row[0], row[1], row[2]);
                plain.push_str(&line);
                for _ in 0..blanks[i % blanks.len()] {
                    padded.push_str(" \n");
                }
                padded.push_str(&line);
            }

            let a = SampleMatrix::parse(&plain, Path::new("plain")).unwrap();
            let b = SampleMatrix::parse(&padded, Path::new("padded")).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
