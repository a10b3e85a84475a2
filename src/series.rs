use crate::error::DataError;
use crate::loader::SampleMatrix;

/// Operation categories, in the column order the benchmark writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Update,
    Read,
    Insert,
}

impl Operation {
    pub fn all() -> &'static [Operation] {
        &[Operation::Update, Operation::Read, Operation::Insert]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Update => "update",
            Operation::Read => "read",
            Operation::Insert => "insert",
        }
    }

    /// Default panel labels, one per operation column.
    pub fn default_labels() -> Vec<String> {
        Self::all().iter().map(|op| op.name().to_string()).collect()
    }
}

/// How a sample-major matrix is turned operation-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// `series[op][i] == matrix[i][op]`
    #[default]
    Transpose,
    /// Counter-clockwise quarter turn: `series[op][i] == matrix[i][C - 1 - op]`.
    /// Matches the legacy drawer, which reads columns right to left.
    Rotate90,
}

/// Timings grouped per operation. Each inner sequence keeps sample order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationSeries {
    operations: Vec<Vec<i64>>,
}

impl OperationSeries {
    pub fn from_matrix(matrix: &SampleMatrix, orientation: Orientation) -> Self {
        let columns = matrix.column_count();
        let mut operations: Vec<Vec<i64>> = (0..columns)
            .map(|_| Vec::with_capacity(matrix.row_count()))
            .collect();

        for row in matrix.rows() {
            for (column, &value) in row.iter().enumerate() {
                let op = match orientation {
                    Orientation::Transpose => column,
                    Orientation::Rotate90 => columns - 1 - column,
                };
                operations[op].push(value);
            }
        }

        Self { operations }
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn operation(&self, index: usize) -> Option<&[i64]> {
        self.operations.get(index).map(Vec::as_slice)
    }

    pub fn operations(&self) -> &[Vec<i64>] {
        &self.operations
    }

    /// Number of samples; 0 when there are no operations.
    pub fn sample_count(&self) -> usize {
        self.operations.first().map_or(0, Vec::len)
    }
}

/// One named comparison source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSide {
    pub name: String,
    pub series: OperationSeries,
}

impl ComparisonSide {
    pub fn new(name: impl Into<String>, series: OperationSeries) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}

/// Sources drawn together on one figure. Sample counts may differ between
/// sides, operation counts may not.
#[derive(Debug, Clone, Default)]
pub struct ComparisonDataset {
    pub sides: Vec<ComparisonSide>,
}

impl ComparisonDataset {
    pub fn new(sides: Vec<ComparisonSide>) -> Self {
        Self { sides }
    }

    pub fn pair(first: OperationSeries, second: OperationSeries) -> Self {
        Self::new(vec![
            ComparisonSide::new("first", first),
            ComparisonSide::new("second", second),
        ])
    }

    /// Shared operation count of all sides.
    pub fn operation_count(&self) -> Result<usize, DataError> {
        let Some(reference) = self.sides.first() else {
            return Err(DataError::NoOperations);
        };
        let expected = reference.series.operation_count();

        for side in &self.sides[1..] {
            let found = side.series.operation_count();
            if found != expected {
                return Err(DataError::DimensionMismatch {
                    side: side.name.clone(),
                    expected,
                    found,
                });
            }
        }

        if expected == 0 {
            return Err(DataError::NoOperations);
        }
        Ok(expected)
    }
}
