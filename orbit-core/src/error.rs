/// Error categories raised by matrix algebra and intersection routines.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A matrix was requested with zero rows or zero columns.
    #[error("Invalid matrix dimensions: {rows}x{cols}")]
    Dimension { rows: usize, cols: usize },

    /// A row literal did not match the width of the first row.
    #[error("Row {row} has {found} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{axis} index {index} out of range for length {len}")]
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        len: usize,
    },

    /// Operand shapes disagree for the named operation.
    #[error("Dimension mismatch in {op}: expected {expected}, found {found}")]
    DimensionMismatch {
        op: &'static str,
        expected: String,
        found: String,
    },

    /// The two points defining a line coincide.
    #[error("Degenerate line: both points at ({x}, {y})")]
    DegenerateLine { x: f64, y: f64 },

    #[error("Invalid circle radius: {0}")]
    InvalidRadius(f64),
}

/// Matrix axis named in an [`Error::IndexOutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("Row"),
            Axis::Column => f.write_str("Column"),
        }
    }
}

impl Error {
    pub(crate) fn shape_mismatch(
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Self {
        Self::DimensionMismatch {
            op,
            expected: format!("{}x{}", expected.0, expected.1),
            found: format!("{}x{}", found.0, found.1),
        }
    }

    pub(crate) fn length_mismatch(op: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            op,
            expected: format!("length {expected}"),
            found: format!("length {found}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
