//! Error types for matrix access, row partitioning and elimination.

use thiserror::Error;

/// Errors raised by [`Matrix`](crate::Matrix) construction and access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A cell or row index fell outside the matrix bounds.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Row count of the matrix.
        rows: usize,
        /// Column count of the matrix.
        cols: usize,
    },

    /// A matrix must have at least one row and one column.
    #[error("matrix dimensions must be positive, got {rows}x{cols}")]
    EmptyDimension {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// Rows passed to `from_rows` did not all have the same length.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        /// Offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },

    /// A flat buffer did not hold `rows * cols` values.
    #[error("expected {expected} values, found {found}")]
    DataLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
}

/// Errors raised while building a partition plan.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("span [{begin}, {end}) is inverted")]
    InvertedSpan { begin: usize, end: usize },

    #[error("range {index} ends at {end} before its start {start}")]
    InvertedRange {
        index: usize,
        start: usize,
        end: usize,
    },

    #[error("range {index} starts at {start}, expected {expected}")]
    Gap {
        index: usize,
        start: usize,
        expected: usize,
    },

    #[error("range {index} has length {len}, expected {base} or one more")]
    Unbalanced { index: usize, len: usize, base: usize },
}

/// Errors that abort an elimination run before it can produce an outcome.
///
/// A singular pivot is not an error; it is reported through
/// [`Outcome::Singular`](crate::Outcome::Singular).
#[derive(Debug, Error)]
pub enum EliminationError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Normalization divides row `i` by entry `(i, i)`, which needs a
    /// diagonal entry in every row.
    #[error("matrix has {rows} rows but only {cols} columns")]
    TooManyRows { rows: usize, cols: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
