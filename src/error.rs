use thiserror::Error;

/// Errors returned by fallible matrix operations.
///
/// Construction, indexing, elementary algebra, parsing and the elimination
/// engine all report through this one enum.
///
/// ```
/// use echelon::{DynMatrix, MatrixError};
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 1.0, 1.0]);
/// let b = DynMatrix::from_rows(2, 1, &[1.0, 2.0]);
/// assert!(matches!(a.special_solution(&b), Err(MatrixError::NoSolution { .. })));
///
/// assert_eq!(
///     DynMatrix::<f64>::identity(0).unwrap_err(),
///     MatrixError::InvalidDimension { rows: 0, cols: 0 },
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A size was requested that cannot be allocated or is not allowed here.
    #[error("invalid dimension: {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// Row or column index outside the current dimensions.
    #[error("index ({row}, {col}) out of bounds for {nrows}x{ncols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    /// Operand dimensions are incompatible.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },

    /// Malformed textual matrix. `line` is the 1-based row of the text.
    #[error("parse error on row {line}: {message}")]
    Parse { line: usize, message: String },

    /// The linear system is inconsistent.
    #[error("system has no solution (row {row} reduces to 0 = nonzero)")]
    NoSolution { row: usize },

    /// Square matrix has rank below its order.
    #[error("matrix is singular")]
    Singular,
}

/// Shorthand for results carrying a [`MatrixError`].
pub type Result<T> = core::result::Result<T, MatrixError>;
