/// An error type for the linalg module.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// The pivot selected at `column` is zero or too close to zero.
    ///
    /// The system is singular or numerically degenerate.
    #[error("Degenerate linear system: pivot {pivot:e} at column {column} is below tolerance")]
    DegenerateSystem {
        /// Column in which elimination stopped.
        column: usize,
        /// Magnitude of the best pivot candidate.
        pivot: f64,
    },

    /// The matrix is not square or does not match the right-hand side.
    #[error("Dimension mismatch: matrix is {rows}x{cols}, right-hand side has {rhs} entries")]
    DimensionMismatch {
        /// Number of rows of the coefficient matrix.
        rows: usize,
        /// Number of columns of the offending row.
        cols: usize,
        /// Length of the right-hand side.
        rhs: usize,
    },
}
