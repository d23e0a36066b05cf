use thiserror::Error;

/// Conditions reported by the checked `try_*` matrix operations.
///
/// The unchecked operations never fail: they skip the elimination step that would divide by zero
/// and return a best-effort value instead.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MathError {
    /// A zero pivot was met while entries below it were non-zero. Elimination without row
    /// exchanges cannot clear that column, so the result would be wrong.
    #[error("zero pivot in column {column} with non-zero entries below it")]
    ZeroPivot { column: usize },

    /// The matrix has no inverse: a pivot or diagonal entry was zero.
    #[error("matrix is singular, zero pivot in column {column}")]
    Singular { column: usize },
}

/// Errors from loading or saving a projection config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid projection config: {0}")]
    Json(#[from] serde_json::Error),
}
