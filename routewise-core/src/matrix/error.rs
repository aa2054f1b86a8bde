use thiserror::Error;

/// Errors from building distance or travel-time matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// No stops were provided.
    ///
    /// A matrix needs at least one stop. Callers should reject empty requests
    /// before reaching the provider.
    #[error("at least one stop is required")]
    EmptyInput,
    /// The average speed used for travel times was not a positive number.
    #[error("average speed must be positive, got {0} km/h")]
    InvalidSpeed(f64),
    /// A provider returned a matrix whose shape does not match the input.
    #[error("expected a {expected}x{expected} matrix, row {row} has {found} columns")]
    DimensionMismatch {
        /// Number of stops supplied.
        expected: usize,
        /// Offending row, or the row count when rows are missing.
        row: usize,
        /// Length found.
        found: usize,
    },
}
