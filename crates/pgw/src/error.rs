//! Error types for the tempest-pgw crate.

/// Error type for all fallible operations in the tempest-pgw crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PgwError {
    /// Returned when an input array does not match the declared grid dimensions.
    #[error("shape mismatch for {field}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Name of the mismatched field.
        field: String,
        /// Shape implied by the grid dimensions.
        expected: Vec<usize>,
        /// Actual shape of the array.
        got: Vec<usize>,
    },

    /// Returned when any grid dimension is zero.
    #[error("grid has no cells: {dims}")]
    EmptyGrid {
        /// Description of the dimensions.
        dims: String,
    },

    /// Returned when a perturbation delta is NaN or infinite.
    #[error("delta {name} must be finite, got {value}")]
    InvalidDelta {
        /// Delta name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// Wrapped error from ndarray when assembling output arrays.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
