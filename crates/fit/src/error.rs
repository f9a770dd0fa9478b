//! Error types for the tempest-fit crate.

use tempest_dist::{DistError, Family};

/// Error type for all fallible operations in the tempest-fit crate.
///
/// Every variant except [`FitError::OptimizationFailed`] is raised before
/// the minimiser starts. Failing to converge is not an error; it is reported
/// through [`crate::FitStatus`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Returned when the observation sample is empty.
    #[error("observation sample is empty")]
    EmptyData,

    /// Returned when an observation is NaN or infinite.
    #[error("observation {index} is not finite: {value}")]
    NonFiniteData {
        /// Position of the offending observation.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a covariate value is NaN or infinite.
    #[error("covariate {index} is not finite: {value}")]
    NonFiniteCovariate {
        /// Position of the offending covariate value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when the sample has fewer observations than free parameters.
    #[error("{family} needs at least {min} observations, got {n}")]
    InsufficientData {
        /// Family being fitted.
        family: Family,
        /// Number of observations supplied.
        n: usize,
        /// Minimum number of observations.
        min: usize,
    },

    /// Returned when the initial guess has the wrong number of parameters.
    #[error("initial guess for {family} must have {expected} values, got {got}")]
    InitialArity {
        /// Family being fitted.
        family: Family,
        /// Expected number of parameters.
        expected: usize,
        /// Number of parameters supplied.
        got: usize,
    },

    /// Returned when an initial parameter lies outside its admissible range.
    #[error("initial {name} = {value} is outside its bounds ({bound})")]
    InitialOutOfBounds {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// Human-readable bound description.
        bound: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the minimiser itself fails (not when it fails to converge).
    ///
    /// The `message` field is a `String` because argmin errors do not
    /// implement `Clone`.
    #[error("optimization failed: {message}")]
    OptimizationFailed {
        /// Description of the failure.
        message: String,
    },

    /// Structural error from the distribution library.
    #[error(transparent)]
    Dist(#[from] DistError),
}
