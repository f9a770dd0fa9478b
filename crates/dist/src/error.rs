//! Error types for the tempest-dist crate.

use crate::family::Family;

/// Error type for all fallible operations in the tempest-dist crate.
///
/// Only structural problems are reported here (wrong arity, misaligned
/// covariates, invalid typed parameters). Numerical degeneracy inside the
/// density formulas is handled by the flooring rules of each family.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistError {
    /// Returned when a raw parameter vector has the wrong length.
    #[error("{family} expects {expected} parameters, got {got}")]
    ParamCount {
        /// Family being evaluated.
        family: Family,
        /// Number of parameters the family takes.
        expected: usize,
        /// Number of parameters supplied.
        got: usize,
    },

    /// Returned when a non-stationary family is evaluated without a covariate.
    #[error("{family} requires a covariate series")]
    MissingCovariate {
        /// Family being evaluated.
        family: Family,
    },

    /// Returned when a covariate is supplied to a stationary family.
    #[error("{family} is stationary and takes no covariate")]
    UnexpectedCovariate {
        /// Family being evaluated.
        family: Family,
    },

    /// Returned when the covariate series is not aligned with the observations.
    #[error("covariate length mismatch: {observations} observations, {covariate} covariate values")]
    CovariateLength {
        /// Number of observations.
        observations: usize,
        /// Number of covariate values.
        covariate: usize,
    },

    /// Returned when a scale parameter is not finite and strictly positive.
    #[error("scale must be finite and > 0, got {scale}")]
    InvalidScale {
        /// The rejected scale.
        scale: f64,
    },

    /// Returned when a Weibull shape parameter is not finite and strictly positive.
    #[error("shape must be finite and > 0, got {shape}")]
    InvalidShape {
        /// The rejected shape.
        shape: f64,
    },

    /// Returned when a GEV shape parameter is exactly zero.
    ///
    /// The zero-shape limit is the Gumbel case and must be fitted with
    /// [`Family::Gumbel`] explicitly.
    #[error("GEV shape must be non-zero (use the Gumbel family for the zero-shape limit)")]
    ZeroShape,

    /// Returned when a parameter is NaN or infinite.
    #[error("parameter {name} is not finite: {value}")]
    NonFiniteParameter {
        /// Parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Returned when parsing an unknown family name.
    #[error("unknown distribution family: {name}")]
    UnknownFamily {
        /// The unrecognised name.
        name: String,
    },
}

/// Rejects NaN and infinite parameter values.
pub(crate) fn check_finite(name: &str, value: f64) -> Result<f64, DistError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistError::NonFiniteParameter {
            name: name.to_string(),
            value,
        })
    }
}

/// Rejects scales that are not finite and strictly positive.
pub(crate) fn check_scale(scale: f64) -> Result<f64, DistError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(DistError::InvalidScale { scale })
    }
}

/// Rejects GEV shapes that are zero or not finite.
pub(crate) fn check_gev_shape(shape: f64) -> Result<f64, DistError> {
    let shape = check_finite("shape", shape)?;
    if shape == 0.0 {
        return Err(DistError::ZeroShape);
    }
    Ok(shape)
}
