//! Configuration for maximum-likelihood fitting.

use crate::error::FitError;

/// Configuration for the estimator and its default Nelder-Mead minimiser.
///
/// # Example
///
/// ```
/// use tempest_fit::FitConfig;
///
/// let config = FitConfig::new()
///     .with_max_iters(5000)
///     .with_gev_shape_limit(0.4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    max_iters: u64,
    sd_tolerance: f64,
    gev_shape_limit: Option<f64>,
}

impl FitConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `max_iters = 2000`, `sd_tolerance = 1e-8`,
    /// `gev_shape_limit = None` (GEV shape unbounded).
    pub fn new() -> Self {
        Self {
            max_iters: 2000,
            sd_tolerance: 1e-8,
            gev_shape_limit: None,
        }
    }

    // --- Builder methods ---

    /// Sets the iteration budget of the minimiser.
    pub fn with_max_iters(mut self, n: u64) -> Self {
        self.max_iters = n;
        self
    }

    /// Sets the convergence tolerance on the standard deviation of the
    /// objective across the simplex vertices.
    pub fn with_sd_tolerance(mut self, tol: f64) -> Self {
        self.sd_tolerance = tol;
        self
    }

    /// Restricts GEV shape to `[-limit, limit]`.
    pub fn with_gev_shape_limit(mut self, limit: f64) -> Self {
        self.gev_shape_limit = Some(limit);
        self
    }

    /// Removes any GEV shape restriction.
    pub fn without_gev_shape_limit(mut self) -> Self {
        self.gev_shape_limit = None;
        self
    }

    // --- Accessors ---

    /// Returns the iteration budget.
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Returns the simplex standard-deviation tolerance.
    pub fn sd_tolerance(&self) -> f64 {
        self.sd_tolerance
    }

    /// Returns the GEV shape limit, if any.
    pub fn gev_shape_limit(&self) -> Option<f64> {
        self.gev_shape_limit
    }

    /// Validates all configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InvalidConfig`] if `max_iters` is zero, the
    /// tolerance is not finite and positive, or the shape limit is not
    /// finite and positive.
    pub fn validate(&self) -> Result<(), FitError> {
        if self.max_iters == 0 {
            return Err(FitError::InvalidConfig {
                reason: "max_iters must be > 0".to_string(),
            });
        }
        if !self.sd_tolerance.is_finite() || self.sd_tolerance <= 0.0 {
            return Err(FitError::InvalidConfig {
                reason: format!(
                    "sd_tolerance must be finite and > 0, got {}",
                    self.sd_tolerance
                ),
            });
        }
        if let Some(limit) = self.gev_shape_limit {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(FitError::InvalidConfig {
                    reason: format!("gev_shape_limit must be finite and > 0, got {limit}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::new()
    }
}
