//! Fit result types.

use std::fmt;

use tempest_dist::{Family, GevParams, GumbelParams, WeibullParams};

/// How the minimiser terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitStatus {
    /// The convergence criterion was met.
    Converged,
    /// The iteration budget ran out before convergence.
    MaxIterations,
    /// The minimiser stopped for another reason.
    Stopped(String),
}

impl FitStatus {
    /// Whether the fit converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, FitStatus::Converged)
    }
}

impl fmt::Display for FitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitStatus::Converged => write!(f, "converged"),
            FitStatus::MaxIterations => write!(f, "maximum iterations reached"),
            FitStatus::Stopped(reason) => write!(f, "stopped: {reason}"),
        }
    }
}

/// Fitted parameters of one family plus how the minimisation ended.
///
/// Non-convergence is not an error: inspect [`FitResult::status`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    family: Family,
    params: Vec<f64>,
    status: FitStatus,
    objective: f64,
    iterations: u64,
    n_observations: usize,
}

impl FitResult {
    pub(crate) fn new(
        family: Family,
        params: Vec<f64>,
        status: FitStatus,
        objective: f64,
        iterations: u64,
        n_observations: usize,
    ) -> Self {
        Self {
            family,
            params,
            status,
            objective,
            iterations,
            n_observations,
        }
    }

    /// Returns the fitted family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the fitted parameters in [`Family::param_names`] order.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Returns the named parameter, if the family has it.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.family
            .param_names()
            .iter()
            .position(|&n| n == name)
            .and_then(|i| self.params.get(i).copied())
    }

    /// Iterates over `(name, value)` pairs.
    pub fn named_params(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.family
            .param_names()
            .iter()
            .copied()
            .zip(self.params.iter().copied())
    }

    /// Returns the termination status.
    pub fn status(&self) -> &FitStatus {
        &self.status
    }

    /// Returns the final negative log-likelihood.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Returns the log-likelihood at the fitted parameters.
    pub fn log_likelihood(&self) -> f64 {
        -self.objective
    }

    /// Returns the number of minimiser iterations.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Returns the number of observations the fit used.
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// Akaike information criterion, `2k + 2·NLL`.
    pub fn aic(&self) -> f64 {
        2.0 * self.params.len() as f64 + 2.0 * self.objective
    }

    /// Value whose non-exceedance probability is `1 - 1/period` under the
    /// fitted stationary distribution.
    ///
    /// Returns `None` for non-stationary families, skew-normal fits,
    /// `period <= 1` or parameters that fail validation.
    pub fn return_level(&self, period: f64) -> Option<f64> {
        if !period.is_finite() || period <= 1.0 {
            return None;
        }
        let p = 1.0 - 1.0 / period;
        let q = match (self.family, self.params.as_slice()) {
            (Family::Gumbel, &[loc, scale]) => GumbelParams::new(loc, scale).ok()?.quantile(p),
            (Family::Gev, &[shape, loc, scale]) => {
                GevParams::new(shape, loc, scale).ok()?.quantile(p)
            }
            (Family::Weibull, &[shape, loc, scale]) => {
                WeibullParams::new(shape, loc, scale).ok()?.quantile(p)
            }
            _ => return None,
        };
        q.is_finite().then_some(q)
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.family)?;
        for (i, (name, value)) in self.named_params().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value:.6}")?;
        }
        write!(
            f,
            "; nll={:.6}, iterations={}, {})",
            self.objective, self.iterations, self.status
        )
    }
}
