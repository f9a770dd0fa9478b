//! Reversed (upper-bounded) three-parameter Weibull distribution.

use crate::error::{DistError, check_finite, check_scale};

/// Validated Weibull parameters.
///
/// The support is bounded above by `loc`. With `u = (loc - x) / scale`:
///
/// - pdf: `(shape/scale) · u^(shape-1) · exp(-u^shape)` for `x <= loc`, 0 above
/// - likelihood density: the same formula, NaN above `loc`
/// - cdf: `exp(-u^shape)` for `x < loc`, 1 at and above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullParams {
    shape: f64,
    loc: f64,
    scale: f64,
}

impl WeibullParams {
    /// Creates Weibull parameters. `shape` and `scale` must be finite and > 0.
    pub fn new(shape: f64, loc: f64, scale: f64) -> Result<Self, DistError> {
        if !shape.is_finite() || shape <= 0.0 {
            return Err(DistError::InvalidShape { shape });
        }
        Ok(Self {
            shape,
            loc: check_finite("loc", loc)?,
            scale: check_scale(scale)?,
        })
    }

    pub(crate) fn from_raw(shape: f64, loc: f64, scale: f64) -> Self {
        Self { shape, loc, scale }
    }

    /// Shape parameter.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Location parameter (upper end of the support).
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Probability density at `x`; zero above the upper bound `loc`.
    pub fn pdf(&self, x: f64) -> f64 {
        let u = (self.loc - x) / self.scale;
        if u < 0.0 {
            return 0.0;
        }
        self.shape / self.scale * u.powf(self.shape - 1.0) * (-u.powf(self.shape)).exp()
    }

    /// Density as seen by the likelihood: the bare formula, which is
    /// undefined (NaN) above `loc`. NaN observations are left out of the NLL.
    pub fn likelihood_density(&self, x: f64) -> f64 {
        let u = (self.loc - x) / self.scale;
        if u < 0.0 {
            return f64::NAN;
        }
        self.pdf(x)
    }

    /// Cumulative probability at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        let u = (self.loc - x) / self.scale;
        if u <= 0.0 {
            return 1.0;
        }
        (-u.powf(self.shape)).exp()
    }

    /// Inverse cdf. Returns NaN for `p` outside `[0, 1]`.
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        self.loc - self.scale * (-p.ln()).powf(1.0 / self.shape)
    }

    /// Densities for every value in `xs`.
    pub fn pdf_slice(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.pdf(x)).collect()
    }

    /// Cumulative probabilities for every value in `xs`.
    pub fn cdf_slice(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.cdf(x)).collect()
    }
}
