//! Gumbel distribution in the `1 - exp(-exp(z))` orientation.

use crate::error::{DistError, check_finite, check_scale};

/// Validated Gumbel parameters.
///
/// With `z = (x - loc) / scale`:
///
/// - pdf: `(1/scale) · exp(z) · exp(-exp(z))`
/// - cdf: `1 - exp(-exp(z))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GumbelParams {
    loc: f64,
    scale: f64,
}

impl GumbelParams {
    /// Creates Gumbel parameters, rejecting non-finite `loc` and
    /// non-positive `scale`.
    pub fn new(loc: f64, scale: f64) -> Result<Self, DistError> {
        Ok(Self {
            loc: check_finite("loc", loc)?,
            scale: check_scale(scale)?,
        })
    }

    /// Builds parameters from an optimiser proposal without validation.
    pub(crate) fn from_raw(loc: f64, scale: f64) -> Self {
        Self { loc, scale }
    }

    /// Location parameter.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.loc) / self.scale;
        // exp(z) * exp(-exp(z)) folded into one exponent so large z gives 0, not inf * 0.
        (z - z.exp()).exp() / self.scale
    }

    /// Cumulative probability at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.loc) / self.scale;
        -(-z.exp()).exp_m1()
    }

    /// Inverse cdf: the value `x` with `cdf(x) = p`.
    ///
    /// Returns NaN for `p` outside `[0, 1]`.
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        self.loc + self.scale * (-(-p).ln_1p()).ln()
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
