//! Skew-normal distribution, stationary and covariate-driven.

use crate::error::{DistError, check_finite, check_scale};
use crate::normal::{normal_cdf, normal_pdf, owens_t};

/// Validated stationary skew-normal parameters.
///
/// With `z = (x - loc) / scale`:
///
/// - pdf: `(2/scale) · φ(z) · Φ(skew · z)`
/// - cdf: `Φ(z) - 2 · T(z, skew)` where `T` is Owen's T function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewNormalParams {
    loc: f64,
    scale: f64,
    skew: f64,
}

impl SkewNormalParams {
    /// Creates skew-normal parameters, rejecting non-positive `scale`.
    pub fn new(loc: f64, scale: f64, skew: f64) -> Result<Self, DistError> {
        Ok(Self {
            loc: check_finite("loc", loc)?,
            scale: check_scale(scale)?,
            skew: check_finite("skew", skew)?,
        })
    }

    pub(crate) fn from_raw(loc: f64, scale: f64, skew: f64) -> Self {
        Self { loc, scale, skew }
    }

    /// Location parameter.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Skewness (slant) parameter; 0 gives the normal distribution.
    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.loc) / self.scale;
        2.0 / self.scale * normal_pdf(z) * normal_cdf(self.skew * z)
    }

    /// Cumulative probability at `x`, clamped to `[0, 1]` against quadrature round-off.
    pub fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.loc) / self.scale;
        (normal_cdf(z) - 2.0 * owens_t(z, self.skew)).clamp(0.0, 1.0)
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

/// Validated non-stationary skew-normal parameters.
///
/// The location follows the covariate linearly, `loc = alpha + beta · covariate`;
/// scale and skew are constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NsSkewNormalParams {
    scale: f64,
    skew: f64,
    alpha: f64,
    beta: f64,
}

impl NsSkewNormalParams {
    /// Creates non-stationary skew-normal parameters.
    pub fn new(scale: f64, skew: f64, alpha: f64, beta: f64) -> Result<Self, DistError> {
        Ok(Self {
            scale: check_scale(scale)?,
            skew: check_finite("skew", skew)?,
            alpha: check_finite("alpha", alpha)?,
            beta: check_finite("beta", beta)?,
        })
    }

    pub(crate) fn from_raw(scale: f64, skew: f64, alpha: f64, beta: f64) -> Self {
        Self {
            scale,
            skew,
            alpha,
            beta,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Location intercept.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Location slope per unit covariate.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Location at a given covariate value.
    pub fn location(&self, covariate: f64) -> f64 {
        self.alpha + self.beta * covariate
    }

    /// The stationary distribution in effect at a given covariate value.
    pub fn at(&self, covariate: f64) -> SkewNormalParams {
        SkewNormalParams::from_raw(self.location(covariate), self.scale, self.skew)
    }

    /// Probability density of `x` observed at `covariate`.
    pub fn pdf(&self, x: f64, covariate: f64) -> f64 {
        self.at(covariate).pdf(x)
    }

    /// Cumulative probability of `x` observed at `covariate`.
    pub fn cdf(&self, x: f64, covariate: f64) -> f64 {
        self.at(covariate).cdf(x)
    }

    /// Element-wise densities over aligned observation/covariate slices.
    ///
    /// # Errors
    ///
    /// Returns [`DistError::CovariateLength`] if the slices differ in length.
    pub fn pdf_slice(&self, xs: &[f64], covariate: &[f64]) -> Result<Vec<f64>, DistError> {
        check_aligned(xs, covariate)?;
        Ok(xs
            .iter()
            .zip(covariate)
            .map(|(&x, &c)| self.pdf(x, c))
            .collect())
    }

    /// Element-wise cumulative probabilities over aligned slices.
    ///
    /// # Errors
    ///
    /// Returns [`DistError::CovariateLength`] if the slices differ in length.
    pub fn cdf_slice(&self, xs: &[f64], covariate: &[f64]) -> Result<Vec<f64>, DistError> {
        check_aligned(xs, covariate)?;
        Ok(xs
            .iter()
            .zip(covariate)
            .map(|(&x, &c)| self.cdf(x, c))
            .collect())
    }
}

/// Checks that a covariate series is aligned with its observations.
pub(crate) fn check_aligned(xs: &[f64], covariate: &[f64]) -> Result<(), DistError> {
    if xs.len() != covariate.len() {
        return Err(DistError::CovariateLength {
            observations: xs.len(),
            covariate: covariate.len(),
        });
    }
    Ok(())
}
