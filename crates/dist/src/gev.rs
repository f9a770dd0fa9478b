//! Generalized Extreme Value distribution, stationary and covariate-driven.
//!
//! # Out-of-support convention
//!
//! With `s = 1 + shape · (x - loc) / scale`, the GEV support is `s > 0`:
//! bounded above by `loc - scale/shape` when `shape < 0` and below by it
//! when `shape > 0`. Observations outside the support are NOT given a zero
//! density. They receive a fixed small positive floor
//! ([`GEV_SUPPORT_FLOOR`] for the stationary family,
//! [`NS_GEV_SUPPORT_FLOOR`] for the non-stationary one) so that the
//! log-likelihood stays finite while still heavily penalising parameters
//! that exclude observed data. This is a likelihood-stability convention,
//! not a statistically exact density.
//!
//! The cdf is clamped outside the support: exactly `1.0` above the upper
//! bound (`shape < 0`), exactly `0.0` below the lower bound (`shape > 0`).

use crate::error::{DistError, check_finite, check_gev_shape, check_scale};
use crate::skew_normal::check_aligned;

/// Density assigned to observations outside the stationary GEV support.
pub const GEV_SUPPORT_FLOOR: f64 = 1e-15;

/// Density assigned to observations outside the non-stationary GEV support.
pub const NS_GEV_SUPPORT_FLOOR: f64 = 1e-50;

/// GEV density with an explicit out-of-support floor.
pub(crate) fn gev_density(x: f64, shape: f64, loc: f64, scale: f64, floor: f64) -> f64 {
    let s = 1.0 + shape * (x - loc) / scale;
    if s.is_nan() {
        return f64::NAN;
    }
    if s <= 0.0 {
        return floor;
    }
    // Just inside a positive-shape lower bound `t` is huge and the density
    // underflows to exactly 0 (NLL +inf), while just outside it gets `floor`.
    let t = s.powf(-1.0 / shape);
    t.powf(shape + 1.0) * (-t).exp() / scale
}

/// GEV cdf, clamped to 0 or 1 outside the support.
pub(crate) fn gev_cumulative(x: f64, shape: f64, loc: f64, scale: f64) -> f64 {
    let s = 1.0 + shape * (x - loc) / scale;
    if s.is_nan() {
        return f64::NAN;
    }
    if s <= 0.0 {
        return if shape < 0.0 { 1.0 } else { 0.0 };
    }
    (-s.powf(-1.0 / shape)).exp()
}

/// Validated stationary GEV parameters (`shape != 0`, `scale > 0`).
///
/// With `t = (1 + shape · (x - loc)/scale)^(-1/shape)` inside the support:
///
/// - pdf: `(1/scale) · t^(shape+1) · exp(-t)`
/// - cdf: `exp(-t)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GevParams {
    shape: f64,
    loc: f64,
    scale: f64,
}

impl GevParams {
    /// Creates GEV parameters.
    ///
    /// # Errors
    ///
    /// [`DistError::ZeroShape`] for `shape == 0` (fit the Gumbel family
    /// instead), [`DistError::InvalidScale`] for non-positive scale.
    pub fn new(shape: f64, loc: f64, scale: f64) -> Result<Self, DistError> {
        Ok(Self {
            shape: check_gev_shape(shape)?,
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

    /// Location parameter.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Finite end of the support, `loc - scale/shape`.
    ///
    /// An upper bound when `shape < 0`, a lower bound when `shape > 0`.
    pub fn support_bound(&self) -> f64 {
        self.loc - self.scale / self.shape
    }

    /// Probability density at `x`; [`GEV_SUPPORT_FLOOR`] outside the support.
    pub fn pdf(&self, x: f64) -> f64 {
        gev_density(x, self.shape, self.loc, self.scale, GEV_SUPPORT_FLOOR)
    }

    /// Cumulative probability at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        gev_cumulative(x, self.shape, self.loc, self.scale)
    }

    /// Inverse cdf, `loc + scale · ((-ln p)^(-shape) - 1) / shape`.
    ///
    /// Returns NaN for `p` outside `[0, 1]`.
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        self.loc + self.scale * ((-p.ln()).powf(-self.shape) - 1.0) / self.shape
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

/// Validated non-stationary GEV parameters.
///
/// `loc = alpha + beta · covariate`; shape and scale are constant.
/// Out-of-support observations receive [`NS_GEV_SUPPORT_FLOOR`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NsGevParams {
    shape: f64,
    scale: f64,
    alpha: f64,
    beta: f64,
}

impl NsGevParams {
    /// Creates non-stationary GEV parameters.
    pub fn new(shape: f64, scale: f64, alpha: f64, beta: f64) -> Result<Self, DistError> {
        Ok(Self {
            shape: check_gev_shape(shape)?,
            scale: check_scale(scale)?,
            alpha: check_finite("alpha", alpha)?,
            beta: check_finite("beta", beta)?,
        })
    }

    pub(crate) fn from_raw(shape: f64, scale: f64, alpha: f64, beta: f64) -> Self {
        Self {
            shape,
            scale,
            alpha,
            beta,
        }
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Location at a given covariate value.
    pub fn location(&self, covariate: f64) -> f64 {
        self.alpha + self.beta * covariate
    }

    /// Probability density of `x` observed at `covariate`.
    pub fn pdf(&self, x: f64, covariate: f64) -> f64 {
        gev_density(
            x,
            self.shape,
            self.location(covariate),
            self.scale,
            NS_GEV_SUPPORT_FLOOR,
        )
    }

    /// Cumulative probability of `x` observed at `covariate`.
    pub fn cdf(&self, x: f64, covariate: f64) -> f64 {
        gev_cumulative(x, self.shape, self.location(covariate), self.scale)
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_rejects_zero_shape() {
        assert!(matches!(
            GevParams::new(0.0, 0.0, 1.0),
            Err(DistError::ZeroShape)
        ));
        assert!(matches!(
            NsGevParams::new(0.0, 1.0, 0.0, 0.0),
            Err(DistError::ZeroShape)
        ));
    }

    #[test]
    fn pdf_matches_closed_form_inside_support() {
        let g = GevParams::new(-0.1, 5.0, 1.5).unwrap();
        let x: f64 = 6.0;
        let s = 1.0 + -0.1 * (x - 5.0) / 1.5;
        let t = s.powf(10.0);
        let expected = t.powf(0.9) * (-t).exp() / 1.5;
        assert_relative_eq!(g.pdf(x), expected, epsilon = 1e-15);
        assert_relative_eq!(g.cdf(x), (-t).exp(), epsilon = 1e-15);
    }

    #[test]
    fn negative_shape_upper_bound() {
        let g = GevParams::new(-0.25, 2.0, 1.0).unwrap();
        let bound = g.support_bound();
        assert_relative_eq!(bound, 6.0);
        for x in [bound, bound + 1e-9, bound + 3.0, 1e6] {
            assert_eq!(g.pdf(x), GEV_SUPPORT_FLOOR);
            assert_eq!(g.cdf(x), 1.0);
        }
        assert!(g.cdf(bound - 0.5) < 1.0);
    }

    #[test]
    fn positive_shape_lower_bound() {
        let g = GevParams::new(0.2, 0.0, 1.0).unwrap();
        let bound = g.support_bound();
        assert_relative_eq!(bound, -5.0);
        for x in [bound, bound - 1e-9, bound - 10.0] {
            assert_eq!(g.pdf(x), GEV_SUPPORT_FLOOR);
            assert_eq!(g.cdf(x), 0.0);
        }
        assert!(g.pdf(bound + 5.0) > GEV_SUPPORT_FLOOR);
    }

    #[test]
    fn density_underflows_just_inside_lower_bound() {
        let g = GevParams::new(0.2, 0.0, 1.0).unwrap();
        let bound = g.support_bound();
        // s = 0.2, t = 3125: exp(-t) underflows
        assert_eq!(g.pdf(bound + 1.0), 0.0);
        assert_eq!(g.pdf(bound - 1.0), GEV_SUPPORT_FLOOR);
    }

    #[test]
    fn ns_uses_smaller_floor() {
        let g = NsGevParams::new(-0.5, 1.0, 0.0, 1.0).unwrap();
        // loc = 2 at covariate 2, upper bound = 4
        assert_eq!(g.pdf(4.5, 2.0), NS_GEV_SUPPORT_FLOOR);
        assert_eq!(g.cdf(4.5, 2.0), 1.0);
    }

    #[test]
    fn quantile_round_trip() {
        for shape in [-0.3, -0.1, 0.1, 0.4] {
            let g = GevParams::new(shape, 5.0, 1.5).unwrap();
            for p in [0.01, 0.3, 0.5, 0.9, 0.99] {
                assert_relative_eq!(g.cdf(g.quantile(p)), p, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn quantile_endpoints_hit_support_bound() {
        let upper = GevParams::new(-0.2, 1.0, 2.0).unwrap();
        assert_relative_eq!(upper.quantile(1.0), upper.support_bound());
        let lower = GevParams::new(0.2, 1.0, 2.0).unwrap();
        assert_relative_eq!(lower.quantile(0.0), lower.support_bound());
    }

    #[test]
    fn nan_observation_gives_nan() {
        let g = GevParams::new(0.1, 0.0, 1.0).unwrap();
        assert!(g.pdf(f64::NAN).is_nan());
        assert!(g.cdf(f64::NAN).is_nan());
    }
}
