//! Closed set of supported distribution families behind one interface.

use std::fmt;
use std::str::FromStr;

use crate::error::DistError;
use crate::gev::{GevParams, NsGevParams};
use crate::gumbel::GumbelParams;
use crate::likelihood::{LIKELIHOOD_PRODUCT_FLOOR, nll_floored, nll_skip_nan};
use crate::skew_normal::{NsSkewNormalParams, SkewNormalParams};
use crate::weibull::WeibullParams;

/// A supported distribution family, stationary or non-stationary.
///
/// Every family is evaluated from a raw parameter vector in the order given
/// by [`Family::param_names`], which is also the order the estimator
/// optimises over.
///
/// | Family | Parameters |
/// |--------|------------|
/// | `Weibull` | shape, loc, scale |
/// | `Gumbel` | loc, scale |
/// | `SkewNormal` | loc, scale, skew |
/// | `NsSkewNormal` | scale, skew, alpha, beta |
/// | `Gev` | shape, loc, scale |
/// | `NsGev` | shape, scale, alpha, beta |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Upper-bounded three-parameter Weibull.
    Weibull,
    /// Gumbel, `cdf = 1 - exp(-exp(z))`.
    Gumbel,
    /// Stationary skew-normal.
    SkewNormal,
    /// Skew-normal with `loc = alpha + beta · covariate`.
    NsSkewNormal,
    /// Stationary generalized extreme value.
    Gev,
    /// GEV with `loc = alpha + beta · covariate`.
    NsGev,
}

/// A family bound to concrete parameter values.
#[derive(Debug, Clone, Copy)]
enum Model {
    Weibull(WeibullParams),
    Gumbel(GumbelParams),
    SkewNormal(SkewNormalParams),
    NsSkewNormal(NsSkewNormalParams),
    Gev(GevParams),
    NsGev(NsGevParams),
}

impl Model {
    fn density(&self, x: f64, covariate: f64) -> f64 {
        match self {
            Model::Weibull(p) => p.pdf(x),
            Model::Gumbel(p) => p.pdf(x),
            Model::SkewNormal(p) => p.pdf(x),
            Model::NsSkewNormal(p) => p.pdf(x, covariate),
            Model::Gev(p) => p.pdf(x),
            Model::NsGev(p) => p.pdf(x, covariate),
        }
    }

    /// Density fed to the likelihood; differs from `density` only where the
    /// closed form is undefined.
    fn likelihood(&self, x: f64, covariate: f64) -> f64 {
        match self {
            Model::Weibull(p) => p.likelihood_density(x),
            _ => self.density(x, covariate),
        }
    }

    fn cumulative(&self, x: f64, covariate: f64) -> f64 {
        match self {
            Model::Weibull(p) => p.cdf(x),
            Model::Gumbel(p) => p.cdf(x),
            Model::SkewNormal(p) => p.cdf(x),
            Model::NsSkewNormal(p) => p.cdf(x, covariate),
            Model::Gev(p) => p.cdf(x),
            Model::NsGev(p) => p.cdf(x, covariate),
        }
    }
}

impl Family {
    /// All families, in declaration order.
    pub const ALL: [Family; 6] = [
        Family::Weibull,
        Family::Gumbel,
        Family::SkewNormal,
        Family::NsSkewNormal,
        Family::Gev,
        Family::NsGev,
    ];

    /// Short snake_case name, as accepted by [`Family::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Family::Weibull => "weibull",
            Family::Gumbel => "gumbel",
            Family::SkewNormal => "skew_normal",
            Family::NsSkewNormal => "ns_skew_normal",
            Family::Gev => "gev",
            Family::NsGev => "ns_gev",
        }
    }

    /// Parameter names in raw-vector order.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            Family::Weibull => &["shape", "loc", "scale"],
            Family::Gumbel => &["loc", "scale"],
            Family::SkewNormal => &["loc", "scale", "skew"],
            Family::NsSkewNormal => &["scale", "skew", "alpha", "beta"],
            Family::Gev => &["shape", "loc", "scale"],
            Family::NsGev => &["shape", "scale", "alpha", "beta"],
        }
    }

    /// Number of free parameters.
    pub fn n_params(self) -> usize {
        self.param_names().len()
    }

    /// Whether the location is driven by a covariate.
    pub fn is_non_stationary(self) -> bool {
        matches!(self, Family::NsSkewNormal | Family::NsGev)
    }

    /// Densities of `x` under `params`.
    ///
    /// # Errors
    ///
    /// See [`Family::negative_log_likelihood`].
    pub fn pdf(
        self,
        params: &[f64],
        x: &[f64],
        covariate: Option<&[f64]>,
    ) -> Result<Vec<f64>, DistError> {
        let model = self.bind(params)?;
        let cov = self.check_covariate(x, covariate)?;
        Ok(evaluate(x, cov, move |xi, ci| model.density(xi, ci)).collect())
    }

    /// Cumulative probabilities of `x` under `params`.
    ///
    /// # Errors
    ///
    /// See [`Family::negative_log_likelihood`].
    pub fn cdf(
        self,
        params: &[f64],
        x: &[f64],
        covariate: Option<&[f64]>,
    ) -> Result<Vec<f64>, DistError> {
        let model = self.bind(params)?;
        let cov = self.check_covariate(x, covariate)?;
        Ok(evaluate(x, cov, move |xi, ci| model.cumulative(xi, ci)).collect())
    }

    /// Negative log-likelihood `-ln ∏ pdf(x_i)` of the sample under `params`.
    ///
    /// NaN densities are excluded from the product; a Weibull observation
    /// above `loc` has an undefined density and is excluded too. For [`Family::NsGev`] the
    /// product is also floored at [`LIKELIHOOD_PRODUCT_FLOOR`] before the
    /// logarithm; the other families are not floored.
    ///
    /// Scale positivity is not checked here: the raw formulas are evaluated
    /// for any proposal, and keeping scale in range is the caller's job.
    ///
    /// # Errors
    ///
    /// - [`DistError::ParamCount`] if `params` has the wrong length.
    /// - [`DistError::ZeroShape`] for a GEV family with `shape == 0`.
    /// - [`DistError::MissingCovariate`] / [`DistError::UnexpectedCovariate`]
    ///   if the covariate presence does not match the family.
    /// - [`DistError::CovariateLength`] if the covariate is misaligned.
    pub fn negative_log_likelihood(
        self,
        params: &[f64],
        x: &[f64],
        covariate: Option<&[f64]>,
    ) -> Result<f64, DistError> {
        let model = self.bind(params)?;
        let cov = self.check_covariate(x, covariate)?;
        let densities = evaluate(x, cov, move |xi, ci| model.likelihood(xi, ci));
        Ok(match self {
            Family::NsGev => nll_floored(densities, LIKELIHOOD_PRODUCT_FLOOR),
            _ => nll_skip_nan(densities),
        })
    }

    /// Binds a raw parameter vector to this family.
    fn bind(self, params: &[f64]) -> Result<Model, DistError> {
        if params.len() != self.n_params() {
            return Err(DistError::ParamCount {
                family: self,
                expected: self.n_params(),
                got: params.len(),
            });
        }
        let p = params;
        Ok(match self {
            Family::Weibull => Model::Weibull(WeibullParams::from_raw(p[0], p[1], p[2])),
            Family::Gumbel => Model::Gumbel(GumbelParams::from_raw(p[0], p[1])),
            Family::SkewNormal => Model::SkewNormal(SkewNormalParams::from_raw(p[0], p[1], p[2])),
            Family::NsSkewNormal => {
                Model::NsSkewNormal(NsSkewNormalParams::from_raw(p[0], p[1], p[2], p[3]))
            }
            Family::Gev => {
                if p[0] == 0.0 {
                    return Err(DistError::ZeroShape);
                }
                Model::Gev(GevParams::from_raw(p[0], p[1], p[2]))
            }
            Family::NsGev => {
                if p[0] == 0.0 {
                    return Err(DistError::ZeroShape);
                }
                Model::NsGev(NsGevParams::from_raw(p[0], p[1], p[2], p[3]))
            }
        })
    }

    /// Validates covariate presence and alignment for this family.
    fn check_covariate<'a>(
        self,
        x: &[f64],
        covariate: Option<&'a [f64]>,
    ) -> Result<Option<&'a [f64]>, DistError> {
        match (self.is_non_stationary(), covariate) {
            (true, None) => Err(DistError::MissingCovariate { family: self }),
            (false, Some(_)) => Err(DistError::UnexpectedCovariate { family: self }),
            (true, Some(cov)) if cov.len() != x.len() => Err(DistError::CovariateLength {
                observations: x.len(),
                covariate: cov.len(),
            }),
            (_, cov) => Ok(cov),
        }
    }
}

/// Maps `f(x_i, covariate_i)` over the sample; stationary models get a
/// covariate of 0 that they ignore.
fn evaluate<'a, F>(
    x: &'a [f64],
    covariate: Option<&'a [f64]>,
    f: F,
) -> impl Iterator<Item = f64> + 'a
where
    F: Fn(f64, f64) -> f64 + 'a,
{
    x.iter().enumerate().map(move |(i, &xi)| {
        let ci = covariate.map_or(0.0, |c| c[i]);
        f(xi, ci)
    })
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = DistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
        Family::ALL
            .into_iter()
            .find(|f| f.name() == normalised)
            .ok_or_else(|| DistError::UnknownFamily {
                name: s.to_string(),
            })
    }
}
