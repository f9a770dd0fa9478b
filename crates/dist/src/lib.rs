//! # tempest-dist
//!
//! Closed-form densities, cumulative distribution functions and
//! negative log-likelihoods for the extreme-value families used in
//! storm-surge, precipitation and wind frequency analysis.
//!
//! Two ways in:
//!
//! **Typed parameters** (validated on construction):
//! ```
//! use tempest_dist::GevParams;
//!
//! let gev = GevParams::new(-0.1, 5.0, 1.5)?;
//! let p = gev.cdf(7.0);
//! let x100 = gev.quantile(1.0 - 1.0 / 100.0);
//! # assert!(p > 0.0 && x100 > 7.0);
//! # Ok::<(), tempest_dist::DistError>(())
//! ```
//!
//! **Raw parameter vectors** through [`Family`], the form the estimator
//! optimises over:
//! ```
//! use tempest_dist::Family;
//!
//! let x = [3.1, 4.7, 5.2, 6.0];
//! let nll = Family::Gumbel.negative_log_likelihood(&[5.0, 1.0], &x, None)?;
//! # assert!(nll.is_finite());
//! # Ok::<(), tempest_dist::DistError>(())
//! ```
//!
//! ## Glossary
//!
//! | Term | Meaning |
//! |------|---------|
//! | GEV | Generalized Extreme Value distribution (block maxima) |
//! | non-stationary | location follows a covariate: `loc = alpha + beta · covariate` |
//! | NLL | negative log-likelihood, `-ln ∏ pdf(x_i)` |
//! | support floor | density given to GEV observations outside the support |

mod error;
mod family;
mod gev;
mod gumbel;
mod likelihood;
mod normal;
mod skew_normal;
mod weibull;

pub use error::DistError;
pub use family::Family;
pub use gev::{GEV_SUPPORT_FLOOR, GevParams, NS_GEV_SUPPORT_FLOOR, NsGevParams};
pub use gumbel::GumbelParams;
pub use likelihood::{LIKELIHOOD_PRODUCT_FLOOR, nll_floored, nll_skip_nan};
pub use normal::{normal_cdf, normal_pdf, owens_t};
pub use skew_normal::{NsSkewNormalParams, SkewNormalParams};
pub use weibull::WeibullParams;
