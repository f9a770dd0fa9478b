//! # tempest-fit
//!
//! Maximum-likelihood estimation for the `tempest-dist` families.
//!
//! The negative log-likelihood of the chosen family is minimised with a
//! derivative-free simplex search. Parameters leaving their admissible
//! range (non-positive scale, zero GEV shape, optional GEV shape limit)
//! score `f64::MAX` instead of aborting the search.
//!
//! ```
//! use tempest_dist::Family;
//! use tempest_fit::{FitConfig, fit};
//!
//! let annual_max = [31.2, 28.4, 35.9, 30.1, 29.7, 33.0, 41.3, 27.8, 32.5, 30.9];
//! let result = fit(Family::Gev, &annual_max, &[-0.1, 30.0, 3.0], None, &FitConfig::new())?;
//! println!("{result}");
//! # Ok::<(), tempest_fit::FitError>(())
//! ```
//!
//! The minimiser is injectable through [`Minimizer`]; [`NelderMeadMinimizer`]
//! (backed by `argmin`) is the default. [`fit_batch`] runs many independent
//! fits on the rayon pool.

mod batch;
mod bounds;
mod config;
mod error;
mod estimator;
mod minimizer;
mod result;

pub use batch::{FitJob, fit_batch, fit_batch_with};
pub use bounds::{Bound, family_bounds};
pub use config::FitConfig;
pub use error::FitError;
pub use estimator::{fit, fit_with};
pub use minimizer::{Minimizer, MinimizerOutcome, NelderMeadMinimizer};
pub use result::{FitResult, FitStatus};
