//! Maximum-likelihood estimation of a single family.

use tempest_dist::{DistError, Family};
use tracing::debug;

use crate::bounds::{Bound, all_within, family_bounds};
use crate::config::FitConfig;
use crate::error::FitError;
use crate::minimizer::{Minimizer, NelderMeadMinimizer};
use crate::result::FitResult;

/// Fits `family` to `x` by minimising its negative log-likelihood with the
/// default Nelder-Mead minimiser.
///
/// `initial` is in [`Family::param_names`] order. `covariate` must be given
/// for the non-stationary families (one value per observation) and omitted
/// for the others.
///
/// # Errors
///
/// Input problems are reported before minimisation starts:
/// - [`FitError::EmptyData`], [`FitError::NonFiniteData`],
///   [`FitError::InsufficientData`] for a bad sample.
/// - [`FitError::Dist`] for a missing, unexpected or misaligned covariate,
///   or a zero initial GEV shape.
/// - [`FitError::NonFiniteCovariate`] for NaN/inf covariate values.
/// - [`FitError::InitialArity`], [`FitError::InitialOutOfBounds`] for a bad
///   initial guess.
/// - [`FitError::InvalidConfig`] if `config` fails validation.
///
/// Failing to converge is not an error; see [`FitResult::status`].
///
/// # Example
///
/// ```
/// use tempest_dist::Family;
/// use tempest_fit::{FitConfig, fit};
///
/// let x = [9.1, 11.4, 8.7, 10.2, 12.9, 7.5, 10.8, 9.9];
/// let result = fit(Family::Gumbel, &x, &[10.0, 1.0], None, &FitConfig::new())?;
/// assert_eq!(result.params().len(), 2);
/// # Ok::<(), tempest_fit::FitError>(())
/// ```
pub fn fit(
    family: Family,
    x: &[f64],
    initial: &[f64],
    covariate: Option<&[f64]>,
    config: &FitConfig,
) -> Result<FitResult, FitError> {
    fit_with(&NelderMeadMinimizer, family, x, initial, covariate, config)
}

/// Like [`fit`], with an injected [`Minimizer`].
#[tracing::instrument(skip(minimizer, x, initial, covariate, config), fields(n = x.len()))]
pub fn fit_with<M>(
    minimizer: &M,
    family: Family,
    x: &[f64],
    initial: &[f64],
    covariate: Option<&[f64]>,
    config: &FitConfig,
) -> Result<FitResult, FitError>
where
    M: Minimizer + ?Sized,
{
    config.validate()?;
    validate_sample(family, x)?;
    validate_covariate(family, x.len(), covariate)?;
    let bounds = family_bounds(family, config.gev_shape_limit());
    validate_initial(family, initial, &bounds)?;

    let objective = |params: &[f64]| penalized_nll(family, params, x, covariate, &bounds);
    debug!(
        family = %family,
        initial = ?initial,
        initial_nll = objective(initial),
        "starting fit"
    );

    let outcome = minimizer.minimize(&objective, initial, &bounds, config)?;

    debug!(
        family = %family,
        params = ?outcome.params,
        nll = outcome.objective,
        iterations = outcome.iterations,
        status = %outcome.status,
        "fit finished"
    );

    Ok(FitResult::new(
        family,
        outcome.params,
        outcome.status,
        outcome.objective,
        outcome.iterations,
        x.len(),
    ))
}

/// Negative log-likelihood with inadmissible proposals scored `f64::MAX`.
///
/// A proposal is inadmissible if it leaves the bounds, if the family
/// rejects it (zero GEV shape) or if the likelihood is not finite.
fn penalized_nll(
    family: Family,
    params: &[f64],
    x: &[f64],
    covariate: Option<&[f64]>,
    bounds: &[Bound],
) -> f64 {
    if !all_within(params, bounds) {
        return f64::MAX;
    }
    match family.negative_log_likelihood(params, x, covariate) {
        Ok(nll) if nll.is_finite() => nll,
        _ => f64::MAX,
    }
}

fn validate_sample(family: Family, x: &[f64]) -> Result<(), FitError> {
    if x.is_empty() {
        return Err(FitError::EmptyData);
    }
    if let Some((index, &value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(FitError::NonFiniteData { index, value });
    }
    let min = family.n_params();
    if x.len() < min {
        return Err(FitError::InsufficientData {
            family,
            n: x.len(),
            min,
        });
    }
    Ok(())
}

fn validate_covariate(
    family: Family,
    n: usize,
    covariate: Option<&[f64]>,
) -> Result<(), FitError> {
    match (family.is_non_stationary(), covariate) {
        (true, None) => Err(DistError::MissingCovariate { family }.into()),
        (false, Some(_)) => Err(DistError::UnexpectedCovariate { family }.into()),
        (false, None) => Ok(()),
        (true, Some(cov)) => {
            if cov.len() != n {
                return Err(DistError::CovariateLength {
                    observations: n,
                    covariate: cov.len(),
                }
                .into());
            }
            if let Some((index, &value)) = cov.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(FitError::NonFiniteCovariate { index, value });
            }
            Ok(())
        }
    }
}

fn validate_initial(family: Family, initial: &[f64], bounds: &[Bound]) -> Result<(), FitError> {
    if initial.len() != family.n_params() {
        return Err(FitError::InitialArity {
            family,
            expected: family.n_params(),
            got: initial.len(),
        });
    }
    for ((&name, &value), bound) in family.param_names().iter().zip(initial).zip(bounds) {
        if !bound.contains(value) {
            return Err(FitError::InitialOutOfBounds {
                name,
                value,
                bound: bound.to_string(),
            });
        }
    }
    if matches!(family, Family::Gev | Family::NsGev) && initial[0] == 0.0 {
        return Err(DistError::ZeroShape.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::minimizer::MinimizerOutcome;
    use crate::result::FitStatus;

    /// Records what it was asked and returns the initial guess unchanged.
    #[derive(Default)]
    struct StubMinimizer {
        seen: Mutex<Vec<(Vec<f64>, f64, Vec<Bound>)>>,
    }

    impl Minimizer for StubMinimizer {
        fn minimize(
            &self,
            objective: &dyn Fn(&[f64]) -> f64,
            initial: &[f64],
            bounds: &[Bound],
            _config: &FitConfig,
        ) -> Result<MinimizerOutcome, FitError> {
            let value = objective(initial);
            self.seen
                .lock()
                .unwrap()
                .push((initial.to_vec(), value, bounds.to_vec()));
            Ok(MinimizerOutcome {
                params: initial.to_vec(),
                objective: value,
                iterations: 0,
                status: FitStatus::Stopped("stub".to_string()),
            })
        }
    }

    /// Evaluates the objective at fixed probe points instead of minimising.
    struct ProbeMinimizer {
        probes: Vec<Vec<f64>>,
        values: Mutex<Vec<f64>>,
    }

    impl Minimizer for ProbeMinimizer {
        fn minimize(
            &self,
            objective: &dyn Fn(&[f64]) -> f64,
            initial: &[f64],
            _bounds: &[Bound],
            _config: &FitConfig,
        ) -> Result<MinimizerOutcome, FitError> {
            let mut values = self.values.lock().unwrap();
            for p in &self.probes {
                values.push(objective(p));
            }
            Ok(MinimizerOutcome {
                params: initial.to_vec(),
                objective: objective(initial),
                iterations: 0,
                status: FitStatus::MaxIterations,
            })
        }
    }

    const SAMPLE: [f64; 6] = [3.2, 4.1, 5.0, 5.9, 7.3, 8.8];

    #[test]
    fn stub_receives_initial_guess_and_bounds() {
        let stub = StubMinimizer::default();
        let r = fit_with(
            &stub,
            Family::Gumbel,
            &SAMPLE,
            &[5.0, 1.0],
            None,
            &FitConfig::new(),
        )
        .unwrap();

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (initial, value, bounds) = &seen[0];
        assert_eq!(initial, &vec![5.0, 1.0]);
        let expected = Family::Gumbel
            .negative_log_likelihood(&[5.0, 1.0], &SAMPLE, None)
            .unwrap();
        assert_eq!(*value, expected);
        assert_eq!(bounds, &vec![Bound::Free, Bound::Positive]);

        assert_eq!(r.params(), &[5.0, 1.0]);
        assert_eq!(r.objective(), expected);
        assert_eq!(r.status(), &FitStatus::Stopped("stub".to_string()));
        assert_eq!(r.n_observations(), SAMPLE.len());
    }

    #[test]
    fn objective_penalises_inadmissible_proposals() {
        let probe = ProbeMinimizer {
            probes: vec![
                vec![5.0, -1.0],      // negative scale
                vec![5.0, 0.0],       // zero scale
                vec![f64::NAN, 1.0],  // non-finite
                vec![5.0, 1.0],       // admissible
            ],
            values: Mutex::new(Vec::new()),
        };
        fit_with(
            &probe,
            Family::Gumbel,
            &SAMPLE,
            &[5.0, 1.0],
            None,
            &FitConfig::new(),
        )
        .unwrap();
        let values = probe.values.lock().unwrap();
        assert_eq!(values[0], f64::MAX);
        assert_eq!(values[1], f64::MAX);
        assert_eq!(values[2], f64::MAX);
        assert!(values[3] < f64::MAX);
    }

    #[test]
    fn objective_penalises_zero_gev_shape_and_shape_limit() {
        let probe = ProbeMinimizer {
            probes: vec![vec![0.0, 5.0, 1.5], vec![-0.5, 5.0, 1.5], vec![-0.2, 5.0, 1.5]],
            values: Mutex::new(Vec::new()),
        };
        let config = FitConfig::new().with_gev_shape_limit(0.4);
        fit_with(&probe, Family::Gev, &SAMPLE, &[-0.1, 5.0, 1.5], None, &config).unwrap();
        let values = probe.values.lock().unwrap();
        assert_eq!(values[0], f64::MAX);
        assert_eq!(values[1], f64::MAX);
        assert!(values[2] < f64::MAX);
    }

    #[test]
    fn rejects_empty_sample() {
        let stub = StubMinimizer::default();
        let err = fit_with(&stub, Family::Gumbel, &[], &[0.0, 1.0], None, &FitConfig::new());
        assert_eq!(err, Err(FitError::EmptyData));
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn rejects_non_finite_sample() {
        let err = fit(
            Family::Gumbel,
            &[1.0, f64::INFINITY, 2.0],
            &[0.0, 1.0],
            None,
            &FitConfig::new(),
        );
        assert!(matches!(
            err,
            Err(FitError::NonFiniteData { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_too_few_observations() {
        let err = fit(
            Family::Gev,
            &[1.0, 2.0],
            &[-0.1, 1.0, 1.0],
            None,
            &FitConfig::new(),
        );
        assert_eq!(
            err,
            Err(FitError::InsufficientData {
                family: Family::Gev,
                n: 2,
                min: 3,
            })
        );
    }

    #[test]
    fn rejects_covariate_problems() {
        let config = FitConfig::new();
        let initial = [1.0, 0.0, 5.0, 0.1];

        let err = fit(Family::NsSkewNormal, &SAMPLE, &initial, None, &config);
        assert_eq!(
            err,
            Err(FitError::Dist(DistError::MissingCovariate {
                family: Family::NsSkewNormal
            }))
        );

        let short = [1.0, 2.0];
        let err = fit(Family::NsSkewNormal, &SAMPLE, &initial, Some(&short[..]), &config);
        assert!(matches!(
            err,
            Err(FitError::Dist(DistError::CovariateLength { .. }))
        ));

        let mut cov = [0.0; 6];
        cov[4] = f64::NAN;
        let err = fit(Family::NsSkewNormal, &SAMPLE, &initial, Some(&cov[..]), &config);
        assert!(matches!(
            err,
            Err(FitError::NonFiniteCovariate { index: 4, .. })
        ));

        let err = fit(Family::Gumbel, &SAMPLE, &[5.0, 1.0], Some(&[0.0; 6][..]), &config);
        assert!(matches!(
            err,
            Err(FitError::Dist(DistError::UnexpectedCovariate { .. }))
        ));
    }

    #[test]
    fn rejects_bad_initial_guess() {
        let config = FitConfig::new();
        let err = fit(Family::Gumbel, &SAMPLE, &[5.0], None, &config);
        assert!(matches!(
            err,
            Err(FitError::InitialArity {
                expected: 2,
                got: 1,
                ..
            })
        ));

        let err = fit(Family::Gumbel, &SAMPLE, &[5.0, -1.0], None, &config);
        assert!(matches!(
            err,
            Err(FitError::InitialOutOfBounds { name: "scale", .. })
        ));

        let err = fit(Family::Weibull, &SAMPLE, &[0.0, 10.0, 1.0], None, &config);
        assert!(matches!(
            err,
            Err(FitError::InitialOutOfBounds { name: "shape", .. })
        ));

        let err = fit(Family::Gev, &SAMPLE, &[0.0, 5.0, 1.0], None, &config);
        assert_eq!(err, Err(FitError::Dist(DistError::ZeroShape)));

        let limited = FitConfig::new().with_gev_shape_limit(0.4);
        let err = fit(Family::Gev, &SAMPLE, &[0.6, 5.0, 1.0], None, &limited);
        assert!(matches!(
            err,
            Err(FitError::InitialOutOfBounds { name: "shape", .. })
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let err = fit(
            Family::Gumbel,
            &SAMPLE,
            &[5.0, 1.0],
            None,
            &FitConfig::new().with_max_iters(0),
        );
        assert!(matches!(err, Err(FitError::InvalidConfig { .. })));
    }
}
