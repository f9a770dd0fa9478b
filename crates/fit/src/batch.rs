//! Many independent fits on the rayon pool.

use rayon::prelude::*;
use tempest_dist::Family;
use tracing::info;

use crate::config::FitConfig;
use crate::error::FitError;
use crate::estimator::fit_with;
use crate::minimizer::{Minimizer, NelderMeadMinimizer};
use crate::result::FitResult;

/// One fitting problem: a family, its sample and an initial guess.
#[derive(Debug, Clone, PartialEq)]
pub struct FitJob {
    family: Family,
    x: Vec<f64>,
    initial: Vec<f64>,
    covariate: Option<Vec<f64>>,
}

impl FitJob {
    /// Creates a stationary job.
    pub fn new(family: Family, x: Vec<f64>, initial: Vec<f64>) -> Self {
        Self {
            family,
            x,
            initial,
            covariate: None,
        }
    }

    /// Attaches a covariate series (non-stationary families).
    pub fn with_covariate(mut self, covariate: Vec<f64>) -> Self {
        self.covariate = Some(covariate);
        self
    }

    /// Returns the family to fit.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the observation sample.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns the initial guess.
    pub fn initial(&self) -> &[f64] {
        &self.initial
    }

    /// Returns the covariate series, if any.
    pub fn covariate(&self) -> Option<&[f64]> {
        self.covariate.as_deref()
    }
}

/// Runs every job with the default minimiser, in parallel.
///
/// Results are returned in job order; one failing job does not affect the
/// others.
pub fn fit_batch(jobs: &[FitJob], config: &FitConfig) -> Vec<Result<FitResult, FitError>> {
    fit_batch_with(&NelderMeadMinimizer, jobs, config)
}

/// Like [`fit_batch`], with an injected [`Minimizer`].
pub fn fit_batch_with<M>(
    minimizer: &M,
    jobs: &[FitJob],
    config: &FitConfig,
) -> Vec<Result<FitResult, FitError>>
where
    M: Minimizer + ?Sized,
{
    info!(jobs = jobs.len(), "fitting batch");
    let results: Vec<_> = jobs
        .par_iter()
        .map(|job| {
            fit_with(
                minimizer,
                job.family,
                &job.x,
                &job.initial,
                job.covariate(),
                config,
            )
        })
        .collect();
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(jobs = jobs.len(), failed, "batch finished");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_follow_job_order() {
        let jobs = vec![
            FitJob::new(Family::Gumbel, vec![3.0, 4.0, 5.0, 6.5], vec![5.0, 1.0]),
            FitJob::new(Family::Gumbel, vec![], vec![5.0, 1.0]),
            FitJob::new(
                Family::SkewNormal,
                vec![1.0, 2.0, 2.5, 3.0, 4.5],
                vec![2.5, 1.0, 0.0],
            ),
        ];
        let results = fit_batch(&jobs, &FitConfig::new());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().family(), Family::Gumbel);
        assert_eq!(results[1], Err(FitError::EmptyData));
        assert_eq!(results[2].as_ref().unwrap().family(), Family::SkewNormal);
    }

    #[test]
    fn batch_matches_sequential_fits() {
        let jobs: Vec<FitJob> = (0..6)
            .map(|k| {
                let x: Vec<f64> = (0..40)
                    .map(|i| 10.0 + k as f64 + ((i * 7919) % 97) as f64 / 20.0)
                    .collect();
                FitJob::new(Family::Gumbel, x, vec![12.0, 1.0])
            })
            .collect();
        let config = FitConfig::new();
        let batch = fit_batch(&jobs, &config);
        for (job, result) in jobs.iter().zip(&batch) {
            let single = crate::fit(job.family(), job.x(), job.initial(), None, &config);
            assert_eq!(result, &single);
        }
    }

    #[test]
    fn covariate_is_forwarded() {
        let job = FitJob::new(
            Family::NsSkewNormal,
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1.0, 0.0, 0.0, 1.0],
        )
        .with_covariate(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(job.covariate(), Some(&[1.0, 2.0, 3.0, 4.0, 5.0][..]));
        let results = fit_batch(&[job], &FitConfig::new());
        assert!(results[0].is_ok());
    }
}
