//! Derivative-free minimisation behind an injectable trait.
//!
//! The estimator only needs "objective + initial guess + bounds in,
//! parameters + status out". [`NelderMeadMinimizer`] provides that with the
//! `argmin` Nelder-Mead solver; tests substitute a stub.

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;

use crate::bounds::Bound;
use crate::config::FitConfig;
use crate::error::FitError;
use crate::result::FitStatus;

/// Relative perturbation applied to non-zero initial coordinates.
const NONZERO_DELTA: f64 = 0.05;

/// Absolute perturbation applied to zero initial coordinates.
const ZERO_DELTA: f64 = 0.00025;

/// What a [`Minimizer`] returns.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOutcome {
    /// Best parameters found.
    pub params: Vec<f64>,
    /// Objective at `params`.
    pub objective: f64,
    /// Iterations performed.
    pub iterations: u64,
    /// Termination status.
    pub status: FitStatus,
}

/// A derivative-free minimiser.
///
/// `objective` already scores out-of-bounds or inadmissible proposals as
/// `f64::MAX`; `bounds` is passed so implementations can keep their own
/// trial points (e.g. an initial simplex) inside the admissible region.
pub trait Minimizer: Send + Sync {
    /// Minimises `objective` starting from `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::OptimizationFailed`] if the minimiser cannot run
    /// at all. Running out of iterations is reported through
    /// [`MinimizerOutcome::status`] instead.
    fn minimize(
        &self,
        objective: &dyn Fn(&[f64]) -> f64,
        initial: &[f64],
        bounds: &[Bound],
        config: &FitConfig,
    ) -> Result<MinimizerOutcome, FitError>;
}

/// Nelder-Mead simplex minimiser backed by `argmin`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NelderMeadMinimizer;

impl Minimizer for NelderMeadMinimizer {
    fn minimize(
        &self,
        objective: &dyn Fn(&[f64]) -> f64,
        initial: &[f64],
        bounds: &[Bound],
        config: &FitConfig,
    ) -> Result<MinimizerOutcome, FitError> {
        let simplex = initial_simplex(initial, bounds);
        let cost = ObjectiveCost { objective };

        let solver = NelderMead::new(simplex)
            .with_sd_tolerance(config.sd_tolerance())
            .map_err(|e| FitError::OptimizationFailed {
                message: e.to_string(),
            })?;
        let result = Executor::new(cost, solver)
            .configure(|state| state.max_iters(config.max_iters()))
            .run()
            .map_err(|e| FitError::OptimizationFailed {
                message: e.to_string(),
            })?;

        let state = result.state();
        let params = state
            .get_best_param()
            .cloned()
            .ok_or_else(|| FitError::OptimizationFailed {
                message: "no best parameters recorded".to_string(),
            })?;
        let status = match state.get_termination_status() {
            TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
                FitStatus::Converged
            }
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                FitStatus::MaxIterations
            }
            other => FitStatus::Stopped(other.to_string()),
        };

        Ok(MinimizerOutcome {
            params,
            objective: state.get_best_cost(),
            iterations: state.get_iter(),
            status,
        })
    }
}

/// Cost function for argmin over a borrowed objective.
struct ObjectiveCost<'a> {
    objective: &'a dyn Fn(&[f64]) -> f64,
}

impl CostFunction for ObjectiveCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let value = (self.objective)(params);
        if value.is_finite() {
            Ok(value)
        } else {
            Ok(f64::MAX)
        }
    }
}

/// Initial simplex: the guess plus one vertex per coordinate, perturbed by
/// 5 % (or 0.00025 for zero entries) and clipped into the bounds.
///
/// If clipping collapses a vertex onto the guess the perturbation is applied
/// in the opposite direction.
pub(crate) fn initial_simplex(initial: &[f64], bounds: &[Bound]) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(initial.len() + 1);
    simplex.push(initial.to_vec());
    for (k, &x) in initial.iter().enumerate() {
        let bound = bounds.get(k).copied().unwrap_or(Bound::Free);
        let step = if x != 0.0 { NONZERO_DELTA * x } else { ZERO_DELTA };
        let mut moved = bound.clip(x + step);
        if moved == x {
            moved = bound.clip(x - step);
        }
        let mut vertex = initial.to_vec();
        vertex[k] = moved;
        simplex.push(vertex);
    }
    simplex
}
