//! Scalar perturbation deltas.

use crate::error::PgwError;

/// Additive changes applied uniformly to the baseline fields.
///
/// # Example
///
/// ```
/// use tempest_pgw::PerturbationDeltas;
///
/// let deltas = PerturbationDeltas::new()
///     .with_dsst(1.5)
///     .with_dt(2.0)
///     .with_drh(-0.05);
/// assert!(deltas.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerturbationDeltas {
    dsst: f64,
    dt: f64,
    drh: f64,
}

impl PerturbationDeltas {
    /// Creates zero deltas (the identity perturbation).
    pub fn new() -> Self {
        Self::default()
    }

    // --- Builder methods ---

    /// Sets the sea-surface temperature change (K).
    pub fn with_dsst(mut self, v: f64) -> Self {
        self.dsst = v;
        self
    }

    /// Sets the air temperature change (K).
    pub fn with_dt(mut self, v: f64) -> Self {
        self.dt = v;
        self
    }

    /// Sets the relative humidity change (fraction of the unit interval).
    pub fn with_drh(mut self, v: f64) -> Self {
        self.drh = v;
        self
    }

    // --- Accessors ---

    /// Returns the sea-surface temperature change (K).
    pub fn dsst(&self) -> f64 {
        self.dsst
    }

    /// Returns the air temperature change (K).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the relative humidity change.
    pub fn drh(&self) -> f64 {
        self.drh
    }

    /// Validates that every delta is finite.
    ///
    /// # Errors
    ///
    /// Returns [`PgwError::InvalidDelta`] naming the first non-finite delta.
    pub fn validate(&self) -> Result<(), PgwError> {
        for (name, value) in [("dsst", self.dsst), ("dt", self.dt), ("drh", self.drh)] {
            if !value.is_finite() {
                return Err(PgwError::InvalidDelta {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero() {
        let d = PerturbationDeltas::new();
        assert_eq!((d.dsst(), d.dt(), d.drh()), (0.0, 0.0, 0.0));
        assert!(d.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let d = PerturbationDeltas::new()
            .with_dsst(1.0)
            .with_dt(2.0)
            .with_drh(0.1);
        assert_eq!((d.dsst(), d.dt(), d.drh()), (1.0, 2.0, 0.1));
    }

    #[test]
    fn validate_names_offending_delta() {
        let d = PerturbationDeltas::new().with_drh(f64::NAN);
        match d.validate() {
            Err(PgwError::InvalidDelta { name, .. }) => assert_eq!(name, "drh"),
            other => panic!("unexpected: {other:?}"),
        }
        let d = PerturbationDeltas::new().with_dt(f64::NEG_INFINITY);
        assert!(d.validate().is_err());
    }
}
