//! Result types for the perturbation kernel.

use ndarray::{Array3, Array4};

/// Perturbed fields, newly allocated, on the input grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PerturbedGrid {
    sst: Array3<f64>,
    temperature: Array4<f64>,
    relative_humidity: Array4<f64>,
    specific_humidity: Array4<f64>,
}

impl PerturbedGrid {
    pub(crate) fn new(
        sst: Array3<f64>,
        temperature: Array4<f64>,
        relative_humidity: Array4<f64>,
        specific_humidity: Array4<f64>,
    ) -> Self {
        Self {
            sst,
            temperature,
            relative_humidity,
            specific_humidity,
        }
    }

    /// Returns the perturbed sea-surface temperature (K).
    pub fn sst(&self) -> &Array3<f64> {
        &self.sst
    }

    /// Returns the perturbed air temperature (K).
    pub fn temperature(&self) -> &Array4<f64> {
        &self.temperature
    }

    /// Returns the perturbed relative humidity, clamped to `[0.01, 1.0]`.
    pub fn relative_humidity(&self) -> &Array4<f64> {
        &self.relative_humidity
    }

    /// Returns the perturbed specific humidity (kg/kg).
    pub fn specific_humidity(&self) -> &Array4<f64> {
        &self.specific_humidity
    }

    /// Consumes self and returns `(sst, temperature, relative_humidity,
    /// specific_humidity)`.
    pub fn into_parts(self) -> (Array3<f64>, Array4<f64>, Array4<f64>, Array4<f64>) {
        (
            self.sst,
            self.temperature,
            self.relative_humidity,
            self.specific_humidity,
        )
    }
}
