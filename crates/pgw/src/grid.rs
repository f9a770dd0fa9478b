//! Baseline atmospheric fields and their dimensions.

use std::fmt;

use ndarray::{Array1, Array3, Array4};

use crate::error::PgwError;

/// Grid dimensions `(time, level, row, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDims {
    nt: usize,
    nlev: usize,
    nr: usize,
    nc: usize,
}

impl GridDims {
    /// Creates grid dimensions.
    pub fn new(nt: usize, nlev: usize, nr: usize, nc: usize) -> Self {
        Self { nt, nlev, nr, nc }
    }

    /// Number of time steps.
    pub fn nt(&self) -> usize {
        self.nt
    }

    /// Number of pressure levels.
    pub fn nlev(&self) -> usize {
        self.nlev
    }

    /// Number of rows.
    pub fn nr(&self) -> usize {
        self.nr
    }

    /// Number of columns.
    pub fn nc(&self) -> usize {
        self.nc
    }

    /// Shape of the 4-D fields.
    pub fn shape4(&self) -> (usize, usize, usize, usize) {
        (self.nt, self.nlev, self.nr, self.nc)
    }

    /// Shape of the 3-D surface fields.
    pub fn shape3(&self) -> (usize, usize, usize) {
        (self.nt, self.nr, self.nc)
    }

    /// Cells in one horizontal `(row, column)` plane.
    pub fn plane_len(&self) -> usize {
        self.nr * self.nc
    }

    /// Cells in a 4-D field.
    pub fn n_cells(&self) -> usize {
        self.nt * self.nlev * self.plane_len()
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nt={}, nlev={}, nr={}, nc={}",
            self.nt, self.nlev, self.nr, self.nc
        )
    }
}

/// Baseline fields on a `(time, level, row, column)` grid.
///
/// | Field | Shape | Units |
/// |-------|-------|-------|
/// | temperature | `(nt, nlev, nr, nc)` | K |
/// | specific humidity | `(nt, nlev, nr, nc)` | kg/kg |
/// | sea-surface temperature | `(nt, nr, nc)` | K |
/// | pressure levels | `(nlev)` | hPa |
///
/// Shapes are checked on construction. NaN entries (masked cells) are
/// allowed and propagate through the perturbation.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphericGrid {
    dims: GridDims,
    temperature: Array4<f64>,
    specific_humidity: Array4<f64>,
    sst: Array3<f64>,
    pressure: Array1<f64>,
}

impl AtmosphericGrid {
    /// Creates a grid after checking every array against `dims`.
    ///
    /// # Errors
    ///
    /// - [`PgwError::EmptyGrid`] if any dimension is zero.
    /// - [`PgwError::ShapeMismatch`] naming the first array whose shape
    ///   disagrees with `dims`.
    pub fn new(
        dims: GridDims,
        temperature: Array4<f64>,
        specific_humidity: Array4<f64>,
        sst: Array3<f64>,
        pressure: Array1<f64>,
    ) -> Result<Self, PgwError> {
        if dims.n_cells() == 0 {
            return Err(PgwError::EmptyGrid {
                dims: dims.to_string(),
            });
        }
        let (nt, nlev, nr, nc) = dims.shape4();
        check_shape("temperature", &[nt, nlev, nr, nc], temperature.shape())?;
        check_shape(
            "specific_humidity",
            &[nt, nlev, nr, nc],
            specific_humidity.shape(),
        )?;
        check_shape("sst", &[nt, nr, nc], sst.shape())?;
        check_shape("pressure", &[nlev], pressure.shape())?;
        Ok(Self {
            dims,
            temperature,
            specific_humidity,
            sst,
            pressure,
        })
    }

    /// Creates a grid whose dimensions are taken from the temperature field.
    ///
    /// # Errors
    ///
    /// See [`AtmosphericGrid::new`].
    pub fn from_arrays(
        temperature: Array4<f64>,
        specific_humidity: Array4<f64>,
        sst: Array3<f64>,
        pressure: Array1<f64>,
    ) -> Result<Self, PgwError> {
        let (nt, nlev, nr, nc) = temperature.dim();
        Self::new(
            GridDims::new(nt, nlev, nr, nc),
            temperature,
            specific_humidity,
            sst,
            pressure,
        )
    }

    /// Returns the grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Returns the temperature field (K).
    pub fn temperature(&self) -> &Array4<f64> {
        &self.temperature
    }

    /// Returns the specific humidity field (kg/kg).
    pub fn specific_humidity(&self) -> &Array4<f64> {
        &self.specific_humidity
    }

    /// Returns the sea-surface temperature field (K).
    pub fn sst(&self) -> &Array3<f64> {
        &self.sst
    }

    /// Returns the pressure of each level (hPa).
    pub fn pressure(&self) -> &Array1<f64> {
        &self.pressure
    }
}

fn check_shape(field: &str, expected: &[usize], got: &[usize]) -> Result<(), PgwError> {
    if expected != got {
        return Err(PgwError::ShapeMismatch {
            field: field.to_string(),
            expected: expected.to_vec(),
            got: got.to_vec(),
        });
    }
    Ok(())
}
