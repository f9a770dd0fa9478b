//! # tempest-pgw
//!
//! Pseudo-global-warming perturbation of gridded atmospheric fields.
//!
//! Baseline temperature, specific humidity and sea-surface temperature are
//! shifted by scalar deltas while keeping specific humidity consistent with
//! the Tetens saturation vapour pressure relation:
//!
//! 1. Diagnose relative humidity at the baseline temperature.
//! 2. Add `drh` and clamp to `[0.01, 1.0]`.
//! 3. Add `dt` to the temperature.
//! 4. Rebuild specific humidity from the new saturation value.
//! 5. Add `dsst` to the sea-surface temperature.
//!
//! ```
//! use ndarray::{Array1, Array3, Array4};
//! use tempest_pgw::{AtmosphericGrid, GridDims, PerturbationDeltas, perturb};
//!
//! let dims = GridDims::new(1, 2, 3, 3);
//! let grid = AtmosphericGrid::new(
//!     dims,
//!     Array4::from_elem(dims.shape4(), 285.0),
//!     Array4::from_elem(dims.shape4(), 0.006),
//!     Array3::from_elem(dims.shape3(), 290.0),
//!     Array1::from(vec![1000.0, 850.0]),
//! )?;
//! let out = perturb(&grid, &PerturbationDeltas::new().with_dt(2.0).with_dsst(1.0))?;
//! assert_eq!(out.temperature()[[0, 0, 0, 0]], 287.0);
//! # Ok::<(), tempest_pgw::PgwError>(())
//! ```

mod deltas;
mod error;
mod grid;
mod kernel;
mod result;
mod thermo;

pub use deltas::PerturbationDeltas;
pub use error::PgwError;
pub use grid::{AtmosphericGrid, GridDims};
pub use kernel::{CellOutput, RH_MAX, RH_MIN, perturb, perturb_cell};
pub use result::PerturbedGrid;
pub use thermo::{
    A1, EPSILON, T0, WATER_ICE_SWITCH, relative_humidity, saturation_specific_humidity,
    saturation_vapor_pressure,
};
