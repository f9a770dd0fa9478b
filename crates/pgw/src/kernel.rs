//! Per-cell perturbation and its parallel application over the grid.

use ndarray::{Array4, s};
use rayon::prelude::*;
use tracing::info;

use crate::deltas::PerturbationDeltas;
use crate::error::PgwError;
use crate::grid::AtmosphericGrid;
use crate::result::PerturbedGrid;
use crate::thermo::{relative_humidity, saturation_specific_humidity};

/// Lower clamp of the perturbed relative humidity.
pub const RH_MIN: f64 = 0.01;

/// Upper clamp of the perturbed relative humidity.
pub const RH_MAX: f64 = 1.0;

/// Perturbed values of one `(time, level, row, column)` cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellOutput {
    /// Temperature (K).
    pub temperature: f64,
    /// Relative humidity, in `[RH_MIN, RH_MAX]` unless NaN.
    pub relative_humidity: f64,
    /// Specific humidity (kg/kg).
    pub specific_humidity: f64,
}

/// Perturbs one cell at pressure `p` (hPa).
///
/// Relative humidity is diagnosed at the baseline temperature, shifted by
/// `drh` and clamped; specific humidity is then rebuilt at the shifted
/// temperature so the saturation relation holds. NaN in, NaN out.
#[inline]
pub fn perturb_cell(t: f64, q: f64, p: f64, deltas: &PerturbationDeltas) -> CellOutput {
    let rh = (relative_humidity(q, t, p) + deltas.drh()).clamp(RH_MIN, RH_MAX);
    let t_out = t + deltas.dt();
    CellOutput {
        temperature: t_out,
        relative_humidity: rh,
        specific_humidity: saturation_specific_humidity(t_out, p) * rh,
    }
}

/// Applies `deltas` to every cell of `grid`.
///
/// Work is split into one rayon task per `(time, level)` plane; planes are
/// disjoint so no synchronisation is needed.
///
/// # Errors
///
/// Returns [`PgwError::InvalidDelta`] if a delta is not finite.
#[tracing::instrument(skip(grid, deltas), fields(dims = %grid.dims()))]
pub fn perturb(
    grid: &AtmosphericGrid,
    deltas: &PerturbationDeltas,
) -> Result<PerturbedGrid, PgwError> {
    deltas.validate()?;
    let dims = grid.dims();
    info!(
        dsst = deltas.dsst(),
        dt = deltas.dt(),
        drh = deltas.drh(),
        cells = dims.n_cells(),
        "perturbing grid"
    );

    let n = dims.n_cells();
    let plane = dims.plane_len();
    let nlev = dims.nlev();
    let temperature = grid.temperature();
    let humidity = grid.specific_humidity();
    let pressure = grid.pressure();

    let mut t_out = vec![0.0; n];
    let mut rh_out = vec![0.0; n];
    let mut q_out = vec![0.0; n];

    t_out
        .par_chunks_mut(plane)
        .zip(rh_out.par_chunks_mut(plane))
        .zip(q_out.par_chunks_mut(plane))
        .enumerate()
        .for_each(|(k, ((t_plane, rh_plane), q_plane))| {
            let (ti, li) = (k / nlev, k % nlev);
            let p = pressure[li];
            let t_in = temperature.slice(s![ti, li, .., ..]);
            let q_in = humidity.slice(s![ti, li, .., ..]);
            let outputs = t_plane.iter_mut().zip(rh_plane.iter_mut()).zip(q_plane);
            for (((t_o, rh_o), q_o), (&t, &q)) in outputs.zip(t_in.iter().zip(q_in.iter())) {
                let cell = perturb_cell(t, q, p, deltas);
                *t_o = cell.temperature;
                *rh_o = cell.relative_humidity;
                *q_o = cell.specific_humidity;
            }
        });

    let shape = dims.shape4();
    let sst = grid.sst().mapv(|v| v + deltas.dsst());
    let result = PerturbedGrid::new(
        sst,
        Array4::from_shape_vec(shape, t_out)?,
        Array4::from_shape_vec(shape, rh_out)?,
        Array4::from_shape_vec(shape, q_out)?,
    );
    info!("perturbation finished");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridDims;
    use crate::thermo::saturation_specific_humidity;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array3};

    #[test]
    fn zero_deltas_are_identity_for_unsaturated_cell() {
        let (t, p) = (285.0, 900.0);
        let q = 0.6 * saturation_specific_humidity(t, p);
        let out = perturb_cell(t, q, p, &PerturbationDeltas::new());
        assert_eq!(out.temperature, t);
        assert_relative_eq!(out.relative_humidity, 0.6, epsilon = 1e-14);
        assert_relative_eq!(out.specific_humidity, q, max_relative = 1e-14);
    }

    #[test]
    fn warming_at_fixed_rh_raises_q() {
        let (t, p) = (290.0, 1000.0);
        let q = 0.7 * saturation_specific_humidity(t, p);
        let out = perturb_cell(t, q, p, &PerturbationDeltas::new().with_dt(2.0));
        assert_eq!(out.temperature, 292.0);
        assert_relative_eq!(out.relative_humidity, 0.7, epsilon = 1e-14);
        assert_relative_eq!(
            out.specific_humidity,
            0.7 * saturation_specific_humidity(292.0, p),
            max_relative = 1e-14
        );
        assert!(out.specific_humidity > q);
    }

    #[test]
    fn rh_clamps_to_exact_bounds() {
        let (t, p) = (280.0, 850.0);
        let sq = saturation_specific_humidity(t, p);

        let wet = perturb_cell(t, 0.95 * sq, p, &PerturbationDeltas::new().with_drh(0.2));
        assert_eq!(wet.relative_humidity, 1.0);
        assert_eq!(wet.specific_humidity, sq);

        let dry = perturb_cell(t, 0.05 * sq, p, &PerturbationDeltas::new().with_drh(-0.3));
        assert_eq!(dry.relative_humidity, 0.01);
        assert_eq!(dry.specific_humidity, sq * 0.01);

        // supersaturated baseline is clamped even without a delta
        let over = perturb_cell(t, 1.3 * sq, p, &PerturbationDeltas::new());
        assert_eq!(over.relative_humidity, 1.0);
    }

    #[test]
    fn nan_cells_pass_through() {
        let d = PerturbationDeltas::new().with_dt(1.0).with_drh(0.1);
        let out = perturb_cell(f64::NAN, 0.005, 900.0, &d);
        assert!(out.temperature.is_nan());
        assert!(out.relative_humidity.is_nan());
        assert!(out.specific_humidity.is_nan());

        let out = perturb_cell(280.0, f64::NAN, 900.0, &d);
        assert_eq!(out.temperature, 281.0);
        assert!(out.relative_humidity.is_nan());
        assert!(out.specific_humidity.is_nan());
    }

    #[test]
    fn grid_cells_match_per_cell_function() {
        let dims = GridDims::new(2, 3, 2, 2);
        let temperature = Array4::from_shape_fn(dims.shape4(), |(t, l, r, c)| {
            260.0 + 5.0 * t as f64 + 4.0 * l as f64 + r as f64 + 0.5 * c as f64
        });
        let humidity = Array4::from_shape_fn(dims.shape4(), |(t, l, r, c)| {
            0.001 * (1 + t + l + r + c) as f64
        });
        let sst = Array3::from_elem(dims.shape3(), 290.0);
        let pressure = Array1::from(vec![1000.0, 850.0, 500.0]);
        let grid =
            AtmosphericGrid::new(dims, temperature.clone(), humidity.clone(), sst, pressure.clone())
                .unwrap();

        let deltas = PerturbationDeltas::new()
            .with_dsst(1.5)
            .with_dt(2.0)
            .with_drh(-0.05);
        let out = perturb(&grid, &deltas).unwrap();

        for ((t, l, r, c), &tin) in temperature.indexed_iter() {
            let cell = perturb_cell(tin, humidity[[t, l, r, c]], pressure[l], &deltas);
            assert_eq!(out.temperature()[[t, l, r, c]], cell.temperature);
            assert_eq!(out.relative_humidity()[[t, l, r, c]], cell.relative_humidity);
            assert_eq!(out.specific_humidity()[[t, l, r, c]], cell.specific_humidity);
        }
        assert!(out.sst().iter().all(|&v| v == 291.5));
    }

    #[test]
    fn rejects_non_finite_delta() {
        let dims = GridDims::new(1, 1, 1, 1);
        let grid = AtmosphericGrid::new(
            dims,
            Array4::from_elem(dims.shape4(), 280.0),
            Array4::from_elem(dims.shape4(), 0.004),
            Array3::from_elem(dims.shape3(), 285.0),
            Array1::from(vec![900.0]),
        )
        .unwrap();
        let deltas = PerturbationDeltas::new().with_dsst(f64::NAN);
        assert!(matches!(
            perturb(&grid, &deltas),
            Err(PgwError::InvalidDelta { .. })
        ));
    }
}
