//! Perturb command: apply pseudo-global-warming deltas to a JSON grid.
//!
//! Grid files hold ndarray-serialised arrays. Masked cells are stored as
//! JSON `null` and travel through the kernel as NaN.

use std::path::Path;

use anyhow::{Context, Result, bail};
use ndarray::{Array, Array1, Array3, Array4, Dimension};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use tempest_pgw::{AtmosphericGrid, PerturbedGrid, perturb};

use crate::cli::PerturbArgs;
use crate::config::DeltasToml;
use crate::convert;

/// Baseline grid on disk: `[time, level, row, col]` fields plus levels in hPa.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridFile {
    temperature: Array4<Option<f64>>,
    specific_humidity: Array4<Option<f64>>,
    sst: Array3<Option<f64>>,
    pressure: Array1<f64>,
}

/// Perturbed grid on disk.
#[derive(Debug, Serialize, Deserialize)]
struct PerturbedFile {
    sst: Array3<Option<f64>>,
    temperature: Array4<Option<f64>>,
    relative_humidity: Array4<Option<f64>>,
    specific_humidity: Array4<Option<f64>>,
}

/// Run the perturbation pipeline.
pub fn run(args: PerturbArgs) -> Result<()> {
    let _cmd = info_span!("perturb").entered();
    // 1. Validate: at least one perturbation source must be provided
    if args.config.is_none() && args.dsst.is_none() && args.dt.is_none() && args.drh.is_none() {
        bail!("no perturbation specified: provide --config, --dsst, --dt or --drh");
    }

    // 2. Load optional TOML deltas, CLI flags override
    let deltas_toml = match args.config {
        Some(ref config_path) => {
            let toml_str = std::fs::read_to_string(config_path).with_context(|| {
                format!("failed to read perturb config: {}", config_path.display())
            })?;
            toml::from_str(&toml_str).context("failed to parse perturbation TOML")?
        }
        None => DeltasToml::default(),
    };
    let deltas = convert::build_deltas(&deltas_toml, args.dsst, args.dt, args.drh)?;
    info!(
        dsst = deltas.dsst(),
        dt = deltas.dt(),
        drh = deltas.drh(),
        "perturbation deltas"
    );

    // 3. Read baseline grid
    info!(path = %args.input.display(), "reading baseline grid");
    let grid = read_grid(&args.input)?;
    info!(dims = %grid.dims(), "loaded grid");

    // 4. Perturb
    let out = perturb(&grid, &deltas).context("failed to perturb grid")?;

    // 5. Write output
    write_perturbed(&args.output, out)?;
    info!(path = %args.output.display(), "perturbed grid written");

    Ok(())
}

fn read_grid(path: &Path) -> Result<AtmosphericGrid> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read grid: {}", path.display()))?;
    let file: GridFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse grid JSON: {}", path.display()))?;
    let grid = AtmosphericGrid::from_arrays(
        unmask(file.temperature),
        unmask(file.specific_humidity),
        unmask(file.sst),
        file.pressure,
    )
    .with_context(|| format!("inconsistent grid: {}", path.display()))?;
    Ok(grid)
}

fn write_perturbed(path: &Path, out: PerturbedGrid) -> Result<()> {
    let (sst, temperature, relative_humidity, specific_humidity) = out.into_parts();
    let file = PerturbedFile {
        sst: mask(sst),
        temperature: mask(temperature),
        relative_humidity: mask(relative_humidity),
        specific_humidity: mask(specific_humidity),
    };
    let json = serde_json::to_string(&file).context("failed to serialize perturbed grid")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write perturbed grid: {}", path.display()))?;
    Ok(())
}

fn unmask<D: Dimension>(a: Array<Option<f64>, D>) -> Array<f64, D> {
    a.mapv(|v| v.unwrap_or(f64::NAN))
}

fn mask<D: Dimension>(a: Array<f64, D>) -> Array<Option<f64>, D> {
    a.mapv(|v| if v.is_nan() { None } else { Some(v) })
}
