//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use tempest_dist::Family;
use tempest_fit::FitConfig;
use tempest_pgw::PerturbationDeltas;

use crate::config::{DeltasToml, OptimizerToml};

/// Parses a family name (`"gev"`, `"ns-skew-normal"`, ...).
pub fn parse_family(s: &str) -> Result<Family> {
    s.parse::<Family>()
        .with_context(|| format!("invalid family in config: {s:?}"))
}

/// Converts `[optimizer]` settings into a validated `FitConfig`.
pub fn build_fit_config(t: &OptimizerToml) -> Result<FitConfig> {
    let mut config = FitConfig::new()
        .with_max_iters(t.max_iters)
        .with_sd_tolerance(t.sd_tolerance);
    if let Some(limit) = t.gev_shape_limit {
        config = config.with_gev_shape_limit(limit);
    }
    config.validate().context("invalid [optimizer] settings")?;
    Ok(config)
}

/// Converts TOML deltas, with per-field CLI overrides, into validated
/// `PerturbationDeltas`.
pub fn build_deltas(
    t: &DeltasToml,
    dsst: Option<f64>,
    dt: Option<f64>,
    drh: Option<f64>,
) -> Result<PerturbationDeltas> {
    let deltas = PerturbationDeltas::new()
        .with_dsst(dsst.unwrap_or(t.dsst))
        .with_dt(dt.unwrap_or(t.dt))
        .with_drh(drh.unwrap_or(t.drh));
    deltas.validate().context("invalid perturbation deltas")?;
    Ok(deltas)
}
