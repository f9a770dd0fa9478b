//! Fit command: maximum-likelihood fit of one family to a text series.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use tempest_fit::{FitResult, fit};

use crate::cli::FitArgs;
use crate::config::FitToml;
use crate::convert;

/// JSON summary written by `tempest fit`.
#[derive(Debug, Serialize)]
struct FitSummary {
    family: String,
    params: Vec<NamedParam>,
    status: String,
    converged: bool,
    nll: f64,
    log_likelihood: f64,
    aic: f64,
    iterations: u64,
    n_observations: usize,
    return_levels: Vec<ReturnLevel>,
}

#[derive(Debug, Serialize)]
struct NamedParam {
    name: &'static str,
    value: f64,
}

#[derive(Debug, Serialize)]
struct ReturnLevel {
    period: f64,
    value: f64,
}

/// Run the fit pipeline.
pub fn run(args: FitArgs) -> Result<()> {
    let _cmd = info_span!("fit").entered();

    // 1. Load TOML config
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read fit config: {}", args.config.display()))?;
    let fit_toml: FitToml = toml::from_str(&toml_str).context("failed to parse fit TOML")?;
    let base = args.config.parent().unwrap_or(Path::new(""));

    // 2. Convert to library types
    let family = convert::parse_family(&fit_toml.family)?;
    let config = convert::build_fit_config(&fit_toml.optimizer)?;
    for &period in &fit_toml.return_periods {
        if !(period.is_finite() && period > 1.0) {
            bail!("return period must be greater than 1, got {period}");
        }
    }

    // 3. Read series
    let obs_path = resolve(base, &fit_toml.observations);
    info!(path = %obs_path.display(), "reading observations");
    let x = read_series(&obs_path)?;
    let covariate = match fit_toml.covariate {
        Some(ref p) => {
            let cov_path = resolve(base, p);
            info!(path = %cov_path.display(), "reading covariate");
            Some(read_series(&cov_path)?)
        }
        None => None,
    };
    info!(family = %family, n = x.len(), "loaded series");

    // 4. Fit
    let result = fit(family, &x, &fit_toml.initial, covariate.as_deref(), &config)
        .with_context(|| format!("failed to fit {family}"))?;
    if !result.status().is_converged() {
        warn!(status = %result.status(), "fit did not converge");
    }
    info!(%result, "fit complete");

    // 5. Write JSON
    let summary = summarize(&result, &fit_toml.return_periods);
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize fit result")?;
    match args.output {
        Some(ref path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write fit result: {}", path.display()))?;
            info!(path = %path.display(), "fit result written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Reads one value per line; blank lines and `#` comments are skipped.
fn read_series(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read series: {}", path.display()))?;
    parse_series(&text).with_context(|| format!("failed to parse series: {}", path.display()))
}

fn parse_series(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let v: f64 = line
            .parse()
            .with_context(|| format!("line {}: invalid number {line:?}", i + 1))?;
        values.push(v);
    }
    if values.is_empty() {
        bail!("series contains no values");
    }
    Ok(values)
}

fn summarize(result: &FitResult, periods: &[f64]) -> FitSummary {
    let return_levels = periods
        .iter()
        .filter_map(|&period| {
            result
                .return_level(period)
                .map(|value| ReturnLevel { period, value })
        })
        .collect();
    FitSummary {
        family: result.family().to_string(),
        params: result
            .named_params()
            .map(|(name, value)| NamedParam { name, value })
            .collect(),
        status: result.status().to_string(),
        converged: result.status().is_converged(),
        nll: result.objective(),
        log_likelihood: result.log_likelihood(),
        aic: result.aic(),
        iterations: result.iterations(),
        n_observations: result.n_observations(),
        return_levels,
    }
}
