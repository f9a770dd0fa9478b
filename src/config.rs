use std::path::PathBuf;

use serde::Deserialize;

/// `tempest fit` configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitToml {
    /// Family name, e.g. `"gev"` or `"ns_skew_normal"`.
    pub family: String,

    /// Observation file, one value per line. Relative paths are resolved
    /// against the directory of the configuration file.
    pub observations: PathBuf,

    /// Covariate file for non-stationary families.
    #[serde(default)]
    pub covariate: Option<PathBuf>,

    /// Initial guess in the family's parameter order.
    pub initial: Vec<f64>,

    /// Return periods (in blocks) to report for stationary fits.
    #[serde(default)]
    pub return_periods: Vec<f64>,

    /// Minimiser settings.
    #[serde(default)]
    pub optimizer: OptimizerToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerToml {
    #[serde(default = "default_max_iters")]
    pub max_iters: u64,
    #[serde(default = "default_sd_tolerance")]
    pub sd_tolerance: f64,
    #[serde(default)]
    pub gev_shape_limit: Option<f64>,
}

impl Default for OptimizerToml {
    fn default() -> Self {
        Self {
            max_iters: default_max_iters(),
            sd_tolerance: default_sd_tolerance(),
            gev_shape_limit: None,
        }
    }
}

fn default_max_iters() -> u64 {
    2000
}
fn default_sd_tolerance() -> f64 {
    1e-8
}

/// `tempest perturb` deltas.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeltasToml {
    #[serde(default)]
    pub dsst: f64,
    #[serde(default)]
    pub dt: f64,
    #[serde(default)]
    pub drh: f64,
}
