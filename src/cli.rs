use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tempest extreme-value and pseudo-global-warming toolkit.
#[derive(Parser)]
#[command(
    name = "tempest",
    version,
    about = "Extreme-value fitting and pseudo-global-warming field perturbation"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit a distribution family to an observation series.
    Fit(FitArgs),
    /// Apply temperature and humidity deltas to a gridded baseline.
    Perturb(PerturbArgs),
}

/// Arguments for the `fit` subcommand.
#[derive(clap::Args)]
pub struct FitArgs {
    /// Path to TOML fit configuration.
    #[arg(short, long, default_value = "fit.toml")]
    pub config: PathBuf,

    /// Path for the JSON result (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `perturb` subcommand.
#[derive(clap::Args)]
pub struct PerturbArgs {
    /// Path to input baseline grid JSON.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for perturbed grid JSON.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Path to TOML deltas file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sea-surface temperature delta (K).
    #[arg(long, allow_hyphen_values = true)]
    pub dsst: Option<f64>,

    /// Air temperature delta (K).
    #[arg(long, allow_hyphen_values = true)]
    pub dt: Option<f64>,

    /// Relative humidity delta (fraction).
    #[arg(long, allow_hyphen_values = true)]
    pub drh: Option<f64>,
}
