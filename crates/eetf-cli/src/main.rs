//! eetf - HDR-to-SDR knee tone curve tool
//!
//! Samples, inspects and fits the line + Bezier knee + ceiling curve used
//! to approximate a reference HDR-to-SDR operator.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "eetf")]
#[command(author, version, about = "HDR-to-SDR knee tone curve tool")]
#[command(long_about = "
Builds the knee tone curve (straight line, quadratic Bezier knee, flat
ceiling) in the ST 2084 code-value domain and prints it as text.

Examples:
  eetf sample                               # 1024 samples, default operator
  eetf sample -n 256 --luminance            # columns in cd/m2
  eetf sample --knee-start 300 --sdr-gamma 2.4 -o curve.csv
  eetf info --knee-end 4000                 # control points and key mappings
  eetf fit measured.csv                     # fit the linear region
  eetf config > operator.yaml               # dump the operator parameters
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Print evenly spaced samples of the curve as CSV
    #[command(visible_alias = "s")]
    Sample(SampleArgs),

    /// Show control points, segment boundaries and key mappings
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Fit the linear region of a measured EETF
    Fit(FitArgs),

    /// Print the resolved operator parameters as YAML
    Config(ConfigArgs),
}

/// Operator selection shared by all commands.
#[derive(Args, Clone, Default)]
pub struct CurveArgs {
    /// Operator YAML file (defaults apply for missing keys)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Knee start in cd/m2
    #[arg(long)]
    pub knee_start: Option<f64>,

    /// Knee end in cd/m2
    #[arg(long)]
    pub knee_end: Option<f64>,

    /// Slope of the linear region
    #[arg(long)]
    pub slope: Option<f64>,

    /// Intercept of the linear region
    #[arg(long)]
    pub intercept: Option<f64>,

    /// x of the middle knee control point
    #[arg(long)]
    pub mid_x: Option<f64>,

    /// Output ceiling in cd/m2
    #[arg(long)]
    pub ceiling: Option<f64>,
}

#[derive(Args)]
pub struct SampleArgs {
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Number of samples over [0, 1]
    #[arg(short = 'n', long, default_value = "1024")]
    pub samples: usize,

    /// Print x and y as luminance (cd/m2) instead of code values
    #[arg(short, long)]
    pub luminance: bool,

    /// Add an SDR display code column for this display gamma (e.g. 2.4)
    #[arg(long)]
    pub sdr_gamma: Option<f64>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Extra luminances (cd/m2) to show in the mapping table
    #[arg(long, value_delimiter = ',')]
    pub nits: Vec<f64>,
}

#[derive(Args)]
pub struct FitArgs {
    /// Measured samples: one `y` per line (uniform x) or `x,y`
    pub input: PathBuf,

    /// Outputs are SDR display codes for this gamma (e.g. 2.4), not PQ
    #[arg(long)]
    pub sdr_gamma: Option<f64>,

    #[command(flatten)]
    pub curve: CurveArgs,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub curve: CurveArgs,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Sample(args) => commands::sample::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Fit(args) => commands::fit::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
