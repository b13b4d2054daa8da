//! ssm CLI - Sensor State-Space Simulators
//!
//! Operational entry point for the simulators.
//!
//! # Commands
//!
//! - `ssm ar1` - Simulate a mean-reverting AR(1) path
//! - `ssm isv` - Simulate independent stochastic volatility
//! - `ssm factor` - Simulate the static factor model
//! - `ssm fsv` - Simulate factor stochastic volatility
//! - `ssm readings --input <file>` - Summarise a raw readings table
//! - `ssm check` - Validate and print the resolved configuration

use clap::{Args, Parser, Subcommand};
use service_cli::commands::{self, OutputArgs};
use service_cli::config::{Overrides, SimulationSettings};
use service_cli::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sensor state-space model simulators
#[derive(Parser)]
#[command(name = "ssm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "ssm.toml")]
    config: String,

    /// Override the generator seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Override the series length
    #[arg(short, long, global = true)]
    n: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Output {
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format (csv, json)
    #[arg(short, long, default_value = "csv")]
    format: String,
}

impl From<Output> for OutputArgs {
    fn from(o: Output) -> Self {
        OutputArgs {
            output: o.output,
            format: o.format,
        }
    }
}

#[derive(Args)]
struct Ar1Overrides {
    /// Mean-reversion weight
    #[arg(long, allow_hyphen_values = true)]
    phi: Option<f64>,

    /// Innovation scale
    #[arg(long)]
    sigma: Option<f64>,

    /// Mean-reversion level
    #[arg(long, allow_hyphen_values = true)]
    mu: Option<f64>,
}

#[derive(Args)]
struct FactorOverrides {
    /// Number of observed series
    #[arg(short, long)]
    p: Option<usize>,

    /// Number of latent factors
    #[arg(short, long)]
    k: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a mean-reverting AR(1) path
    Ar1 {
        #[command(flatten)]
        ar1: Ar1Overrides,
        #[command(flatten)]
        out: Output,
    },

    /// Simulate independent stochastic volatility
    Isv {
        #[command(flatten)]
        ar1: Ar1Overrides,
        #[command(flatten)]
        out: Output,
    },

    /// Simulate the static factor model
    Factor {
        #[command(flatten)]
        dims: FactorOverrides,
        #[command(flatten)]
        out: Output,
    },

    /// Simulate factor stochastic volatility
    Fsv {
        #[command(flatten)]
        ar1: Ar1Overrides,
        #[command(flatten)]
        dims: FactorOverrides,

        /// Observation noise variance
        #[arg(long)]
        variance: Option<f64>,

        /// Observation noise shape (shared, independent)
        #[arg(long)]
        noise: Option<String>,

        #[command(flatten)]
        out: Output,
    },

    /// Summarise a raw sensor readings table
    Readings {
        /// Path to readings CSV (Timestamp, Variable, Units, Value)
        #[arg(short, long)]
        input: String,

        /// Output format (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Validate and print the resolved configuration
    Check,
}

impl Ar1Overrides {
    fn fill(&self, o: &mut Overrides) {
        o.phi = self.phi;
        o.sigma = self.sigma;
        o.mu = self.mu;
    }
}

impl FactorOverrides {
    fn fill(&self, o: &mut Overrides) {
        o.p = self.p;
        o.k = self.k;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so tables on stdout stay machine-readable
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let mut overrides = Overrides {
        seed: cli.seed,
        n: cli.n,
        ..Overrides::default()
    };
    match &cli.command {
        Commands::Ar1 { ar1, .. } | Commands::Isv { ar1, .. } => ar1.fill(&mut overrides),
        Commands::Factor { dims, .. } => dims.fill(&mut overrides),
        Commands::Fsv {
            ar1,
            dims,
            variance,
            noise,
            ..
        } => {
            ar1.fill(&mut overrides);
            dims.fill(&mut overrides);
            overrides.observation_variance = *variance;
            overrides.noise = noise.clone();
        }
        Commands::Readings { .. } | Commands::Check => {}
    }

    let mut settings = SimulationSettings::load(&cli.config)?;
    settings.apply_overrides(&overrides)?;

    match cli.command {
        Commands::Ar1 { out, .. } => commands::ar1::run(&settings, &out.into()).map(drop),
        Commands::Isv { out, .. } => commands::isv::run(&settings, &out.into()).map(drop),
        Commands::Factor { out, .. } => commands::factor::run(&settings, &out.into()).map(drop),
        Commands::Fsv { out, .. } => commands::fsv::run(&settings, &out.into()).map(drop),
        Commands::Readings { input, format } => {
            commands::readings::run(&input, &format).map(drop)
        }
        Commands::Check => commands::check::run(&settings).map(drop),
    }
}
