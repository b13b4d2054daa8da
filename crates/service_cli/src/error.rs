//! CLI error type.

use adapter_loader::LoaderError;
use ssm_core::SimulationError;
use thiserror::Error;

/// Errors surfaced by the `ssm` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// A simulator rejected its arguments.
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// The readings table could not be loaded.
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    /// Configuration file is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported flag value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed configuration file.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration could not be rendered.
    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
