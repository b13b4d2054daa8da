//! # service_cli (S: Service Layer)
//!
//! Command line front end for the simulators. The binary (`ssm`) is a thin
//! clap wrapper around the functions in [`commands`]; keeping them in a
//! library lets the integration tests drive them directly.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};
