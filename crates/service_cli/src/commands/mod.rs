//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Simulation commands
//! share [`OutputArgs`] and return the table they wrote so callers (and
//! tests) can inspect it.

pub mod ar1;
pub mod check;
pub mod factor;
pub mod fsv;
pub mod isv;
pub mod readings;

use crate::output::{OutputFormat, Table};
use crate::Result;

/// Where and how a simulation table is written.
#[derive(Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output file; stdout when `None`.
    pub output: Option<String>,
    /// `csv` or `json`.
    pub format: String,
}

impl OutputArgs {
    /// Parses the format and writes `table`.
    pub fn emit(&self, table: &Table) -> Result<()> {
        let format: OutputFormat = if self.format.is_empty() {
            OutputFormat::Csv
        } else {
            self.format.parse()?
        };
        table.write(format, self.output.as_deref())
    }
}
