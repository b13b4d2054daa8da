//! Readings command implementation
//!
//! Loads a raw sensor readings table and prints per-variable statistics.

use std::io::Write;

use adapter_loader::{ReadingsTable, VariableSummary};
use tracing::info;

use crate::{CliError, Result};

/// Run the readings command
pub fn run(input: &str, format: &str) -> Result<Vec<VariableSummary>> {
    info!("Loading readings...");
    info!("  Input: {}", input);

    if !std::path::Path::new(input).exists() {
        return Err(CliError::FileNotFound(input.to_string()));
    }

    let table = ReadingsTable::from_path(input)?;
    let summary = table.summary();
    info!(
        "Loaded {} readings for {} variables",
        table.len(),
        summary.len()
    );

    let stdout = std::io::stdout();
    write_summary(&summary, format, stdout.lock())?;
    Ok(summary)
}

/// Renders the summary as `table`, `csv` or `json`.
pub fn write_summary<W: Write>(
    summary: &[VariableSummary],
    format: &str,
    mut sink: W,
) -> Result<()> {
    match format {
        "table" => {
            writeln!(
                sink,
                "{:<16} {:<10} {:>8} {:>12} {:>12} {:>12}",
                "Variable", "Units", "Count", "Mean", "Min", "Max"
            )?;
            for s in summary {
                writeln!(
                    sink,
                    "{:<16} {:<10} {:>8} {:>12.4} {:>12.4} {:>12.4}",
                    s.variable, s.units, s.count, s.mean, s.min, s.max
                )?;
            }
        }
        "csv" => {
            let mut writer = csv::Writer::from_writer(sink);
            for s in summary {
                writer.serialize(s)?;
            }
            writer.flush()?;
        }
        "json" => {
            serde_json::to_writer_pretty(&mut sink, summary)?;
            writeln!(sink)?;
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, csv, json",
                other
            )));
        }
    }
    Ok(())
}
