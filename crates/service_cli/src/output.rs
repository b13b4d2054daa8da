//! Tabular output for simulation results.
//!
//! Every simulation is written as a table with a leading 1-based `time`
//! column, as CSV (header row) or as a JSON array of row objects.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use serde_json::{Map, Value};
use ssm_models::{FactorSample, FsvSample, IsvPath};
use tracing::info;

use crate::{CliError, Result};

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Array of `{column: value}` objects.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: csv, json",
                other
            ))),
        }
    }
}

/// Time-indexed numeric table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    time: Vec<usize>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Builds a table; every row must have one value per column.
    pub fn new(columns: Vec<String>, time: Vec<usize>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if time.len() != rows.len() {
            return Err(CliError::InvalidArgument(format!(
                "time index has {} entries but table has {} rows",
                time.len(),
                rows.len()
            )));
        }
        if let Some(row) = rows.iter().find(|r| r.len() != columns.len()) {
            return Err(CliError::InvalidArgument(format!(
                "row has {} values, expected {}",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self {
            columns,
            time,
            rows,
        })
    }

    /// Single-column table for a plain path.
    pub fn from_path(name: &str, path: &[f64]) -> Self {
        Self {
            columns: vec![name.to_string()],
            time: (1..=path.len()).collect(),
            rows: path.iter().map(|&x| vec![x]).collect(),
        }
    }

    /// Column names, excluding `time`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the table to `output` (a file path) or stdout.
    pub fn write(&self, format: OutputFormat, output: Option<&str>) -> Result<()> {
        match output {
            Some(path) => {
                info!("Writing {} rows to {}", self.len(), path);
                let file = BufWriter::new(File::create(path)?);
                self.write_to(format, file)
            }
            None => self.write_to(format, io::stdout().lock()),
        }
    }

    /// Writes the table to any sink.
    pub fn write_to<W: Write>(&self, format: OutputFormat, sink: W) -> Result<()> {
        match format {
            OutputFormat::Csv => self.write_csv(sink),
            OutputFormat::Json => self.write_json(sink),
        }
    }

    fn write_csv<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(sink);
        let mut header = vec!["time".to_string()];
        header.extend(self.columns.iter().cloned());
        writer.write_record(&header)?;

        for (t, row) in self.time.iter().zip(&self.rows) {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(t.to_string());
            record.extend(row.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json<W: Write>(&self, mut sink: W) -> Result<()> {
        let records: Vec<Value> = self
            .time
            .iter()
            .zip(&self.rows)
            .map(|(t, row)| {
                let mut obj = Map::new();
                obj.insert("time".to_string(), Value::from(*t));
                for (name, v) in self.columns.iter().zip(row) {
                    obj.insert(name.clone(), Value::from(*v));
                }
                Value::Object(obj)
            })
            .collect();
        serde_json::to_writer_pretty(&mut sink, &records)?;
        writeln!(sink)?;
        Ok(())
    }
}

fn numbered(prefix: &str, count: usize) -> impl Iterator<Item = String> + '_ {
    (1..=count).map(move |i| format!("{}{}", prefix, i))
}

impl From<&IsvPath> for Table {
    fn from(path: &IsvPath) -> Self {
        Self {
            columns: vec!["y".to_string(), "alpha".to_string()],
            time: path.rows().map(|(t, _, _)| t).collect(),
            rows: path.rows().map(|(_, y, a)| vec![y, a]).collect(),
        }
    }
}

impl From<&FactorSample> for Table {
    fn from(sample: &FactorSample) -> Self {
        let columns = numbered("y", sample.n_series())
            .chain(numbered("f", sample.n_factors()))
            .collect();
        let rows = (0..sample.n_steps())
            .map(|i| {
                sample
                    .y
                    .row(i)
                    .iter()
                    .chain(sample.f.row(i).iter())
                    .copied()
                    .collect()
            })
            .collect();
        Self {
            columns,
            time: (1..=sample.n_steps()).collect(),
            rows,
        }
    }
}

impl From<&FsvSample> for Table {
    fn from(sample: &FsvSample) -> Self {
        Self {
            columns: numbered("y", sample.n_series()).collect(),
            time: sample.time(),
            rows: (0..sample.n_steps())
                .map(|i| sample.y.row(i).iter().copied().collect())
                .collect(),
        }
    }
}
