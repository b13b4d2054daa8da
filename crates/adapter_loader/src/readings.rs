//! Readings table parsing and per-variable access.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LoaderError, LoaderResult};

/// Naive formats accepted after RFC 3339; all are interpreted as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Missing-value markers in the `Value` column.
const MISSING_MARKERS: [&str; 3] = ["", "na", "nan"];

#[derive(Debug, Deserialize)]
struct RawReading {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Variable")]
    variable: String,
    #[serde(rename = "Units")]
    units: String,
    #[serde(rename = "Value")]
    value: String,
}

/// One sensor reading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reading {
    /// Observation time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Measured quantity, e.g. `Temperature`.
    pub variable: String,
    /// Unit label, e.g. `degC`.
    pub units: String,
    /// Measured value.
    pub value: f64,
}

/// Summary statistics for one variable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableSummary {
    /// Variable name.
    pub variable: String,
    /// Unit label.
    pub units: String,
    /// Number of readings.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest reading.
    pub min: f64,
    /// Largest reading.
    pub max: f64,
    /// Earliest timestamp.
    pub first: DateTime<Utc>,
    /// Latest timestamp.
    pub last: DateTime<Utc>,
}

/// Parses a timestamp cell.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, with any offset) and a few
/// naive layouts which are taken to be UTC.
///
/// ```
/// use adapter_loader::parse_timestamp;
///
/// let a = parse_timestamp("2024-05-01T10:00:00+02:00").unwrap();
/// let b = parse_timestamp("2024-05-01 08:00:00").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// All readings from one table, in file order.
#[derive(Clone, Debug, Default)]
pub struct ReadingsTable {
    readings: Vec<Reading>,
    units: BTreeMap<String, String>,
}

impl ReadingsTable {
    /// Loads a table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> LoaderResult<Self> {
        let path = path.as_ref();
        debug!("Loading readings from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Loads a table from any CSV source with a header row.
    ///
    /// # Errors
    ///
    /// - `Csv` for malformed rows or a missing column
    /// - `Timestamp`/`Value` for unparseable cells
    /// - `MixedUnits` if one variable appears with two unit labels
    /// - `Empty` if no usable reading remains
    pub fn from_reader<R: Read>(reader: R) -> LoaderResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::default();
        let mut skipped = 0usize;

        for (idx, record) in csv_reader.deserialize::<RawReading>().enumerate() {
            let row = idx + 1;
            let raw = record?;

            if MISSING_MARKERS.contains(&raw.value.to_lowercase().as_str()) {
                warn!("Row {}: missing value for '{}', skipped", row, raw.variable);
                skipped += 1;
                continue;
            }

            let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| {
                LoaderError::Timestamp {
                    row,
                    value: raw.timestamp.clone(),
                }
            })?;
            let value: f64 = raw.value.parse().map_err(|_| LoaderError::Value {
                row,
                value: raw.value.clone(),
            })?;

            table.push(Reading {
                timestamp,
                variable: raw.variable,
                units: raw.units,
                value,
            })?;
        }

        if table.readings.is_empty() {
            return Err(LoaderError::Empty);
        }
        debug!(
            "Loaded {} readings across {} variables ({} skipped)",
            table.readings.len(),
            table.units.len(),
            skipped
        );
        Ok(table)
    }

    fn push(&mut self, reading: Reading) -> LoaderResult<()> {
        match self.units.get(&reading.variable) {
            Some(units) if *units != reading.units => {
                return Err(LoaderError::MixedUnits {
                    variable: reading.variable,
                    first: units.clone(),
                    second: reading.units,
                });
            }
            Some(_) => {}
            None => {
                self.units
                    .insert(reading.variable.clone(), reading.units.clone());
            }
        }
        self.readings.push(reading);
        Ok(())
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// `true` if the table holds no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// All readings in file order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Sorted, de-duplicated variable names.
    pub fn variables(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }

    /// Unit label of `variable`, if present.
    pub fn units(&self, variable: &str) -> Option<&str> {
        self.units.get(variable).map(String::as_str)
    }

    /// `(timestamp, value)` pairs for one variable, ordered by time.
    ///
    /// Readings with equal timestamps keep their file order.
    pub fn series(&self, variable: &str) -> Vec<(DateTime<Utc>, f64)> {
        let mut series: Vec<_> = self
            .readings
            .iter()
            .filter(|r| r.variable == variable)
            .map(|r| (r.timestamp, r.value))
            .collect();
        series.sort_by_key(|(ts, _)| *ts);
        series
    }

    /// Per-variable statistics, ordered by variable name.
    pub fn summary(&self) -> Vec<VariableSummary> {
        self.units
            .iter()
            .filter_map(|(variable, units)| {
                let series = self.series(variable);
                let (first, _) = *series.first()?;
                let (last, _) = *series.last()?;
                let count = series.len();
                let values = series.iter().map(|(_, v)| *v);
                let mean = values.clone().sum::<f64>() / count as f64;
                let min = values.clone().fold(f64::INFINITY, f64::min);
                let max = values.fold(f64::NEG_INFINITY, f64::max);
                Some(VariableSummary {
                    variable: variable.clone(),
                    units: units.clone(),
                    count,
                    mean,
                    min,
                    max,
                    first,
                    last,
                })
            })
            .collect()
    }
}
