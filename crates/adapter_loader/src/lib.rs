//! # adapter_loader (A: Adapter Layer)
//!
//! Reads the raw sensor readings table: a CSV file with the columns
//! `Timestamp`, `Variable`, `Units`, `Value`, one reading per row.
//!
//! ```
//! use adapter_loader::ReadingsTable;
//!
//! let data = "Timestamp,Variable,Units,Value\n\
//!             2024-05-01 10:00:00,Temperature,degC,18.5\n\
//!             2024-05-01 10:05:00,Temperature,degC,18.9\n";
//! let table = ReadingsTable::from_reader(data.as_bytes()).unwrap();
//! assert_eq!(table.variables(), vec!["Temperature"]);
//! assert_eq!(table.series("Temperature").len(), 2);
//! ```

#![deny(missing_docs)]

mod error;
mod readings;

pub use error::{LoaderError, LoaderResult};
pub use readings::{parse_timestamp, Reading, ReadingsTable, VariableSummary};
