//! cmx-io - Tabular I/O for experiment results
//!
//! This crate provides the source and sink for result tables:
//!
//! - **Readers**: the `DataReader` trait with a CSV implementation that
//!   infers column types
//! - **Tables**: `DataTable`, an in-memory set of named columns with typed
//!   lookups
//! - **Writers**: `CsvTableWriter` for flat result rows
//!
//! # Design
//!
//! Results files are small enough to load whole. Readers parse once and
//! hand out typed columns; a missing or mistyped column is an error at
//! lookup time instead of an empty result further down the line.

pub mod reader;
pub mod schema;
pub mod table;

#[cfg(feature = "csv")]
pub mod csv_reader;

#[cfg(feature = "csv")]
pub mod csv_writer;

pub use reader::*;
pub use schema::*;
pub use table::*;

#[cfg(feature = "csv")]
pub use csv_reader::CsvReader;

#[cfg(feature = "csv")]
pub use csv_writer::{Cell, CsvTableWriter};
