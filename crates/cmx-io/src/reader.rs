//! Data reader trait and common types
//!
//! The `DataReader` trait provides a uniform interface for reading
//! results tables from different file formats.

use crate::schema::{DataColumn, DataSchema};
use crate::table::DataTable;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds { index: usize, size: usize },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Io(err.to_string())
    }
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Trait for reading tabular data from various formats
pub trait DataReader: Send + Sync {
    /// Read the schema (column names, types, record count)
    fn read_schema(&self) -> IoResult<DataSchema>;

    /// Read a single column by name
    fn read_column(&self, name: &str) -> IoResult<DataColumn>;

    /// Get the file path (if applicable)
    fn path(&self) -> Option<&str> {
        None
    }

    /// Get the format name
    fn format_name(&self) -> &'static str;

    /// Read every column into memory
    fn read_table(&self) -> IoResult<DataTable> {
        let schema = self.read_schema()?;
        let columns = schema
            .columns
            .iter()
            .map(|c| Ok((c.name.clone(), self.read_column(&c.name)?)))
            .collect::<IoResult<Vec<_>>>()?;
        DataTable::from_columns(columns)
    }
}

/// A boxed reader for dynamic dispatch
pub type BoxedReader = Box<dyn DataReader>;

/// Open a file and return an appropriate reader
///
/// The format is auto-detected from the file extension.
pub fn open_file(path: &str) -> IoResult<BoxedReader> {
    let extension = path
        .rsplit('.')
        .next()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "csv")]
        "csv" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(CsvReader::open(path)?))
        }

        #[cfg(feature = "csv")]
        "tsv" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(CsvReader::open_with_options(path, b'\t', true)?))
        }

        _ => Err(IoError::InvalidFormat(format!(
            "Unknown file extension: {}",
            extension
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            open_file("results.parquet"),
            Err(IoError::InvalidFormat(_))
        ));
    }
}
