//! CSV file reader with type inference
//!
//! Records are parsed once when the reader is opened. Column types are
//! inferred from every row: a column is Int64 if all non-empty cells parse
//! as integers, Float64 if they parse as numbers, Bool for true/false style
//! values, and String otherwise. A numeric column with empty cells becomes
//! Float64 with NaN marking the missing values.

use crate::reader::{DataReader, IoError, IoResult};
use crate::schema::{ColumnDescriptor, ColumnType, DataColumn, DataSchema};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV file reader
pub struct CsvReader {
    path: Option<String>,
    schema: DataSchema,
    records: Vec<csv::StringRecord>,
}

impl CsvReader {
    /// Open a CSV file
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_options(path, b',', true)
    }

    /// Open a CSV file with options
    pub fn open_with_options(path: &str, delimiter: u8, has_header: bool) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let mut reader = Self::from_reader(BufReader::new(file), delimiter, has_header)?;
        reader.path = Some(path.to_string());
        Ok(reader)
    }

    /// Parse CSV from any reader
    pub fn from_reader<R: Read>(source: R, delimiter: u8, has_header: bool) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(has_header)
            .trim(csv::Trim::All)
            .from_reader(source);

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?;

        let headers: Vec<String> = if has_header {
            reader
                .headers()
                .map_err(|e| IoError::InvalidFormat(e.to_string()))?
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            // Generate column names
            let width = records.first().map(|r| r.len()).unwrap_or(0);
            (0..width).map(|i| format!("col_{}", i)).collect()
        };

        let schema = Self::infer_schema(headers, &records);

        Ok(Self {
            path: None,
            schema,
            records,
        })
    }

    fn infer_schema(headers: Vec<String>, records: &[csv::StringRecord]) -> DataSchema {
        let columns: Vec<ColumnDescriptor> = headers
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<&str> = records.iter().map(|r| r.get(i).unwrap_or("")).collect();
                let nullable = values.iter().any(|s| s.is_empty());
                ColumnDescriptor::new(name, infer_type(&values)).with_nullable(nullable)
            })
            .collect();

        DataSchema::new(columns, records.len())
    }

    fn cells(&self, index: usize) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.get(index).unwrap_or(""))
            .collect()
    }
}

impl DataReader for CsvReader {
    fn read_schema(&self) -> IoResult<DataSchema> {
        Ok(self.schema.clone())
    }

    fn read_column(&self, name: &str) -> IoResult<DataColumn> {
        let col_index = self
            .schema
            .column_index(name)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))?;

        let col_desc = &self.schema.columns[col_index];
        let values = self.cells(col_index);
        Ok(parse_column(&values, col_desc.dtype))
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// Infer column type from its values
fn infer_type(values: &[&str]) -> ColumnType {
    let non_empty: Vec<&str> = values.iter().copied().filter(|s| !s.is_empty()).collect();
    if non_empty.is_empty() {
        return ColumnType::String;
    }
    let has_missing = non_empty.len() < values.len();

    // Try parsing as integers
    if non_empty.iter().all(|s| s.parse::<i64>().is_ok()) {
        return if has_missing {
            ColumnType::Float64
        } else {
            ColumnType::Int64
        };
    }

    // Try parsing as floats
    if non_empty.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float64;
    }

    // Try parsing as booleans
    if non_empty.iter().all(|s| {
        matches!(
            s.to_lowercase().as_str(),
            "true" | "false" | "yes" | "no"
        )
    }) {
        return ColumnType::Bool;
    }

    ColumnType::String
}

/// Parse column values into a DataColumn
fn parse_column(values: &[&str], dtype: ColumnType) -> DataColumn {
    match dtype {
        ColumnType::Float64 => DataColumn::Float64(
            values
                .iter()
                .map(|s| s.parse().unwrap_or(f64::NAN))
                .collect(),
        ),
        ColumnType::Int64 => {
            DataColumn::Int64(values.iter().map(|s| s.parse().unwrap_or(0)).collect())
        }
        ColumnType::Bool => DataColumn::Bool(
            values
                .iter()
                .map(|s| matches!(s.to_lowercase().as_str(), "true" | "yes"))
                .collect(),
        ),
        ColumnType::String => DataColumn::String(values.iter().map(|s| s.to_string()).collect()),
    }
}
