//! In-memory results table
//!
//! A `DataTable` is a fully materialized set of equally long, named
//! columns. Analyses look columns up by name and get a typed error if the
//! column is missing or has the wrong kind of values.

use crate::reader::{IoError, IoResult};
use crate::schema::{ColumnDescriptor, DataColumn, DataSchema};

/// Named columns of equal length, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<(String, DataColumn)>,
    num_rows: usize,
}

impl DataTable {
    /// Build a table from columns, checking that all have the same length
    pub fn from_columns(columns: Vec<(String, DataColumn)>) -> IoResult<Self> {
        let num_rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        if let Some((name, column)) = columns.iter().find(|(_, c)| c.len() != num_rows) {
            return Err(IoError::InvalidFormat(format!(
                "column '{}' has {} rows, expected {}",
                name,
                column.len(),
                num_rows
            )));
        }
        Ok(Self { columns, num_rows })
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> IoResult<&DataColumn> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, column)| column)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))
    }

    /// Read a numeric column as f64, missing values as NaN
    pub fn numeric_column(&self, name: &str) -> IoResult<Vec<f64>> {
        let column = self.column(name)?;
        column.to_f64().ok_or_else(|| IoError::TypeMismatch {
            expected: format!("numeric column '{}'", name),
            actual: column.dtype().to_string(),
        })
    }

    /// Read any column as text labels
    pub fn label_column(&self, name: &str) -> IoResult<Vec<String>> {
        Ok(self.column(name)?.to_labels())
    }

    /// Keep only the given rows, in the given order
    pub fn select_rows(&self, rows: &[usize]) -> IoResult<DataTable> {
        if let Some(&index) = rows.iter().find(|&&i| i >= self.num_rows) {
            return Err(IoError::OutOfBounds {
                index,
                size: self.num_rows,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| (name.clone(), column.take(rows)))
            .collect();
        Ok(DataTable {
            columns,
            num_rows: rows.len(),
        })
    }

    /// Keep the rows for which `predicate` holds on the label of `column`
    pub fn filter_rows<F>(&self, column: &str, predicate: F) -> IoResult<DataTable>
    where
        F: Fn(&str) -> bool,
    {
        let rows: Vec<usize> = self
            .label_column(column)?
            .iter()
            .enumerate()
            .filter(|(_, label)| predicate(label))
            .map(|(i, _)| i)
            .collect();
        self.select_rows(&rows)
    }

    /// Describe the table's columns
    pub fn schema(&self) -> DataSchema {
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| {
                let nullable = matches!(column, DataColumn::Float64(v) if v.iter().any(|x| x.is_nan()));
                ColumnDescriptor::new(name.clone(), column.dtype()).with_nullable(nullable)
            })
            .collect();
        DataSchema::new(columns, self.num_rows)
    }
}
