//! Schema and column types for tabular results

use serde::{Deserialize, Serialize};

/// Schema describing the structure of a results table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSchema {
    /// Column descriptors
    pub columns: Vec<ColumnDescriptor>,

    /// Number of records
    pub num_records: usize,
}

impl DataSchema {
    /// Create a new schema
    pub fn new(columns: Vec<ColumnDescriptor>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
        }
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Descriptor for a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Data type
    pub dtype: ColumnType,

    /// Whether the column contains empty cells
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
            nullable: false,
        }
    }

    /// Set nullable
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Float64,
    Int64,
    Bool,
    String,
}

impl ColumnType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Float64 | ColumnType::Int64)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Float64 => "float64",
            ColumnType::Int64 => "int64",
            ColumnType::Bool => "bool",
            ColumnType::String => "string",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A column of data
///
/// Missing numeric values are stored as NaN in `Float64` columns.
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Float64(Vec<f64>),
    Int64(Vec<i64>),
    Bool(Vec<bool>),
    String(Vec<String>),
}

impl DataColumn {
    /// Get the column type
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::Int64(_) => ColumnType::Int64,
            DataColumn::Bool(_) => ColumnType::Bool,
            DataColumn::String(_) => ColumnType::String,
        }
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Float64(v) => v.len(),
            DataColumn::Int64(v) => v.len(),
            DataColumn::Bool(v) => v.len(),
            DataColumn::String(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to f64 (for numeric types)
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            DataColumn::Float64(v) => Some(v.clone()),
            DataColumn::Int64(v) => Some(v.iter().map(|&x| x as f64).collect()),
            _ => None,
        }
    }

    /// Render every value as text, e.g. to use a column as a grouping key
    pub fn to_labels(&self) -> Vec<String> {
        match self {
            DataColumn::Float64(v) => v.iter().map(|x| x.to_string()).collect(),
            DataColumn::Int64(v) => v.iter().map(|x| x.to_string()).collect(),
            DataColumn::Bool(v) => v.iter().map(|x| x.to_string()).collect(),
            DataColumn::String(v) => v.clone(),
        }
    }

    /// Keep the values at `rows`, in that order
    pub fn take(&self, rows: &[usize]) -> DataColumn {
        fn pick<T: Clone>(values: &[T], rows: &[usize]) -> Vec<T> {
            rows.iter().map(|&i| values[i].clone()).collect()
        }
        match self {
            DataColumn::Float64(v) => DataColumn::Float64(pick(v, rows)),
            DataColumn::Int64(v) => DataColumn::Int64(pick(v, rows)),
            DataColumn::Bool(v) => DataColumn::Bool(pick(v, rows)),
            DataColumn::String(v) => DataColumn::String(pick(v, rows)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_column_lookup() {
        let schema = DataSchema::new(
            vec![
                ColumnDescriptor::new("configuration_id", ColumnType::String),
                ColumnDescriptor::new("Coverage", ColumnType::Float64).with_nullable(true),
            ],
            100,
        );

        assert_eq!(schema.column_index("configuration_id"), Some(0));
        assert_eq!(schema.column_index("Coverage"), Some(1));
        assert_eq!(schema.column_index("BranchCoverage"), None);
        assert!(schema.column("Coverage").unwrap().nullable);
        assert_eq!(schema.column_names(), vec!["configuration_id", "Coverage"]);
    }

    #[test]
    fn test_data_column_conversion() {
        let col = DataColumn::Int64(vec![1, 2, 3, 4, 5]);
        let f64_values = col.to_f64().unwrap();
        assert_eq!(f64_values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let col = DataColumn::String(vec!["CMX".to_string()]);
        assert!(col.to_f64().is_none());
    }

    #[test]
    fn test_labels_and_take() {
        let col = DataColumn::Int64(vec![10, 20, 30]);
        assert_eq!(col.to_labels(), vec!["10", "20", "30"]);
        assert_eq!(col.take(&[2, 0]), DataColumn::Int64(vec![30, 10]));
    }

    #[test]
    fn test_column_type_properties() {
        assert!(ColumnType::Float64.is_numeric());
        assert!(ColumnType::Int64.is_numeric());
        assert!(!ColumnType::String.is_numeric());
        assert_eq!(ColumnType::Bool.to_string(), "bool");
    }
}
