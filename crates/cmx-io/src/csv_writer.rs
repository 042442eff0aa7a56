//! CSV result sink

use crate::reader::{IoError, IoResult};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A single output cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Integer(i64),
    Missing,
}

impl Cell {
    fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(x) if x.is_finite() => x.to_string(),
            // NaN and infinities are written as empty cells
            Cell::Number(_) => String::new(),
            Cell::Integer(x) => x.to_string(),
            Cell::Missing => String::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Integer(value as i64)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Missing)
    }
}

/// Writes a header and rows of cells to a CSV file
pub struct CsvTableWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    width: usize,
    rows: usize,
}

impl CsvTableWriter {
    /// Create the file (and its parent directories) and write the header
    pub fn create<S: AsRef<str>>(path: impl AsRef<Path>, header: &[S]) -> IoResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(&path, e))?;
        }

        let mut writer = csv::Writer::from_path(&path).map_err(|e| write_error(&path, e))?;
        writer
            .write_record(header.iter().map(|h| h.as_ref()))
            .map_err(|e| write_error(&path, e))?;

        Ok(Self {
            path,
            writer,
            width: header.len(),
            rows: 0,
        })
    }

    /// Append one row; its length must match the header
    pub fn write_row(&mut self, row: &[Cell]) -> IoResult<()> {
        if row.len() != self.width {
            return Err(IoError::InvalidFormat(format!(
                "row has {} cells, header has {}",
                row.len(),
                self.width
            )));
        }
        self.writer
            .write_record(row.iter().map(Cell::render))
            .map_err(|e| write_error(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush to disk and return the number of data rows written
    pub fn finish(mut self) -> IoResult<usize> {
        self.writer.flush().map_err(|e| write_error(&self.path, e))?;
        Ok(self.rows)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> IoError {
    IoError::Write {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
