//! Partitioning a results table by configuration and target class
//!
//! Partitions hold row indices, not copies of the rows. Keys are kept in
//! `BTreeMap`s so groups and subjects always come out sorted.

use std::collections::BTreeMap;

use cmx_io::DataTable;

use crate::error::AnalysisResult;

/// A results table split by group key and, optionally, subject key
#[derive(Debug, Clone)]
pub struct GroupedTable<'a> {
    table: &'a DataTable,
    group_key: String,
    subject_key: Option<String>,
    groups: BTreeMap<String, Vec<usize>>,
    subjects: BTreeMap<String, BTreeMap<String, Vec<usize>>>,
}

impl<'a> GroupedTable<'a> {
    /// Partition rows by `group_key` only
    pub fn by_group(table: &'a DataTable, group_key: &str) -> AnalysisResult<Self> {
        Self::build(table, group_key, None)
    }

    /// Partition rows by `group_key`, then by `subject_key` within each group
    pub fn by_group_and_subject(
        table: &'a DataTable,
        group_key: &str,
        subject_key: &str,
    ) -> AnalysisResult<Self> {
        Self::build(table, group_key, Some(subject_key))
    }

    fn build(
        table: &'a DataTable,
        group_key: &str,
        subject_key: Option<&str>,
    ) -> AnalysisResult<Self> {
        let group_labels = table.label_column(group_key)?;
        let subject_labels = subject_key
            .map(|key| table.label_column(key))
            .transpose()?;

        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut subjects: BTreeMap<String, BTreeMap<String, Vec<usize>>> = BTreeMap::new();

        for (row, group) in group_labels.iter().enumerate() {
            groups.entry(group.clone()).or_default().push(row);
            if let Some(labels) = &subject_labels {
                subjects
                    .entry(group.clone())
                    .or_default()
                    .entry(labels[row].clone())
                    .or_default()
                    .push(row);
            }
        }

        Ok(Self {
            table,
            group_key: group_key.to_string(),
            subject_key: subject_key.map(str::to_string),
            groups,
            subjects,
        })
    }

    /// The underlying table
    pub fn table(&self) -> &'a DataTable {
        self.table
    }

    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    pub fn subject_key(&self) -> Option<&str> {
        self.subject_key.as_deref()
    }

    /// Group labels present in the table, sorted
    pub fn groups(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    /// Rows belonging to `group`
    pub fn group_rows(&self, group: &str) -> &[usize] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Subjects that appear in `group`, sorted
    pub fn subjects(&self, group: &str) -> Vec<&str> {
        self.subjects
            .get(group)
            .map(|s| s.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Subjects that appear in both groups, sorted
    pub fn common_subjects(&self, group_a: &str, group_b: &str) -> Vec<&str> {
        match (self.subjects.get(group_a), self.subjects.get(group_b)) {
            (Some(a), Some(b)) => a
                .keys()
                .filter(|subject| b.contains_key(*subject))
                .map(String::as_str)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Rows belonging to one subject within one group
    pub fn subject_rows(&self, group: &str, subject: &str) -> &[usize] {
        self.subjects
            .get(group)
            .and_then(|s| s.get(subject))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Values of `column` at `rows`, with missing values and rows past the end
/// of the column dropped
pub(crate) fn sample(column: &[f64], rows: &[usize]) -> Vec<f64> {
    rows.iter()
        .filter_map(|&row| column.get(row).copied())
        .filter(|x| x.is_finite())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmx_io::{DataColumn, IoError};
    use crate::error::AnalysisError;

    fn table() -> DataTable {
        let strings = |v: &[&str]| DataColumn::String(v.iter().map(|s| s.to_string()).collect());
        DataTable::from_columns(vec![
            (
                "configuration_id".to_string(),
                strings(&["CMX", "DEFAULT", "CMX", "DEFAULT", "CMX"]),
            ),
            ("TARGET_CLASS".to_string(), strings(&["X", "X", "Y", "Z", "X"])),
            (
                "Coverage".to_string(),
                DataColumn::Float64(vec![0.5, 0.25, 1.0, f64::NAN, 0.75]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_groups_sorted() {
        let table = table();
        let grouped = GroupedTable::by_group(&table, "configuration_id").unwrap();
        assert_eq!(grouped.groups(), vec!["CMX", "DEFAULT"]);
        assert_eq!(grouped.group_rows("CMX"), &[0, 2, 4]);
        assert!(grouped.group_rows("COVERAGE").is_empty());
        assert!(grouped.subjects("CMX").is_empty());
    }

    #[test]
    fn test_subject_partitions() {
        let table = table();
        let grouped =
            GroupedTable::by_group_and_subject(&table, "configuration_id", "TARGET_CLASS")
                .unwrap();

        assert_eq!(grouped.subjects("CMX"), vec!["X", "Y"]);
        assert_eq!(grouped.subjects("DEFAULT"), vec!["X", "Z"]);
        assert_eq!(grouped.common_subjects("CMX", "DEFAULT"), vec!["X"]);
        assert!(grouped.common_subjects("CMX", "COVERAGE").is_empty());
        assert_eq!(grouped.subject_rows("CMX", "X"), &[0, 4]);
    }

    #[test]
    fn test_partition_rows_share_keys() {
        let table = table();
        let grouped =
            GroupedTable::by_group_and_subject(&table, "configuration_id", "TARGET_CLASS")
                .unwrap();
        let groups = table.label_column("configuration_id").unwrap();
        let subjects = table.label_column("TARGET_CLASS").unwrap();

        for group in grouped.groups() {
            for subject in grouped.subjects(group) {
                for &row in grouped.subject_rows(group, subject) {
                    assert_eq!(groups[row], group);
                    assert_eq!(subjects[row], subject);
                }
            }
        }
    }

    #[test]
    fn test_sample_drops_missing() {
        let table = table();
        let coverage = table.numeric_column("Coverage").unwrap();
        assert_eq!(sample(&coverage, &[1, 3]), vec![0.25]);
    }

    #[test]
    fn test_sample_skips_rows_past_end() {
        let column = [0.5, 0.25];
        assert_eq!(sample(&column, &[1, 2, 7]), vec![0.25]);
        assert!(sample(&[], &[0]).is_empty());
    }

    #[test]
    fn test_missing_key_column() {
        let table = table();
        assert!(matches!(
            GroupedTable::by_group_and_subject(&table, "configuration_id", "CLASS"),
            Err(AnalysisError::Io(IoError::ColumnNotFound(_)))
        ));
    }
}
