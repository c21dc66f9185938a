use crate::error::{DashboardError, Result};
use crate::models::Record;
use crate::utils::constants::{REGION_COLUMN, TIMESTAMP_COLUMN};

/// All regions' records concatenated in load order. A record's position in
/// `records` is its row index. Built once by the loader, then read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedTable {
    columns: Vec<String>,
    timestamp_column: String,
    records: Vec<Record>,
}

impl UnifiedTable {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            timestamp_column: TIMESTAMP_COLUMN.to_string(),
            records: Vec::new(),
        }
    }

    /// Name of the source column the row timestamps were parsed from.
    pub fn with_timestamp_column(mut self, timestamp_column: &str) -> Self {
        self.timestamp_column = timestamp_column.to_string();
        self
    }

    /// Build a table from records that all share `columns`.
    pub fn from_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut table = Self::new();
        table.append(&columns, records);
        table
    }

    /// Append one region's rows. New source columns are added in the order
    /// first seen; the region column always stays last.
    pub fn append(&mut self, source_columns: &[String], records: Vec<Record>) {
        if self.columns.last().map(String::as_str) == Some(REGION_COLUMN) {
            self.columns.pop();
        }
        for column in source_columns {
            if column != REGION_COLUMN && !self.columns.contains(column) {
                self.columns.push(column.clone());
            }
        }
        self.columns.push(REGION_COLUMN.to_string());
        self.records.extend(records);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn timestamp_column(&self) -> &str {
        &self.timestamp_column
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow every row as a filtered view.
    pub fn view(&self) -> FilteredTable<'_> {
        FilteredTable {
            columns: &self.columns,
            timestamp_column: &self.timestamp_column,
            records: self.records.iter().collect(),
        }
    }
}

impl Default for UnifiedTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed subset of a [`UnifiedTable`], rows kept in table order.
#[derive(Debug, Clone)]
pub struct FilteredTable<'a> {
    columns: &'a [String],
    timestamp_column: &'a str,
    records: Vec<&'a Record>,
}

impl<'a> FilteredTable<'a> {
    pub(crate) fn new(table: &'a UnifiedTable, records: Vec<&'a Record>) -> Self {
        Self {
            columns: &table.columns,
            timestamp_column: &table.timestamp_column,
            records,
        }
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn timestamp_column(&self) -> &'a str {
        self.timestamp_column
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fail with the missing name if `metric` is not a measurement column of
    /// the table. The timestamp and region columns are never metrics.
    pub fn require_metric(&self, metric: &str) -> Result<()> {
        let is_metric = |column: &str| column != REGION_COLUMN && column != self.timestamp_column;

        if is_metric(metric) && self.columns.iter().any(|c| c == metric) {
            Ok(())
        } else {
            Err(DashboardError::MetricNotFound {
                metric: metric.to_string(),
                available: self
                    .columns
                    .iter()
                    .filter(|c| is_metric(c.as_str()))
                    .cloned()
                    .collect(),
            })
        }
    }
}
