use std::fmt;
use std::io;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::cell::Cell;
use super::record::Record;
use crate::rollout::EpisodeStats;

/// Append-only table of experiment results, one row per episode.
///
/// Columns are the union of every row's keys in first-seen order. A row
/// without a value for some column reads as missing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ResultsTable {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new table with one more row: `hyperparameters` overlaid
    /// with the flattened `stats` (statistics win on key conflicts).
    ///
    /// `self` is left untouched.
    pub fn append(&self, hyperparameters: &Record, stats: &EpisodeStats) -> ResultsTable {
        let mut table = self.clone();
        table.push(hyperparameters.merged(&stats.to_record()));
        table
    }

    /// Appends a raw row in place.
    pub fn push(&mut self, row: Record) {
        for key in row.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.to_string());
            }
        }
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Value at `row`, `column`, or `None` if the row lacks that column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// All values of `column`, in row order.
    pub fn column(&self, column: &str) -> Vec<Option<&Cell>> {
        self.rows.iter().map(|r| r.get(column)).collect()
    }

    /// Writes the table as CSV with a header line. Missing cells are empty.
    pub fn write_csv<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        let header: Vec<String> = self.columns.iter().map(|c| csv_field(c)).collect();
        writeln!(writer, "{}", header.join(","))?;
        for row in &self.rows {
            let fields: Vec<String> = self
                .columns
                .iter()
                .map(|c| row.get(c).map(|v| csv_field(&v.to_string())).unwrap_or_default())
                .collect();
            writeln!(writer, "{}", fields.join(","))?;
        }
        Ok(())
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ResultsTable ({} rows x {} columns)",
            self.rows.len(),
            self.columns.len()
        )?;
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(f, "  [{}] {}", i, row)?;
        }
        Ok(())
    }
}

/// Appends one episode's statistics to `table` and returns the new table.
pub fn store_stats(
    table: &ResultsTable,
    hyperparameters: &Record,
    stats: &EpisodeStats,
) -> ResultsTable {
    table.append(hyperparameters, stats)
}
