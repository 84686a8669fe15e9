//! Tabular survey data and where it lives.
//!
//! A [`Dataset`] is a header row plus string cells; a [`DatasetStore`] loads
//! one and writes it back together with the daily summary.

use crate::aggregation::DailySummary;
use crate::error::{Result, SigapError};

pub mod csv;
pub mod memory;

/// Default header of the summary date column.
pub const SUMMARY_DATE_COLUMN: &str = "tanggal";

/// Default header of the summary count column.
pub const SUMMARY_COUNT_COLUMN: &str = "sentimen_negatif";

/// A table of string cells with named columns.
///
/// Rows shorter than the header are padded with empty cells, so every
/// named column can be read from every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create an empty table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dataset {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding it to the header width.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), String::new());
        }
        self.rows.push(row);
    }

    /// Builder form of [`Dataset::push_row`].
    pub fn with_row<I, S>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(row);
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column that must be present.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| {
            SigapError::configuration(format!(
                "Column {name:?} not found, available columns: {}",
                self.headers.join(", ")
            ))
        })
    }

    /// Cell text; missing cells read as empty.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All cells of a named column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let index = self.require_column(name)?;
        Ok((0..self.rows.len()).map(|row| self.cell(row, index)).collect())
    }

    /// Overwrite a column in place, or append it when absent.
    pub fn set_column<S: Into<String>>(&mut self, name: &str, values: Vec<S>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(SigapError::invalid_argument(format!(
                "column {name:?} has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }

        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() <= index {
                row.resize(index + 1, String::new());
            }
            row[index] = value.into();
        }
        Ok(())
    }

    /// Render a summary as a two-column table.
    pub fn from_summary(summary: &DailySummary, date_header: &str, count_header: &str) -> Self {
        let mut table = Dataset::new([date_header, count_header]);
        for day in summary.iter() {
            table.push_row([day.date.format("%Y-%m-%d").to_string(), day.negative.to_string()]);
        }
        table
    }
}

/// Source and sink of survey data.
///
/// `store` replaces both tables wholesale; a failed `store` leaves the
/// previous contents untouched.
pub trait DatasetStore: Send + Sync {
    /// Read the whole table.
    fn load(&self) -> Result<Dataset>;

    /// Write the labelled table and its daily summary.
    fn store(&self, labeled: &Dataset, summary: &DailySummary) -> Result<()>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}
