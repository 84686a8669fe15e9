//! CSV files as a dataset store.
//!
//! The survey table is read from one file; the labelled table and the daily
//! summary are written to two files (by default the input itself and a
//! `<stem>_daily_sentiment.csv` sibling):
//! ```csv
//! tanggal,jawaban,preprocessed_text,sentimen_negatif
//! 2024-01-01,Sapi saya mati kemarin,sapi ayam mati kemarin,1
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ::csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::aggregation::DailySummary;
use crate::dataset::{Dataset, DatasetStore, SUMMARY_COUNT_COLUMN, SUMMARY_DATE_COLUMN};
use crate::error::{Result, SigapError};

/// A dataset store backed by CSV files.
///
/// Reading is flexible about row width; a header row is required. Writing
/// goes to temporary files next to the targets, which are renamed into place
/// only after both tables were written.
#[derive(Debug, Clone)]
pub struct CsvDatasetStore {
    input: PathBuf,
    output: PathBuf,
    summary: PathBuf,
    summary_columns: (String, String),
    delimiter: u8,
}

impl CsvDatasetStore {
    /// Read from and write back to `input`.
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        let input = input.into();
        let summary = default_summary_path(&input);
        CsvDatasetStore {
            output: input.clone(),
            input,
            summary,
            summary_columns: (
                SUMMARY_DATE_COLUMN.to_string(),
                SUMMARY_COUNT_COLUMN.to_string(),
            ),
            delimiter: b',',
        }
    }

    /// Write the labelled table somewhere other than the input.
    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }

    /// Write the summary table to `summary`.
    pub fn with_summary<P: Into<PathBuf>>(mut self, summary: P) -> Self {
        self.summary = summary.into();
        self
    }

    /// Header names of the summary table.
    pub fn with_summary_columns<S: Into<String>>(mut self, date: S, count: S) -> Self {
        self.summary_columns = (date.into(), count.into());
        self
    }

    /// Set a custom delimiter character. Only ASCII delimiters are accepted.
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(SigapError::configuration(format!(
                "CSV delimiter must be a single ASCII character, got {delimiter:?}"
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn summary(&self) -> &Path {
        &self.summary
    }

    fn write_table(&self, path: &Path, table: &Dataset) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(path)
            .map_err(|e| {
                SigapError::data_access(format!("Cannot create {}: {e}", path.display()))
            })?;

        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// `<dir>/<stem>_daily_sentiment.csv` next to the input.
pub fn default_summary_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "survey".to_string());
    input.with_file_name(format!("{stem}_daily_sentiment.csv"))
}

fn sibling_path(target: &Path, extension: &str) -> PathBuf {
    let name = target
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.{extension}", Uuid::new_v4().simple()))
}

/// Put `backup` back at `target`, or clear `target` when it did not exist before.
fn restore_previous(target: &Path, backup: Option<&Path>) {
    let restored = match backup {
        Some(backup) => fs::rename(backup, target),
        None => fs::remove_file(target).or_else(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(e),
        }),
    };
    if let Err(e) = restored {
        warn!("failed to restore {}: {e}", target.display());
    }
}

impl DatasetStore for CsvDatasetStore {
    fn load(&self) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(&self.input)
            .map_err(|e| {
                SigapError::data_access(format!("Cannot open {}: {e}", self.input.display()))
            })?;

        let headers = reader.headers().map_err(|e| {
            SigapError::data_access(format!(
                "Failed to read CSV headers of {}: {e}",
                self.input.display()
            ))
        })?;
        if headers.is_empty() {
            return Err(SigapError::data_access(format!(
                "CSV header of {} is empty",
                self.input.display()
            )));
        }

        let mut dataset = Dataset::new(headers.iter());
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                SigapError::data_access(format!(
                    "Failed to read record {} of {}: {e}",
                    line + 1,
                    self.input.display()
                ))
            })?;
            dataset.push_row(record.iter());
        }

        debug!(
            "loaded {} row(s) with {} column(s) from {}",
            dataset.len(),
            dataset.headers().len(),
            self.input.display()
        );
        Ok(dataset)
    }

    fn store(&self, labeled: &Dataset, summary: &DailySummary) -> Result<()> {
        let (date_header, count_header) = &self.summary_columns;
        let summary_table = Dataset::from_summary(summary, date_header, count_header);

        for target in [&self.output, &self.summary] {
            if target.is_dir() {
                return Err(SigapError::data_access(format!(
                    "Cannot replace {}: it is a directory",
                    target.display()
                )));
            }
        }

        let output_tmp = sibling_path(&self.output, "tmp");
        let summary_tmp = sibling_path(&self.summary, "tmp");

        let written = self
            .write_table(&output_tmp, labeled)
            .and_then(|_| self.write_table(&summary_tmp, &summary_table));
        if let Err(e) = written {
            let _ = fs::remove_file(&output_tmp);
            let _ = fs::remove_file(&summary_tmp);
            return Err(SigapError::data_access(format!(
                "Failed to write results: {e}"
            )));
        }

        // The previous labelled table is kept aside until the summary is in place.
        let backup = if self.output.exists() {
            let backup = sibling_path(&self.output, "bak");
            if let Err(e) = fs::rename(&self.output, &backup) {
                let _ = fs::remove_file(&output_tmp);
                let _ = fs::remove_file(&summary_tmp);
                return Err(SigapError::data_access(format!(
                    "Cannot replace {}: {e}",
                    self.output.display()
                )));
            }
            Some(backup)
        } else {
            None
        };

        let replaced = fs::rename(&output_tmp, &self.output)
            .map_err(|e| (e, &self.output))
            .and_then(|_| {
                fs::rename(&summary_tmp, &self.summary).map_err(|e| (e, &self.summary))
            });
        if let Err((e, target)) = replaced {
            let _ = fs::remove_file(&output_tmp);
            let _ = fs::remove_file(&summary_tmp);
            restore_previous(&self.output, backup.as_deref());
            return Err(SigapError::data_access(format!(
                "Cannot replace {}: {e}",
                target.display()
            )));
        }

        if let Some(backup) = backup
            && let Err(e) = fs::remove_file(&backup)
        {
            warn!("failed to remove {}: {e}", backup.display());
        }

        info!(
            "wrote {} row(s) to {} and {} day(s) to {}",
            labeled.len(),
            self.output.display(),
            summary_table.len(),
            self.summary.display()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.input.display().to_string()
    }
}
