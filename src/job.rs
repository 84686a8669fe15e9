//! One sentiment update run over a whole dataset.
//!
//! load → classify every answer → aggregate by day → write both tables back.
//! Nothing is written unless every step before the write succeeded.

use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::aggregation::{DailySummary, aggregate};
use crate::config::{ColumnConfig, SigapConfig};
use crate::dataset::DatasetStore;
use crate::error::Result;
use crate::sentiment::{ClassificationPipeline, DecisionSource, SentimentScorer};

/// Counts describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    /// Records processed.
    pub total: usize,
    /// Records labelled negative.
    pub negative: usize,
    /// Records the keyword rules could not decide.
    pub undecided_by_rules: usize,
    /// Records left out of the summary because of their date.
    pub invalid_dates: usize,
    /// Distinct days in the summary.
    pub days: usize,
}

/// Classifies a dataset and writes labels and the daily summary back.
pub struct SentimentUpdateJob {
    pipeline: Arc<ClassificationPipeline>,
    store: Arc<dyn DatasetStore>,
    columns: ColumnConfig,
}

impl std::fmt::Debug for SentimentUpdateJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentUpdateJob")
            .field("pipeline", &self.pipeline)
            .field("store", &self.store.describe())
            .field("columns", &self.columns)
            .finish()
    }
}

impl SentimentUpdateJob {
    /// Create a job around an existing pipeline.
    pub fn new(
        pipeline: Arc<ClassificationPipeline>,
        store: Arc<dyn DatasetStore>,
        columns: ColumnConfig,
    ) -> Self {
        SentimentUpdateJob {
            pipeline,
            store,
            columns,
        }
    }

    /// Build the pipeline from configuration and wrap it in a job.
    pub fn from_config(
        config: &SigapConfig,
        scorer: Arc<dyn SentimentScorer>,
        store: Arc<dyn DatasetStore>,
    ) -> Result<Self> {
        let pipeline = ClassificationPipeline::new(config, scorer)?;
        Ok(Self::new(Arc::new(pipeline), store, config.columns.clone()))
    }

    /// Run the update end to end.
    pub async fn run(&self) -> Result<UpdateReport> {
        let (report, _) = self.run_with_summary().await?;
        Ok(report)
    }

    /// Run the update and also return the summary that was written.
    pub async fn run_with_summary(&self) -> Result<(UpdateReport, DailySummary)> {
        let mut dataset = self.store.load()?;
        info!(
            "classifying {} record(s) from {}",
            dataset.len(),
            self.store.describe()
        );

        let texts = dataset.column(&self.columns.text)?;
        let dates = dataset.column(&self.columns.date)?;

        let results = self.pipeline.classify_batch(&texts).await?;
        let summary = aggregate(dates.iter().copied().zip(results.iter().map(|r| r.label)));

        let report = UpdateReport {
            total: results.len(),
            negative: results.iter().filter(|r| r.label.is_negative()).count(),
            undecided_by_rules: results
                .iter()
                .filter(|r| !matches!(r.source, DecisionSource::Rule { .. }))
                .count(),
            invalid_dates: summary.invalid_dates(),
            days: summary.len(),
        };

        let (preprocessed, labels): (Vec<String>, Vec<String>) = results
            .into_iter()
            .map(|r| (r.preprocessed_text, r.label.to_string()))
            .unzip();
        dataset.set_column(&self.columns.preprocessed, preprocessed)?;
        dataset.set_column(&self.columns.label, labels)?;

        self.store.store(&dataset, &summary)?;

        info!(
            "update finished: {} record(s), {} negative, {} undecided by rules, {} invalid date(s), {} day(s)",
            report.total, report.negative, report.undecided_by_rules, report.invalid_dates, report.days
        );
        Ok((report, summary))
    }
}
