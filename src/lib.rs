//! # Sigap
//!
//! Sentiment triage for free-text livestock-health survey answers.
//!
//! ## Features
//!
//! - Normalization of noisy, informal Indonesian answers
//! - Vocabulary-driven typo correction
//! - Ordered keyword rules with a model-backed fallback
//! - Daily aggregation of negative answers
//! - CSV dataset store and a command line interface

pub mod aggregation;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod job;
pub mod sentiment;
pub mod spelling;
pub mod util;
pub mod vocabulary;

pub mod prelude {
    pub use crate::aggregation::{DailySummary, aggregate, parse_date_lenient};
    pub use crate::config::SigapConfig;
    pub use crate::dataset::csv::CsvDatasetStore;
    pub use crate::dataset::{Dataset, DatasetStore};
    pub use crate::error::{Result, SigapError};
    pub use crate::job::{SentimentUpdateJob, UpdateReport};
    pub use crate::sentiment::{
        ClassificationPipeline, HttpSentimentScorer, NoopScorer, SentimentLabel,
        SentimentScorer,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
