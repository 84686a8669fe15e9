//! Sentiment classification for survey answers.
//!
//! # Architecture
//!
//! - `RuleEngine`: ordered keyword rules over corrected text
//! - `SentimentScorer` trait: fallback model consulted for undecided texts
//! - `HttpSentimentScorer`: hosted inference endpoint
//! - `NoopScorer`: labels everything neutral
//! - `ClassificationPipeline`: normalize, correct, apply rules, fall back
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use sigap::config::SigapConfig;
//! use sigap::sentiment::{ClassificationPipeline, NoopScorer, SentimentLabel};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> sigap::error::Result<()> {
//! let pipeline = ClassificationPipeline::new(&SigapConfig::default(), Arc::new(NoopScorer::new()))?;
//!
//! let result = pipeline.classify("Sapi saya matiii kemarin!!").await?;
//! assert_eq!(result.label, SentimentLabel::Negative);
//! # Ok(())
//! # }
//! ```

mod http;
mod noop;
mod pipeline;
mod rules;
mod scorer;
mod types;

// Public exports
pub use http::HttpSentimentScorer;
pub use noop::NoopScorer;
pub use pipeline::ClassificationPipeline;
pub use rules::RuleEngine;
pub use scorer::SentimentScorer;
pub use types::{
    ClassifiedText, DecisionSource, RuleDecision, RuleMatch, SentimentLabel, SentimentScore,
};
