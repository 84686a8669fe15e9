//! Command line argument parsing for the Sigap CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::FallbackErrorPolicy;

/// Sigap - sentiment triage for livestock-health survey answers
#[derive(Parser, Debug, Clone)]
#[command(name = "sigap")]
#[command(about = "Flags negative livestock-health survey answers and summarizes them per day")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SigapArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Fallback sentiment endpoint URL
    #[arg(long, env = "SIGAP_SCORER_ENDPOINT", global = true)]
    pub scorer_endpoint: Option<String>,

    /// Bearer token for the fallback sentiment endpoint
    #[arg(long, env = "SIGAP_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Never call a remote scorer; undecided answers become neutral
    #[arg(long, global = true)]
    pub offline: bool,

    /// Minimum fallback confidence for a negative label
    #[arg(long, global = true)]
    pub negative_threshold: Option<f64>,

    /// Minimum similarity (0-100) for a typo correction
    #[arg(long, global = true)]
    pub typo_threshold: Option<f64>,

    /// What to do when the fallback scorer fails
    #[arg(long, global = true)]
    pub fallback_policy: Option<PolicyArg>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SigapArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Label every answer in a CSV file and write the daily summary
    Update(UpdateArgs),

    /// Classify a single answer
    Classify(ClassifyArgs),

    /// Show the normalized and typo-corrected form of an answer
    Normalize(NormalizeArgs),

    /// Print the active vocabulary
    Vocabulary,
}

/// Arguments for a dataset update
#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    /// Survey CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the labelled table (default: overwrite INPUT)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Where to write the daily summary (default: <INPUT stem>_daily_sentiment.csv)
    #[arg(short, long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Answer column name
    #[arg(long)]
    pub text_column: Option<String>,

    /// Date column name
    #[arg(long)]
    pub date_column: Option<String>,

    /// CSV delimiter
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,
}

/// Arguments for classifying one answer
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Answer text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Show preprocessing, corrections and the deciding rule
    #[arg(short, long)]
    pub explain: bool,
}

/// Arguments for normalizing one answer
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Answer text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Fallback error policy as a CLI value
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// Label neutral and continue
    Neutral,
    /// Abort the run
    Fail,
}

impl From<PolicyArg> for FallbackErrorPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Neutral => FallbackErrorPolicy::Neutral,
            PolicyArg::Fail => FallbackErrorPolicy::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_args() {
        let args = SigapArgs::try_parse_from([
            "sigap",
            "update",
            "survei.csv",
            "--summary",
            "harian.csv",
            "--text-column",
            "teks",
        ])
        .unwrap();

        if let Command::Update(update_args) = args.command {
            assert_eq!(update_args.input, PathBuf::from("survei.csv"));
            assert_eq!(update_args.summary, Some(PathBuf::from("harian.csv")));
            assert_eq!(update_args.output, None);
            assert_eq!(update_args.text_column.as_deref(), Some("teks"));
            assert_eq!(update_args.delimiter, ',');
        } else {
            panic!("Expected Update command");
        }
    }

    #[test]
    fn test_classify_args() {
        let args = SigapArgs::try_parse_from([
            "sigap",
            "classify",
            "sapi saya mati",
            "--explain",
            "--format",
            "json",
            "--fallback-policy",
            "fail",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(
            args.fallback_policy.map(FallbackErrorPolicy::from),
            Some(FallbackErrorPolicy::Fail)
        );
        match args.command {
            Command::Classify(classify_args) => {
                assert_eq!(classify_args.text, "sapi saya mati");
                assert!(classify_args.explain);
            }
            other => panic!("Expected Classify command, got {other:?}"),
        }
    }

    #[test]
    fn test_verbosity() {
        let args = SigapArgs::try_parse_from(["sigap", "vocabulary"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SigapArgs::try_parse_from(["sigap", "-vv", "vocabulary"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = SigapArgs::try_parse_from(["sigap", "-v", "-q", "vocabulary"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(SigapArgs::try_parse_from(["sigap"]).is_err());
        assert!(SigapArgs::try_parse_from(["sigap", "classify"]).is_err());
    }
}
