//! Command implementations for the Sigap CLI.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::analysis::normalizer::TextNormalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SigapConfig;
use crate::dataset::DatasetStore;
use crate::dataset::csv::CsvDatasetStore;
use crate::error::Result;
use crate::job::SentimentUpdateJob;
use crate::sentiment::{
    ClassificationPipeline, HttpSentimentScorer, NoopScorer, SentimentScorer,
};
use crate::spelling::corrector::TypoCorrector;

/// Execute a CLI command.
pub fn execute_command(args: SigapArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Update(update_args) => run_update(update_args, config, &args),
        Command::Classify(classify_args) => classify_text(classify_args, &config, &args),
        Command::Normalize(normalize_args) => normalize_text(normalize_args, &config, &args),
        Command::Vocabulary => show_vocabulary(&config, &args),
    }
}

/// Build the configuration: defaults, then the config file, then flags.
pub fn load_config(args: &SigapArgs) -> Result<SigapConfig> {
    let mut config = match &args.config {
        Some(path) => SigapConfig::from_file(path)?,
        None => SigapConfig::default(),
    };

    if let Some(endpoint) = &args.scorer_endpoint {
        config.scorer.endpoint = Some(endpoint.clone());
    }
    if let Some(token) = &args.api_token {
        config.scorer.api_token = Some(token.clone());
    }
    if let Some(threshold) = args.negative_threshold {
        config.negative_threshold = threshold;
    }
    if let Some(threshold) = args.typo_threshold {
        config.typo_threshold = threshold;
    }
    if let Some(policy) = args.fallback_policy {
        config.fallback_error_policy = policy.into();
    }
    if let Command::Update(update_args) = &args.command {
        if let Some(column) = &update_args.text_column {
            config.columns.text = column.clone();
        }
        if let Some(column) = &update_args.date_column {
            config.columns.date = column.clone();
        }
    }

    config.validate()?;
    Ok(config)
}

/// Pick the fallback scorer.
///
/// A remote scorer is used only when an endpoint or token is configured.
pub fn build_scorer(config: &SigapConfig, offline: bool) -> Result<Arc<dyn SentimentScorer>> {
    let configured = config.scorer.endpoint.is_some() || config.scorer.api_token.is_some();
    if offline {
        info!("offline mode, undecided answers will be labelled neutral");
        return Ok(Arc::new(NoopScorer::new()));
    }
    if !configured {
        warn!("no remote scorer configured, undecided answers will be labelled neutral");
        return Ok(Arc::new(NoopScorer::new()));
    }

    let scorer = HttpSentimentScorer::from_config(&config.scorer)?;
    info!("using remote scorer at {}", scorer.endpoint());
    Ok(Arc::new(scorer))
}

/// Drive an async operation to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Label a CSV dataset and write the summary.
fn run_update(args: &UpdateArgs, config: SigapConfig, cli_args: &SigapArgs) -> Result<()> {
    let mut store = CsvDatasetStore::new(&args.input)
        .with_delimiter(args.delimiter)?
        .with_summary_columns(config.columns.date.clone(), config.columns.label.clone());
    if let Some(output) = &args.output {
        store = store.with_output(output);
    }
    if let Some(summary) = &args.summary {
        store = store.with_summary(summary);
    }

    if cli_args.verbosity() > 1 {
        println!("Updating sentiment labels in: {}", args.input.display());
    }

    let scorer = build_scorer(&config, cli_args.offline)?;
    let store_handle: Arc<dyn DatasetStore> = Arc::new(store.clone());
    let job = SentimentUpdateJob::from_config(&config, scorer, store_handle)?;

    let start_time = Instant::now();
    let (report, summary) = block_on(job.run_with_summary())??;
    let duration = start_time.elapsed();

    output_result(
        "Sentiment update finished",
        &UpdateResult {
            input: store.input().display().to_string(),
            output: store.output().display().to_string(),
            summary: store.summary().display().to_string(),
            report,
            duration_ms: duration.as_millis() as u64,
            daily: summary.counts(),
        },
        cli_args,
    )
}

/// Classify one answer.
fn classify_text(args: &ClassifyArgs, config: &SigapConfig, cli_args: &SigapArgs) -> Result<()> {
    let scorer = build_scorer(config, cli_args.offline)?;
    let pipeline = ClassificationPipeline::new(config, scorer)?;
    let classified = block_on(pipeline.classify(&args.text))??;

    let result = if args.explain {
        ClassificationResult {
            text: classified.raw_text,
            sentimen_negatif: classified.label.as_u8(),
            preprocessed_text: Some(classified.preprocessed_text),
            decided_by: Some(classified.source),
            corrections: Some(classified.corrections),
        }
    } else {
        ClassificationResult {
            text: classified.raw_text,
            sentimen_negatif: classified.label.as_u8(),
            preprocessed_text: None,
            decided_by: None,
            corrections: None,
        }
    };

    output_result("", &result, cli_args)
}

/// Show the preprocessing stages for one answer.
fn normalize_text(args: &NormalizeArgs, config: &SigapConfig, cli_args: &SigapArgs) -> Result<()> {
    let normalizer = TextNormalizer::new()?;
    let corrector = TypoCorrector::from_vocabulary(&config.vocabulary, config.typo_threshold);

    let normalized = normalizer.normalize(&args.text);
    let corrected = corrector.correct_with_details(&normalized);

    output_result(
        "",
        &NormalizationResult {
            text: args.text.clone(),
            normalized,
            corrected: corrected.corrected,
            corrections: corrected.corrections,
        },
        cli_args,
    )
}

/// Print the vocabulary in use.
fn show_vocabulary(config: &SigapConfig, cli_args: &SigapArgs) -> Result<()> {
    output_result(
        &format!("Vocabulary ({} terms)", config.vocabulary.len()),
        &config.vocabulary,
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;
    use crate::config::FallbackErrorPolicy;
    use crate::error::SigapError;

    fn parse(argv: &[&str]) -> SigapArgs {
        SigapArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sigap.json");
        fs::write(
            &path,
            r#"{"negative_threshold": 0.4, "columns": {"text": "teks"}}"#,
        )
        .unwrap();
        let path = path.to_string_lossy().to_string();

        let args = parse(&[
            "sigap",
            "--config",
            &path,
            "--typo-threshold",
            "90",
            "--fallback-policy",
            "fail",
            "update",
            "survei.csv",
            "--date-column",
            "waktu",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.negative_threshold, 0.4);
        assert_eq!(config.typo_threshold, 90.0);
        assert_eq!(config.fallback_error_policy, FallbackErrorPolicy::Fail);
        assert_eq!(config.columns.text, "teks");
        assert_eq!(config.columns.date, "waktu");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = parse(&["sigap", "--negative-threshold", "2", "vocabulary"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_scorer_selection() {
        let mut config = SigapConfig::default();
        config.scorer.endpoint = None;
        config.scorer.api_token = None;
        assert_eq!(build_scorer(&config, false).unwrap().name(), "noop");

        config.scorer.endpoint = Some("http://localhost:8080/models/x".to_string());
        assert_eq!(build_scorer(&config, false).unwrap().name(), "http");
        assert_eq!(build_scorer(&config, true).unwrap().name(), "noop");

        config.scorer.endpoint = Some("localhost".to_string());
        assert!(build_scorer(&config, false).is_err());
    }

    #[test]
    fn test_update_command_writes_files() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("survei.csv");
        fs::write(
            &input,
            "tanggal,jawaban\n2024-01-01,Sapi saya matiii kemarin!!\n2024-01-01,hari ini panas\n",
        )
        .unwrap();
        let input_arg = input.to_string_lossy().to_string();

        let args = parse(&["sigap", "-q", "--offline", "update", &input_arg]);
        execute_command(args).unwrap();

        let labeled = fs::read_to_string(&input).unwrap();
        assert_eq!(
            labeled,
            "tanggal,jawaban,preprocessed_text,sentimen_negatif\n\
             2024-01-01,Sapi saya matiii kemarin!!,sapi ayam mati kemarin,1\n\
             2024-01-01,hari ini panas,hari ini panas,0\n"
        );
        let summary = fs::read_to_string(dir.path().join("survei_daily_sentiment.csv")).unwrap();
        assert_eq!(summary, "tanggal,sentimen_negatif\n2024-01-01,1\n");
    }

    #[test]
    fn test_classify_and_normalize_commands() {
        let args = parse(&["sigap", "-q", "--offline", "classify", "sapi sakt", "--explain"]);
        assert!(execute_command(args).is_ok());

        let args = parse(&["sigap", "-q", "-f", "json", "normalize", "Sapi SAKT!!!"]);
        assert!(execute_command(args).is_ok());
    }

    #[test]
    fn test_update_rejects_non_ascii_delimiter() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("survei.csv");
        fs::write(&input, "tanggal,jawaban\n2024-01-01,aman\n").unwrap();
        let input_arg = input.to_string_lossy().to_string();

        let args = parse(&["sigap", "-q", "--offline", "update", &input_arg, "-d", "€"]);
        let err = execute_command(args).unwrap_err();
        assert!(matches!(err, SigapError::Configuration(_)));
        assert_eq!(
            fs::read_to_string(&input).unwrap(),
            "tanggal,jawaban\n2024-01-01,aman\n"
        );
    }
}
