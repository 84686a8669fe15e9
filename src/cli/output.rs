//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::aggregation::DailyCount;
use crate::cli::args::{OutputFormat, SigapArgs};
use crate::error::Result;
use crate::job::UpdateReport;
use crate::sentiment::DecisionSource;
use crate::spelling::corrector::Correction;

/// Result structure for a dataset update.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResult {
    pub input: String,
    pub output: String,
    pub summary: String,
    #[serde(flatten)]
    pub report: UpdateReport,
    pub duration_ms: u64,
    pub daily: Vec<DailyCount>,
}

/// Result structure for classifying one text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub text: String,
    pub sentimen_negatif: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessed_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<DecisionSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrections: Option<Vec<Correction>>,
}

/// Result structure for normalizing one text.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub text: String,
    pub normalized: String,
    pub corrected: String,
    pub corrections: Vec<Correction>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SigapArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SigapArgs) -> Result<()> {
    if args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    for line in render_human(&value) {
        println!("{line}");
    }
    Ok(())
}

/// Render a JSON value as `key: value` lines; arrays of objects become
/// indented blocks.
fn render_human(value: &serde_json::Value) -> Vec<String> {
    let mut lines = Vec::new();
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Array(items) if items.iter().any(|i| i.is_object()) => {
                        lines.push(format!("{key}:"));
                        for item in items {
                            lines.push(format!("  {}", format_inline(item)));
                        }
                    }
                    serde_json::Value::Object(_) => {
                        lines.push(format!("{key}: {}", format_inline(val)));
                    }
                    _ => lines.push(format!("{key}: {}", format_value(val))),
                }
            }
        }
        _ => lines.push(format_value(value)),
    }
    lines
}

/// Format an object on one line as `k=v` pairs.
fn format_inline(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{k}={}", format_value(v)))
            .collect::<Vec<_>>()
            .join(" "),
        _ => format_value(value),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SigapArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => format_inline(value),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("sapi")), "sapi");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(["sapi", "ayam"])), "[sapi, ayam]");
        assert_eq!(format_value(&json!(null)), "null");
    }

    #[test]
    fn test_render_human() {
        let value = json!({
            "total": 2,
            "daily": [{"date": "2024-01-01", "negative": 1}],
            "decided_by": {"source": "empty_text"},
        });
        assert_eq!(
            render_human(&value),
            vec![
                "daily:".to_string(),
                "  date=2024-01-01 negative=1".to_string(),
                "decided_by: source=empty_text".to_string(),
                "total: 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_update_result_flattens_report() {
        let result = UpdateResult {
            input: "survei.csv".to_string(),
            output: "survei.csv".to_string(),
            summary: "survei_daily_sentiment.csv".to_string(),
            report: UpdateReport {
                total: 3,
                negative: 1,
                ..Default::default()
            },
            duration_ms: 5,
            daily: Vec::new(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["negative"], 1);
    }
}
