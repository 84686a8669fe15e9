//! Daily aggregation of negative labels.
//!
//! Records are grouped by the calendar day of their date column. Dates are
//! parsed leniently since survey exports mix formats; a record whose date
//! cannot be parsed keeps its label but is left out of the summary.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SigapError;
use crate::sentiment::SentimentLabel;

/// Date formats tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Date-time formats tried in order; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a date-like string into a calendar day.
///
/// Returns `None` for empty or unrecognised input.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sigap::aggregation::parse_date_lenient;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// assert_eq!(parse_date_lenient("2024-01-05"), Some(day));
/// assert_eq!(parse_date_lenient("1/5/2024 13:45:10"), Some(day));
/// assert_eq!(parse_date_lenient("5 January 2024"), Some(day));
/// assert_eq!(parse_date_lenient("kemarin"), None);
/// ```
pub fn parse_date_lenient(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Compact form; %Y would swallow every digit.
    if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
        let year = input[0..4].parse().ok()?;
        let month = input[4..6].parse().ok()?;
        let day = input[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
                .map(|dt| dt.date())
        })
}

/// Negative count for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Number of negative records on that day.
    pub negative: u64,
}

/// Per-day sums of negative labels, in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySummary {
    days: BTreeMap<NaiveDate, u64>,
    invalid_dates: usize,
}

impl DailySummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record on `date`.
    pub fn add(&mut self, date: NaiveDate, label: SentimentLabel) {
        *self.days.entry(date).or_insert(0) += u64::from(label.as_u8());
    }

    /// Note a record whose date could not be parsed.
    pub fn add_invalid(&mut self) {
        self.invalid_dates += 1;
    }

    /// Negative count for a day, if any record fell on it.
    pub fn get(&self, date: NaiveDate) -> Option<u64> {
        self.days.get(&date).copied()
    }

    /// Iterate days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = DailyCount> + '_ {
        self.days.iter().map(|(&date, &negative)| DailyCount { date, negative })
    }

    /// All days as a vector.
    pub fn counts(&self) -> Vec<DailyCount> {
        self.iter().collect()
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no record had a valid date.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of negatives over all days.
    pub fn total_negative(&self) -> u64 {
        self.days.values().sum()
    }

    /// Records left out because of an unparseable date.
    pub fn invalid_dates(&self) -> usize {
        self.invalid_dates
    }
}

/// Group labelled records by day.
///
/// Every record with a valid date creates its day, so days with only neutral
/// records appear with a zero count.
pub fn aggregate<'a, I>(records: I) -> DailySummary
where
    I: IntoIterator<Item = (&'a str, SentimentLabel)>,
{
    let mut summary = DailySummary::new();
    for (row, (date, label)) in records.into_iter().enumerate() {
        match parse_date_lenient(date) {
            Some(day) => summary.add(day, label),
            None => {
                let err = SigapError::malformed_record(format!(
                    "row {row}: unparseable date {date:?}, excluded from summary"
                ));
                debug!("{err}");
                summary.add_invalid();
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let day = ymd(2024, 3, 9);
        let inputs = [
            "2024-03-09",
            " 2024-03-09 ",
            "2024/03/09",
            "20240309",
            "2024-03-09T08:15:00+07:00",
            "2024-03-09T08:15:00Z",
            "2024-03-09 08:15",
            "2024-03-09 08:15:30",
            "2024-03-09T08:15",
            "3/9/2024",
            "03/09/2024 8:15:30",
            "3/9/2024 8:15",
            "9 March 2024",
            "9 Mar 2024",
            "March 9, 2024",
        ];
        for input in inputs {
            assert_eq!(parse_date_lenient(input), Some(day), "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_date_invalid() {
        for input in ["", "   ", "kemarin", "2024-13-01", "2024-02-30", "20241301", "12345"] {
            assert_eq!(parse_date_lenient(input), None, "input: {input:?}");
        }
    }

    #[test]
    fn test_aggregate_sums_and_sorts() {
        let records = vec![
            ("2024-01-02", SentimentLabel::Negative),
            ("2024-01-01", SentimentLabel::Negative),
            ("2024-01-02", SentimentLabel::Negative),
            ("2024-01-01", SentimentLabel::Neutral),
            ("2024-01-03", SentimentLabel::Neutral),
            ("bukan tanggal", SentimentLabel::Negative),
            ("", SentimentLabel::Neutral),
        ];
        let summary = aggregate(records);

        let counts: Vec<(String, u64)> = summary
            .iter()
            .map(|c| (c.date.format("%Y-%m-%d").to_string(), c.negative))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("2024-01-01".to_string(), 1),
                ("2024-01-02".to_string(), 2),
                ("2024-01-03".to_string(), 0),
            ]
        );
        assert_eq!(summary.total_negative(), 3);
        assert_eq!(summary.invalid_dates(), 2);
        assert_eq!(summary.len(), 3);
    }

    #[test]
    fn test_mixed_formats_share_a_day() {
        let summary = aggregate(vec![
            ("2024-01-01", SentimentLabel::Negative),
            ("1/1/2024 10:00:00", SentimentLabel::Negative),
        ]);
        assert_eq!(summary.get(ymd(2024, 1, 1)), Some(2));
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(Vec::<(&str, SentimentLabel)>::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total_negative(), 0);
    }

    #[test]
    fn test_daily_count_serializes_plain_date() {
        let count = DailyCount {
            date: ymd(2024, 1, 1),
            negative: 4,
        };
        assert_eq!(
            serde_json::to_string(&count).unwrap(),
            r#"{"date":"2024-01-01","negative":4}"#
        );
    }
}
