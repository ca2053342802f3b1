//! Trade log ingestion from CSV and JSON files.
//!
//! Both formats go through the same normalisation step: required fields are
//! parsed strictly (a bad `date` or `result` fails the whole load with the
//! offending record number), optional text fields are trimmed and blank
//! values become `None`.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::schema::{parse_date, parse_result};
use crate::domain::{Direction, TradeRecord};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {record}: missing required field '{field}'")]
    MissingField { record: usize, field: &'static str },

    #[error("record {record}: cannot parse date '{value}'")]
    InvalidDate { record: usize, value: String },

    #[error("record {record}: invalid result '{value}'")]
    InvalidResult { record: usize, value: String },

    #[error("record {record}: unknown direction '{value}' (expected Buy or Sell)")]
    InvalidDirection { record: usize, value: String },

    #[error("unsupported trade log format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),
}

/// Supported trade log formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeLogFormat {
    Csv,
    Json,
}

impl TradeLogFormat {
    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// One record as it appears on disk, before validation.
#[derive(Debug, Default, Deserialize)]
struct RawTrade {
    #[serde(default, alias = "Date", alias = "timestamp")]
    date: Option<String>,
    #[serde(default, alias = "Result", alias = "pnl")]
    result: Option<String>,
    #[serde(default, alias = "Reason")]
    reason: Option<String>,
    #[serde(default, alias = "Direction", alias = "side")]
    direction: Option<String>,
    #[serde(default, alias = "Quality")]
    quality: Option<String>,
    #[serde(default, alias = "Session")]
    session: Option<String>,
    #[serde(default, alias = "Symbol")]
    symbol: Option<String>,
    #[serde(default, alias = "Journal")]
    journal: Option<String>,
}

/// JSON records may carry `result` as a number or a string.
#[derive(Debug, Deserialize)]
struct JsonTrade {
    #[serde(default, alias = "timestamp")]
    date: Option<String>,
    #[serde(default, alias = "pnl")]
    result: Option<serde_json::Value>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default, alias = "side")]
    direction: Option<String>,
    #[serde(default)]
    quality: Option<String>,
    #[serde(default)]
    session: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    journal: Option<String>,
}

impl From<JsonTrade> for RawTrade {
    fn from(j: JsonTrade) -> Self {
        let result = j.result.and_then(|v| match v {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
        Self {
            date: j.date,
            result,
            reason: j.reason,
            direction: j.direction,
            quality: j.quality,
            session: j.session,
            symbol: j.symbol,
            journal: j.journal,
        }
    }
}

impl RawTrade {
    /// Validate and convert. `record` is 1-based and only used for errors.
    fn into_record(self, record: usize) -> Result<TradeRecord, LoadError> {
        let date_raw = clean(self.date).ok_or(LoadError::MissingField {
            record,
            field: "date",
        })?;
        let date = parse_date(&date_raw).ok_or_else(|| LoadError::InvalidDate {
            record,
            value: date_raw.clone(),
        })?;

        let result_raw = clean(self.result).ok_or(LoadError::MissingField {
            record,
            field: "result",
        })?;
        let result = parse_result(&result_raw).ok_or_else(|| LoadError::InvalidResult {
            record,
            value: result_raw.clone(),
        })?;

        let direction = match clean(self.direction) {
            Some(raw) => Some(
                raw.parse::<Direction>()
                    .map_err(|_| LoadError::InvalidDirection { record, value: raw })?,
            ),
            None => None,
        };

        Ok(TradeRecord {
            date,
            result,
            reason: clean(self.reason),
            direction,
            quality: clean(self.quality),
            session: clean(self.session),
            symbol: clean(self.symbol),
            journal: clean(self.journal),
        })
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Load a trade log, choosing the parser from the file extension.
pub fn load_trades(path: &Path) -> Result<Vec<TradeRecord>, LoadError> {
    let format = TradeLogFormat::from_path(path)?;
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trades = match format {
        TradeLogFormat::Csv => read_csv(file)?,
        TradeLogFormat::Json => read_json(file)?,
    };
    tracing::info!(path = %path.display(), trades = trades.len(), "loaded trade log");
    Ok(trades)
}

/// Parse CSV with a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TradeRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut trades = Vec::new();
    for (i, row) in rdr.deserialize::<RawTrade>().enumerate() {
        trades.push(row?.into_record(i + 1)?);
    }
    Ok(trades)
}

/// Parse a JSON array of trade objects.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<TradeRecord>, LoadError> {
    let raw: Vec<JsonTrade> = serde_json::from_reader(reader)?;
    raw.into_iter()
        .enumerate()
        .map(|(i, t)| RawTrade::from(t).into_record(i + 1))
        .collect()
}

pub fn parse_csv_str(content: &str) -> Result<Vec<TradeRecord>, LoadError> {
    read_csv(content.as_bytes())
}

pub fn parse_json_str(content: &str) -> Result<Vec<TradeRecord>, LoadError> {
    read_json(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn csv_with_all_columns() {
        let csv = "date,result,reason,direction,quality,session,symbol,journal\n\
                   2024-01-02 09:15:00,120.5,breakout,Buy,A+,London,EURUSD,Main\n\
                   2024-01-02 15:40:00,-35,news,sell,B,New York,GBPUSD,Main\n";
        let trades = parse_csv_str(csv).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].result, 120.5);
        assert_eq!(trades[0].direction, Some(Direction::Buy));
        assert_eq!(trades[1].direction, Some(Direction::Sell));
        assert_eq!(trades[1].session.as_deref(), Some("New York"));
        assert_eq!(
            trades[1].trade_date(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn csv_with_only_required_columns() {
        let csv = "date,result\n2024-01-02,10\n2024-01-03,-4\n";
        let trades = parse_csv_str(csv).unwrap();
        assert_eq!(trades.len(), 2);
        assert!(trades[0].session.is_none());
        assert_eq!(trades[0].session_label(), "London");
    }

    #[test]
    fn csv_blank_optional_cells_become_none() {
        let csv = "date,result,reason,session\n2024-01-02,10, ,\n";
        let trades = parse_csv_str(csv).unwrap();
        assert!(trades[0].reason.is_none());
        assert!(trades[0].session.is_none());
    }

    #[test]
    fn csv_ignores_unknown_columns() {
        let csv = "date,result,screenshot\n2024-01-02,10,img.png\n";
        assert_eq!(parse_csv_str(csv).unwrap().len(), 1);
    }

    #[test]
    fn csv_bad_result_reports_record() {
        let csv = "date,result\n2024-01-02,10\n2024-01-03,lots\n";
        match parse_csv_str(csv) {
            Err(LoadError::InvalidResult { record, value }) => {
                assert_eq!(record, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidResult, got {other:?}"),
        }
    }

    #[test]
    fn csv_decimal_comma_is_rejected_not_rescaled() {
        let csv = "date,result\n2024-01-02,\"-12,5\"\n";
        match parse_csv_str(csv) {
            Err(LoadError::InvalidResult { record, value }) => {
                assert_eq!(record, 1);
                assert_eq!(value, "-12,5");
            }
            other => panic!("expected InvalidResult, got {other:?}"),
        }
        let csv = "date,result\n2024-01-02,\"-1,250.50\"\n";
        assert_eq!(parse_csv_str(csv).unwrap()[0].result, -1250.5);
    }

    #[test]
    fn csv_missing_date_is_error() {
        let csv = "date,result\n,10\n";
        assert!(matches!(
            parse_csv_str(csv),
            Err(LoadError::MissingField { record: 1, field: "date" })
        ));
    }

    #[test]
    fn csv_bad_direction_is_error() {
        let csv = "date,result,direction\n2024-01-02,10,sideways\n";
        assert!(matches!(
            parse_csv_str(csv),
            Err(LoadError::InvalidDirection { record: 1, .. })
        ));
    }

    #[test]
    fn json_accepts_numeric_and_string_results() {
        let json = r#"[
            {"date": "2024-01-02T09:00:00Z", "result": 50, "session": "Asian"},
            {"date": "2024-01-03", "result": "-12.5", "direction": "Sell"}
        ]"#;
        let trades = parse_json_str(json).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].result, 50.0);
        assert_eq!(trades[1].result, -12.5);
        assert_eq!(trades[1].direction, Some(Direction::Sell));
    }

    #[test]
    fn json_null_result_is_missing() {
        let json = r#"[{"date": "2024-01-02", "result": null}]"#;
        assert!(matches!(
            parse_json_str(json),
            Err(LoadError::MissingField { field: "result", .. })
        ));
    }

    #[test]
    fn json_bad_date_is_error() {
        let json = r#"[{"date": "soon", "result": 1}]"#;
        assert!(matches!(
            parse_json_str(json),
            Err(LoadError::InvalidDate { record: 1, .. })
        ));
    }

    #[test]
    fn json_empty_array_is_empty_log() {
        assert!(parse_json_str("[]").unwrap().is_empty());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            TradeLogFormat::from_path(Path::new("log.CSV")).unwrap(),
            TradeLogFormat::Csv
        );
        assert_eq!(
            TradeLogFormat::from_path(Path::new("a/b/trades.json")).unwrap(),
            TradeLogFormat::Json
        );
        assert!(matches!(
            TradeLogFormat::from_path(Path::new("trades.xlsx")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_trades(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
