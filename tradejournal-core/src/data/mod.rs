//! Trade log loading

pub mod ingest;
pub mod schema;

pub use ingest::{
    load_trades, parse_csv_str, parse_json_str, read_csv, read_json, LoadError, TradeLogFormat,
};
pub use schema::{parse_date, parse_result};
