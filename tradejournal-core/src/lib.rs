//! Trade Journal Core: domain types, trade-log loading, journal selection.
//!
//! This crate owns everything about *trades* and nothing about *reports*:
//! - Domain types (trade records, directions, session labels, dataset hashes)
//! - CSV / JSON trade log loaders with record-level validation
//! - Journal grouping and trade filters

pub mod data;
pub mod domain;
pub mod journal;

pub use data::{load_trades, LoadError};
pub use domain::{DatasetHash, Direction, TradeRecord};
pub use journal::{group_by_journal, journal_summaries, JournalSummary, TradeFilter};
