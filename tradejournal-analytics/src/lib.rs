//! Trade Journal Analytics: report aggregation, coaching rules, settings, export.
//!
//! This crate builds on `tradejournal-core` to provide:
//! - The aggregator turning a trade log into an [`AnalysisReport`]
//! - Pure metric and breakdown functions behind each report field
//! - The declarative rule catalogue for recommendations and mindset notes
//! - Goals and badge tags
//! - TOML settings and JSON / CSV / Markdown export

pub mod analyzer;
pub mod breakdown;
pub mod config;
pub mod export;
pub mod goals;
pub mod metrics;
pub mod report;
pub mod rules;

pub use analyzer::{analyze, analyze_by_journal};
pub use breakdown::{OutcomeCounts, ReasonCount};
pub use config::{ConfigError, OutputFormat, Settings};
pub use export::{ReportEnvelope, SCHEMA_VERSION};
pub use goals::{Goal, Goals, Tag};
pub use metrics::{DailyResult, EquityPoint};
pub use report::AnalysisReport;
pub use rules::{Rule, RuleContext, RuleKind, RuleOutcome, RULES};
