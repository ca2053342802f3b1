//! TradeRecord: one logged trade with its outcome and optional context.

use super::direction::Direction;
use super::session::session_label;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Label used for trades logged without a rationale.
pub const NO_REASON_LABEL: &str = "No reason given";

/// Journal a trade belongs to when none was recorded.
pub const DEFAULT_JOURNAL: &str = "Main";

/// Label for trades without a quality grade.
pub const UNGRADED_LABEL: &str = "Ungraded";

/// A single journal entry: when it happened, what it made, and why.
///
/// `date` is the trader's local wall-clock time; its calendar date is the
/// grouping key for daily aggregation. Everything except `date` and `result`
/// is optional and resolved through the `*_label()` accessors, which apply
/// the journal-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub date: NaiveDateTime,
    /// Signed P&L. Positive is a win, negative a loss, zero a breakeven.
    pub result: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
}

impl TradeRecord {
    /// A bare trade with only the required fields set.
    pub fn new(date: NaiveDateTime, result: f64) -> Self {
        Self {
            date,
            result,
            reason: None,
            direction: None,
            quality: None,
            session: None,
            symbol: None,
            journal: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    /// P&L used in every aggregate. Non-finite values count as breakeven.
    pub fn pnl(&self) -> f64 {
        if self.result.is_finite() {
            self.result
        } else {
            0.0
        }
    }

    pub fn is_win(&self) -> bool {
        self.pnl() > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.pnl() < 0.0
    }

    pub fn is_breakeven(&self) -> bool {
        self.pnl() == 0.0
    }

    /// Calendar date used for daily grouping.
    pub fn trade_date(&self) -> NaiveDate {
        self.date.date()
    }

    /// Session name, defaulting to London when absent or blank.
    pub fn session_label(&self) -> &str {
        session_label(self.session.as_deref())
    }

    /// Trimmed rationale, or [`NO_REASON_LABEL`].
    pub fn reason_label(&self) -> &str {
        non_blank(self.reason.as_deref()).unwrap_or(NO_REASON_LABEL)
    }

    /// Journal name, or [`DEFAULT_JOURNAL`].
    pub fn journal_name(&self) -> &str {
        non_blank(self.journal.as_deref()).unwrap_or(DEFAULT_JOURNAL)
    }

    /// Quality grade, or [`UNGRADED_LABEL`].
    pub fn quality_label(&self) -> &str {
        non_blank(self.quality.as_deref()).unwrap_or(UNGRADED_LABEL)
    }

    /// `Buy` / `Sell`, or `Unspecified`.
    pub fn direction_label(&self) -> &'static str {
        self.direction.map_or("Unspecified", |d| d.as_str())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
