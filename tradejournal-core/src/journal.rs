//! Journal selection: narrowing a trade log to the trades a report covers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Direction, TradeRecord};

/// Criteria for selecting trades. Every unset field matches everything.
///
/// Journal and session names compare case-insensitively against the
/// defaulted labels, so `session = "london"` also picks up trades that never
/// recorded a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub journal: Option<String>,
    /// Inclusive lower bound on the trade's calendar date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the trade's calendar date.
    pub to: Option<NaiveDate>,
    pub session: Option<String>,
    pub direction: Option<Direction>,
}

impl TradeFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, trade: &TradeRecord) -> bool {
        if let Some(journal) = &self.journal {
            if !trade.journal_name().eq_ignore_ascii_case(journal.trim()) {
                return false;
            }
        }
        let date = trade.trade_date();
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        if let Some(session) = &self.session {
            if !trade.session_label().eq_ignore_ascii_case(session.trim()) {
                return false;
            }
        }
        if let Some(direction) = self.direction {
            if trade.direction != Some(direction) {
                return false;
            }
        }
        true
    }

    /// Matching trades, in their original order.
    pub fn apply(&self, trades: &[TradeRecord]) -> Vec<TradeRecord> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Overview of one journal inside a trade log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalSummary {
    pub name: String,
    pub trades: usize,
    pub first_trade: NaiveDate,
    pub last_trade: NaiveDate,
}

/// Split a trade log by journal name, preserving per-journal order.
pub fn group_by_journal(trades: &[TradeRecord]) -> BTreeMap<String, Vec<TradeRecord>> {
    let mut groups: BTreeMap<String, Vec<TradeRecord>> = BTreeMap::new();
    for t in trades {
        groups
            .entry(t.journal_name().to_string())
            .or_default()
            .push(t.clone());
    }
    groups
}

/// One summary per journal, sorted by name.
pub fn journal_summaries(trades: &[TradeRecord]) -> Vec<JournalSummary> {
    let mut summaries: BTreeMap<&str, JournalSummary> = BTreeMap::new();
    for t in trades {
        let date = t.trade_date();
        summaries
            .entry(t.journal_name())
            .and_modify(|s| {
                s.trades += 1;
                s.first_trade = s.first_trade.min(date);
                s.last_trade = s.last_trade.max(date);
            })
            .or_insert_with(|| JournalSummary {
                name: t.journal_name().to_string(),
                trades: 1,
                first_trade: date,
                last_trade: date,
            });
    }
    summaries.into_values().collect()
}
