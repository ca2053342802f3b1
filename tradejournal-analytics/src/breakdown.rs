//! Categorical breakdowns: outcome tallies per label and reason frequency.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tradejournal_core::domain::TradeRecord;

/// Maximum number of entries in a reason ranking.
pub const TOP_REASONS_LIMIT: usize = 8;

/// Win/loss/total tally for one group of trades.
///
/// `wins + losses <= total`; the gap is breakeven trades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub wins: usize,
    pub losses: usize,
    pub total: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, trade: &TradeRecord) {
        self.total += 1;
        if trade.is_win() {
            self.wins += 1;
        } else if trade.is_loss() {
            self.losses += 1;
        }
    }

    /// Trades counted in neither `wins` nor `losses`. Inconsistent
    /// deserialized tallies give 0 rather than underflowing.
    pub fn breakeven(&self) -> usize {
        self.total
            .saturating_sub(self.wins)
            .saturating_sub(self.losses)
    }
}

/// How often a rationale was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonCount {
    pub reason: String,
    pub count: usize,
}

/// Tally outcomes under the label `key` assigns to each trade.
pub fn tally_by<F>(trades: &[TradeRecord], key: F) -> BTreeMap<String, OutcomeCounts>
where
    F: Fn(&TradeRecord) -> &str,
{
    let mut counts: BTreeMap<String, OutcomeCounts> = BTreeMap::new();
    for t in trades {
        counts.entry(key(t).to_string()).or_default().record(t);
    }
    counts
}

/// Outcomes per session; trades without a session count as London.
pub fn session_counts(trades: &[TradeRecord]) -> BTreeMap<String, OutcomeCounts> {
    tally_by(trades, |t| t.session_label())
}

pub fn direction_counts(trades: &[TradeRecord]) -> BTreeMap<String, OutcomeCounts> {
    tally_by(trades, |t| t.direction_label())
}

pub fn quality_counts(trades: &[TradeRecord]) -> BTreeMap<String, OutcomeCounts> {
    tally_by(trades, |t| t.quality_label())
}

/// The `limit` most frequent reasons, most frequent first.
///
/// Ties keep first-encounter order. Trades without a reason are counted
/// under the placeholder label.
pub fn top_reasons(trades: &[TradeRecord], limit: usize) -> Vec<ReasonCount> {
    let mut ranking: Vec<ReasonCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in trades {
        let reason = t.reason_label();
        match index.get(reason).copied() {
            Some(i) => ranking[i].count += 1,
            None => {
                index.insert(reason, ranking.len());
                ranking.push(ReasonCount {
                    reason: reason.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable: equal counts stay in encounter order.
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(limit);
    ranking
}
