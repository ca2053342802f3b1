//! Trade metrics: pure functions over a trade log.
//!
//! Every metric is a pure function: trades in, value out. None of them
//! panic or divide by zero; empty inputs produce zeros. Rounding is left to
//! the caller so metrics can be combined at full precision.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tradejournal_core::domain::TradeRecord;

/// Net result of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyResult {
    pub date: NaiveDate,
    pub pnl: f64,
    pub trades: usize,
}

/// Cumulative P&L after a trade, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDateTime,
    pub cumulative: f64,
}

/// Longest runs of consecutive wins and losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    pub longest_win: usize,
    pub longest_loss: usize,
}

// ─── Outcome statistics ─────────────────────────────────────────────

pub fn count_wins(trades: &[TradeRecord]) -> usize {
    trades.iter().filter(|t| t.is_win()).count()
}

pub fn count_losses(trades: &[TradeRecord]) -> usize {
    trades.iter().filter(|t| t.is_loss()).count()
}

/// Winning trades as a percentage of all trades (breakevens included in the
/// denominator). 0 for an empty log.
pub fn win_rate(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    count_wins(trades) as f64 / trades.len() as f64 * 100.0
}

/// Mean result of winning trades, 0 if there are none.
pub fn average_win(trades: &[TradeRecord]) -> f64 {
    mean_f64(&trades.iter().filter(|t| t.is_win()).map(|t| t.pnl()).collect::<Vec<_>>())
}

/// Mean result of losing trades (negative), 0 if there are none.
pub fn average_loss(trades: &[TradeRecord]) -> f64 {
    mean_f64(&trades.iter().filter(|t| t.is_loss()).map(|t| t.pnl()).collect::<Vec<_>>())
}

/// Probability-weighted P&L per trade.
///
/// `avg_loss` is already negative, so the loss term subtracts.
pub fn expectancy(win_rate_pct: f64, avg_win: f64, avg_loss: f64) -> f64 {
    (win_rate_pct / 100.0) * avg_win + ((100.0 - win_rate_pct) / 100.0) * avg_loss
}

pub fn gross_profit(trades: &[TradeRecord]) -> f64 {
    trades.iter().filter(|t| t.is_win()).map(|t| t.pnl()).sum()
}

/// Sum of losing results as a positive number.
pub fn gross_loss(trades: &[TradeRecord]) -> f64 {
    trades
        .iter()
        .filter(|t| t.is_loss())
        .map(|t| t.pnl().abs())
        .sum()
}

pub fn net_pnl(trades: &[TradeRecord]) -> f64 {
    trades.iter().map(|t| t.pnl()).sum()
}

/// Gross profit / gross loss. `None` when there are no losing trades.
pub fn profit_factor(trades: &[TradeRecord]) -> Option<f64> {
    let loss = gross_loss(trades);
    if loss <= 0.0 {
        return None;
    }
    Some(gross_profit(trades) / loss)
}

// ─── Daily aggregation ──────────────────────────────────────────────

/// Results summed per calendar date, in date order.
pub fn daily_results(trades: &[TradeRecord]) -> Vec<DailyResult> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for t in trades {
        let day = days.entry(t.trade_date()).or_insert((0.0, 0));
        day.0 += t.pnl();
        day.1 += 1;
    }
    days.into_iter()
        .map(|(date, (pnl, trades))| DailyResult { date, pnl, trades })
        .collect()
}

/// `(lowest, highest)` daily sum. Both 0 when there are no days.
///
/// The lowest day is reported as-is even when it is positive.
pub fn daily_extremes(days: &[DailyResult]) -> (f64, f64) {
    if days.is_empty() {
        return (0.0, 0.0);
    }
    days.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
        (lo.min(d.pnl), hi.max(d.pnl))
    })
}

// ─── Chronological metrics ──────────────────────────────────────────

/// Trades ordered by date without touching the caller's slice.
///
/// The sort is stable: trades logged with the same timestamp keep their
/// original relative order.
pub fn chronological(trades: &[TradeRecord]) -> Vec<&TradeRecord> {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| t.date);
    ordered
}

/// Longest win and loss runs over chronologically ordered trades.
///
/// A win extends the win run and resets the loss run, and vice versa.
/// Breakeven trades are skipped: they neither extend nor break a run.
pub fn longest_streaks(ordered: &[&TradeRecord]) -> Streaks {
    let mut streaks = Streaks::default();
    let mut current_win = 0;
    let mut current_loss = 0;

    for trade in ordered {
        if trade.is_win() {
            current_win += 1;
            current_loss = 0;
            streaks.longest_win = streaks.longest_win.max(current_win);
        } else if trade.is_loss() {
            current_loss += 1;
            current_win = 0;
            streaks.longest_loss = streaks.longest_loss.max(current_loss);
        }
    }
    streaks
}

/// Maximum consecutive winning trades, in date order.
pub fn longest_win_streak(trades: &[TradeRecord]) -> usize {
    longest_streaks(&chronological(trades)).longest_win
}

/// Maximum consecutive losing trades, in date order.
pub fn longest_loss_streak(trades: &[TradeRecord]) -> usize {
    longest_streaks(&chronological(trades)).longest_loss
}

/// Running total of results, one point per trade.
pub fn equity_curve(ordered: &[&TradeRecord]) -> Vec<EquityPoint> {
    let mut cumulative = 0.0;
    ordered
        .iter()
        .map(|t| {
            cumulative += t.pnl();
            EquityPoint {
                date: t.date,
                cumulative,
            }
        })
        .collect()
}

/// Largest peak-to-trough decline of the cumulative P&L, as a value <= 0.
///
/// The curve implicitly starts at 0, so an opening loss is a drawdown.
pub fn max_drawdown(curve: &[EquityPoint]) -> f64 {
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;
    for point in curve {
        peak = peak.max(point.cumulative);
        max_dd = max_dd.min(point.cumulative - peak);
    }
    max_dd
}

// ─── Helpers ────────────────────────────────────────────────────────

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round half away from zero to `decimals` places. Negative zero becomes 0.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Percentages are reported to one decimal.
pub fn round_pct(value: f64) -> f64 {
    round_to(value, 1)
}

/// Currency amounts are reported to two decimals.
pub fn round_money(value: f64) -> f64 {
    round_to(value, 2)
}
