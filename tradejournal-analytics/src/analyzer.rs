//! Trade analytics aggregator.
//!
//! `analyze` turns a trade log into an [`AnalysisReport`]. It is total: any
//! slice, including an empty one, yields a report, and the input is never
//! reordered or modified. Chronological metrics work on a sorted copy of
//! references.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tradejournal_core::domain::TradeRecord;
use tradejournal_core::journal::group_by_journal;

use crate::breakdown::{
    direction_counts, quality_counts, session_counts, top_reasons, TOP_REASONS_LIMIT,
};
use crate::goals::{tags_for, Goals};
use crate::metrics::{self, round_money, round_pct, DailyResult, EquityPoint};
use crate::report::AnalysisReport;
use crate::rules;

/// Compute the full report for one trade log.
pub fn analyze(trades: &[TradeRecord]) -> AnalysisReport {
    let total = trades.len();
    let wins = metrics::count_wins(trades);
    let losses = metrics::count_losses(trades);

    let win_rate = metrics::win_rate(trades);
    let avg_win = metrics::average_win(trades);
    let avg_loss = metrics::average_loss(trades);
    let expectancy = metrics::expectancy(win_rate, avg_win, avg_loss);

    let days = metrics::daily_results(trades);
    let (worst_day, best_day) = metrics::daily_extremes(&days);

    let ordered = metrics::chronological(trades);
    let streaks = metrics::longest_streaks(&ordered);
    let curve = metrics::equity_curve(&ordered);
    let drawdown = metrics::max_drawdown(&curve);

    let mut report = AnalysisReport {
        total,
        wins,
        losses,
        breakeven: total - wins - losses,
        win_rate: round_pct(win_rate),
        avg_win: round_money(avg_win),
        avg_loss: round_money(avg_loss),
        expectancy: round_money(expectancy),
        net_pnl: round_money(metrics::net_pnl(trades)),
        gross_profit: round_money(metrics::gross_profit(trades)),
        gross_loss: round_money(metrics::gross_loss(trades)),
        profit_factor: metrics::profit_factor(trades).map(round_money),
        max_daily_loss: round_money(worst_day),
        max_daily_profit: round_money(best_day),
        max_drawdown: round_money(drawdown),
        longest_win_streak: streaks.longest_win,
        longest_loss_streak: streaks.longest_loss,
        top_reasons: top_reasons(trades, TOP_REASONS_LIMIT),
        session_counts: session_counts(trades),
        direction_counts: direction_counts(trades),
        quality_counts: quality_counts(trades),
        daily_results: days
            .into_iter()
            .map(|d| DailyResult {
                pnl: round_money(d.pnl),
                ..d
            })
            .collect(),
        equity_curve: curve
            .into_iter()
            .map(|p| EquityPoint {
                cumulative: round_money(p.cumulative),
                ..p
            })
            .collect(),
        recommendations: Vec::new(),
        mindset: Vec::new(),
        goals: Goals::default(),
        tags: Vec::new(),
    };

    let ctx = report.rule_context();
    let outcome = rules::evaluate(&ctx);
    report.recommendations = outcome.recommendations;
    report.mindset = outcome.mindset;
    report.goals = Goals::from_metrics(report.win_rate, report.expectancy);
    report.tags = tags_for(&ctx);

    tracing::debug!(
        total,
        wins,
        losses,
        win_rate = report.win_rate,
        expectancy = report.expectancy,
        recommendations = report.recommendations.len(),
        "analyzed trade log"
    );

    report
}

/// Analyze each journal independently, in parallel.
///
/// Keys are journal names (trades without one fall under the default
/// journal); each value equals `analyze` over that journal's trades.
pub fn analyze_by_journal(trades: &[TradeRecord]) -> BTreeMap<String, AnalysisReport> {
    group_by_journal(trades)
        .into_par_iter()
        .map(|(name, group)| {
            let report = analyze(&group);
            (name, report)
        })
        .collect()
}
