//! The analysis report handed to the presentation layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::breakdown::{OutcomeCounts, ReasonCount};
use crate::goals::{Goals, Tag};
use crate::metrics::{DailyResult, EquityPoint};
use crate::rules::RuleContext;
use tradejournal_core::domain::{ASIAN, LONDON};

/// Everything computed from one trade log.
///
/// Built fresh by [`crate::analyze`] and never modified afterwards.
/// Percentages carry one decimal and currency amounts two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakeven: usize,
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub expectancy: f64,
    pub net_pnl: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    #[serde(default)]
    pub profit_factor: Option<f64>,
    pub max_daily_loss: f64,
    pub max_daily_profit: f64,
    pub max_drawdown: f64,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    pub top_reasons: Vec<ReasonCount>,
    pub session_counts: BTreeMap<String, OutcomeCounts>,
    #[serde(default)]
    pub direction_counts: BTreeMap<String, OutcomeCounts>,
    #[serde(default)]
    pub quality_counts: BTreeMap<String, OutcomeCounts>,
    #[serde(default)]
    pub daily_results: Vec<DailyResult>,
    #[serde(default)]
    pub equity_curve: Vec<EquityPoint>,
    pub recommendations: Vec<String>,
    pub mindset: Vec<String>,
    pub goals: Goals,
    pub tags: Vec<Tag>,
}

impl AnalysisReport {
    /// Trade count for a session label, 0 if the session never appears.
    pub fn session_total(&self, session: &str) -> usize {
        self.session_counts.get(session).map_or(0, |c| c.total)
    }

    /// The published figures the rule catalogue and tags are judged on.
    pub fn rule_context(&self) -> RuleContext {
        RuleContext {
            total: self.total,
            win_rate: self.win_rate,
            avg_win: self.avg_win,
            avg_loss: self.avg_loss,
            expectancy: self.expectancy,
            max_daily_loss: self.max_daily_loss,
            longest_loss_streak: self.longest_loss_streak,
            london_trades: self.session_total(LONDON),
            asian_trades: self.session_total(ASIAN),
        }
    }
}
