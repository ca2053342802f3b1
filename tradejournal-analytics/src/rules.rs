//! Coaching rules: the declarative catalogue behind `recommendations` and
//! `mindset`.
//!
//! Each rule is a `(predicate, message)` pair evaluated independently against
//! the same [`RuleContext`]. Rules are not mutually exclusive; every rule that
//! fires appends its message, in catalogue order, to the list for its kind.
//! Adding a rule means adding an entry to [`RULES`]; the aggregation code does
//! not change.

use serde::{Deserialize, Serialize};

/// Which report list a rule writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Recommendation,
    Mindset,
}

/// The figures rules and tags are judged on.
///
/// Values are the ones published in the report (already rounded), so a
/// reader can check every message against the numbers shown beside it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RuleContext {
    pub total: usize,
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub expectancy: f64,
    pub max_daily_loss: f64,
    pub longest_loss_streak: usize,
    pub london_trades: usize,
    pub asian_trades: usize,
}

/// One entry in the catalogue.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub kind: RuleKind,
    pub message: &'static str,
    pub predicate: fn(&RuleContext) -> bool,
}

/// Messages produced by evaluating the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub recommendations: Vec<String>,
    pub mindset: Vec<String>,
}

pub static RULES: &[Rule] = &[
    Rule {
        id: "low-win-rate",
        kind: RuleKind::Recommendation,
        message: "Win rate is below 45%. You may be overtrading; only take your highest quality setups.",
        predicate: low_win_rate,
    },
    Rule {
        id: "oversized-losses",
        kind: RuleKind::Recommendation,
        message: "Average loss is more than 1.5x the average win. Tighten stop losses or reduce position size.",
        predicate: oversized_losses,
    },
    Rule {
        id: "daily-loss-limit",
        kind: RuleKind::Recommendation,
        message: "A single day lost more than 200. Set a daily loss limit and stop trading once it is hit.",
        predicate: daily_loss_limit,
    },
    Rule {
        id: "session-concentration",
        kind: RuleKind::Recommendation,
        message: "Most trades are taken in the London session. Consider spreading activity across other sessions.",
        predicate: session_concentration,
    },
    Rule {
        id: "loss-streak-break",
        kind: RuleKind::Mindset,
        message: "You have had 3 or more losses in a row. Step away after consecutive losses to reset.",
        predicate: loss_streak_break,
    },
    Rule {
        id: "positive-expectancy",
        kind: RuleKind::Mindset,
        message: "Expectancy is strong. Stay consistent and keep following your plan.",
        predicate: positive_expectancy,
    },
];

fn low_win_rate(c: &RuleContext) -> bool {
    c.total > 0 && c.win_rate < 45.0
}

fn oversized_losses(c: &RuleContext) -> bool {
    c.avg_loss != 0.0 && c.avg_loss.abs() > c.avg_win * 1.5
}

fn daily_loss_limit(c: &RuleContext) -> bool {
    c.max_daily_loss < -200.0
}

// Compares London against Asian only; New York is not part of the check.
fn session_concentration(c: &RuleContext) -> bool {
    c.london_trades > 2 * c.asian_trades
}

fn loss_streak_break(c: &RuleContext) -> bool {
    c.longest_loss_streak >= 3
}

fn positive_expectancy(c: &RuleContext) -> bool {
    c.expectancy > 10.0
}

/// Evaluate the built-in catalogue.
pub fn evaluate(ctx: &RuleContext) -> RuleOutcome {
    evaluate_with(RULES, ctx)
}

/// Evaluate an arbitrary rule list, in order.
pub fn evaluate_with(rules: &[Rule], ctx: &RuleContext) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    for rule in rules.iter().filter(|r| (r.predicate)(ctx)) {
        tracing::trace!(rule = rule.id, "rule fired");
        let target = match rule.kind {
            RuleKind::Recommendation => &mut outcome.recommendations,
            RuleKind::Mindset => &mut outcome.mindset,
        };
        target.push(rule.message.to_string());
    }
    outcome
}

/// Look up a rule by id.
pub fn find(id: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.id == id)
}
