//! Goals and badge tags.

use serde::{Deserialize, Serialize};

use crate::rules::RuleContext;

pub const WIN_RATE_TARGET: f64 = 60.0;
pub const EXPECTANCY_TARGET: f64 = 5.0;

/// A fixed target paired with the current value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub target: f64,
    pub current: f64,
    pub achieved: bool,
}

impl Goal {
    pub fn new(target: f64, current: f64) -> Self {
        Self {
            target,
            current,
            achieved: current >= target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    pub win_rate: Goal,
    pub expectancy: Goal,
}

impl Goals {
    pub fn from_metrics(win_rate: f64, expectancy: f64) -> Self {
        Self {
            win_rate: Goal::new(WIN_RATE_TARGET, win_rate),
            expectancy: Goal::new(EXPECTANCY_TARGET, expectancy),
        }
    }
}

impl Default for Goals {
    fn default() -> Self {
        Self::from_metrics(0.0, 0.0)
    }
}

/// Badge awarded for a threshold in the report figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "Sharpshooter")]
    Sharpshooter,
    #[serde(rename = "Positive Edge")]
    PositiveEdge,
    #[serde(rename = "Risk Controlled")]
    RiskControlled,
    #[serde(rename = "Unbroken")]
    Unbroken,
}

impl Tag {
    pub const ALL: [Tag; 4] = [
        Tag::Sharpshooter,
        Tag::PositiveEdge,
        Tag::RiskControlled,
        Tag::Unbroken,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tag::Sharpshooter => "Sharpshooter",
            Tag::PositiveEdge => "Positive Edge",
            Tag::RiskControlled => "Risk Controlled",
            Tag::Unbroken => "Unbroken",
        }
    }

    pub fn earned(&self, c: &RuleContext) -> bool {
        match self {
            Tag::Sharpshooter => c.win_rate > 65.0,
            Tag::PositiveEdge => c.expectancy > 0.0,
            // Holds for an empty log too: its worst day is 0.
            Tag::RiskControlled => c.max_daily_loss > -100.0,
            Tag::Unbroken => c.longest_loss_streak == 0 && c.total > 3,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tags earned, in badge order.
pub fn tags_for(ctx: &RuleContext) -> Vec<Tag> {
    Tag::ALL.into_iter().filter(|t| t.earned(ctx)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_achieved_at_target() {
        assert!(Goal::new(60.0, 60.0).achieved);
        assert!(!Goal::new(60.0, 59.9).achieved);
    }

    #[test]
    fn goals_carry_fixed_targets() {
        let g = Goals::from_metrics(44.4, 0.38);
        assert_eq!(g.win_rate.target, 60.0);
        assert_eq!(g.expectancy.target, 5.0);
        assert_eq!(g.win_rate.current, 44.4);
        assert!(!g.expectancy.achieved);
    }

    #[test]
    fn goals_serialize_camel_case() {
        let json = serde_json::to_value(Goals::default()).unwrap();
        assert_eq!(json["winRate"]["target"], 60.0);
        assert_eq!(json["expectancy"]["achieved"], false);
    }

    #[test]
    fn empty_context_is_only_risk_controlled() {
        assert_eq!(tags_for(&RuleContext::default()), vec![Tag::RiskControlled]);
    }

    #[test]
    fn all_tags_in_order() {
        let ctx = RuleContext {
            total: 5,
            win_rate: 100.0,
            avg_win: 20.0,
            expectancy: 20.0,
            max_daily_loss: 20.0,
            ..Default::default()
        };
        assert_eq!(tags_for(&ctx), Tag::ALL.to_vec());
    }

    #[test]
    fn unbroken_needs_more_than_three_trades() {
        let ctx = RuleContext { total: 3, ..Default::default() };
        assert!(!Tag::Unbroken.earned(&ctx));
    }

    #[test]
    fn tag_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Tag::PositiveEdge).unwrap(),
            "\"Positive Edge\""
        );
        assert_eq!(Tag::RiskControlled.to_string(), "Risk Controlled");
    }
}
