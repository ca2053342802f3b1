//! Property-based invariants of the aggregator.

use chrono::NaiveDate;
use proptest::prelude::*;
use tradejournal_analytics::{analyze, analyze_by_journal, RuleContext, RULES};
use tradejournal_core::TradeRecord;

fn arb_trade() -> impl Strategy<Value = TradeRecord> {
    (
        1u32..=28,
        0u32..24,
        prop_oneof![Just(0.0), -1_000.0..1_000.0_f64],
        prop::option::of(prop::sample::select(vec!["London", "New York", "Asian", " "])),
        prop::option::of(prop::sample::select(vec!["breakout", "news", "fade", ""])),
        prop::option::of(prop::sample::select(vec!["Main", "Swing"])),
    )
        .prop_map(|(day, hour, result, session, reason, journal)| {
            let date = NaiveDate::from_ymd_opt(2024, 2, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap();
            let mut t = TradeRecord::new(date, result);
            t.session = session.map(String::from);
            t.reason = reason.map(String::from);
            t.journal = journal.map(String::from);
            t
        })
}

fn arb_log() -> impl Strategy<Value = Vec<TradeRecord>> {
    prop::collection::vec(arb_trade(), 0..60)
}

proptest! {
    #[test]
    fn counts_are_consistent(trades in arb_log()) {
        let r = analyze(&trades);
        prop_assert_eq!(r.total, trades.len());
        prop_assert!(r.wins + r.losses <= r.total);
        prop_assert_eq!(r.wins + r.losses + r.breakeven, r.total);

        let session_total: usize = r.session_counts.values().map(|c| c.total).sum();
        prop_assert_eq!(session_total, r.total);
        let reason_total: usize = r.top_reasons.iter().map(|rc| rc.count).sum();
        prop_assert!(reason_total <= r.total);
        prop_assert!(r.top_reasons.len() <= 8);
        prop_assert!(r.top_reasons.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn win_rate_is_a_percentage(trades in arb_log()) {
        let r = analyze(&trades);
        prop_assert!((0.0..=100.0).contains(&r.win_rate));
        prop_assert!(r.avg_win >= 0.0);
        prop_assert!(r.avg_loss <= 0.0);
        prop_assert!(r.max_drawdown <= 0.0);
        prop_assert!(r.max_daily_loss <= r.max_daily_profit);
        prop_assert!(r.longest_win_streak <= r.wins);
        prop_assert!(r.longest_loss_streak <= r.losses);
    }

    #[test]
    fn analysis_is_idempotent_and_leaves_input_alone(trades in arb_log()) {
        let before = trades.clone();
        let first = analyze(&trades);
        let second = analyze(&trades);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&trades, &before);
    }

    #[test]
    fn per_journal_totals_add_up(trades in arb_log()) {
        let reports = analyze_by_journal(&trades);
        let total: usize = reports.values().map(|r| r.total).sum();
        prop_assert_eq!(total, trades.len());
    }

    #[test]
    fn report_messages_come_from_the_catalogue(trades in arb_log()) {
        let r = analyze(&trades);
        let known: Vec<&str> = RULES.iter().map(|rule| rule.message).collect();
        for msg in r.recommendations.iter().chain(r.mindset.iter()) {
            prop_assert!(known.contains(&msg.as_str()));
        }
        prop_assert_eq!(r.rule_context().total, r.total);
    }
}

#[test]
fn empty_context_matches_empty_report() {
    assert_eq!(analyze(&[]).rule_context(), RuleContext::default());
}
