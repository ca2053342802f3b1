//! Reporting and export: JSON, CSV, and Markdown artifact generation.
//!
//! Provides three export formats for analysis reports:
//! - **JSON**: the report wrapped in a [`ReportEnvelope`] with schema versioning
//! - **CSV**: daily results and the equity curve for spreadsheets
//! - **Markdown**: a human-readable report and a per-journal overview
//!
//! Persisted envelopes carry a `schema_version`. Newer versions are rejected
//! on load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tradejournal_core::domain::{DatasetHash, TradeRecord};

use crate::config::Settings;
use crate::report::AnalysisReport;

/// Version of the envelope layout written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const ALL_JOURNALS: &str = "all";

/// A report plus the provenance needed to trace it back to its trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub dataset_hash: DatasetHash,
    /// Journal the report covers; `None` when every journal is included.
    pub journal: Option<String>,
    pub report: AnalysisReport,
}

impl ReportEnvelope {
    pub fn new(report: AnalysisReport, trades: &[TradeRecord], journal: Option<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            dataset_hash: DatasetHash::of(trades),
            journal,
            report,
        }
    }

    pub fn journal_label(&self) -> &str {
        self.journal.as_deref().unwrap_or(ALL_JOURNALS)
    }
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an envelope to pretty JSON.
pub fn export_json(envelope: &ReportEnvelope) -> Result<String> {
    serde_json::to_string_pretty(envelope).context("failed to serialize report to JSON")
}

/// Deserialize an envelope, rejecting schema versions newer than this build.
pub fn import_json(json: &str) -> Result<ReportEnvelope> {
    let envelope: ReportEnvelope =
        serde_json::from_str(json).context("failed to deserialize report from JSON")?;
    if envelope.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            envelope.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(envelope)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Per-day results. Columns: date, pnl, trades.
pub fn export_daily_csv(report: &AnalysisReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "pnl", "trades"])?;
    for day in &report.daily_results {
        wtr.write_record([
            day.date.to_string(),
            format!("{:.2}", day.pnl),
            day.trades.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Equity curve on top of an account balance.
///
/// Columns: index, date, cumulative, balance.
pub fn export_equity_csv(report: &AnalysisReport, starting_balance: f64) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["index", "date", "cumulative", "balance"])?;
    for (i, point) in report.equity_curve.iter().enumerate() {
        wtr.write_record([
            i.to_string(),
            point.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{:.2}", point.cumulative),
            format!("{:.2}", starting_balance + point.cumulative),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one report.
///
/// Creates `{journal}_{timestamp}/` under `output_dir` containing:
/// - `report.json`: the envelope
/// - `daily.csv`: per-day results
/// - `equity.csv`: equity curve from the account's starting balance
/// - `report.md`: the Markdown report
///
/// Returns the path to the created directory.
pub fn save_artifacts(
    envelope: &ReportEnvelope,
    settings: &Settings,
    output_dir: &Path,
) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        dir_safe(envelope.journal_label()),
        envelope.generated_at.format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let files = [
        ("report.json", export_json(envelope)?),
        ("daily.csv", export_daily_csv(&envelope.report)?),
        (
            "equity.csv",
            export_equity_csv(&envelope.report, settings.account.starting_balance)?,
        ),
        (
            "report.md",
            generate_markdown(envelope, &settings.account.currency),
        ),
    ];
    for (name, content) in &files {
        let path = run_dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    tracing::info!(dir = %run_dir.display(), "saved report artifacts");
    Ok(run_dir)
}

/// Load the envelope from an artifact directory's `report.json`.
pub fn load_artifacts(dir: &Path) -> Result<ReportEnvelope> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown reports ───────────────────────────────────────────────

/// Markdown report for one envelope.
pub fn generate_markdown(envelope: &ReportEnvelope, currency: &str) -> String {
    let r = &envelope.report;
    let money = |v: f64| format!("{v:.2} {currency}");
    let mut md = String::with_capacity(2048);

    md.push_str("# Trade Journal Report\n\n");

    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Journal | {} |\n", envelope.journal_label()));
    md.push_str(&format!(
        "| Generated | {} |\n",
        envelope.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("| Dataset Hash | {} |\n", envelope.dataset_hash));
    md.push('\n');

    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | ---: |\n");
    md.push_str(&format!(
        "| Trades | {} ({} W / {} L / {} BE) |\n",
        r.total, r.wins, r.losses, r.breakeven
    ));
    md.push_str(&format!("| Win Rate | {:.1}% |\n", r.win_rate));
    md.push_str(&format!("| Avg Win | {} |\n", money(r.avg_win)));
    md.push_str(&format!("| Avg Loss | {} |\n", money(r.avg_loss)));
    md.push_str(&format!("| Expectancy | {} |\n", money(r.expectancy)));
    md.push_str(&format!("| Net P&L | {} |\n", money(r.net_pnl)));
    md.push_str(&format!(
        "| Profit Factor | {} |\n",
        r.profit_factor
            .map_or_else(|| "n/a".to_string(), |pf| format!("{pf:.2}"))
    ));
    md.push_str(&format!("| Worst Day | {} |\n", money(r.max_daily_loss)));
    md.push_str(&format!("| Best Day | {} |\n", money(r.max_daily_profit)));
    md.push_str(&format!("| Max Drawdown | {} |\n", money(r.max_drawdown)));
    md.push_str(&format!("| Longest Win Streak | {} |\n", r.longest_win_streak));
    md.push_str(&format!("| Longest Loss Streak | {} |\n", r.longest_loss_streak));
    md.push('\n');

    if !r.session_counts.is_empty() {
        md.push_str("## Sessions\n\n");
        md.push_str("| Session | Trades | Wins | Losses |\n");
        md.push_str("| --- | ---: | ---: | ---: |\n");
        for (name, c) in &r.session_counts {
            md.push_str(&format!("| {name} | {} | {} | {} |\n", c.total, c.wins, c.losses));
        }
        md.push('\n');
    }

    if !r.top_reasons.is_empty() {
        md.push_str("## Top Reasons\n\n");
        for rc in &r.top_reasons {
            md.push_str(&format!("- {} ({})\n", rc.reason, rc.count));
        }
        md.push('\n');
    }

    md.push_str("## Goals\n\n");
    md.push_str("| Goal | Target | Current | Achieved |\n");
    md.push_str("| --- | ---: | ---: | :---: |\n");
    md.push_str(&format!(
        "| Win Rate | {:.1}% | {:.1}% | {} |\n",
        r.goals.win_rate.target,
        r.goals.win_rate.current,
        check(r.goals.win_rate.achieved)
    ));
    md.push_str(&format!(
        "| Expectancy | {} | {} | {} |\n",
        money(r.goals.expectancy.target),
        money(r.goals.expectancy.current),
        check(r.goals.expectancy.achieved)
    ));
    md.push('\n');

    if !r.tags.is_empty() {
        let tags: Vec<&str> = r.tags.iter().map(|t| t.label()).collect();
        md.push_str(&format!("**Tags:** {}\n\n", tags.join(", ")));
    }

    push_list(&mut md, "Recommendations", &r.recommendations);
    push_list(&mut md, "Mindset", &r.mindset);

    md
}

/// Side-by-side Markdown table of per-journal reports.
pub fn generate_journal_overview(reports: &BTreeMap<String, AnalysisReport>) -> String {
    let mut md = String::with_capacity(512);
    md.push_str("# Journals\n\n");
    md.push_str("| Journal | Trades | Win Rate | Expectancy | Net P&L | Worst Day |\n");
    md.push_str("| --- | ---: | ---: | ---: | ---: | ---: |\n");
    for (name, r) in reports {
        md.push_str(&format!(
            "| {name} | {} | {:.1}% | {:.2} | {:.2} | {:.2} |\n",
            r.total, r.win_rate, r.expectancy, r.net_pnl, r.max_daily_loss
        ));
    }
    md
}

// ─── Helpers ────────────────────────────────────────────────────────

fn push_list(md: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("## {title}\n\n"));
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
    md.push('\n');
}

fn check(achieved: bool) -> &'static str {
    if achieved {
        "yes"
    } else {
        "no"
    }
}

fn dir_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
