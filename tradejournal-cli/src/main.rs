//! Trade Journal CLI: analyze, export, and journal listing commands.
//!
//! Commands:
//! - `analyze`: print the analysis report for a trade log
//! - `export`: write the report bundle (JSON, CSV, Markdown) to disk
//! - `journals`: one summary row per journal in a trade log
//! - `rules`: list the coaching rule catalogue

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tradejournal_analytics::export::{
    export_json, generate_journal_overview, generate_markdown, save_artifacts,
};
use tradejournal_analytics::{
    analyze, analyze_by_journal, AnalysisReport, OutputFormat, ReportEnvelope, RuleKind,
    Settings, RULES,
};
use tradejournal_core::{journal_summaries, load_trades, Direction, TradeFilter, TradeRecord};

#[derive(Parser)]
#[command(name = "tradejournal", about = "Trade journal analytics", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file. Defaults to <config dir>/tradejournal/settings.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the analysis report for a trade log.
    Analyze {
        /// Trade log (.csv or .json).
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output format. Defaults to report.format from settings.
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Write report.json, daily.csv, equity.csv and report.md.
    Export {
        /// Trade log (.csv or .json).
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output directory. Defaults to report.output_dir from settings.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Summarize every journal in a trade log.
    Journals {
        /// Trade log (.csv or .json).
        file: PathBuf,

        /// Output format. Defaults to report.format from settings.
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// List the coaching rules.
    Rules,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Journal to analyze. Defaults to journal.selected from settings.
    #[arg(long, conflicts_with = "all_journals")]
    journal: Option<String>,

    /// Include every journal, ignoring journal.selected.
    #[arg(long)]
    all_journals: bool,

    /// First trade date to include (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last trade date to include (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Only trades from this session.
    #[arg(long)]
    session: Option<String>,

    /// Only buys or only sells.
    #[arg(long)]
    direction: Option<Direction>,
}

impl FilterArgs {
    /// Command-line flags over configured defaults.
    fn to_filter(&self, settings: &Settings) -> TradeFilter {
        let journal = if self.all_journals {
            None
        } else {
            self.journal
                .clone()
                .or_else(|| settings.journal.selected.clone())
        };
        TradeFilter {
            journal,
            from: self.from,
            to: self.to,
            session: self.session.clone(),
            direction: self.direction,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load_or_default(cli.config.as_deref())
        .context("failed to load settings")?;

    match cli.command {
        Commands::Analyze {
            file,
            filter,
            format,
        } => run_analyze(&settings, &file, &filter, format),
        Commands::Export {
            file,
            filter,
            output_dir,
        } => run_export(&settings, &file, &filter, output_dir),
        Commands::Journals { file, format } => run_journals(&settings, &file, format),
        Commands::Rules => {
            print_rules();
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load a trade log and apply the effective filter.
fn select_trades(
    settings: &Settings,
    file: &Path,
    args: &FilterArgs,
) -> Result<(Vec<TradeRecord>, TradeFilter)> {
    let trades = load_trades(file)
        .with_context(|| format!("failed to load trade log {}", file.display()))?;
    let filter = args.to_filter(settings);
    let selected = if filter.is_empty() {
        trades
    } else {
        filter.apply(&trades)
    };
    if selected.is_empty() {
        tracing::warn!(file = %file.display(), "no trades match the selection");
    } else {
        tracing::info!(trades = selected.len(), "selected trades");
    }
    Ok((selected, filter))
}

fn run_analyze(
    settings: &Settings,
    file: &Path,
    args: &FilterArgs,
    format: Option<OutputFormat>,
) -> Result<()> {
    let (trades, filter) = select_trades(settings, file, args)?;
    let report = analyze(&trades);
    let envelope = ReportEnvelope::new(report, &trades, filter.journal);

    match format.unwrap_or(settings.report.format) {
        OutputFormat::Table => print_report(&envelope, &settings.account.currency),
        OutputFormat::Json => println!("{}", export_json(&envelope)?),
        OutputFormat::Markdown => {
            print!("{}", generate_markdown(&envelope, &settings.account.currency));
        }
    }
    Ok(())
}

fn run_export(
    settings: &Settings,
    file: &Path,
    args: &FilterArgs,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let (trades, filter) = select_trades(settings, file, args)?;
    let envelope = ReportEnvelope::new(analyze(&trades), &trades, filter.journal);
    let output_dir = output_dir.unwrap_or_else(|| settings.report.output_dir.clone());

    let run_dir = save_artifacts(&envelope, settings, &output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());
    Ok(())
}

fn run_journals(settings: &Settings, file: &Path, format: Option<OutputFormat>) -> Result<()> {
    let trades = load_trades(file)
        .with_context(|| format!("failed to load trade log {}", file.display()))?;
    let reports = analyze_by_journal(&trades);

    match format.unwrap_or(settings.report.format) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .context("failed to serialize journal reports")?;
            println!("{json}");
        }
        OutputFormat::Markdown => print!("{}", generate_journal_overview(&reports)),
        OutputFormat::Table => {
            if trades.is_empty() {
                println!("No trades in {}", file.display());
                return Ok(());
            }
            println!(
                "{:<16} {:>7} {:>12} {:>12} {:>9} {:>11}",
                "Journal", "Trades", "First", "Last", "Win Rate", "Expectancy"
            );
            println!("{}", "-".repeat(72));
            for summary in journal_summaries(&trades) {
                let Some(r) = reports.get(&summary.name) else {
                    continue;
                };
                println!(
                    "{:<16} {:>7} {:>12} {:>12} {:>8.1}% {:>11.2}",
                    summary.name,
                    summary.trades,
                    summary.first_trade,
                    summary.last_trade,
                    r.win_rate,
                    r.expectancy
                );
            }
        }
    }
    Ok(())
}

fn print_rules() {
    println!("{:<24} {:<15} Message", "Rule", "Kind");
    println!("{}", "-".repeat(72));
    for rule in RULES {
        let kind = match rule.kind {
            RuleKind::Recommendation => "recommendation",
            RuleKind::Mindset => "mindset",
        };
        println!("{:<24} {:<15} {}", rule.id, kind, rule.message);
    }
}

fn print_report(envelope: &ReportEnvelope, currency: &str) {
    let r: &AnalysisReport = &envelope.report;

    println!();
    println!("=== Trade Journal Report ===");
    println!("Journal:        {}", envelope.journal_label());
    println!("Dataset:        {}", envelope.dataset_hash);
    println!(
        "Trades:         {} ({} W / {} L / {} BE)",
        r.total, r.wins, r.losses, r.breakeven
    );
    println!();
    println!("--- Performance ---");
    println!("Win Rate:       {:.1}%", r.win_rate);
    println!("Avg Win:        {:.2} {currency}", r.avg_win);
    println!("Avg Loss:       {:.2} {currency}", r.avg_loss);
    println!("Expectancy:     {:.2} {currency}", r.expectancy);
    println!("Net P&L:        {:.2} {currency}", r.net_pnl);
    match r.profit_factor {
        Some(pf) => println!("Profit Factor:  {pf:.2}"),
        None => println!("Profit Factor:  n/a"),
    }
    println!("Worst Day:      {:.2} {currency}", r.max_daily_loss);
    println!("Best Day:       {:.2} {currency}", r.max_daily_profit);
    println!("Max Drawdown:   {:.2} {currency}", r.max_drawdown);
    println!("Win Streak:     {}", r.longest_win_streak);
    println!("Loss Streak:    {}", r.longest_loss_streak);

    if !r.session_counts.is_empty() {
        println!();
        println!("--- Sessions ---");
        println!("{:<12} {:>7} {:>6} {:>7}", "Session", "Trades", "Wins", "Losses");
        for (name, c) in &r.session_counts {
            println!("{:<12} {:>7} {:>6} {:>7}", name, c.total, c.wins, c.losses);
        }
    }

    if !r.top_reasons.is_empty() {
        println!();
        println!("--- Top Reasons ---");
        for rc in &r.top_reasons {
            println!("{:>4}  {}", rc.count, rc.reason);
        }
    }

    println!();
    println!("--- Goals ---");
    println!(
        "Win Rate:       {:.1}% / {:.1}%{}",
        r.goals.win_rate.current,
        r.goals.win_rate.target,
        if r.goals.win_rate.achieved { "  (achieved)" } else { "" }
    );
    println!(
        "Expectancy:     {:.2} / {:.2}{}",
        r.goals.expectancy.current,
        r.goals.expectancy.target,
        if r.goals.expectancy.achieved { "  (achieved)" } else { "" }
    );
    if !r.tags.is_empty() {
        let tags: Vec<&str> = r.tags.iter().map(|t| t.label()).collect();
        println!("Tags:           {}", tags.join(", "));
    }

    for msg in &r.recommendations {
        println!("RECOMMENDATION: {msg}");
    }
    for msg in &r.mindset {
        println!("MINDSET: {msg}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_settings() {
        let mut settings = Settings::default();
        settings.journal.selected = Some("Main".into());

        let args = FilterArgs::default();
        assert_eq!(args.to_filter(&settings).journal.as_deref(), Some("Main"));

        let args = FilterArgs {
            journal: Some("Swing".into()),
            ..Default::default()
        };
        assert_eq!(args.to_filter(&settings).journal.as_deref(), Some("Swing"));

        let args = FilterArgs {
            all_journals: true,
            ..Default::default()
        };
        assert!(args.to_filter(&settings).is_empty());
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "tradejournal",
            "-vv",
            "analyze",
            "trades.csv",
            "--from",
            "2024-03-01",
            "--direction",
            "short",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze { filter, format, .. } => {
                assert_eq!(filter.from, NaiveDate::from_ymd_opt(2024, 3, 1));
                assert_eq!(filter.direction, Some(Direction::Sell));
                assert_eq!(format, Some(OutputFormat::Json));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn journal_and_all_journals_conflict() {
        let parsed = Cli::try_parse_from([
            "tradejournal",
            "export",
            "t.csv",
            "--journal",
            "Main",
            "--all-journals",
        ]);
        assert!(parsed.is_err());
    }
}
