//! Run cashflow projections for a pipeline snapshot
//!
//! Reads deals (JSON), optional standalone timeline entries (JSON) and
//! expenses (JSON or CSV), then prints a per-scenario summary. Monthly rows
//! can be written to CSV and the full result to JSON.

use anyhow::{Context, Result};
use clap::Parser;
use pipeline_cashflow::{
    format::{format_amount, format_compact},
    ledger,
    pipeline::{self, Stage},
    projection::Month,
    timeline, ProjectionConfig, ScenarioRunner,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "forecast", about = "Scenario cashflow projection from a sales pipeline")]
struct Args {
    /// Deals as a JSON array
    #[arg(long)]
    deals: PathBuf,

    /// Expenses as a JSON array or CSV file
    #[arg(long)]
    expenses: Option<PathBuf>,

    /// Timeline entries stored separately from their deals (JSON)
    #[arg(long)]
    timeline: Option<PathBuf>,

    /// Projection parameters as JSON; flags below override it
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long)]
    starting_balance: Option<f64>,

    /// Months to project
    #[arg(long)]
    months: Option<usize>,

    /// First projected month (YYYY-MM); defaults to the current month
    #[arg(long)]
    anchor: Option<Month>,

    /// Write monthly rows for every scenario to this CSV file
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Write projections, timeline and pipeline summary to this JSON file
    #[arg(long)]
    json_out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct MonthRow {
    scenario: String,
    month: String,
    revenue: f64,
    expenses: f64,
    net: f64,
    balance: f64,
    deals: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    projections: &'a pipeline_cashflow::CashflowProjections,
    timeline: &'a [pipeline_cashflow::TimelineData],
    summary: &'a pipeline::PipelineSummary,
}

fn load_config(args: &Args) -> Result<ProjectionConfig> {
    let mut config = match &args.params {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ProjectionConfig::default(),
    };
    if let Some(balance) = args.starting_balance {
        config.starting_balance = balance;
    }
    if let Some(months) = args.months {
        config.horizon_months = months;
    }
    if let Some(anchor) = args.anchor {
        config.anchor = anchor;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let config = load_config(&args)?;

    let mut deals = pipeline::load_deals(&args.deals)
        .with_context(|| format!("loading deals from {}", args.deals.display()))?;
    if let Some(path) = &args.timeline {
        let entries = pipeline::load_timeline(path)
            .with_context(|| format!("loading timeline from {}", path.display()))?;
        let attached = pipeline::attach_timeline(&mut deals, entries);
        println!("Attached {} timeline entries", attached);
    }
    let expenses = match &args.expenses {
        Some(path) => ledger::load_expenses(path)
            .with_context(|| format!("loading expenses from {}", path.display()))?,
        None => Vec::new(),
    };
    println!("Loaded {} deals and {} expenses in {:?}", deals.len(), expenses.len(), start.elapsed());

    let runner = ScenarioRunner::new(config.clone());
    let projections = runner.run(&deals, &expenses);
    let schedule = timeline::aggregate(&deals, config.anchor, config.horizon_months);
    let summary = pipeline::summarize(&deals);

    println!("\nPipeline (weighted {} ISK):", format_amount(summary.total_weighted));
    for stage in Stage::OPEN {
        let s = summary.stage(stage);
        println!(
            "  {:<12} {:>3} deal{:<1}  {:>8} weighted",
            stage.label(),
            s.count,
            if s.count == 1 { "" } else { "s" },
            format_compact(s.weighted)
        );
    }

    println!(
        "\nProjection: {} months from {}, starting balance {}",
        config.horizon_months,
        config.anchor,
        format_amount(projections.starting_balance)
    );
    for projection in projections.scenarios.iter() {
        let runway = projection
            .runway_months
            .map_or_else(|| "never runs out".to_string(), |m| format!("{} months", m));
        println!(
            "  {:<10} revenue {:>12}  expenses {:>12}  ending {:>12}  runway {}",
            projection.scenario.to_string(),
            format_amount(projection.total_revenue),
            format_amount(projection.total_expenses),
            format_amount(projection.ending_balance(projections.starting_balance)),
            runway
        );
        for critical in &projection.critical_months {
            println!("      {} [{:?}] {}", critical.month.label(), critical.impact, critical.reason);
        }
    }

    println!("\nScheduled revenue (unweighted):");
    for data in &schedule {
        println!("  {:<9} {:>12}  ({} deals)", data.month_label, format_amount(data.total as f64), data.deals.len());
    }

    if let Some(path) = &args.csv_out {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for projection in projections.scenarios.iter() {
            for m in &projection.monthly {
                writer.serialize(MonthRow {
                    scenario: projection.scenario.to_string(),
                    month: m.month.to_string(),
                    revenue: m.revenue,
                    expenses: m.expenses,
                    net: m.net,
                    balance: m.balance,
                    deals: m.deals.len(),
                })?;
            }
        }
        writer.flush()?;
        println!("\nMonthly rows written to {}", path.display());
    }

    if let Some(path) = &args.json_out {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let report = Report {
            projections: &projections,
            timeline: &schedule,
            summary: &summary,
        };
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
        println!("Report written to {}", path.display());
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
