//! Debt Payoff CLI
//!
//! Compares repayment strategies for a household's debts and optionally
//! runs a what-if scenario against the avalanche baseline.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use debt_payoff::budget::{load_bills, load_income, CashFlow};
use debt_payoff::debt::{load_debts, overall_progress_percent, total_debt};
use debt_payoff::payoff::{PayoffConfig, PayoffEvent, PayoffResult, PayoffSummary};
use debt_payoff::{highest_impact_action, LumpSum, ScenarioRunner, Strategy, WhatIf};
use log::info;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "debt_payoff", version, about = "Project when debts are paid off under different strategies")]
struct Cli {
    /// CSV of debts (id,name,current_balance,starting_balance,interest_rate,minimum_payment,due_day)
    #[arg(long)]
    debts: PathBuf,

    /// CSV of income sources, used to suggest an extra payment
    #[arg(long)]
    income: Option<PathBuf>,

    /// CSV of bills, used to suggest an extra payment
    #[arg(long)]
    bills: Option<PathBuf>,

    /// Monthly extra payment (defaults to half the household surplus)
    #[arg(long)]
    extra: Option<f64>,

    /// Strategy whose timeline is written with --timeline-csv
    #[arg(long, default_value = "avalanche")]
    strategy: Strategy,

    /// What-if: one-time lump sum amount
    #[arg(long)]
    lump_amount: Option<f64>,

    /// What-if: debt id receiving the lump sum
    #[arg(long)]
    lump_debt: Option<String>,

    /// What-if: month the lump sum is applied
    #[arg(long, default_value_t = 1)]
    lump_month: u32,

    /// What-if: change in monthly income (half goes to debt)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    income_change: f64,

    /// What-if: monthly extra payment in the scenario (defaults to --extra)
    #[arg(long)]
    scenario_extra: Option<f64>,

    /// Start date for payoff dates (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Write the selected strategy's timeline to this CSV file
    #[arg(long)]
    timeline_csv: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let debts = load_debts(&cli.debts)
        .with_context(|| format!("loading debts from {}", cli.debts.display()))?;

    let income = match &cli.income {
        Some(path) => load_income(path).with_context(|| format!("loading income from {}", path.display()))?,
        None => Vec::new(),
    };
    let bills = match &cli.bills {
        Some(path) => load_bills(path).with_context(|| format!("loading bills from {}", path.display()))?,
        None => Vec::new(),
    };
    let cash_flow = CashFlow::from_household(&income, &bills, &debts);

    let extra = cli.extra.unwrap_or_else(|| cash_flow.suggested_extra());
    info!("using extra monthly payment of {:.2}", extra);

    let mut base = PayoffConfig::default();
    if let Some(as_of) = cli.as_of {
        base = base.as_of(as_of);
    }
    let runner = ScenarioRunner::with_config(base);

    let comparison = runner
        .compare_strategies(&debts, extra)
        .context("invalid simulation input")?;

    let what_if = build_what_if(&cli, extra)?;
    let scenario = match &what_if {
        Some(w) => Some(runner.what_if(&debts, extra, w).context("invalid what-if input")?),
        None => None,
    };

    if let Some(path) = &cli.timeline_csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        comparison
            .get(cli.strategy)
            .write_timeline_csv(file)
            .with_context(|| format!("writing timeline to {}", path.display()))?;
        info!("{} timeline written to {}", cli.strategy, path.display());
    }

    let impact = highest_impact_action(&debts);

    if cli.json {
        let summaries: Vec<PayoffSummary> =
            Strategy::ALL.iter().map(|&s| comparison.get(s).summary()).collect();
        let payoff_orders: BTreeMap<&str, &Vec<PayoffEvent>> = Strategy::ALL
            .iter()
            .map(|&s| (s.as_str(), &comparison.get(s).debt_payoff_order))
            .collect();
        let what_if_report = scenario.as_ref().map(|c| {
            serde_json::json!({
                "months_saved": c.months_saved,
                "interest_saved": c.interest_saved,
                "baseline": c.baseline.summary(),
                "scenario": c.scenario.summary(),
            })
        });

        let report = serde_json::json!({
            "extra_monthly": extra,
            "cash_flow": cash_flow,
            "summaries": summaries,
            "payoff_order": payoff_orders,
            "what_if": what_if_report,
            "impact_action": impact,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Debt Payoff v{}", env!("CARGO_PKG_VERSION"));
    println!("==================\n");

    println!("Debts: {}  Total balance: ${:.2}  Progress: {:.0}%",
        debts.len(), total_debt(&debts), overall_progress_percent(&debts));
    if !income.is_empty() || !bills.is_empty() {
        println!("Monthly income: ${:.2}  Bills: ${:.2}  Minimums: ${:.2}  Surplus: ${:.2}",
            cash_flow.monthly_income, cash_flow.monthly_bills, cash_flow.monthly_minimums, cash_flow.surplus());
    }
    println!("Extra monthly payment: ${:.2}\n", extra);

    println!("{:<10} {:>7} {:>14} {:>12} {:>8}", "Strategy", "Months", "Interest", "Debt-free", "Paid");
    println!("{}", "-".repeat(55));
    for strategy in Strategy::ALL {
        let summary = comparison.get(strategy).summary();
        println!("{:<10} {:>7} {:>14.2} {:>12} {:>5}/{}",
            strategy.as_str(),
            summary.months,
            summary.total_interest,
            summary.payoff_date.format("%b %Y").to_string(),
            summary.debts_paid,
            summary.debt_count,
        );
    }

    let cheapest = comparison.cheapest();
    println!("\nCheapest: {} (saves ${:.2} vs minimums)",
        cheapest, comparison.interest_saved_vs_minimums(cheapest));

    print_payoff_order(comparison.get(cli.strategy));

    if let Some(c) = &scenario {
        println!("\nWhat-if scenario (avalanche):");
        println!("  Baseline: {} months, ${:.2} interest", c.baseline.months, c.baseline.total_interest);
        println!("  Scenario: {} months, ${:.2} interest", c.scenario.months, c.scenario.total_interest);
        println!("  Months saved: {}  Interest saved: ${:.2}", c.months_saved, c.interest_saved);
    }

    if let Some(action) = impact {
        println!("\nHighest impact: put ${:.0} extra on {} to save about ${:.2}/yr in interest",
            action.extra_amount, action.debt_name, action.interest_saved);
    }

    Ok(())
}

/// A what-if is requested when any scenario flag differs from the baseline
fn build_what_if(cli: &Cli, extra: f64) -> Result<Option<WhatIf>> {
    let lump_sum = match (cli.lump_amount, &cli.lump_debt) {
        (Some(amount), Some(debt_id)) => Some(LumpSum::new(amount, debt_id.clone(), cli.lump_month)),
        (Some(_), None) => bail!("--lump-amount requires --lump-debt"),
        (None, Some(_)) => bail!("--lump-debt requires --lump-amount"),
        (None, None) => None,
    };

    if lump_sum.is_none() && cli.income_change == 0.0 && cli.scenario_extra.is_none() {
        return Ok(None);
    }

    Ok(Some(WhatIf {
        extra_monthly: cli.scenario_extra.unwrap_or(extra),
        lump_sum,
        income_change: cli.income_change,
    }))
}

fn print_payoff_order(result: &PayoffResult) {
    println!("\n{} payoff order:", result.strategy);
    if result.debt_payoff_order.is_empty() {
        println!("  (no debt reaches zero within {} months)", result.months);
    }
    for event in &result.debt_payoff_order {
        println!("  Month {:>3}: {}", event.month, event.name);
    }
    if !result.converged() {
        let remaining = result.timeline.last().map(|s| s.total_balance).unwrap_or(0.0);
        println!("  Stopped at {} months with ${:.2} still owed", result.months, remaining);
    }
}
