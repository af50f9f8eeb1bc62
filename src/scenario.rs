//! Scenario runner for strategy comparisons and what-if adjustments
//!
//! Holds the shared run settings (start date, month cap) once, then runs
//! any number of policies against the same debt list. Independent runs
//! execute on rayon's thread pool.

use crate::budget::SURPLUS_SHARE;
use crate::debt::{validate_debts, Debt, LumpSum};
use crate::error::ValidationError;
use crate::payoff::{round_cents, PayoffConfig, PayoffEngine, PayoffResult, Strategy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hypothetical adjustments on top of the current plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhatIf {
    /// Monthly extra payment before the income adjustment
    #[serde(default)]
    pub extra_monthly: f64,

    /// One-time payment (ignored when its amount is not positive)
    #[serde(default)]
    pub lump_sum: Option<LumpSum>,

    /// Change in monthly income; half of it goes to debt
    #[serde(default)]
    pub income_change: f64,
}

impl WhatIf {
    /// Extra payment after folding in the income change
    pub fn effective_extra(&self) -> f64 {
        (self.extra_monthly + (self.income_change * SURPLUS_SHARE).floor()).max(0.0)
    }

    fn effective_lump_sum(&self) -> Option<LumpSum> {
        self.lump_sum.clone().filter(|l| l.amount > 0.0)
    }
}

/// Results of all three strategies on the same debts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: PayoffResult,
    pub snowball: PayoffResult,
    pub minimums: PayoffResult,
}

impl StrategyComparison {
    pub fn get(&self, strategy: Strategy) -> &PayoffResult {
        match strategy {
            Strategy::Avalanche => &self.avalanche,
            Strategy::Snowball => &self.snowball,
            Strategy::Minimums => &self.minimums,
        }
    }

    /// Strategy with the least total interest (earlier in `Strategy::ALL` on ties)
    pub fn cheapest(&self) -> Strategy {
        Strategy::ALL
            .into_iter()
            .reduce(|best, s| {
                if self.get(s).total_interest < self.get(best).total_interest {
                    s
                } else {
                    best
                }
            })
            .unwrap_or(Strategy::Avalanche)
    }

    /// Interest a strategy saves compared with paying minimums only
    pub fn interest_saved_vs_minimums(&self, strategy: Strategy) -> f64 {
        round_cents(self.minimums.total_interest - self.get(strategy).total_interest)
    }
}

/// Baseline versus adjusted plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub baseline: PayoffResult,
    pub scenario: PayoffResult,

    /// Baseline months minus scenario months (negative if the scenario is slower)
    pub months_saved: i64,

    /// Baseline interest minus scenario interest
    pub interest_saved: f64,
}

/// Runner sharing start date and month cap across many runs
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: PayoffConfig,
}

impl ScenarioRunner {
    /// Runner starting from today with the default month cap
    pub fn new() -> Self {
        Self {
            base: PayoffConfig::default(),
        }
    }

    /// Runner with a fixed start date
    pub fn as_of(as_of: NaiveDate) -> Self {
        Self {
            base: PayoffConfig::default().as_of(as_of),
        }
    }

    /// Runner with pre-built base settings
    pub fn with_config(base: PayoffConfig) -> Self {
        Self { base }
    }

    fn config(&self, strategy: Strategy, extra_monthly: f64, lump_sum: Option<LumpSum>) -> PayoffConfig {
        PayoffConfig {
            strategy,
            extra_monthly,
            lump_sum,
            ..self.base.clone()
        }
    }

    /// Run a single validated simulation
    pub fn run(
        &self,
        debts: &[Debt],
        strategy: Strategy,
        extra_monthly: f64,
        lump_sum: Option<LumpSum>,
    ) -> Result<PayoffResult, ValidationError> {
        PayoffEngine::new(self.config(strategy, extra_monthly, lump_sum)).simulate_checked(debts)
    }

    /// Run avalanche and snowball with the extra payment, and minimums without it
    pub fn compare_strategies(
        &self,
        debts: &[Debt],
        extra_monthly: f64,
    ) -> Result<StrategyComparison, ValidationError> {
        validate_debts(debts)?;
        let avalanche = self.config(Strategy::Avalanche, extra_monthly, None);
        let snowball = self.config(Strategy::Snowball, extra_monthly, None);
        let minimums = self.config(Strategy::Minimums, 0.0, None);
        avalanche.validate()?;

        let simulate = |config: PayoffConfig| PayoffEngine::new(config).simulate(debts);
        let (avalanche, (snowball, minimums)) = rayon::join(
            || simulate(avalanche),
            || rayon::join(|| simulate(snowball), || simulate(minimums)),
        );

        Ok(StrategyComparison {
            avalanche,
            snowball,
            minimums,
        })
    }

    /// Avalanche baseline at `baseline_extra` versus the adjusted plan
    pub fn what_if(
        &self,
        debts: &[Debt],
        baseline_extra: f64,
        what_if: &WhatIf,
    ) -> Result<ScenarioComparison, ValidationError> {
        validate_debts(debts)?;
        let baseline_config = self.config(Strategy::Avalanche, baseline_extra, None);
        let scenario_config = self.config(
            Strategy::Avalanche,
            what_if.effective_extra(),
            what_if.effective_lump_sum(),
        );
        baseline_config.validate()?;
        scenario_config.validate()?;

        let (baseline, scenario) = rayon::join(
            || PayoffEngine::new(baseline_config).simulate(debts),
            || PayoffEngine::new(scenario_config).simulate(debts),
        );

        Ok(ScenarioComparison {
            months_saved: baseline.months as i64 - scenario.months as i64,
            interest_saved: round_cents(baseline.total_interest - scenario.total_interest),
            baseline,
            scenario,
        })
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
