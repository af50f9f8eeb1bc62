//! AWS Lambda handler for payoff projections
//!
//! Accepts debts plus an optional household budget and what-if adjustments as
//! JSON, and returns the strategy comparison and scenario deltas.

use chrono::NaiveDate;
use debt_payoff::{
    budget::{Bill, CashFlow, IncomeSource},
    highest_impact_action,
    payoff::{PayoffConfig, PayoffResult, PayoffSummary},
    Debt, ImpactAction, ScenarioRunner, Strategy, ValidationError, WhatIf,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Input for a payoff request
#[derive(Debug, Deserialize)]
pub struct PayoffRequest {
    /// Debts to simulate
    pub debts: Vec<Debt>,

    /// Monthly extra payment (default: half the surplus of income and bills)
    #[serde(default)]
    pub extra_monthly: Option<f64>,

    /// Income sources for the suggested extra payment
    #[serde(default)]
    pub income: Vec<IncomeSource>,

    /// Bills for the suggested extra payment
    #[serde(default)]
    pub bills: Vec<Bill>,

    /// What-if adjustments compared against the avalanche baseline
    #[serde(default)]
    pub what_if: Option<WhatIf>,

    /// Start date for payoff dates (default: today)
    #[serde(default)]
    pub as_of: Option<NaiveDate>,

    /// Include month-by-month timelines (default: true)
    #[serde(default = "default_include_timeline")]
    pub include_timeline: bool,
}

fn default_include_timeline() -> bool { true }

/// Scenario deltas against the baseline
#[derive(Debug, Serialize)]
pub struct WhatIfOutput {
    pub months_saved: i64,
    pub interest_saved: f64,
    pub baseline: PayoffSummary,
    pub scenario: PayoffSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_result: Option<PayoffResult>,
}

/// Output from the handler
#[derive(Debug, Default, Serialize)]
pub struct PayoffResponse {
    pub extra_monthly: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_flow: Option<CashFlow>,
    pub summaries: Vec<PayoffSummary>,
    pub results: Vec<PayoffResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub what_if: Option<WhatIfOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_action: Option<ImpactAction>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn strip_timeline(mut result: PayoffResult, include: bool) -> PayoffResult {
    if !include {
        result.timeline.clear();
    }
    result
}

fn process(request: PayoffRequest) -> Result<PayoffResponse, ValidationError> {
    let cash_flow = if request.income.is_empty() && request.bills.is_empty() {
        None
    } else {
        Some(CashFlow::from_household(&request.income, &request.bills, &request.debts))
    };
    let extra_monthly = request
        .extra_monthly
        .or_else(|| cash_flow.map(|c| c.suggested_extra()))
        .unwrap_or(0.0);

    let mut base = PayoffConfig::default();
    if let Some(as_of) = request.as_of {
        base = base.as_of(as_of);
    }
    let runner = ScenarioRunner::with_config(base);

    let comparison = runner.compare_strategies(&request.debts, extra_monthly)?;
    let summaries = Strategy::ALL.iter().map(|&s| comparison.get(s).summary()).collect();

    let what_if = match &request.what_if {
        Some(w) => {
            let c = runner.what_if(&request.debts, extra_monthly, w)?;
            Some(WhatIfOutput {
                months_saved: c.months_saved,
                interest_saved: c.interest_saved,
                baseline: c.baseline.summary(),
                scenario: c.scenario.summary(),
                scenario_result: Some(strip_timeline(c.scenario, request.include_timeline)),
            })
        }
        None => None,
    };

    let include = request.include_timeline;
    let results = vec![
        strip_timeline(comparison.avalanche, include),
        strip_timeline(comparison.snowball, include),
        strip_timeline(comparison.minimums, include),
    ];

    Ok(PayoffResponse {
        extra_monthly,
        cash_flow,
        summaries,
        results,
        what_if,
        impact_action: highest_impact_action(&request.debts),
        ..Default::default()
    })
}

/// Lambda handler function
async fn handler(event: LambdaEvent<PayoffRequest>) -> Result<PayoffResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;
    info!("payoff request with {} debts", request.debts.len());

    let mut response = match process(request) {
        Ok(response) => response,
        Err(e) => {
            warn!("rejected payoff request: {}", e);
            PayoffResponse {
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    };
    response.execution_time_ms = start.elapsed().as_millis() as u64;

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> PayoffRequest {
        serde_json::from_str(json).expect("valid request JSON")
    }

    #[test]
    fn test_process_with_budget() {
        let response = process(request(
            r#"{
                "debts": [
                    {"id": "1", "name": "Visa", "current_balance": 4200, "starting_balance": 6500,
                     "interest_rate": 0.2199, "minimum_payment": 95, "due_day": 15}
                ],
                "income": [{"id": "1", "name": "Job", "amount": 3000, "frequency": "monthly"}],
                "bills": [{"id": "1", "name": "Rent", "amount": 1400, "frequency": "monthly"}],
                "as_of": "2026-03-01",
                "include_timeline": false
            }"#,
        ))
        .expect("valid input");

        // (3000 - 1400 - 95) * 0.5 floored
        assert_eq!(response.extra_monthly, 752.0);
        assert_eq!(response.summaries.len(), 3);
        assert!(response.results.iter().all(|r| r.timeline.is_empty()));
        assert_eq!(response.impact_action.map(|a| a.debt_id), Some("1".to_string()));
    }

    #[test]
    fn test_process_what_if() {
        let response = process(request(
            r#"{
                "debts": [
                    {"id": "a", "name": "A", "current_balance": 2000, "starting_balance": 2000,
                     "interest_rate": 0.18, "minimum_payment": 60}
                ],
                "extra_monthly": 50,
                "what_if": {"extra_monthly": 50, "lump_sum": {"amount": 500, "debt_id": "a", "month": 2}},
                "as_of": "2026-03-01"
            }"#,
        ))
        .expect("valid input");

        let what_if = response.what_if.expect("what-if output");
        assert!(what_if.months_saved > 0);
        assert!(what_if.interest_saved > 0.0);
        assert!(!response.results[0].timeline.is_empty());
    }

    #[test]
    fn test_process_rejects_duplicate_ids() {
        let err = process(request(
            r#"{
                "debts": [
                    {"id": "a", "name": "A", "current_balance": 100, "starting_balance": 100,
                     "interest_rate": 0.1, "minimum_payment": 10},
                    {"id": "a", "name": "B", "current_balance": 200, "starting_balance": 200,
                     "interest_rate": 0.2, "minimum_payment": 20}
                ]
            }"#,
        ))
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId { id: "a".to_string() });
    }
}
