//! Highest-leverage single action, estimated without a full simulation

use crate::debt::Debt;
use crate::payoff::round_cents;
use serde::{Deserialize, Serialize};

/// Extra amount proposed by the advisor (illustrative, not derived from surplus)
pub const SUGGESTED_EXTRA_AMOUNT: f64 = 50.0;

/// A suggested extra payment and its estimated yearly interest saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAction {
    pub debt_id: String,
    pub debt_name: String,
    pub extra_amount: f64,
    pub interest_saved: f64,
}

/// Pick the highest-rate debt and estimate what a fixed extra payment saves
///
/// The saving is an approximation: one month of interest on the extra amount,
/// scaled by the debt's remaining-balance fraction and annualised. It is not
/// what `PayoffEngine` would report for the same extra payment. A debt with
/// no recorded starting balance is treated as fully outstanding.
///
/// Ties on rate go to the first debt in input order.
pub fn highest_impact_action(debts: &[Debt]) -> Option<ImpactAction> {
    let target = debts
        .iter()
        .reduce(|best, d| if d.interest_rate > best.interest_rate { d } else { best })?;

    let remaining_fraction = if target.starting_balance > 0.0 {
        target.current_balance / target.starting_balance
    } else {
        1.0
    };
    let interest_saved = SUGGESTED_EXTRA_AMOUNT * target.monthly_rate() * remaining_fraction * 12.0;

    Some(ImpactAction {
        debt_id: target.id.clone(),
        debt_name: target.name.clone(),
        extra_amount: SUGGESTED_EXTRA_AMOUNT,
        interest_saved: round_cents(interest_saved),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_debts() {
        assert_eq!(highest_impact_action(&[]), None);
    }

    #[test]
    fn test_selects_highest_rate_regardless_of_balance() {
        let debts = vec![
            Debt::new("1", "Mortgage", 250_000.0, 0.05, 1500.0),
            Debt::new("2", "Store Card", 800.0, 0.18, 25.0).with_starting_balance(1600.0),
            Debt::new("3", "Car Loan", 9000.0, 0.12, 300.0),
        ];
        let action = highest_impact_action(&debts).expect("action");

        assert_eq!(action.debt_id, "2");
        assert_eq!(action.debt_name, "Store Card");
        assert_eq!(action.extra_amount, 50.0);
        // 50 * 0.015 * 0.5 * 12
        assert_eq!(action.interest_saved, 4.5);
    }

    #[test]
    fn test_rate_tie_goes_to_first() {
        let debts = vec![
            Debt::new("a", "First", 100.0, 0.2, 10.0),
            Debt::new("b", "Second", 5000.0, 0.2, 10.0),
        ];
        assert_eq!(highest_impact_action(&debts).unwrap().debt_id, "a");
    }

    #[test]
    fn test_zero_starting_balance() {
        let debts = vec![Debt::new("a", "New", 1000.0, 0.24, 30.0).with_starting_balance(0.0)];
        // 50 * 0.02 * 1.0 * 12
        assert_eq!(highest_impact_action(&debts).unwrap().interest_saved, 12.0);
    }
}
