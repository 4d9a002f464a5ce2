//! Account balance snapshot model.

use serde::{Deserialize, Serialize};

/// A point-in-time view of an ad account's spend figures.
///
/// All values are in major currency units. The Graph API reports amounts in
/// minor units (cents), so snapshots are normally built through
/// [`BalanceSnapshot::from_minor_units`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Total spent so far in the current period.
    pub amount_spent: f64,
    /// Configured spend cap for the account.
    pub spend_cap: f64,
    /// Outstanding balance due for payment.
    pub due_amount: f64,
    /// Budget left before the cap is reached (`spend_cap - amount_spent`).
    pub remaining_budget: f64,
}

impl BalanceSnapshot {
    /// Build a snapshot from the Graph API's raw minor-unit figures.
    #[must_use]
    pub fn from_minor_units(amount_spent: i64, balance_due: i64, spend_cap: i64) -> Self {
        Self {
            amount_spent: to_major_units(amount_spent),
            spend_cap: to_major_units(spend_cap),
            due_amount: to_major_units(balance_due),
            remaining_budget: to_major_units(spend_cap - amount_spent),
        }
    }
}

/// Convert a minor-unit amount (cents) to major currency units.
#[allow(clippy::cast_precision_loss)]
fn to_major_units(minor: i64) -> f64 {
    minor as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_units() {
        let snapshot = BalanceSnapshot::from_minor_units(12_345, 6_789, 50_000);

        assert!((snapshot.amount_spent - 123.45).abs() < f64::EPSILON);
        assert!((snapshot.due_amount - 67.89).abs() < f64::EPSILON);
        assert!((snapshot.spend_cap - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remaining_budget_invariant() {
        let snapshot = BalanceSnapshot::from_minor_units(30_000, 10_000, 100_000);

        assert!(
            (snapshot.remaining_budget - (snapshot.spend_cap - snapshot.amount_spent)).abs()
                < f64::EPSILON
        );
        assert!((snapshot.remaining_budget - 700.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_figures() {
        let snapshot = BalanceSnapshot::from_minor_units(0, 0, 0);

        assert!(snapshot.amount_spent.abs() < f64::EPSILON);
        assert!(snapshot.due_amount.abs() < f64::EPSILON);
        assert!(snapshot.remaining_budget.abs() < f64::EPSILON);
    }
}
