use crate::domain::scenario::{Allocation, SavingsSummary};
use crate::error::{ScenarioError, ScenarioResult};

/// Splits savings into cash and equity. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationCalculator;

impl AllocationCalculator {
    pub fn compute(&self, savings: f64, equity_pct: f64) -> ScenarioResult<SavingsSummary> {
        if !savings.is_finite() || savings < 0.0 {
            return Err(ScenarioError::InvalidInput(format!(
                "savings must be a non-negative number (got {savings})"
            )));
        }
        if !equity_pct.is_finite() || !(0.0..=100.0).contains(&equity_pct) {
            return Err(ScenarioError::InvalidInput(format!(
                "equity_pct must be between 0 and 100 (got {equity_pct})"
            )));
        }

        let equity_amount = savings * equity_pct / 100.0;
        let cash_amount = savings - equity_amount;

        Ok(SavingsSummary {
            cash_allocation: Allocation {
                amount: cash_amount,
                pct: 100.0 - equity_pct,
            },
            equity_allocation: Allocation {
                amount: equity_amount,
                pct: equity_pct,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn splits_ten_thousand_at_thirty_percent() {
        let s = AllocationCalculator.compute(10_000.0, 30.0).unwrap();
        assert_eq!(s.equity_allocation.amount, 3000.0);
        assert_eq!(s.cash_allocation.amount, 7000.0);
        assert_eq!(s.equity_allocation.pct, 30.0);
        assert_eq!(s.cash_allocation.pct, 70.0);
    }

    #[test]
    fn amounts_always_sum_to_savings() {
        for savings in [0.0, 0.01, 1.0, 999.99, 10_000.0, 1.5e9] {
            for pct in [0.0, 0.5, 12.5, 33.333, 50.0, 99.9, 100.0] {
                let s = AllocationCalculator.compute(savings, pct).unwrap();
                let expected_equity = savings * pct / 100.0;
                let tolerance = EPS * savings.max(1.0);
                assert!((s.equity_allocation.amount - expected_equity).abs() <= tolerance);
                let total = s.cash_allocation.amount + s.equity_allocation.amount;
                assert!((total - savings).abs() <= tolerance);
            }
        }
    }

    #[test]
    fn rejects_out_of_range_pct() {
        for pct in [-1.0, 101.0, f64::NAN, f64::INFINITY] {
            let err = AllocationCalculator.compute(10_000.0, pct).unwrap_err();
            assert!(matches!(err, ScenarioError::InvalidInput(_)), "pct={pct}");
        }
    }

    #[test]
    fn rejects_negative_or_non_finite_savings() {
        for savings in [-0.01, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            let err = AllocationCalculator.compute(savings, 30.0).unwrap_err();
            assert!(matches!(err, ScenarioError::InvalidInput(_)), "savings={savings}");
        }
    }
}
