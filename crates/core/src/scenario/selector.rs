use crate::domain::scenario::AlignedStock;
use crate::domain::stock::{RiskTier, StockCandidate};
use std::collections::BTreeSet;

pub const MAX_POSITIONS: usize = 5;

/// Picks at most `max_positions` candidates from the permitted tiers and sizes them by an
/// equal split of the equity amount.
///
/// Ordering is ascending by symbol. A candidate whose share buys less than one unit is
/// dropped and the equity is re-split among the rest of the picked set (no backfill from
/// beyond the cap), so every returned position has a quantity of at least one.
#[derive(Debug, Clone, Copy)]
pub struct StockSelector {
    max_positions: usize,
}

impl Default for StockSelector {
    fn default() -> Self {
        Self {
            max_positions: MAX_POSITIONS,
        }
    }
}

impl StockSelector {
    /// `max_positions` is clamped to `1..=5`.
    pub fn new(max_positions: usize) -> Self {
        Self {
            max_positions: max_positions.clamp(1, MAX_POSITIONS),
        }
    }

    pub fn max_positions(&self) -> usize {
        self.max_positions
    }

    pub fn select(
        &self,
        equity_amount: f64,
        permitted: &BTreeSet<RiskTier>,
        universe: &[StockCandidate],
    ) -> Vec<AlignedStock> {
        let mut picked: Vec<&StockCandidate> =
            universe.iter().filter(|c| c.is_within(permitted)).collect();
        let filtered_len = picked.len();

        picked.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        picked.truncate(self.max_positions);

        if !(equity_amount.is_finite() && equity_amount > 0.0) {
            picked.clear();
        }

        loop {
            if picked.is_empty() {
                tracing::debug!(filtered_len, "no position could be sized");
                return Vec::new();
            }

            let share = equity_amount / picked.len() as f64;
            let before = picked.len();
            picked.retain(|c| illustrative_quantity(share, c.unit_price) > 0);

            if picked.len() == before {
                tracing::debug!(
                    filtered_len,
                    retained = picked.len(),
                    share,
                    "sized illustrative positions"
                );
                return picked
                    .into_iter()
                    .map(|c| AlignedStock {
                        symbol: c.symbol.clone(),
                        risk_profile: c.risk_tiers.clone(),
                        unit_price: c.unit_price,
                        illustrative_quantity: illustrative_quantity(share, c.unit_price),
                    })
                    .collect();
            }
        }
    }
}

fn illustrative_quantity(share: f64, unit_price: f64) -> u64 {
    // Float-to-int `as` saturates and maps NaN to 0.
    (share / unit_price).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(symbol: &str, tiers: &[RiskTier], price: f64) -> StockCandidate {
        StockCandidate::new(symbol, tiers.iter().copied(), price)
    }

    fn permitted(ts: &[RiskTier]) -> BTreeSet<RiskTier> {
        ts.iter().copied().collect()
    }

    fn symbols(out: &[AlignedStock]) -> Vec<&str> {
        out.iter().map(|s| s.symbol.as_str()).collect()
    }

    #[test]
    fn filters_to_permitted_tiers() {
        let universe = vec![
            c("ITC", &[RiskTier::Low], 100.0),
            c("TATAMOTORS", &[RiskTier::High], 100.0),
            c("INFY", &[RiskTier::Medium], 100.0),
            c("HDFCBANK", &[RiskTier::Low], 100.0),
        ];
        let out = StockSelector::default().select(3000.0, &permitted(&[RiskTier::Low]), &universe);
        assert_eq!(symbols(&out), vec!["HDFCBANK", "ITC"]);
        assert!(out.iter().all(|s| s.risk_profile.contains(&RiskTier::Low)));
    }

    #[test]
    fn caps_at_five_in_symbol_order() {
        let universe: Vec<_> = ["G", "B", "F", "A", "E", "C", "D"]
            .iter()
            .map(|s| c(s, &[RiskTier::Low], 10.0))
            .collect();
        let out =
            StockSelector::default().select(5000.0, &permitted(&RiskTier::ALL), &universe);
        assert_eq!(symbols(&out), vec!["A", "B", "C", "D", "E"]);
        assert!(out.iter().all(|s| s.illustrative_quantity == 100));
    }

    #[test]
    fn equal_split_floors_quantities() {
        let universe = vec![
            c("AAA", &[RiskTier::Low], 300.0),
            c("BBB", &[RiskTier::Low], 700.0),
        ];
        let out = StockSelector::default().select(3000.0, &permitted(&[RiskTier::Low]), &universe);
        // 1500 each: floor(1500/300)=5, floor(1500/700)=2.
        assert_eq!(out[0].illustrative_quantity, 5);
        assert_eq!(out[1].illustrative_quantity, 2);
    }

    #[test]
    fn drops_unaffordable_and_resplits_among_survivors() {
        let universe = vec![
            c("AAA", &[RiskTier::Low], 100.0),
            c("BBB", &[RiskTier::Low], 2000.0),
            c("CCC", &[RiskTier::Low], 100.0),
        ];
        // 1000 each first: BBB gets 0 and is dropped; then 1500 each for AAA and CCC.
        let out = StockSelector::default().select(3000.0, &permitted(&[RiskTier::Low]), &universe);
        assert_eq!(symbols(&out), vec!["AAA", "CCC"]);
        assert!(out.iter().all(|s| s.illustrative_quantity == 15));
    }

    #[test]
    fn resplit_grows_the_surviving_positions() {
        let universe = vec![
            c("AAA", &[RiskTier::Low], 900.0),
            c("BBB", &[RiskTier::Low], 5000.0),
            c("CCC", &[RiskTier::Low], 1200.0),
        ];
        // Round 1 at 1000: BBB and CCC drop. Round 2 at 3000: AAA gets 3.
        let out = StockSelector::default().select(3000.0, &permitted(&[RiskTier::Low]), &universe);
        assert_eq!(symbols(&out), vec!["AAA"]);
        assert_eq!(out[0].illustrative_quantity, 3);
    }

    #[test]
    fn does_not_backfill_beyond_the_cap() {
        let mut universe: Vec<_> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|s| c(s, &[RiskTier::Low], 10_000.0))
            .collect();
        universe.push(c("F", &[RiskTier::Low], 1.0));
        let out = StockSelector::default().select(1000.0, &permitted(&[RiskTier::Low]), &universe);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_when_nothing_qualifies_or_nothing_to_invest() {
        let universe = vec![c("TATAMOTORS", &[RiskTier::High], 980.0)];
        assert!(StockSelector::default()
            .select(3000.0, &permitted(&[RiskTier::Low]), &universe)
            .is_empty());
        assert!(StockSelector::default()
            .select(0.0, &permitted(&RiskTier::ALL), &universe)
            .is_empty());
        assert!(StockSelector::default()
            .select(3000.0, &permitted(&RiskTier::ALL), &[])
            .is_empty());
    }

    #[test]
    fn respects_a_smaller_configured_cap() {
        let universe: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|s| c(s, &[RiskTier::Low], 1.0))
            .collect();
        let selector = StockSelector::new(2);
        let out = selector.select(100.0, &permitted(&[RiskTier::Low]), &universe);
        assert_eq!(symbols(&out), vec!["A", "B"]);
        assert_eq!(StockSelector::new(50).max_positions(), MAX_POSITIONS);
        assert_eq!(StockSelector::new(0).max_positions(), 1);
    }
}
