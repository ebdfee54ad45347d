use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Qualitative risk bucket a stock is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RiskTier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown risk tier: {s:?}"))
    }
}

/// One entry of the candidate universe. Owned by the universe provider; the engine only
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockCandidate {
    pub symbol: String,
    pub risk_tiers: BTreeSet<RiskTier>,
    pub unit_price: f64,
}

impl StockCandidate {
    pub fn new(
        symbol: impl Into<String>,
        risk_tiers: impl IntoIterator<Item = RiskTier>,
        unit_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            risk_tiers: risk_tiers.into_iter().collect(),
            unit_price,
        }
    }

    /// Admitted only when every tag it carries is permitted.
    pub fn is_within(&self, permitted: &BTreeSet<RiskTier>) -> bool {
        !self.risk_tiers.is_empty() && self.risk_tiers.is_subset(permitted)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let normalized = crate::symbol::normalize_symbol(&self.symbol)?;
        anyhow::ensure!(
            normalized == self.symbol,
            "symbol must be normalized (got {:?}, expected {normalized:?})",
            self.symbol
        );
        anyhow::ensure!(
            !self.risk_tiers.is_empty(),
            "{}: risk_tiers must be non-empty",
            self.symbol
        );
        anyhow::ensure!(
            self.unit_price.is_finite() && self.unit_price > 0.0,
            "{}: unit_price must be positive (got {})",
            self.symbol,
            self.unit_price
        );
        Ok(())
    }
}

/// Checks a whole universe: every candidate valid, symbols unique.
pub fn validate_universe(candidates: &[StockCandidate]) -> anyhow::Result<()> {
    let mut seen = BTreeSet::<&str>::new();
    for c in candidates {
        c.validate()?;
        anyhow::ensure!(
            seen.insert(c.symbol.as_str()),
            "duplicate symbol in universe: {}",
            c.symbol
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers(ts: &[RiskTier]) -> BTreeSet<RiskTier> {
        ts.iter().copied().collect()
    }

    #[test]
    fn parses_tiers_case_insensitively() {
        assert_eq!("low".parse::<RiskTier>().unwrap(), RiskTier::Low);
        assert_eq!(" HIGH ".parse::<RiskTier>().unwrap(), RiskTier::High);
        assert!("extreme".parse::<RiskTier>().is_err());
    }

    #[test]
    fn multi_tagged_candidate_needs_all_tags_permitted() {
        let c = StockCandidate::new("TATAMOTORS", [RiskTier::Medium, RiskTier::High], 980.0);
        assert!(!c.is_within(&tiers(&[RiskTier::Low, RiskTier::Medium])));
        assert!(c.is_within(&tiers(&RiskTier::ALL)));
    }

    #[test]
    fn validate_rejects_bad_prices_and_empty_tags() {
        assert!(StockCandidate::new("ITC", [RiskTier::Low], 0.0).validate().is_err());
        assert!(StockCandidate::new("ITC", [RiskTier::Low], f64::NAN).validate().is_err());
        assert!(StockCandidate::new("ITC", Vec::<RiskTier>::new(), 430.5).validate().is_err());
        assert!(StockCandidate::new("itc", [RiskTier::Low], 430.5).validate().is_err());
        assert!(StockCandidate::new("ITC", [RiskTier::Low], 430.5).validate().is_ok());
    }

    #[test]
    fn validate_universe_rejects_duplicate_symbols() {
        let u = vec![
            StockCandidate::new("ITC", [RiskTier::Low], 430.5),
            StockCandidate::new("ITC", [RiskTier::Low], 431.0),
        ];
        let err = validate_universe(&u).unwrap_err();
        assert!(err.to_string().contains("duplicate symbol"));
    }

    #[test]
    fn tiers_serialize_in_order() {
        let c = StockCandidate::new("INFY", [RiskTier::Medium, RiskTier::Low], 1670.0);
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["risk_tiers"], serde_json::json!(["Low", "Medium"]));
    }
}
