use crate::domain::stock::{validate_universe, RiskTier, StockCandidate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A source answered, but with candidates that break the universe contract. Retrying does not
/// help, so this is a server-side fault rather than an outage.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("malformed universe: {0}")]
pub struct MalformedUniverse(pub String);

/// Wire shape served by universe sources (HTTP endpoint or JSON file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseResponse {
    pub items: Vec<UniverseItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseItem {
    pub symbol: String,
    #[serde(alias = "risk_tier")]
    pub risk_tiers: TierTags,
    pub unit_price: f64,
}

/// Sources may tag a stock with a single tier or a list of tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TierTags {
    One(RiskTier),
    Many(Vec<RiskTier>),
}

impl TierTags {
    fn into_vec(self) -> Vec<RiskTier> {
        match self {
            TierTags::One(t) => vec![t],
            TierTags::Many(ts) => ts,
        }
    }
}

impl UniverseResponse {
    pub fn validate_and_into_candidates(self) -> Result<Vec<StockCandidate>, MalformedUniverse> {
        let mut out = Vec::with_capacity(self.items.len());
        for item in self.items {
            out.push(item.into_candidate()?);
        }
        validate_universe(&out).map_err(|e| MalformedUniverse(format!("{e:#}")))?;
        Ok(out)
    }
}

impl UniverseItem {
    fn into_candidate(self) -> Result<StockCandidate, MalformedUniverse> {
        // Keep the symbol error out of the chain: it is a caller-fault type.
        let symbol = crate::symbol::normalize_symbol(&self.symbol).map_err(|e| {
            MalformedUniverse(format!("universe item has invalid symbol: {e}"))
        })?;
        Ok(StockCandidate::new(
            symbol,
            self.risk_tiers.into_vec(),
            self.unit_price,
        ))
    }
}
