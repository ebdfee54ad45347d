use crate::domain::stock::RiskTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub savings: f64,
    pub equity_pct: f64,
    pub risk_profile: String,
}

impl ScenarioRequest {
    pub fn new(savings: f64, equity_pct: f64, risk_profile: impl Into<String>) -> Self {
        Self {
            savings,
            equity_pct,
            risk_profile: risk_profile.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub amount: f64,
    pub pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub cash_allocation: Allocation,
    pub equity_allocation: Allocation,
}

/// A selected position. `illustrative_quantity` is a display figure, never an order size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedStock {
    pub symbol: String,
    pub risk_profile: BTreeSet<RiskTier>,
    pub unit_price: f64,
    pub illustrative_quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationResult {
    pub savings_summary: SavingsSummary,
    pub aligned_stocks: Vec<AlignedStock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency_note: Option<String>,
}
