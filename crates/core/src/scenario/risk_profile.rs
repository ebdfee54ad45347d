use crate::domain::stock::RiskTier;
use crate::error::{ScenarioError, ScenarioResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        }
    }

    pub fn permitted_tiers(self) -> BTreeSet<RiskTier> {
        let tiers: &[RiskTier] = match self {
            RiskProfile::Conservative => &[RiskTier::Low],
            RiskProfile::Moderate => &[RiskTier::Low, RiskTier::Medium],
            RiskProfile::Aggressive => &RiskTier::ALL,
        };
        tiers.iter().copied().collect()
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        RiskProfile::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| ScenarioError::UnknownRiskProfile(s.to_string()))
    }
}

/// Maps a risk-profile label to the tiers it admits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskProfileResolver;

impl RiskProfileResolver {
    pub fn resolve(&self, label: &str) -> ScenarioResult<(RiskProfile, BTreeSet<RiskTier>)> {
        let profile = label.parse::<RiskProfile>()?;
        Ok((profile, profile.permitted_tiers()))
    }
}
