use crate::config::Settings;
use crate::domain::contract::{MalformedUniverse, UniverseResponse};
use crate::domain::stock::{validate_universe, RiskTier, StockCandidate};
use crate::universe::StockUniverseProvider;
use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::stock::RiskTier::{High, Low, Medium};

// Reference prices for a handful of Indian large caps. Illustrative only; not live quotes.
const BUILTIN_UNIVERSE: &[(&str, &[RiskTier], f64)] = &[
    ("ADANIENT", &[High], 3100.00),
    ("ASIANPAINT", &[Low], 2850.00),
    ("BHARTIARTL", &[Medium], 1120.00),
    ("HDFCBANK", &[Low], 1450.60),
    ("HINDUNILVR", &[Low], 2400.00),
    ("ICICIBANK", &[Medium], 1080.45),
    ("INFY", &[Low, Medium], 1670.00),
    ("ITC", &[Low], 430.50),
    ("L&T", &[Medium], 3650.00),
    ("NESTLEIND", &[Low], 2500.00),
    ("RELIANCE", &[Medium], 2987.50),
    ("SBIN", &[Medium], 760.20),
    ("TATAMOTORS", &[Medium, High], 980.00),
    ("TCS", &[Low], 4120.30),
    ("ZOMATO", &[High], 185.00),
];

/// In-memory universe, validated at construction.
#[derive(Debug, Clone)]
pub struct StaticUniverseProvider {
    candidates: Vec<StockCandidate>,
}

impl StaticUniverseProvider {
    pub fn new(candidates: Vec<StockCandidate>) -> Result<Self> {
        validate_universe(&candidates).context("invalid static universe")?;
        Ok(Self { candidates })
    }

    pub fn builtin() -> Self {
        let candidates = BUILTIN_UNIVERSE
            .iter()
            .map(|(symbol, tiers, price)| {
                StockCandidate::new(*symbol, tiers.iter().copied(), *price)
            })
            .collect();
        Self { candidates }
    }

    pub fn candidates(&self) -> &[StockCandidate] {
        &self.candidates
    }
}

#[async_trait::async_trait]
impl StockUniverseProvider for StaticUniverseProvider {
    fn provider_name(&self) -> &'static str {
        "builtin_static"
    }

    async fn get_candidates(&self) -> Result<Vec<StockCandidate>> {
        Ok(self.candidates.clone())
    }
}

/// Reads the universe from a JSON file on every call, so edits apply without a restart.
#[derive(Debug, Clone)]
pub struct FileUniverseProvider {
    path: PathBuf,
}

impl FileUniverseProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(settings.require_universe_file()?))
    }
}

#[async_trait::async_trait]
impl StockUniverseProvider for FileUniverseProvider {
    fn provider_name(&self) -> &'static str {
        "json_file"
    }

    async fn get_candidates(&self) -> Result<Vec<StockCandidate>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read universe file {}", self.path.display()))?;
        // A file that is readable but wrong stays wrong until someone edits it.
        let parsed = serde_json::from_str::<UniverseResponse>(&text).map_err(|e| {
            MalformedUniverse(format!("universe file {} is not valid: {e}", self.path.display()))
        })?;
        Ok(parsed.validate_and_into_candidates()?)
    }
}
