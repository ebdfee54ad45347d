use crate::domain::contract::MalformedUniverse;
use crate::domain::scenario::{AlignedStock, ExplorationResult, ScenarioRequest};
use crate::domain::stock::{validate_universe, RiskTier, StockCandidate};
use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::allocation::AllocationCalculator;
use crate::scenario::risk_profile::{RiskProfile, RiskProfileResolver};
use crate::scenario::selector::{StockSelector, MAX_POSITIONS};
use crate::universe::StockUniverseProvider;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_UNIVERSE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ExplorerOptions {
    /// Upper bound on returned positions (1..=5).
    pub max_positions: usize,

    /// Budget for one universe fetch.
    pub universe_timeout: Duration,

    pub include_transparency_note: bool,
}

impl Default for ExplorerOptions {
    fn default() -> Self {
        Self {
            max_positions: MAX_POSITIONS,
            universe_timeout: Duration::from_secs(DEFAULT_UNIVERSE_TIMEOUT_SECS),
            include_transparency_note: true,
        }
    }
}

impl ExplorerOptions {
    pub fn from_env() -> Self {
        let mut out = Self::default();

        if let Ok(s) = std::env::var("EXPLORE_MAX_POSITIONS") {
            if let Ok(n) = s.parse::<usize>() {
                out.max_positions = n.clamp(1, MAX_POSITIONS);
            }
        }

        if let Ok(s) = std::env::var("UNIVERSE_TIMEOUT_SECS") {
            if let Ok(n) = s.parse::<u64>() {
                out.universe_timeout = Duration::from_secs(n.max(1));
            }
        }

        if let Ok(s) = std::env::var("EXPLORE_TRANSPARENCY_NOTE") {
            out.include_transparency_note =
                !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no");
        }

        out
    }
}

/// Runs one scenario: split savings, resolve the profile, fetch the universe, pick positions.
///
/// Holds no per-call state. Share one instance behind an `Arc` across requests.
pub struct ScenarioExplorer {
    provider: Arc<dyn StockUniverseProvider>,
    allocation: AllocationCalculator,
    resolver: RiskProfileResolver,
    selector: StockSelector,
    options: ExplorerOptions,
}

impl ScenarioExplorer {
    pub fn new(provider: Arc<dyn StockUniverseProvider>, options: ExplorerOptions) -> Self {
        Self {
            provider,
            allocation: AllocationCalculator,
            resolver: RiskProfileResolver,
            selector: StockSelector::new(options.max_positions),
            options,
        }
    }

    pub fn provider(&self) -> &dyn StockUniverseProvider {
        self.provider.as_ref()
    }

    pub async fn explore(&self, request: &ScenarioRequest) -> ScenarioResult<ExplorationResult> {
        // Validate before touching the provider.
        self.allocation.compute(request.savings, request.equity_pct)?;
        self.resolver.resolve(&request.risk_profile)?;

        let universe = self.fetch_universe().await?;
        self.explore_with_universe(request, &universe)
    }

    /// Fetches the universe under the configured timeout and checks what came back.
    pub async fn fetch_universe(&self) -> ScenarioResult<Vec<StockCandidate>> {
        let provider = self.provider.provider_name();
        let t0 = Instant::now();

        let fetched =
            tokio::time::timeout(self.options.universe_timeout, self.provider.get_candidates())
                .await;

        let universe = match fetched {
            Ok(Ok(universe)) => universe,
            Ok(Err(err)) => return Err(classify_provider_error(provider, &err)),
            Err(_) => {
                tracing::error!(
                    provider,
                    timeout_ms = self.options.universe_timeout.as_millis(),
                    "universe fetch timed out"
                );
                return Err(ScenarioError::DataUnavailable(format!(
                    "{provider}: timed out after {:?}",
                    self.options.universe_timeout
                )));
            }
        };

        validate_universe(&universe).map_err(|err| {
            tracing::error!(
                provider,
                error = %err,
                "universe provider returned malformed candidates"
            );
            ScenarioError::Internal(format!("{provider}: {err:#}"))
        })?;

        tracing::debug!(
            provider,
            candidates = universe.len(),
            elapsed_ms = t0.elapsed().as_millis(),
            "fetched stock universe"
        );
        Ok(universe)
    }

    /// The synchronous part of [`explore`](Self::explore), over an already fetched universe.
    pub fn explore_with_universe(
        &self,
        request: &ScenarioRequest,
        universe: &[StockCandidate],
    ) -> ScenarioResult<ExplorationResult> {
        let savings_summary = self.allocation.compute(request.savings, request.equity_pct)?;
        let (profile, permitted) = self.resolver.resolve(&request.risk_profile)?;

        let aligned_stocks = self.selector.select(
            savings_summary.equity_allocation.amount,
            &permitted,
            universe,
        );

        // Response invariants.
        if aligned_stocks.len() > self.selector.max_positions()
            || aligned_stocks
                .iter()
                .any(|s| s.illustrative_quantity == 0 || !s.risk_profile.is_subset(&permitted))
        {
            return Err(ScenarioError::Internal(
                "selection violated position constraints".to_string(),
            ));
        }

        tracing::info!(
            risk_profile = %profile,
            equity_amount = savings_summary.equity_allocation.amount,
            universe_len = universe.len(),
            aligned = aligned_stocks.len(),
            "scenario explored"
        );

        let max_positions = self.selector.max_positions();
        let transparency_note = self
            .options
            .include_transparency_note
            .then(|| transparency_note(profile, &permitted, &aligned_stocks, max_positions));

        Ok(ExplorationResult {
            savings_summary,
            aligned_stocks,
            transparency_note,
        })
    }
}

/// Provider failures are never caller faults. Bad data that came back is `Internal`; anything
/// else (transport, timeout inside the provider, unreadable source) is `DataUnavailable`.
fn classify_provider_error(provider: &'static str, err: &anyhow::Error) -> ScenarioError {
    let detail = format!("{err:#}");

    let classified = if err.downcast_ref::<MalformedUniverse>().is_some() {
        ScenarioError::Internal(format!("{provider}: {detail}"))
    } else {
        match err.downcast_ref::<ScenarioError>() {
            Some(ScenarioError::DataUnavailable(m)) => ScenarioError::DataUnavailable(m.clone()),
            Some(ScenarioError::Internal(m)) => ScenarioError::Internal(m.clone()),
            Some(_) => ScenarioError::Internal(format!("{provider}: {detail}")),
            None => ScenarioError::DataUnavailable(format!("{provider}: {detail}")),
        }
    };

    tracing::error!(
        provider,
        kind = classified.kind(),
        error = %detail,
        "universe fetch failed"
    );
    classified
}

fn transparency_note(
    profile: RiskProfile,
    permitted: &BTreeSet<RiskTier>,
    aligned: &[AlignedStock],
    max_positions: usize,
) -> String {
    let tiers = permitted
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join("/");

    let mut note = format!(
        "Illustrative only, not financial advice and not a trade instruction. \
         The equity amount is savings multiplied by the chosen equity percentage. \
         Stocks are limited to {tiers} risk tiers for the {profile} profile, ordered by symbol, \
         capped at {max_positions}, and the equity amount is split equally among them. \
         Quantities are rounded down to whole shares at reference prices; \
         stocks whose share would buy less than one unit are left out."
    );
    if aligned.is_empty() {
        note.push_str(" No stock in the current universe could be sized for this scenario.");
    }
    note
}
