pub mod allocation;
pub mod explorer;
pub mod risk_profile;
pub mod selector;

pub use allocation::AllocationCalculator;
pub use explorer::{ExplorerOptions, ScenarioExplorer};
pub use risk_profile::{RiskProfile, RiskProfileResolver};
pub use selector::StockSelector;
