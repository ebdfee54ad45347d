use thiserror::Error;

/// Failures surfaced by the scenario engine.
///
/// `InvalidInput` and `UnknownRiskProfile` are caller faults and carry a message that is
/// safe to show verbatim. The other two are server-side conditions; their message is for
/// logs, not for the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown risk profile: {0:?} (expected one of Conservative, Moderate, Aggressive)")]
    UnknownRiskProfile(String),

    #[error("stock universe unavailable: {0}")]
    DataUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ScenarioError {
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            ScenarioError::InvalidInput(_) | ScenarioError::UnknownRiskProfile(_)
        )
    }

    /// Stable machine-readable kind, used in logs and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioError::InvalidInput(_) => "invalid_input",
            ScenarioError::UnknownRiskProfile(_) => "unknown_risk_profile",
            ScenarioError::DataUnavailable(_) => "data_unavailable",
            ScenarioError::Internal(_) => "internal",
        }
    }
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_faults_are_the_validation_variants() {
        assert!(ScenarioError::InvalidInput("x".into()).is_client_fault());
        assert!(ScenarioError::UnknownRiskProfile("Bogus".into()).is_client_fault());
        assert!(!ScenarioError::DataUnavailable("timeout".into()).is_client_fault());
        assert!(!ScenarioError::Internal("bug".into()).is_client_fault());
    }

    #[test]
    fn unknown_profile_message_names_the_label() {
        let msg = ScenarioError::UnknownRiskProfile("Bogus".into()).to_string();
        assert!(msg.contains("\"Bogus\""));
        assert!(msg.contains("Conservative"));
    }
}
