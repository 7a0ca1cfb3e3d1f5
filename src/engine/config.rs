//! Engine configuration.

use crate::error::WorkflowError;
use serde::{Deserialize, Serialize};

/// Which candidates are evaluated when several definitions declare the same
/// `(from, to)` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePolicy {
    /// Only the first declared candidate is evaluated; if its guards reject,
    /// the attempt fails.
    #[default]
    FirstDeclared,
    /// Candidates are tried in declaration order until one passes.
    FirstPassing,
}

/// Options controlling how a [`WorkflowEngine`](super::WorkflowEngine) behaves.
///
/// # Example
///
/// ```rust
/// use flowgate::engine::{CandidatePolicy, EngineConfig};
///
/// let config = EngineConfig::from_json(r#"{ "candidate_policy": "first_passing" }"#).unwrap();
///
/// assert_eq!(config.candidate_policy, CandidatePolicy::FirstPassing);
/// assert!(!config.verify_definition);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub candidate_policy: CandidatePolicy,
    /// Run the definition integrity check at construction
    pub verify_definition: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, WorkflowError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn candidate_policy(mut self, policy: CandidatePolicy) -> Self {
        self.candidate_policy = policy;
        self
    }

    pub fn verify_definition(mut self, verify: bool) -> Self {
        self.verify_definition = verify;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_lazy_first_declared() {
        let config = EngineConfig::default();

        assert_eq!(config.candidate_policy, CandidatePolicy::FirstDeclared);
        assert!(!config.verify_definition);
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = EngineConfig::from_json(r#"{ "candidate_policy": "random" }"#).unwrap_err();
        assert!(matches!(err, WorkflowError::Config(_)));
    }

    #[test]
    fn fluent_setters() {
        let config = EngineConfig::new()
            .candidate_policy(CandidatePolicy::FirstPassing)
            .verify_definition(true);

        assert_eq!(config.candidate_policy, CandidatePolicy::FirstPassing);
        assert!(config.verify_definition);
    }
}
