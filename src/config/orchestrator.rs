//! Orchestration facade configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Orchestration facade configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestratorConfig {
    /// Base URL of the deployed agent engine. When absent in
    /// development, the service falls back to the scripted mock binding.
    pub base_url: Option<String>,

    /// API key for the engine
    pub api_key: Option<String>,

    /// Engine identifier reported in health info
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl OrchestratorConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an engine endpoint is configured
    pub fn has_endpoint(&self) -> bool {
        self.base_url.as_ref().is_some_and(|u| !u.is_empty())
    }

    /// Validate orchestrator configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidOrchestratorUrl);
            }
        }

        // The mock fallback is a development convenience only
        if *environment == Environment::Production && !self.has_endpoint() {
            return Err(ValidationError::MissingRequired("ORCHESTRATOR_BASE_URL"));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            engine: default_engine(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_engine() -> String {
    "scheme-crew".to_string()
}

fn default_timeout() -> u64 {
    120
}
