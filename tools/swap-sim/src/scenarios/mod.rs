//! Swap scenarios
//!
//! Each scenario runs against a fresh in-memory engine driven by a manual
//! clock and reports counters plus a pass/fail verdict.

pub mod cross_partition;
pub mod expired_refund;
pub mod expiry_race;

use htlc_contracts::config::EngineConfig;
use htlc_contracts::errors::{ConfigError, SwapError, TokenError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::secrets::SecretSource;

/// Result of a scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub swaps_created: u64,
    pub withdrawals: u64,
    pub rollbacks: u64,
    /// Calls the engine refused, all of them expected by the scenario
    pub rejections: u64,
    pub events_emitted: usize,
    pub passed: bool,
    pub details: String,
}

impl ScenarioResult {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            swaps_created: 0,
            withdrawals: 0,
            rollbacks: 0,
            rejections: 0,
            events_emitted: 0,
            passed: false,
            details: String::new(),
        }
    }

    fn failed(name: &str, error: &SimError) -> Self {
        Self {
            details: error.to_string(),
            ..Self::new(name)
        }
    }
}

/// Scenario aborted before reaching its verdict.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("engine config rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("swap call failed: {0}")]
    Swap(#[from] SwapError),

    #[error("token setup failed: {0}")]
    Token(#[from] TokenError),

    #[error("check failed: {0}")]
    Check(String),

    #[error("worker thread panicked")]
    Worker,
}

/// Fail with `SimError::Check` unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl Into<String>) -> Result<(), SimError> {
    if condition {
        Ok(())
    } else {
        Err(SimError::Check(message.into()))
    }
}

/// Knobs shared by all scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    /// Withdraw/rollback races run by `expiry_race`
    pub race_rounds: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            race_rounds: 16,
        }
    }
}

/// Run every scenario with secrets drawn from one seeded stream.
pub fn run_all(seed: u64, config: &ScenarioConfig) -> Vec<ScenarioResult> {
    let mut secrets = SecretSource::new(seed);
    let runs: [(&str, fn(&mut SecretSource, &ScenarioConfig) -> Result<ScenarioResult, SimError>); 3] = [
        (cross_partition::NAME, cross_partition::run),
        (expired_refund::NAME, expired_refund::run),
        (expiry_race::NAME, expiry_race::run),
    ];

    runs.iter()
        .map(|(name, run)| match run(&mut secrets, config) {
            Ok(result) => {
                info!(
                    scenario = %result.name,
                    swaps = result.swaps_created,
                    events = result.events_emitted,
                    passed = result.passed,
                    "scenario finished"
                );
                result
            }
            Err(e) => {
                warn!(scenario = %name, error = %e, "scenario aborted");
                ScenarioResult::failed(name, &e)
            }
        })
        .collect()
}
