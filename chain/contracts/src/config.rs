//! Engine configuration
//!
//! Loaded from JSON or built in code; every field has a default.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Who may trigger a rollback once a swap has expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackPolicy {
    /// Only the sender may roll back.
    #[default]
    SenderOnly,
    /// Any caller may sweep an expired swap back to its sender.
    AnyoneAfterExpiry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rollback_policy: RollbackPolicy,
    /// Timelock must be at least `now + min_lock_duration_secs`.
    pub min_lock_duration_secs: i64,
    /// Timelock may be at most `now + max_lock_duration_secs`, when set.
    pub max_lock_duration_secs: Option<i64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rollback_policy: RollbackPolicy::SenderOnly,
            min_lock_duration_secs: 1,
            max_lock_duration_secs: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_lock_duration_secs <= 0 {
            return Err(ConfigError::NonPositiveMinimum(self.min_lock_duration_secs));
        }
        if let Some(max) = self.max_lock_duration_secs {
            if max < self.min_lock_duration_secs {
                return Err(ConfigError::MaxBelowMin {
                    min: self.min_lock_duration_secs,
                    max,
                });
            }
        }
        Ok(())
    }

    pub fn with_rollback_policy(mut self, policy: RollbackPolicy) -> Self {
        self.rollback_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rollback_policy, RollbackPolicy::SenderOnly);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"rollback_policy": "anyone_after_expiry"}"#).unwrap();
        assert_eq!(config.rollback_policy, RollbackPolicy::AnyoneAfterExpiry);
        assert_eq!(config.min_lock_duration_secs, 1);
    }

    #[test]
    fn test_from_json_rejects_bad_minimum() {
        let result = EngineConfig::from_json(r#"{"min_lock_duration_secs": 0}"#);
        assert_eq!(result, Err(ConfigError::NonPositiveMinimum(0)));
    }

    #[test]
    fn test_from_json_rejects_max_below_min() {
        let result =
            EngineConfig::from_json(r#"{"min_lock_duration_secs": 600, "max_lock_duration_secs": 60}"#);
        assert_eq!(result, Err(ConfigError::MaxBelowMin { min: 600, max: 60 }));
    }

    #[test]
    fn test_from_json_malformed() {
        let result = EngineConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
