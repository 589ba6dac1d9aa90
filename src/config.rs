//! Search configuration.
//!
//! Every knob of the turn planner in one struct. Loaded from a JSON file
//! where missing fields take their defaults; command-line flags override
//! individual values afterwards.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::eval::EvalWeights;
use crate::movegen::{
    AttackStrategy, ReinforcementStrategy, TransferWeights, ALL_ATTACK_STRATEGIES,
    DEFAULT_FORTIFY_SHARE, MAX_ATTACK_BRANCHES,
};
use crate::resolve::DEFAULT_TRIALS;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Parameters of one turn search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Layers of the tree, root included.
    pub max_depth: u32,
    /// UCB exploration constant.
    pub exploration: f64,
    /// Simulated battles per win-probability estimate.
    pub trials: u32,
    /// Hard cap on select/expand/simulate/backpropagate cycles.
    pub max_iterations: u32,
    /// Most attack branches one strategy may add to a node.
    pub max_attack_branches: usize,
    /// Strategies run for every attack expansion, in order.
    pub attack_strategies: Vec<AttackStrategy>,
    pub reinforcement: ReinforcementStrategy,
    pub transfer: TransferWeights,
    /// Fraction of a weak territory's neighbor garrison pulled in when
    /// fortifying.
    pub fortify_share: f64,
    pub eval: EvalWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 4,
            exploration: 1.5,
            trials: DEFAULT_TRIALS,
            max_iterations: 10_000,
            max_attack_branches: MAX_ATTACK_BRANCHES,
            attack_strategies: ALL_ATTACK_STRATEGIES.to_vec(),
            reinforcement: ReinforcementStrategy::default(),
            transfer: TransferWeights::default(),
            fortify_share: DEFAULT_FORTIFY_SHARE,
            eval: EvalWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Checks value ranges the search relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth < 2 {
            return Err(ConfigError::Invalid(format!(
                "max_depth must be at least 2, got {}",
                self.max_depth
            )));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("max_iterations must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.fortify_share) {
            return Err(ConfigError::Invalid(format!(
                "fortify_share must be within [0, 1], got {}",
                self.fortify_share
            )));
        }
        if let ReinforcementStrategy::KeyTerritories { key_fraction } = self.reinforcement {
            if !(0.0..=1.0).contains(&key_fraction) {
                return Err(ConfigError::Invalid(format!(
                    "key_fraction must be within [0, 1], got {key_fraction}"
                )));
            }
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

/// Loads and validates a search configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<SearchConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_config_from_str(&data)
}

/// Loads and validates a search configuration from a JSON string.
pub fn load_config_from_str(json: &str) -> Result<SearchConfig, ConfigError> {
    let config: SearchConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.exploration, 1.5);
        assert_eq!(config.trials, 100_000);
        assert_eq!(config.attack_strategies.len(), 3);
    }

    #[test]
    fn empty_object_gives_defaults() {
        let config = load_config_from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "trials": 500,
            "attack_strategies": ["blitz"],
            "reinforcement": { "kind": "weakest_first" },
            "eval": { "strength": 1.0 }
        }"#;
        let config = load_config_from_str(json).unwrap();
        assert_eq!(config.trials, 500);
        assert_eq!(config.attack_strategies, vec![AttackStrategy::Blitz]);
        assert_eq!(config.reinforcement, ReinforcementStrategy::WeakestFirst);
        assert_eq!(config.eval.strength, 1.0);
        assert_eq!(config.eval.coverage, 0.75);
        assert_eq!(config.max_depth, 4);
    }

    #[test]
    fn key_fraction_parses() {
        let json = r#"{ "reinforcement": { "kind": "key_territories", "key_fraction": 0.4 } }"#;
        let config = load_config_from_str(json).unwrap();
        assert_eq!(
            config.reinforcement,
            ReinforcementStrategy::KeyTerritories { key_fraction: 0.4 }
        );
    }

    #[test]
    fn rejects_shallow_depth() {
        let err = load_config_from_str(r#"{ "max_depth": 1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_json() {
        let err = load_config_from_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/conquest.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/conquest.json"));
    }
}
