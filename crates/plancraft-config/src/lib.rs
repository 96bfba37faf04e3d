//! Configuration system for Plancraft.
//!
//! Load solver configuration from TOML or YAML files to control the
//! environment mode, random seed, termination limits, and phase list
//! without code changes. `validate()` rejects invalid configurations at
//! build time; nothing is checked mid-solve.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use plancraft_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     unimproved_step_count_limit = 50
//!
//!     [[phases]]
//!     type = "construction_heuristic"
//!     forager_type = "best_fit"
//!
//!     [[phases]]
//!     type = "local_search"
//!     acceptor_type = "simulated_annealing"
//!     starting_temperature = 2.0
//! "#).unwrap();
//!
//! config.validate().unwrap();
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.phases.len(), 2);
//! ```
//!
//! Use the default config when a file is missing:
//!
//! ```
//! use plancraft_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Environment mode affecting determinism and diagnostic assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Fastest: incremental scoring, no assertions.
    Production,
    /// Deterministic runs from a fixed seed; no assertions.
    #[default]
    Reproducible,
    /// Every move's score is re-verified from scratch and the best score
    /// is checked for silent mutation. Slow; for testing scoring logic.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if diagnostic assertions are enabled.
    pub fn is_full_assert(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Phase configurations, executed in order.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,

    /// Outer-level benchmark configuration.
    #[serde(default)]
    pub bench: Option<BenchConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Returns the configured wall-clock limit, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination
            .as_ref()
            .and_then(|t| t.seconds_spent_limit)
            .map(|secs| Duration::from_secs(secs as u64))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty phase list, negative
    /// termination limits, a non-positive bench parallelism, or phase
    /// options that conflict with the chosen strategy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phases.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one phase must be configured".to_string(),
            ));
        }
        if let Some(termination) = &self.termination {
            termination.validate()?;
        }
        for (index, phase) in self.phases.iter().enumerate() {
            phase
                .validate()
                .map_err(|e| match e {
                    ConfigError::Invalid(msg) => {
                        ConfigError::Invalid(format!("phase {}: {}", index, msg))
                    }
                    other => other,
                })?;
        }
        if let Some(bench) = &self.bench {
            bench.validate()?;
        }
        Ok(())
    }
}

/// Termination limits.
///
/// Fields are signed so that negative values from a config file are
/// representable and rejected by `validate()` instead of wrapping.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Stop after this many wall-clock seconds.
    #[serde(default)]
    pub seconds_spent_limit: Option<i64>,

    /// Stop a phase after this many steps.
    #[serde(default)]
    pub step_count_limit: Option<i64>,

    /// Stop a phase after this many steps without improvement.
    #[serde(default)]
    pub unimproved_step_count_limit: Option<i64>,
}

impl TerminationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("seconds_spent_limit", self.seconds_spent_limit),
            ("step_count_limit", self.step_count_limit),
            (
                "unimproved_step_count_limit",
                self.unimproved_step_count_limit,
            ),
        ] {
            if let Some(v) = value {
                if v < 0 {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be >= 0, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One phase of the solve.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Builds an initial solution entity by entity.
    ConstructionHeuristic {
        #[serde(default)]
        forager_type: ForagerType,
        /// Sort placements by decreasing difficulty (first fit decreasing).
        #[serde(default)]
        sort_entities_by_difficulty: bool,
    },
    /// Improves an initialized solution move by move.
    LocalSearch {
        #[serde(default)]
        acceptor_type: AcceptorType,
        /// Starting temperature; only valid for simulated annealing.
        #[serde(default)]
        starting_temperature: Option<f64>,
        /// Quit a step early after this many accepted moves.
        #[serde(default)]
        accepted_count_limit: Option<i64>,
    },
}

impl PhaseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            PhaseConfig::ConstructionHeuristic { .. } => Ok(()),
            PhaseConfig::LocalSearch {
                acceptor_type,
                starting_temperature,
                accepted_count_limit,
            } => {
                if let Some(limit) = accepted_count_limit {
                    if *limit <= 0 {
                        return Err(ConfigError::Invalid(format!(
                            "accepted_count_limit must be > 0, got {}",
                            limit
                        )));
                    }
                }
                match (acceptor_type, starting_temperature) {
                    (AcceptorType::SimulatedAnnealing, Some(t)) if *t <= 0.0 => {
                        Err(ConfigError::Invalid(format!(
                            "starting_temperature must be > 0, got {}",
                            t
                        )))
                    }
                    (AcceptorType::SimulatedAnnealing, _) => Ok(()),
                    (AcceptorType::HillClimbing, Some(_)) => Err(ConfigError::Invalid(
                        "starting_temperature is only valid for the \
                         simulated_annealing acceptor"
                            .to_string(),
                    )),
                    (AcceptorType::HillClimbing, None) => Ok(()),
                }
            }
        }
    }
}

/// Construction heuristic move-selection strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForagerType {
    /// Take the first doable move.
    FirstFit,
    /// Evaluate all candidates, take the best (ties: first seen).
    #[default]
    BestFit,
}

/// Local search acceptance strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptorType {
    /// Accept only non-worsening moves.
    #[default]
    HillClimbing,
    /// Accept worsening moves with a probability that cools over time.
    SimulatedAnnealing,
}

/// Outer-level benchmark settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BenchConfig {
    /// Number of parallel solver runs. Reduced to the available hardware
    /// concurrency when it exceeds it.
    #[serde(default)]
    pub parallelism: Option<i64>,
}

impl BenchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(p) = self.parallelism {
            if p < 1 {
                return Err(ConfigError::Invalid(format!(
                    "bench parallelism must be >= 1, got {}",
                    p
                )));
            }
        }
        Ok(())
    }
}
