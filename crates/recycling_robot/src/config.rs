//! Configuration for the agent and for whole training sessions.

use crate::dynamics::TransitionParameters;
use crate::error::{Error, Result};
use crate::learning::INITIAL_ESTIMATE;
use crate::reward::RewardModel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the number of epochs per training run.
pub const ENV_EPOCHS: &str = "RECYCLING_EPOCHS";
/// Environment variable overriding the number of steps per epoch.
pub const ENV_STEPS_PER_EPOCH: &str = "RECYCLING_STEPS_PER_EPOCH";
/// Environment variable overriding the number of independent training runs.
pub const ENV_RUNS: &str = "RECYCLING_RUNS";
/// Environment variable fixing the random seed.
pub const ENV_SEED: &str = "RECYCLING_SEED";
/// Environment variable overriding the output directory.
pub const ENV_DATA_DIR: &str = "RECYCLING_DATA_DIR";
/// Environment variable overriding the initial exploration rate.
pub const ENV_EPSILON: &str = "RECYCLING_EPSILON";

/// Learning parameters of a [`LearningAgent`](crate::LearningAgent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Step size (alpha) applied to every estimate update.
    pub learning_rate: f64,
    /// Discount factor (gamma) for the bootstrapped targets of earlier steps.
    pub gamma: f64,
    /// Initial exploration rate. Restored by `reset()`.
    pub epsilon: f64,
    /// Multiplier applied to epsilon at the end of each episode.
    pub epsilon_decay: f64,
    /// Floor for epsilon decay.
    pub epsilon_min: f64,
    /// Value every estimate starts at.
    pub initial_estimate: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            epsilon_decay: 0.99,
            epsilon_min: 0.01,
            initial_estimate: INITIAL_ESTIMATE,
        }
    }
}

impl AgentConfig {
    /// Creates a configuration with the given rates and the default decay schedule.
    pub fn new(learning_rate: f64, gamma: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            gamma,
            epsilon,
            ..Default::default()
        }
    }

    /// Checks that every parameter is finite and in its meaningful range.
    pub fn validate(&self) -> Result<()> {
        let finite_non_negative = [
            ("learning_rate", self.learning_rate),
            ("gamma", self.gamma),
            ("epsilon_min", self.epsilon_min),
        ];
        for (name, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::invalid(format!(
                "epsilon must be within [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(Error::invalid(format!(
                "epsilon_decay must be within (0, 1], got {}",
                self.epsilon_decay
            )));
        }
        if !self.initial_estimate.is_finite() {
            return Err(Error::invalid("initial_estimate must be finite"));
        }
        Ok(())
    }
}

/// Everything needed to run a training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub r_search: f64,
    pub r_wait: f64,
    pub high_to_low_prob: f64,
    pub deplete_prob: f64,
    pub agent: AgentConfig,
    /// Episodes per training run.
    pub epochs: usize,
    /// Steps per episode.
    pub steps_per_epoch: usize,
    /// Independent training runs, each starting from a fresh estimate table.
    pub runs: usize,
    /// Seed for all generators. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Directory the result files are written to.
    pub data_dir: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            r_search: 0.5,
            r_wait: 0.2,
            high_to_low_prob: 0.3,
            deplete_prob: 0.3,
            agent: AgentConfig::default(),
            epochs: 50,
            steps_per_epoch: 1000,
            runs: 3,
            seed: None,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl SimulationConfig {
    /// Loads the default configuration with overrides from `RECYCLING_*` variables.
    /// Values that do not parse are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(epochs) = env_parse::<usize>(ENV_EPOCHS) {
            config.epochs = epochs;
        }
        if let Some(steps) = env_parse::<usize>(ENV_STEPS_PER_EPOCH) {
            config.steps_per_epoch = steps;
        }
        if let Some(runs) = env_parse::<usize>(ENV_RUNS) {
            config.runs = runs;
        }
        if let Some(seed) = env_parse::<u64>(ENV_SEED) {
            config.seed = Some(seed);
        }
        if let Some(epsilon) = env_parse::<f64>(ENV_EPSILON) {
            config.agent.epsilon = epsilon;
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }

        config
    }

    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        log::info!("Loaded simulation config from {:?}", path);
        Ok(config)
    }

    /// Returns a fast configuration for tests: one short run, fixed seed.
    pub fn quick() -> Self {
        Self {
            epochs: 5,
            steps_per_epoch: 100,
            runs: 1,
            seed: Some(0),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Builds the validated reward model.
    pub fn reward_model(&self) -> Result<RewardModel> {
        RewardModel::new(self.r_search, self.r_wait)
    }

    /// Builds the validated transition parameters.
    pub fn transition_parameters(&self) -> Result<TransitionParameters> {
        TransitionParameters::new(self.high_to_low_prob, self.deplete_prob)
    }

    /// Checks every invariant without building anything.
    pub fn validate(&self) -> Result<()> {
        self.reward_model()?;
        self.transition_parameters()?;
        self.agent.validate()?;
        if self.steps_per_epoch == 0 {
            log::warn!("steps_per_epoch is 0; every episode will be empty");
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
