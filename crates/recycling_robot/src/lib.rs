#![doc = include_str!("../README.md")]
//! # Recycling Robot
//!
//! A battery-powered robot learns when to search, wait and recharge.
//!
//! ## Overview
//!
//! The crate models one fixed Markov Decision Process with two battery states:
//! - **High**: the robot may `Search` or `Wait`
//! - **Low**: the robot may `Search`, `Wait` or `Recharge`
//!
//! Searching pays more than waiting but can drain the battery. Searching on a
//! low battery can deplete it, which costs a fixed penalty and forces the robot
//! back to `High`.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                          Trainer                           │
//! │                                                            │
//! │  ┌───────────────────┐   Action    ┌────────────────────┐  │
//! │  │   LearningAgent   │────────────►│ EnvironmentDynamics│  │
//! │  │                   │             │                    │  │
//! │  │ • EstimateTable   │◄────────────│ • Transition params│  │
//! │  │ • Trajectory      │ next state, │ • RewardModel      │  │
//! │  │ • epsilon-greedy  │   reward    │                    │  │
//! │  └───────────────────┘             └────────────────────┘  │
//! │            │ once per episode                              │
//! │            ▼                                               │
//! │     update_policy(total reward) ──► ReportWriter (CSV)     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use recycling_robot::{SimulationConfig, Trainer};
//!
//! let config = SimulationConfig::quick();
//! let mut trainer = Trainer::new(config).unwrap();
//! let report = trainer.run();
//!
//! assert_eq!(report.policies.len(), 1);
//! assert!(report.epochs.iter().all(|r| r.total_reward.is_finite()));
//! ```

pub mod config;
pub mod dynamics;
pub mod error;
pub mod learning;
pub mod random;
pub mod report;
pub mod reward;
pub mod training;
pub mod types;

pub use config::{AgentConfig, SimulationConfig};
pub use dynamics::{EnvironmentDynamics, Transition, TransitionParameters};
pub use error::{Error, Result};
pub use learning::{
    AgentStats, EstimateSnapshot, EstimateTable, LearningAgent, Trajectory, INITIAL_ESTIMATE,
};
pub use random::{RandomSource, ScriptedDraws, SeededRng};
pub use report::{ReportWriter, POLICY_FILE, REWARDS_FILE};
pub use reward::{RewardModel, DEPLETION_PENALTY, RECHARGE_REWARD};
pub use training::{EpochRecord, PolicyRecord, Trainer, TrainingReport};
pub use types::{Action, AgentState, HighAction, LowAction};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a trainer with the default configuration and overrides from the environment.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if an override breaks an invariant.
///
/// # Examples
///
/// ```
/// let trainer = recycling_robot::create_trainer().unwrap();
/// assert_eq!(trainer.training_counter(), 0);
/// ```
pub fn create_trainer() -> Result<Trainer> {
    Trainer::new(SimulationConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trainer() {
        let trainer = create_trainer().unwrap();
        assert_eq!(trainer.agent().state(), AgentState::High);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
