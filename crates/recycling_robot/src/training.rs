//! The episode driver: runs epochs, whole training runs and repeated runs.

use crate::config::SimulationConfig;
use crate::dynamics::EnvironmentDynamics;
use crate::error::Result;
use crate::learning::{EstimateSnapshot, LearningAgent};
use crate::random::SeededRng;
use serde::{Deserialize, Serialize};

/// Total reward collected in one epoch of one training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub training: usize,
    pub epoch: usize,
    pub total_reward: f64,
}

/// Final estimates of one training run, in result-file column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub training: usize,
    pub low_recharge: f64,
    pub low_search: f64,
    pub low_wait: f64,
    pub high_search: f64,
    pub high_wait: f64,
}

impl PolicyRecord {
    fn new(training: usize, snapshot: EstimateSnapshot) -> Self {
        Self {
            training,
            low_recharge: snapshot.low_recharge,
            low_search: snapshot.low_search,
            low_wait: snapshot.low_wait,
            high_search: snapshot.high_search,
            high_wait: snapshot.high_wait,
        }
    }
}

/// Everything recorded by [`Trainer::run_multiple_training`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub epochs: Vec<EpochRecord>,
    pub policies: Vec<PolicyRecord>,
}

impl TrainingReport {
    /// Mean total reward per epoch index, averaged over all runs that reached it.
    pub fn mean_reward_by_epoch(&self) -> Vec<f64> {
        let len = self.epochs.iter().map(|r| r.epoch + 1).max().unwrap_or(0);
        let mut sums = vec![0.0; len];
        let mut counts = vec![0usize; len];
        for record in &self.epochs {
            sums[record.epoch] += record.total_reward;
            counts[record.epoch] += 1;
        }
        sums.iter()
            .zip(&counts)
            .map(|(sum, &n)| if n == 0 { 0.0 } else { sum / n as f64 })
            .collect()
    }
}

/// Drives a [`LearningAgent`] against [`EnvironmentDynamics`].
pub struct Trainer {
    config: SimulationConfig,
    agent: LearningAgent<SeededRng>,
    env: EnvironmentDynamics<SeededRng>,
    training_counter: usize,
}

impl Trainer {
    /// Validates the configuration and builds the agent and environment.
    ///
    /// With a seed, the agent and the environment get distinct generators
    /// derived from it, so runs are reproducible.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rewards = config.reward_model()?;
        let params = config.transition_parameters()?;

        let (agent_rng, env_rng) = match config.seed {
            Some(seed) => (
                SeededRng::from_seed(seed),
                SeededRng::from_seed(seed.wrapping_add(0x9E37_79B9_7F4A_7C15)),
            ),
            None => (SeededRng::from_entropy(), SeededRng::from_entropy()),
        };

        Ok(Self {
            agent: LearningAgent::with_rng(config.agent, agent_rng),
            env: EnvironmentDynamics::with_rng(params, rewards, env_rng),
            config,
            training_counter: 0,
        })
    }

    /// Runs one episode of `steps_per_epoch` steps, then updates the policy and
    /// decays epsilon.
    pub fn run_epoch(&mut self, epoch: usize) -> EpochRecord {
        self.agent.begin_episode();

        let mut total_reward = 0.0;
        for _ in 0..self.config.steps_per_epoch {
            let action = self.agent.select_action();
            let transition = self.env.step(action);
            self.agent.observe_transition(transition.next_state);
            total_reward += transition.reward;
        }

        self.agent.update_policy(total_reward);
        self.agent.end_of_episode_decay();

        log::debug!(
            "Training {} epoch {}: total reward {:.3}, epsilon {:.4}",
            self.training_counter,
            epoch,
            total_reward,
            self.agent.epsilon()
        );

        EpochRecord {
            training: self.training_counter,
            epoch,
            total_reward,
        }
    }

    /// Runs `epochs` consecutive episodes sharing one estimate table.
    pub fn run_training(&mut self, epochs: usize) -> Vec<EpochRecord> {
        log::info!("Running training {} ({} epochs)", self.training_counter, epochs);
        let records = (0..epochs).map(|epoch| self.run_epoch(epoch)).collect();
        self.training_counter += 1;
        records
    }

    /// Runs `runs` independent trainings, resetting the agent after each one.
    pub fn run_multiple_training(&mut self, runs: usize, epochs: usize) -> TrainingReport {
        let mut report = TrainingReport::default();

        for _ in 0..runs {
            let training = self.training_counter;
            report.epochs.extend(self.run_training(epochs));

            let policy = PolicyRecord::new(training, self.agent.estimates().snapshot());
            log::info!(
                "Training {} finished: high search {:.4}, high wait {:.4}, low search {:.4}, low wait {:.4}, low recharge {:.4}",
                training,
                policy.high_search,
                policy.high_wait,
                policy.low_search,
                policy.low_wait,
                policy.low_recharge
            );
            report.policies.push(policy);

            self.agent.reset();
        }

        report
    }

    /// Runs the configured number of trainings and epochs.
    pub fn run(&mut self) -> TrainingReport {
        let (runs, epochs) = (self.config.runs, self.config.epochs);
        self.run_multiple_training(runs, epochs)
    }

    pub fn agent(&self) -> &LearningAgent<SeededRng> {
        &self.agent
    }

    pub fn environment(&self) -> &EnvironmentDynamics<SeededRng> {
        &self.env
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed training runs.
    pub fn training_counter(&self) -> usize {
        self.training_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::INITIAL_ESTIMATE;
    use crate::types::Action;

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            r_search: 0.0,
            r_wait: 1.0,
            ..SimulationConfig::quick()
        };
        assert!(Trainer::new(config).is_err());
    }

    #[test]
    fn test_run_epoch_records_one_episode() {
        let mut trainer = Trainer::new(SimulationConfig::quick()).unwrap();
        let record = trainer.run_epoch(0);

        assert_eq!(record.training, 0);
        assert_eq!(record.epoch, 0);
        assert!(record.total_reward.is_finite());
        assert_eq!(trainer.agent().trajectory().len(), 100);
        assert!(trainer.agent().trajectory().is_complete());
    }

    #[test]
    fn test_trajectory_is_restarted_each_epoch() {
        let mut trainer = Trainer::new(SimulationConfig::quick()).unwrap();
        trainer.run_epoch(0);
        trainer.run_epoch(1);
        assert_eq!(trainer.agent().trajectory().len(), 100);
    }

    #[test]
    fn test_run_training_counts_epochs() {
        let mut trainer = Trainer::new(SimulationConfig::quick()).unwrap();
        let records = trainer.run_training(4);
        assert_eq!(records.len(), 4);
        assert_eq!(trainer.training_counter(), 1);
        assert_eq!(trainer.agent().stats().episodes, 4);
        assert!(trainer.agent().epsilon() < 0.1);
    }

    #[test]
    fn test_multiple_training_resets_between_runs() {
        let mut trainer = Trainer::new(SimulationConfig::quick()).unwrap();
        let report = trainer.run_multiple_training(3, 5);

        assert_eq!(report.epochs.len(), 15);
        assert_eq!(report.policies.len(), 3);
        for (i, policy) in report.policies.iter().enumerate() {
            assert_eq!(policy.training, i);
        }
        for action in Action::ALL {
            assert_eq!(trainer.agent().estimate(action), INITIAL_ESTIMATE);
        }
        assert_eq!(trainer.agent().epsilon(), 0.1);
    }

    #[test]
    fn test_same_seed_same_report() {
        let a = Trainer::new(SimulationConfig::quick()).unwrap().run();
        let b = Trainer::new(SimulationConfig::quick()).unwrap().run();
        assert_eq!(a, b);
    }

    fn record(training: usize, epoch: usize, total_reward: f64) -> EpochRecord {
        EpochRecord {
            training,
            epoch,
            total_reward,
        }
    }

    #[test]
    fn test_mean_reward_by_epoch() {
        let report = TrainingReport {
            epochs: vec![
                record(0, 0, 1.0),
                record(0, 1, 2.0),
                record(1, 0, 3.0),
                record(1, 1, 6.0),
            ],
            policies: Vec::new(),
        };
        assert_eq!(report.mean_reward_by_epoch(), vec![2.0, 4.0]);
        assert!(TrainingReport::default().mean_reward_by_epoch().is_empty());
    }
}
