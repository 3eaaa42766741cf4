//! The learning agent: epsilon-greedy selection and the backward-pass episode update.

use super::estimates::EstimateTable;
use super::trajectory::Trajectory;
use crate::config::AgentConfig;
use crate::random::{RandomSource, SeededRng};
use crate::types::{Action, AgentState};
use serde::{Deserialize, Serialize};

/// Counters describing what the agent has done since its last `reset()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStats {
    /// Actions chosen by exploitation.
    pub greedy_steps: u64,
    /// Actions chosen by exploration.
    pub exploratory_steps: u64,
    /// Estimate entries written by `update_policy`.
    pub estimate_updates: u64,
    /// Calls to `update_policy`.
    pub episodes: u64,
}

/// A robot that learns per-(state, action) estimates from whole episodes.
///
/// One simulation step is `select_action`, then the environment's `step`, then
/// `observe_transition`. After the last step of an episode the driver calls
/// `update_policy` with the episode's total reward and `end_of_episode_decay`.
///
/// The agent never clears its trajectory on its own. Call
/// [`begin_episode`](Self::begin_episode) before each episode so the backward
/// pass only scans that episode's steps.
#[derive(Debug, Clone)]
pub struct LearningAgent<R = SeededRng> {
    config: AgentConfig,
    state: AgentState,
    epsilon: f64,
    gamma: f64,
    estimates: EstimateTable,
    trajectory: Trajectory,
    stats: AgentStats,
    rng: R,
}

impl LearningAgent<SeededRng> {
    /// Creates an agent with the given rates, the default decay schedule and an
    /// entropy-seeded generator.
    pub fn new(learning_rate: f64, gamma: f64, epsilon: f64) -> Self {
        Self::with_rng(
            AgentConfig::new(learning_rate, gamma, epsilon),
            SeededRng::from_entropy(),
        )
    }

    /// Creates an agent with a deterministic generator.
    pub fn seeded(config: AgentConfig, seed: u64) -> Self {
        Self::with_rng(config, SeededRng::from_seed(seed))
    }
}

impl Default for LearningAgent<SeededRng> {
    fn default() -> Self {
        Self::with_rng(AgentConfig::default(), SeededRng::from_entropy())
    }
}

impl<R: RandomSource> LearningAgent<R> {
    /// Creates an agent drawing from the given source.
    pub fn with_rng(config: AgentConfig, rng: R) -> Self {
        Self {
            config,
            state: AgentState::High,
            epsilon: config.epsilon,
            gamma: config.gamma,
            estimates: EstimateTable::new(config.initial_estimate),
            trajectory: Trajectory::new(AgentState::High),
            stats: AgentStats::default(),
            rng,
        }
    }

    /// Chooses an action for the current state and records it.
    ///
    /// With probability `epsilon` a legal action is drawn uniformly and flagged
    /// non-greedy, even if it happens to be the best one. Otherwise the action
    /// with the highest estimate is taken (ties go to the first legal action)
    /// and flagged greedy.
    pub fn select_action(&mut self) -> Action {
        let legal = self.state.legal_actions();

        let (action, greedy) = if self.rng.next_unit() < self.epsilon {
            (legal[self.rng.next_index(legal.len())], false)
        } else {
            (self.estimates.best_action(self.state), true)
        };

        if greedy {
            self.stats.greedy_steps += 1;
        } else {
            self.stats.exploratory_steps += 1;
        }
        self.trajectory.record_action(action, greedy);
        action
    }

    /// Records the state the environment moved to and makes it current.
    pub fn observe_transition(&mut self, next_state: AgentState) {
        self.state = next_state;
        self.trajectory.record_state(next_state);
    }

    /// Rewrites the estimates from the recorded trajectory.
    ///
    /// The last action, if greedy, moves toward `total_episode_reward`. Every
    /// earlier greedy action moves toward `gamma` times the estimate of the
    /// action that followed it, with zero immediate reward. The scan runs from
    /// the end and writes in place, so step `i` reads whatever step `i + 1`
    /// holds at that moment. Non-greedy actions are never updated.
    pub fn update_policy(&mut self, total_episode_reward: f64) {
        self.stats.episodes += 1;

        let actions = self.trajectory.actions();
        let greedy = self.trajectory.greedy_flags();
        let steps = actions.len();
        if steps == 0 {
            return;
        }

        let alpha = self.config.learning_rate;
        let mut updates = 0u64;

        let last = steps - 1;
        if greedy[last] {
            self.estimates.nudge(actions[last], total_episode_reward, alpha);
            updates += 1;
        }

        for i in (0..last).rev() {
            if !greedy[i] {
                continue;
            }
            let target = self.gamma * self.estimates.get(actions[i + 1]);
            self.estimates.nudge(actions[i], target, alpha);
            updates += 1;
        }

        self.stats.estimate_updates += updates;
        log::debug!(
            "Backward pass over {} steps ({} greedy) applied {} updates (total reward {})",
            steps,
            self.trajectory.greedy_count(),
            updates,
            total_episode_reward
        );
    }

    /// Decays epsilon by the configured factor, floored at `epsilon_min`.
    pub fn end_of_episode_decay(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
    }

    /// Clears the trajectory and reseeds it with the current state.
    /// Estimates, epsilon and the current state are kept.
    pub fn begin_episode(&mut self) {
        self.trajectory.restart(self.state);
    }

    /// Restores the agent to its freshly constructed condition, except for the
    /// random generator which keeps its position.
    pub fn reset(&mut self) {
        self.state = AgentState::High;
        self.estimates = EstimateTable::new(self.config.initial_estimate);
        self.epsilon = self.config.epsilon;
        self.gamma = self.config.gamma;
        self.trajectory.restart(AgentState::High);
        self.stats = AgentStats::default();
    }

    /// Returns the state the agent is currently in.
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Returns the current exploration rate (epsilon).
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the discount factor (gamma).
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Returns the configuration the agent was built with.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The full estimate table, enumerable by all five legal pairs.
    pub fn estimates(&self) -> &EstimateTable {
        &self.estimates
    }

    /// Returns the current estimate for one (state, action) pair.
    pub fn estimate(&self, action: Action) -> f64 {
        self.estimates.get(action)
    }

    /// Returns the trajectory recorded since the episode began.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Returns the running step and update counters.
    pub fn stats(&self) -> &AgentStats {
        &self.stats
    }
}
