//! Learning module for the recycling robot.
//!
//! The agent keeps one estimate per legal (state, action) pair and learns from
//! whole episodes. During an episode it only records what it did; once the
//! episode ends, [`LearningAgent::update_policy`] walks the trajectory
//! backwards and rewrites the estimates of greedy steps.
//!
//! ## Example
//!
//! ```rust
//! use recycling_robot::{AgentConfig, EnvironmentDynamics, LearningAgent, RewardModel,
//!     TransitionParameters};
//!
//! let rewards = RewardModel::new(0.5, 0.2).unwrap();
//! let params = TransitionParameters::new(0.3, 0.3).unwrap();
//! let mut env = EnvironmentDynamics::seeded(params, rewards, 1);
//! let mut agent = LearningAgent::seeded(AgentConfig::default(), 2);
//!
//! for _ in 0..10 {
//!     agent.begin_episode();
//!     let mut total = 0.0;
//!     for _ in 0..100 {
//!         let action = agent.select_action();
//!         let transition = env.step(action);
//!         agent.observe_transition(transition.next_state);
//!         total += transition.reward;
//!     }
//!     agent.update_policy(total);
//!     agent.end_of_episode_decay();
//! }
//!
//! assert!(agent.estimates().all_finite());
//! ```

pub mod agent;
pub mod estimates;
pub mod trajectory;

pub use agent::{AgentStats, LearningAgent};
pub use estimates::{EstimateSnapshot, EstimateTable, INITIAL_ESTIMATE};
pub use trajectory::Trajectory;
