//! Environment dynamics: state transitions and rewards of the recycling MDP.
//!
//! | state | action   | condition                  | next | reward              |
//! |-------|----------|----------------------------|------|---------------------|
//! | High  | Search   | draw < `high_to_low_prob`  | Low  | `r_search`          |
//! | High  | Search   | draw >= `high_to_low_prob` | High | `r_search`          |
//! | High  | Wait     |                            | High | `r_wait`            |
//! | Low   | Search   | draw < `deplete_prob`      | High | [`DEPLETION_PENALTY`] |
//! | Low   | Search   | draw >= `deplete_prob`     | Low  | `r_search`          |
//! | Low   | Wait     |                            | Low  | `r_wait`            |
//! | Low   | Recharge |                            | High | [`RECHARGE_REWARD`]   |
//!
//! Only `Search` consumes a random draw.

use crate::error::{Error, Result};
use crate::random::{RandomSource, SeededRng};
use crate::reward::{RewardModel, DEPLETION_PENALTY, RECHARGE_REWARD};
use crate::types::{Action, AgentState, HighAction, LowAction};
use serde::{Deserialize, Serialize};

/// Probabilities driving the two stochastic transitions.
///
/// Both must be non-negative. Values above `1.0` are accepted but make the
/// corresponding branch certain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionParameters {
    high_to_low_prob: f64,
    deplete_prob: f64,
}

impl TransitionParameters {
    /// Creates validated transition parameters.
    pub fn new(high_to_low_prob: f64, deplete_prob: f64) -> Result<Self> {
        check_probability("high_to_low_prob", high_to_low_prob)?;
        check_probability("deplete_prob", deplete_prob)?;
        Ok(Self {
            high_to_low_prob,
            deplete_prob,
        })
    }

    /// Probability that searching with a high battery drains it to low.
    pub fn high_to_low_prob(&self) -> f64 {
        self.high_to_low_prob
    }

    /// Probability that searching with a low battery depletes it.
    pub fn deplete_prob(&self) -> f64 {
        self.deplete_prob
    }
}

impl<'de> Deserialize<'de> for TransitionParameters {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            high_to_low_prob: f64,
            deplete_prob: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        TransitionParameters::new(raw.high_to_low_prob, raw.deplete_prob)
            .map_err(serde::de::Error::custom)
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(Error::invalid(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    if value > 1.0 {
        log::warn!("{} = {} is above 1.0; that branch always fires", name, value);
    }
    Ok(())
}

/// The outcome of one environment step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub next_state: AgentState,
    pub reward: f64,
}

impl Transition {
    fn new(next_state: AgentState, reward: f64) -> Self {
        Self { next_state, reward }
    }
}

impl From<Transition> for (AgentState, f64) {
    fn from(t: Transition) -> Self {
        (t.next_state, t.reward)
    }
}

/// Samples next states and rewards for the robot's actions.
#[derive(Debug, Clone)]
pub struct EnvironmentDynamics<R = SeededRng> {
    params: TransitionParameters,
    rewards: RewardModel,
    rng: R,
}

impl EnvironmentDynamics<SeededRng> {
    /// Creates dynamics with an entropy-seeded generator.
    pub fn new(high_to_low_prob: f64, deplete_prob: f64, rewards: RewardModel) -> Result<Self> {
        let params = TransitionParameters::new(high_to_low_prob, deplete_prob)?;
        Ok(Self::with_rng(params, rewards, SeededRng::from_entropy()))
    }

    /// Creates dynamics with a deterministic generator.
    pub fn seeded(params: TransitionParameters, rewards: RewardModel, seed: u64) -> Self {
        Self::with_rng(params, rewards, SeededRng::from_seed(seed))
    }
}

impl<R: RandomSource> EnvironmentDynamics<R> {
    /// Creates dynamics drawing from the given source.
    pub fn with_rng(params: TransitionParameters, rewards: RewardModel, rng: R) -> Self {
        Self {
            params,
            rewards,
            rng,
        }
    }

    /// Applies `action` in the state it belongs to and returns the next state and reward.
    pub fn step(&mut self, action: Action) -> Transition {
        match action {
            Action::High(HighAction::Search) => {
                if self.rng.next_unit() < self.params.high_to_low_prob {
                    Transition::new(AgentState::Low, self.rewards.r_search())
                } else {
                    Transition::new(AgentState::High, self.rewards.r_search())
                }
            }
            Action::High(HighAction::Wait) => {
                Transition::new(AgentState::High, self.rewards.r_wait())
            }
            Action::Low(LowAction::Search) => {
                if self.rng.next_unit() < self.params.deplete_prob {
                    Transition::new(AgentState::High, DEPLETION_PENALTY)
                } else {
                    Transition::new(AgentState::Low, self.rewards.r_search())
                }
            }
            Action::Low(LowAction::Wait) => Transition::new(AgentState::Low, self.rewards.r_wait()),
            Action::Low(LowAction::Recharge) => Transition::new(AgentState::High, RECHARGE_REWARD),
        }
    }

    /// Returns the transition probabilities.
    pub fn params(&self) -> &TransitionParameters {
        &self.params
    }

    /// Returns the current reward model.
    pub fn reward_model(&self) -> &RewardModel {
        &self.rewards
    }

    /// Mutable access to the reward model. Its setters keep the ordering invariant.
    pub fn reward_model_mut(&mut self) -> &mut RewardModel {
        &mut self.rewards
    }

    /// Returns the random source, e.g. to inspect scripted draws.
    pub fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedDraws;

    const EPS: f64 = 1e-9;

    fn model() -> RewardModel {
        RewardModel::new(0.5, 0.2).unwrap()
    }

    fn scripted(draw: f64) -> EnvironmentDynamics<ScriptedDraws> {
        let params = TransitionParameters::new(0.3, 0.4).unwrap();
        EnvironmentDynamics::with_rng(params, model(), ScriptedDraws::constant(draw))
    }

    #[test]
    fn test_negative_probability_rejected() {
        assert!(TransitionParameters::new(-0.1, 0.3).is_err());
        assert!(TransitionParameters::new(0.3, -1e-12).is_err());
        assert!(TransitionParameters::new(f64::NAN, 0.3).is_err());
        assert!(EnvironmentDynamics::new(-0.5, 0.3, model()).is_err());
    }

    #[test]
    fn test_non_negative_probabilities_accepted() {
        for p in [0.0, 0.3, 1.0, 1.7] {
            let params = TransitionParameters::new(p, p).unwrap();
            assert_eq!(params.high_to_low_prob(), p);
            assert_eq!(params.deplete_prob(), p);
        }
    }

    #[test]
    fn test_high_wait_is_deterministic() {
        let mut env = scripted(0.0);
        for _ in 0..10 {
            let t = env.step(Action::High(HighAction::Wait));
            assert_eq!(t, Transition::new(AgentState::High, 0.2));
        }
        assert_eq!(env.rng().consumed(), 0);
    }

    #[test]
    fn test_low_recharge_and_wait_are_deterministic() {
        let mut env = scripted(0.0);
        assert_eq!(
            env.step(Action::Low(LowAction::Recharge)),
            Transition::new(AgentState::High, 0.0)
        );
        assert_eq!(
            env.step(Action::Low(LowAction::Wait)),
            Transition::new(AgentState::Low, 0.2)
        );
        assert_eq!(env.rng().consumed(), 0);
    }

    #[test]
    fn test_high_search_threshold() {
        let mut below = scripted(0.3 - EPS);
        assert_eq!(
            below.step(Action::High(HighAction::Search)),
            Transition::new(AgentState::Low, 0.5)
        );

        let mut at = scripted(0.3);
        assert_eq!(
            at.step(Action::High(HighAction::Search)),
            Transition::new(AgentState::High, 0.5)
        );

        let mut above = scripted(0.3 + EPS);
        assert_eq!(
            above.step(Action::High(HighAction::Search)),
            Transition::new(AgentState::High, 0.5)
        );
        assert_eq!(above.rng().consumed(), 1);
    }

    #[test]
    fn test_low_search_threshold() {
        let mut below = scripted(0.4 - EPS);
        assert_eq!(
            below.step(Action::Low(LowAction::Search)),
            Transition::new(AgentState::High, DEPLETION_PENALTY)
        );

        let mut at = scripted(0.4);
        assert_eq!(
            at.step(Action::Low(LowAction::Search)),
            Transition::new(AgentState::Low, 0.5)
        );

        let mut above = scripted(0.4 + EPS);
        assert_eq!(
            above.step(Action::Low(LowAction::Search)),
            Transition::new(AgentState::Low, 0.5)
        );
        assert_eq!(above.rng().consumed(), 1);
    }

    #[test]
    fn test_probability_above_one_always_fires() {
        assert!(EnvironmentDynamics::new(1.7, 1.7, model()).is_ok());

        let params = TransitionParameters::new(1.7, 1.7).unwrap();
        // Draws lie in [0, 1), so even the largest one stays below 1.7
        let draws = ScriptedDraws::new(vec![0.0, 0.5, 0.999_999]);
        let mut env = EnvironmentDynamics::with_rng(params, model(), draws);
        for _ in 0..3 {
            assert_eq!(
                env.step(Action::High(HighAction::Search)),
                Transition::new(AgentState::Low, 0.5)
            );
        }
        for _ in 0..3 {
            assert_eq!(
                env.step(Action::Low(LowAction::Search)),
                Transition::new(AgentState::High, DEPLETION_PENALTY)
            );
        }
    }

    #[test]
    fn test_deserialize_validates_probabilities() {
        let ok: TransitionParameters =
            serde_json::from_str(r#"{"high_to_low_prob":0.3,"deplete_prob":1.5}"#).unwrap();
        assert_eq!(ok, TransitionParameters::new(0.3, 1.5).unwrap());

        let negative: std::result::Result<TransitionParameters, _> =
            serde_json::from_str(r#"{"high_to_low_prob":-0.5,"deplete_prob":0.3}"#);
        assert!(negative.is_err());

        let negative_deplete: std::result::Result<TransitionParameters, _> =
            serde_json::from_str(r#"{"high_to_low_prob":0.3,"deplete_prob":-2.0}"#);
        assert!(negative_deplete.is_err());
    }

    #[test]
    fn test_reward_model_changes_are_visible() {
        let mut env = scripted(0.99);
        env.reward_model_mut().set_r_search(2.0).unwrap();
        assert!(env.reward_model_mut().set_r_wait(3.0).is_err());

        let t = env.step(Action::High(HighAction::Search));
        assert_eq!(t.reward, 2.0);
        assert_eq!(env.step(Action::High(HighAction::Wait)).reward, 0.2);
    }

    #[test]
    fn test_transition_into_tuple() {
        let (state, reward): (AgentState, f64) = Transition::new(AgentState::Low, 0.5).into();
        assert_eq!(state, AgentState::Low);
        assert_eq!(reward, 0.5);
    }

    #[test]
    fn test_seeded_dynamics_reproducible() {
        let params = TransitionParameters::new(0.3, 0.3).unwrap();
        let mut a = EnvironmentDynamics::seeded(params, model(), 11);
        let mut b = EnvironmentDynamics::seeded(params, model(), 11);
        for _ in 0..200 {
            let action = Action::High(HighAction::Search);
            assert_eq!(a.step(action), b.step(action));
        }
    }
}
