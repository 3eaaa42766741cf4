//! Per-episode record of visited states, chosen actions and greedy flags.

use crate::types::{Action, AgentState};
use serde::{Deserialize, Serialize};

/// Three parallel sequences with `states.len() == actions.len() + 1 == greedy_flags.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    states: Vec<AgentState>,
    actions: Vec<Action>,
    greedy_flags: Vec<bool>,
}

impl Trajectory {
    /// Creates a trajectory seeded with the state the episode starts in.
    pub fn new(initial: AgentState) -> Self {
        Self {
            states: vec![initial],
            actions: Vec::new(),
            greedy_flags: Vec::new(),
        }
    }

    /// Clears all steps and reseeds with `initial`.
    pub fn restart(&mut self, initial: AgentState) {
        self.states.clear();
        self.states.push(initial);
        self.actions.clear();
        self.greedy_flags.clear();
    }

    pub(crate) fn record_action(&mut self, action: Action, greedy: bool) {
        self.actions.push(action);
        self.greedy_flags.push(greedy);
    }

    pub(crate) fn record_state(&mut self, state: AgentState) {
        self.states.push(state);
    }

    pub fn states(&self) -> &[AgentState] {
        &self.states
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn greedy_flags(&self) -> &[bool] {
        &self.greedy_flags
    }

    /// Number of actions taken.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns `true` when every action has been followed by its next state.
    pub fn is_complete(&self) -> bool {
        self.states.len() == self.actions.len() + 1 && self.greedy_flags.len() == self.actions.len()
    }

    /// Number of steps flagged greedy.
    pub fn greedy_count(&self) -> usize {
        self.greedy_flags.iter().filter(|g| **g).count()
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new(AgentState::High)
    }
}
