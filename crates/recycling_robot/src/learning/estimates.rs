//! The per-(state, action) estimate table.

use crate::types::{Action, AgentState};
use serde::{Deserialize, Serialize};

/// Initial value of every estimate. Positive so the first greedy choice
/// is not made among zeros.
pub const INITIAL_ESTIMATE: f64 = 0.01;

/// One learned value per legal (state, action) pair.
///
/// Backed by a fixed array indexed by [`Action::index`], so every legal pair
/// always has exactly one entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateTable {
    values: [f64; 5],
}

impl EstimateTable {
    /// Creates a table with every entry set to `initial`.
    pub fn new(initial: f64) -> Self {
        Self {
            values: [initial; 5],
        }
    }

    /// Returns the estimate for `action`.
    pub fn get(&self, action: Action) -> f64 {
        self.values[action.index()]
    }

    /// Overwrites the estimate for `action`.
    pub fn set(&mut self, action: Action, value: f64) {
        self.values[action.index()] = value;
    }

    /// Moves the estimate for `action` toward `target` by `step_size` of the error.
    /// Returns the applied delta.
    pub fn nudge(&mut self, action: Action, target: f64, step_size: f64) -> f64 {
        let slot = &mut self.values[action.index()];
        let delta = step_size * (target - *slot);
        *slot += delta;
        delta
    }

    /// The legal action in `state` with the highest estimate.
    /// Ties go to the action listed first in [`AgentState::legal_actions`].
    pub fn best_action(&self, state: AgentState) -> Action {
        let mut best = state.legal_actions()[0];
        let mut best_value = self.get(best);
        for (action, value) in self.for_state(state).skip(1) {
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        best
    }

    /// Iterates all five `(action, estimate)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        Action::ALL.iter().map(move |&a| (a, self.get(a)))
    }

    /// Iterates the entries belonging to `state`.
    pub fn for_state(&self, state: AgentState) -> impl Iterator<Item = (Action, f64)> + '_ {
        state
            .legal_actions()
            .iter()
            .map(move |&a| (a, self.get(a)))
    }

    /// Returns `true` if every entry is finite.
    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// A flat, named copy of the table for reporting.
    pub fn snapshot(&self) -> EstimateSnapshot {
        use crate::types::{HighAction, LowAction};
        EstimateSnapshot {
            low_recharge: self.get(Action::Low(LowAction::Recharge)),
            low_search: self.get(Action::Low(LowAction::Search)),
            low_wait: self.get(Action::Low(LowAction::Wait)),
            high_search: self.get(Action::High(HighAction::Search)),
            high_wait: self.get(Action::High(HighAction::Wait)),
        }
    }
}

impl Default for EstimateTable {
    fn default() -> Self {
        Self::new(INITIAL_ESTIMATE)
    }
}

/// Named view of an [`EstimateTable`], in result-file column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateSnapshot {
    pub low_recharge: f64,
    pub low_search: f64,
    pub low_wait: f64,
    pub high_search: f64,
    pub high_wait: f64,
}
