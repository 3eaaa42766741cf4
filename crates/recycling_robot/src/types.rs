//! Battery states and the per-state action sets of the recycling robot.

use serde::{Deserialize, Serialize};

/// The robot's battery level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AgentState {
    /// Charged battery. Every episode starts here.
    #[default]
    High,
    /// Depleted battery. Recharging is only possible from here.
    Low,
}

/// Actions available while the battery is `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighAction {
    Search,
    Wait,
}

/// Actions available while the battery is `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LowAction {
    Search,
    Wait,
    Recharge,
}

/// An action tagged with the state it was taken in.
///
/// `Action::High(HighAction::Search)` and `Action::Low(LowAction::Search)` are
/// distinct entries of the estimate table. A `Recharge` in `High` cannot be
/// expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    High(HighAction),
    Low(LowAction),
}

const HIGH_ACTIONS: [Action; 2] = [
    Action::High(HighAction::Search),
    Action::High(HighAction::Wait),
];

const LOW_ACTIONS: [Action; 3] = [
    Action::Low(LowAction::Search),
    Action::Low(LowAction::Wait),
    Action::Low(LowAction::Recharge),
];

impl AgentState {
    /// Both states, `High` first.
    pub const ALL: [AgentState; 2] = [AgentState::High, AgentState::Low];

    /// The legal actions in this state, in tie-breaking order.
    pub fn legal_actions(self) -> &'static [Action] {
        match self {
            AgentState::High => &HIGH_ACTIONS,
            AgentState::Low => &LOW_ACTIONS,
        }
    }

    /// Lowercase name used in result files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::High => "high",
            AgentState::Low => "low",
        }
    }
}

impl Action {
    /// Every legal (state, action) pair, `High` actions first.
    pub const ALL: [Action; 5] = [
        Action::High(HighAction::Search),
        Action::High(HighAction::Wait),
        Action::Low(LowAction::Search),
        Action::Low(LowAction::Wait),
        Action::Low(LowAction::Recharge),
    ];

    /// The state this action belongs to.
    pub fn state(self) -> AgentState {
        match self {
            Action::High(_) => AgentState::High,
            Action::Low(_) => AgentState::Low,
        }
    }

    /// Dense index into [`Action::ALL`].
    pub fn index(self) -> usize {
        match self {
            Action::High(HighAction::Search) => 0,
            Action::High(HighAction::Wait) => 1,
            Action::Low(LowAction::Search) => 2,
            Action::Low(LowAction::Wait) => 3,
            Action::Low(LowAction::Recharge) => 4,
        }
    }

    /// Column-style name, e.g. `low_recharge`.
    pub fn name(self) -> &'static str {
        match self {
            Action::High(HighAction::Search) => "high_search",
            Action::High(HighAction::Wait) => "high_wait",
            Action::Low(LowAction::Search) => "low_search",
            Action::Low(LowAction::Wait) => "low_wait",
            Action::Low(LowAction::Recharge) => "low_recharge",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
