//! Transitions and the declared transition table.

use crate::expr::Condition;
use serde::{Deserialize, Serialize};

/// A guarded edge between two states.
///
/// `order` is the declaration position and doubles as the transition's
/// identity. It is the priority order among overlapping guards leaving the
/// same state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Declaration position, starting at 0.
    pub order: usize,
    /// The state this transition leaves.
    pub source: String,
    /// The state this transition enters.
    pub dest: String,
    /// The guard that must hold for the transition to fire.
    pub guard: Condition,
    /// The output assignments applied when the transition fires.
    pub assignments: Option<Condition>,
}

/// The declared, ordered list of transitions.
///
/// Transitions are numbered as they are pushed, so `order` always matches
/// the position in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transition and returns its order.
    pub fn push(
        &mut self,
        source: impl Into<String>,
        dest: impl Into<String>,
        guard: Condition,
        assignments: Option<Condition>,
    ) -> usize {
        let order = self.transitions.len();
        self.transitions.push(Transition {
            order,
            source: source.into(),
            dest: dest.into(),
            guard,
            assignments,
        });
        order
    }

    /// Returns the transitions in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the transition declared at `order`.
    pub fn get(&self, order: usize) -> Option<&Transition> {
        self.transitions.get(order)
    }

    /// Returns the number of transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Returns `true` if no transitions were declared.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Consumes the table, returning its transitions.
    pub fn into_transitions(self) -> Vec<Transition> {
        self.transitions
    }
}
