//! The compiled state machine aggregate.

use crate::group::GroupMap;
use crate::signal::{Input, Output};
use crate::state::State;
use crate::transition::Transition;
use serde::{Deserialize, Serialize};

/// How outputs are derived.
///
/// Only Mealy machines (outputs attached to transitions) are generated; the
/// Moore variant exists so a table can name it and be rejected explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineKind {
    /// Outputs depend on the current state and the taken transition.
    #[default]
    Mealy,
    /// Outputs depend on the current state only.
    Moore,
}

/// A fully compiled finite-state machine.
///
/// Owns every signal, state and transition. `states` holds the non-default
/// states in discovery order; [`all_states`](Self::all_states) yields the
/// default state first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fsm {
    /// Module name used for the generated RTL and output files.
    pub name: String,
    /// The machine kind.
    pub kind: MachineKind,
    /// The clock input.
    pub clock: Input,
    /// The active-low reset input.
    pub reset: Input,
    /// Data inputs in first-seen order, excluding clock and reset.
    pub inputs: Vec<Input>,
    /// Outputs in first-seen order.
    pub outputs: Vec<Output>,
    /// The reset state.
    pub default_state: State,
    /// The remaining states in discovery order.
    pub states: Vec<State>,
    /// Transitions in declaration order.
    pub transitions: Vec<Transition>,
    /// Equivalence group of each transition.
    pub groups: GroupMap,
}

impl Fsm {
    /// Returns every state, default state first.
    pub fn all_states(&self) -> impl Iterator<Item = &State> {
        std::iter::once(&self.default_state).chain(self.states.iter())
    }

    /// Looks up a data input by name.
    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// Looks up an output by name.
    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.name == name)
    }

    /// Returns the transitions leaving `state`, in declaration order.
    pub fn transitions_from<'a>(&'a self, state: &'a str) -> impl Iterator<Item = &'a Transition> {
        self.transitions.iter().filter(move |t| t.source == state)
    }

    /// Returns the equivalence group of `transition`, or 0 if unassigned.
    pub fn group_of(&self, transition: &Transition) -> u32 {
        self.groups.group(transition.order).unwrap_or(0)
    }
}
