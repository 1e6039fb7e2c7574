//! State declarations.

use serde::{Deserialize, Serialize};

/// A named state of the machine.
///
/// Exactly one state of a compiled [`Fsm`](crate::Fsm) has `is_default` set;
/// it is the state entered on reset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// The state name, also used as the enum member in generated RTL.
    pub name: String,
    /// Whether this is the reset state.
    pub is_default: bool,
}

impl State {
    /// Creates a non-default state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_default: false,
        }
    }

    /// Creates the reset state.
    pub fn reset(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_default: true,
        }
    }
}
