//! Derivation of the state set and the reset state.

use crate::errors;
use fsmc_diagnostics::DiagnosticSink;
use fsmc_ir::{State, TransitionTable};
use tracing::debug;

/// Derives `(default_state, other_states)` from `table`.
///
/// States are recorded in the order their names first appear as a source or
/// destination. An explicit default that matches a discovered state is
/// marked; one that does not is added as a new state with a warning. With no
/// explicit default the first discovered state is used. Returns `None` only
/// when the table names no state at all and no default was given.
pub fn derive_states(
    table: &TransitionTable,
    default_state: Option<&str>,
    sink: &DiagnosticSink,
) -> Option<(State, Vec<State>)> {
    let mut states: Vec<State> = Vec::new();
    for t in table.transitions() {
        for name in [&t.source, &t.dest] {
            if !states.iter().any(|s| &s.name == name) {
                states.push(State::new(name.clone()));
            }
        }
    }

    match default_state {
        Some(name) => match states.iter_mut().find(|s| s.name == name) {
            Some(state) => state.is_default = true,
            None => {
                sink.emit(errors::warn_default_state_missing(name));
                states.push(State::reset(name));
            }
        },
        None => {
            if let Some(first) = states.first_mut() {
                first.is_default = true;
            }
        }
    }

    let derived = split_default(states, sink);
    if let Some((default, others)) = &derived {
        debug!(
            default = %default.name,
            states = ?others.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "derived states"
        );
    }
    derived
}

/// Reports every state whose name is also a port name. States become enum
/// members in the same scope as the ports, so a clash cannot be emitted.
pub fn check_state_names<'a>(
    states: impl IntoIterator<Item = &'a State>,
    signals: &[&str],
    sink: &DiagnosticSink,
) -> bool {
    let mut ok = true;
    for state in states {
        if signals.contains(&state.name.as_str()) {
            sink.emit(errors::error_state_signal_clash(&state.name));
            ok = false;
        }
    }
    ok
}

/// Splits the marked default state off the list, keeping discovery order for
/// the rest. Falls back to the first state, with a warning, if none is marked.
fn split_default(states: Vec<State>, sink: &DiagnosticSink) -> Option<(State, Vec<State>)> {
    let mut default = None;
    let mut others = Vec::with_capacity(states.len());
    for state in states {
        if state.is_default && default.is_none() {
            default = Some(state);
        } else {
            others.push(state);
        }
    }

    match default {
        Some(default) => Some((default, others)),
        None => {
            if others.is_empty() {
                return None;
            }
            let mut first = others.remove(0);
            sink.emit(errors::warn_default_state_fallback(&first.name));
            first.is_default = true;
            Some((first, others))
        }
    }
}
