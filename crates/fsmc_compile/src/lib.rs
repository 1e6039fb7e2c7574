//! Compilation of a transition table into an [`Fsm`].
//!
//! The pipeline runs in one pass: shape validation, interface inference,
//! state derivation, then equivalence partitioning of the guards. User
//! errors are reported to the [`DiagnosticSink`]; any fatal one stops the
//! pipeline and [`compile`] returns `None`, so no partial machine ever
//! reaches code generation.

#![warn(missing_docs)]

pub mod equivalence;
pub mod errors;
pub mod interface;
pub mod options;
pub mod states;
pub mod table;
pub mod validate;

pub use equivalence::{partition, EquivalenceDomain};
pub use interface::{infer_interface, Interface};
pub use options::CompileOptions;
pub use states::{check_state_names, derive_states};
pub use table::build_table;
pub use validate::validate_table;

use fsmc_config::FsmConfig;
use fsmc_diagnostics::DiagnosticSink;
use fsmc_ir::{Fsm, Input, TransitionTable};
use tracing::debug;

/// Compiles `table` under `options`.
pub fn compile(
    table: &TransitionTable,
    options: &CompileOptions,
    sink: &DiagnosticSink,
) -> Option<Fsm> {
    if !validate_table(table, options, sink) {
        return None;
    }
    let Interface { inputs, outputs } = infer_interface(table, options, sink)?;
    let (default_state, states) = derive_states(table, options.default_state.as_deref(), sink)?;
    let signals: Vec<&str> = [options.clock.as_str(), options.reset.as_str()]
        .into_iter()
        .chain(inputs.iter().map(|i| i.name.as_str()))
        .chain(outputs.iter().map(|o| o.name.as_str()))
        .collect();
    if !check_state_names(std::iter::once(&default_state).chain(&states), &signals, sink) {
        return None;
    }

    let clock = Input::bit(options.clock.as_str());
    let reset = Input::bit(options.reset.as_str());
    let mut guard_inputs = inputs.clone();
    guard_inputs.push(clock.clone());
    guard_inputs.push(reset.clone());
    let groups = equivalence::partition(
        table.transitions(),
        &guard_inputs,
        options.max_assignments,
        sink,
    );

    debug!(
        name = %options.name,
        states = states.len() + 1,
        transitions = table.len(),
        groups = groups.group_count(),
        "compiled"
    );
    Some(Fsm {
        name: options.name.clone(),
        kind: options.kind,
        clock,
        reset,
        inputs,
        outputs,
        default_state,
        states,
        transitions: table.transitions().to_vec(),
        groups,
    })
}

/// Lowers and compiles a loaded table file.
pub fn compile_config(config: &FsmConfig, sink: &DiagnosticSink) -> Option<Fsm> {
    let table = build_table(config, sink)?;
    compile(&table, &CompileOptions::from_config(config), sink)
}
