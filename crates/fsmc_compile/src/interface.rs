//! Interface inference: which signals a table reads and drives, and how wide
//! each one is.
//!
//! Guards contribute inputs (both sides of a symbolic comparison); assignment
//! targets contribute outputs. A signal's width is the number of bits needed
//! for the largest literal it is compared with or assigned, or one bit when
//! there is none. Signals with no literal above zero then borrow the widest
//! signal they are symbolically compared with, repeated until nothing
//! changes. Explicit widths from the options override inference and are
//! never widened.

use crate::errors;
use crate::options::CompileOptions;
use fsmc_common::{width_for_value, BitWidth};
use fsmc_diagnostics::DiagnosticSink;
use fsmc_ir::{Input, Operand, Output, TransitionTable};
use std::collections::HashMap;
use tracing::debug;

/// The inferred port list, excluding clock and reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Data inputs in first-seen order.
    pub inputs: Vec<Input>,
    /// Outputs in first-seen order.
    pub outputs: Vec<Output>,
}

/// Names in first-seen order with the largest literal seen for each.
#[derive(Debug, Default)]
struct Collected {
    names: Vec<String>,
    max_literal: HashMap<String, u64>,
}

impl Collected {
    fn touch(&mut self, name: &str) {
        if !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    fn observe(&mut self, name: &str, value: u64) {
        self.touch(name);
        let max = self.max_literal.entry(name.to_string()).or_insert(0);
        *max = (*max).max(value);
    }

    fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn remove(&mut self, name: &str) {
        self.names.retain(|n| n != name);
    }
}

/// A signal's current width and whether it may still be widened.
#[derive(Debug, Clone, Copy)]
struct WidthSlot {
    width: BitWidth,
    propagates: bool,
}

fn initial_width(collected: &Collected, name: &str, fixed: Option<&BitWidth>) -> WidthSlot {
    if let Some(&width) = fixed {
        return WidthSlot {
            width,
            propagates: false,
        };
    }
    let max = collected.max_literal.get(name).copied().unwrap_or(0);
    WidthSlot {
        width: width_for_value(max),
        propagates: max == 0,
    }
}

/// Widens every propagating signal to its widest symbolic partner until a
/// fixpoint is reached. Widths only grow and are bounded, so this terminates.
fn propagate_widths(widths: &mut HashMap<String, WidthSlot>, pairs: &[(String, String)]) {
    loop {
        let mut changed = false;
        for (a, b) in pairs {
            for (target, source) in [(a, b), (b, a)] {
                let Some(source_width) = widths.get(source).map(|s| s.width) else {
                    continue;
                };
                if let Some(slot) = widths.get_mut(target) {
                    if slot.propagates && source_width > slot.width {
                        slot.width = source_width;
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// Infers the input and output lists of `table`.
///
/// Returns `None` after reporting if a signal plays both roles, if output
/// settings name an output nothing assigns, or if a literal or a default does
/// not fit an explicit width.
pub fn infer_interface(
    table: &TransitionTable,
    options: &CompileOptions,
    sink: &DiagnosticSink,
) -> Option<Interface> {
    let mut inputs = Collected::default();
    let mut outputs = Collected::default();
    let mut pairs: Vec<(String, String)> = Vec::new();

    for t in table.transitions() {
        for cmp in t.guard.comparisons() {
            match &cmp.value {
                Operand::Literal(value) => inputs.observe(&cmp.signal, *value),
                Operand::Signal(other) => {
                    inputs.touch(&cmp.signal);
                    inputs.touch(other);
                    pairs.push((cmp.signal.clone(), other.clone()));
                }
            }
        }
        let Some(assignments) = &t.assignments else {
            continue;
        };
        for assign in assignments.assignments().unwrap_or_default() {
            match assign.value {
                Operand::Literal(value) => outputs.observe(assign.target, *value),
                Operand::Signal(other) => {
                    outputs.touch(assign.target);
                    inputs.touch(other);
                    pairs.push((assign.target.to_string(), other.clone()));
                }
            }
        }
    }

    let mut ok = true;
    let fixed_inputs = options
        .input_widths
        .iter()
        .chain([(&options.clock, &BitWidth::ONE), (&options.reset, &BitWidth::ONE)]);
    for (collected, fixed) in [
        (&inputs, fixed_inputs.collect::<Vec<_>>()),
        (&outputs, options.output_widths.iter().collect()),
    ] {
        for (name, width) in fixed {
            let Some(&literal) = collected.max_literal.get(name) else {
                continue;
            };
            if !width.fits(literal) {
                sink.emit(errors::error_literal_too_wide(name, literal, width.bits()));
                ok = false;
            }
        }
    }
    for name in options.output_defaults.keys().chain(options.output_widths.keys()) {
        if !outputs.contains(name) {
            sink.emit(errors::error_unassigned_output(name));
            ok = false;
        }
    }
    for (name, &default) in &options.output_defaults {
        if outputs.contains(name) {
            outputs.observe(name, default);
        }
    }
    for name in options.input_widths.keys() {
        if !inputs.contains(name) {
            sink.emit(errors::warn_unused_input(name));
        }
    }

    inputs.remove(&options.clock);
    inputs.remove(&options.reset);
    for name in &inputs.names {
        if outputs.contains(name) {
            sink.emit(errors::error_role_conflict(name));
            ok = false;
        }
    }
    if outputs.contains(&options.clock) {
        sink.emit(errors::error_role_conflict(&options.clock));
        ok = false;
    }
    if outputs.contains(&options.reset) {
        sink.emit(errors::error_role_conflict(&options.reset));
        ok = false;
    }
    if !ok {
        return None;
    }

    let mut widths: HashMap<String, WidthSlot> = HashMap::new();
    for port in [&options.clock, &options.reset] {
        widths.insert(
            port.clone(),
            WidthSlot {
                width: BitWidth::ONE,
                propagates: false,
            },
        );
    }
    for name in &inputs.names {
        let slot = initial_width(&inputs, name, options.input_widths.get(name));
        widths.insert(name.clone(), slot);
    }
    for name in &outputs.names {
        let slot = initial_width(&outputs, name, options.output_widths.get(name));
        widths.insert(name.clone(), slot);
    }
    propagate_widths(&mut widths, &pairs);

    let width_of = |name: &str| widths.get(name).map_or(BitWidth::ONE, |s| s.width);
    let inputs: Vec<Input> = inputs
        .names
        .iter()
        .map(|name| Input::new(name.clone(), width_of(name)))
        .collect();
    let outputs: Vec<Output> = outputs
        .names
        .iter()
        .map(|name| {
            let default = options.output_defaults.get(name).copied().unwrap_or(0);
            Output::new(name.clone(), width_of(name), default)
        })
        .collect();

    for out in &outputs {
        if !out.width.fits(out.default) {
            sink.emit(errors::error_default_too_wide(
                &out.name,
                out.default,
                out.width.bits(),
            ));
            ok = false;
        }
    }
    if !ok {
        return None;
    }

    debug!(
        inputs = ?inputs.iter().map(|i| format!("{}[{}]", i.name, i.width)).collect::<Vec<_>>(),
        outputs = ?outputs.iter().map(|o| format!("{}[{}]", o.name, o.width)).collect::<Vec<_>>(),
        "inferred interface"
    );
    Some(Interface { inputs, outputs })
}
