//! SystemVerilog generation.
//!
//! The module has a fixed layout: header comment, port list (clock, reset,
//! inputs, outputs), state enumeration with the clocked state register,
//! the next-state `always_comb` block, the output `always_comb` block, and
//! the `endmodule` footer. Literals always use the sized binary form of the
//! signal's declared width.

use crate::render::{signal_width, ConditionRenderer, RenderStyle, Rendered};
use fsmc_common::{sized_binary, BitWidth, FsmcResult, InternalError};
use fsmc_ir::{CmpOp, Comparison, Fsm, LogicOp, Operand, State};
use tracing::debug;

/// Renders guards as SystemVerilog expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtlStyle;

/// Maps a comparator to its SystemVerilog spelling.
pub fn rtl_cmp_op(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "==",
        other => other.as_str(),
    }
}

fn rtl_operand(value: &Operand, width: BitWidth) -> String {
    match value {
        Operand::Literal(v) => sized_binary(*v, width),
        Operand::Signal(name) => name.clone(),
    }
}

impl RenderStyle for RtlStyle {
    fn comparison(&self, cmp: &Comparison, width: BitWidth) -> String {
        format!(
            "{} {} {}",
            cmp.signal,
            rtl_cmp_op(cmp.op),
            rtl_operand(&cmp.value, width)
        )
    }

    fn logic_op(&self, op: LogicOp) -> &'static str {
        match op {
            LogicOp::And => " && ",
            LogicOp::Or => " || ",
            LogicOp::Not => "!",
        }
    }

    fn negate(&self, operand: Rendered) -> String {
        format!("!({})", operand.text)
    }
}

/// Line-oriented text builder with three-space indentation.
#[derive(Default)]
struct Emitter {
    out: String,
}

impl Emitter {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("   ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

/// Generates the SystemVerilog module for `fsm`.
///
/// Fails only on internal inconsistencies, such as a guard naming a signal
/// that is missing from the interface.
pub fn generate_rtl(fsm: &Fsm) -> FsmcResult<String> {
    let mut e = Emitter::default();
    emit_header(&mut e, fsm);
    emit_ports(&mut e, fsm);
    emit_state_register(&mut e, fsm);
    emit_next_state(&mut e, fsm)?;
    emit_outputs(&mut e, fsm)?;
    e.line(0, &format!("endmodule:{}", fsm.name));
    debug!(module = %fsm.name, bytes = e.out.len(), "generated rtl");
    Ok(e.out)
}

fn emit_header(e: &mut Emitter, fsm: &Fsm) {
    let lines = [
        format!("Name: {}.sv", fsm.name),
        "Description: Automatically generated FSM".to_string(),
        format!("Generated by fsmc {}", env!("CARGO_PKG_VERSION")),
    ];
    let width = lines.iter().map(String::len).max().unwrap_or(0);
    for text in &lines {
        e.line(0, &format!("//| {text:<width$} |//"));
    }
    e.blank();
}

fn emit_ports(e: &mut Emitter, fsm: &Fsm) {
    let mut ports: Vec<String> = Vec::new();
    for input in [&fsm.clock, &fsm.reset].into_iter().chain(fsm.inputs.iter()) {
        ports.push(format!("input wire [{}:0] {}", input.width.bits() - 1, input.name));
    }
    for output in &fsm.outputs {
        ports.push(format!("output reg [{}:0] {}", output.width.bits() - 1, output.name));
    }

    e.line(0, &format!("module {} #() (", fsm.name));
    let last = ports.len().saturating_sub(1);
    for (i, port) in ports.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        e.line(1, &format!("{port}{sep}"));
    }
    e.line(0, ");");
    e.blank();
}

fn emit_state_register(e: &mut Emitter, fsm: &Fsm) {
    let states: Vec<&State> = fsm.all_states().collect();
    e.line(0, "typedef enum {");
    let last = states.len().saturating_sub(1);
    for (i, state) in states.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        e.line(1, &format!("{}{sep}", state.name));
    }
    e.line(0, "} State ;");
    e.line(0, "State current_state, next_state ;");
    e.line(
        0,
        &format!(
            "always_ff @(posedge {}, negedge {}) begin",
            fsm.clock.name, fsm.reset.name
        ),
    );
    e.line(1, &format!("if (!{})", fsm.reset.name));
    e.line(2, &format!("current_state <= {} ;", fsm.default_state.name));
    e.line(1, "else");
    e.line(2, "current_state <= next_state ;");
    e.line(0, "end");
    e.blank();
}

fn emit_next_state(e: &mut Emitter, fsm: &Fsm) -> FsmcResult<()> {
    let mut renderer = ConditionRenderer::new(&RtlStyle, fsm);
    e.line(0, "always_comb begin");
    e.line(1, "case(current_state)");
    for state in fsm.all_states() {
        e.line(2, &format!("{}: begin", state.name));
        let mut branches = 0;
        for t in fsm.transitions_from(&state.name) {
            let guard = renderer.render(&t.guard)?;
            let keyword = if branches == 0 { "if" } else { "else if" };
            e.line(3, &format!("{keyword} ({guard})"));
            e.line(4, &format!("next_state = {};", t.dest));
            branches += 1;
        }
        if branches == 0 {
            e.line(3, &format!("next_state = {};", state.name));
        } else {
            e.line(3, "else");
            e.line(4, &format!("next_state = {};", state.name));
        }
        e.line(2, "end");
    }
    e.line(1, "endcase");
    e.line(0, "end");
    e.blank();
    Ok(())
}

/// Repeats each state's guard chain so outputs follow the transition that
/// fired. Rows after the last assigning one are dropped; when nothing fires
/// the defaults stay in place.
fn emit_outputs(e: &mut Emitter, fsm: &Fsm) -> FsmcResult<()> {
    let mut renderer = ConditionRenderer::new(&RtlStyle, fsm);
    e.line(0, "always_comb begin");
    for output in &fsm.outputs {
        e.line(
            1,
            &format!("{} = {} ;", output.name, sized_binary(output.default, output.width)),
        );
    }
    e.line(1, "case(current_state)");
    for state in fsm.all_states() {
        e.line(2, &format!("{}: begin", state.name));
        let rows: Vec<_> = fsm.transitions_from(&state.name).collect();
        let live = rows
            .iter()
            .rposition(|t| t.assignments.is_some())
            .map_or(0, |last| last + 1);
        for (branch, t) in rows[..live].iter().enumerate() {
            let guard = renderer.render(&t.guard)?;
            let keyword = if branch == 0 { "if" } else { "else if" };
            e.line(3, &format!("{keyword} ({guard}) begin"));
            if let Some(assignments) = &t.assignments {
                let assignments = assignments
                    .assignments()
                    .map_err(|err| InternalError::new(format!("transition {}: {err}", t.order)))?;
                for assign in assignments {
                    let width = signal_width(fsm, assign.target)
                        .ok_or_else(|| InternalError::missing_signal(assign.target))?;
                    e.line(
                        4,
                        &format!("{} = {} ;", assign.target, rtl_operand(assign.value, width)),
                    );
                }
            }
            e.line(3, "end");
        }
        e.line(2, "end");
    }
    e.line(1, "endcase");
    e.line(0, "end");
    e.blank();
    Ok(())
}
