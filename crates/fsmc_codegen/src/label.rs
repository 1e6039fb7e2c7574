//! Compact guard and output text for diagram annotation.

use crate::render::{ConditionRenderer, RenderStyle};
use fsmc_common::{BitWidth, FsmcResult, InternalError};
use fsmc_ir::{CmpOp, Comparison, Condition, Fsm, LogicOp, Operand, Transition};

/// Renders guards as short diagram labels.
///
/// A one-bit signal compared for (in)equality with `0` or `1` becomes its
/// bare or negated name; everything else is `name<op>value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelStyle;

impl RenderStyle for LabelStyle {
    fn comparison(&self, cmp: &Comparison, width: BitWidth) -> String {
        if width == BitWidth::ONE {
            if let Operand::Literal(value @ (0 | 1)) = cmp.value {
                let asserted = match cmp.op {
                    CmpOp::Eq => Some(value == 1),
                    CmpOp::Ne => Some(value == 0),
                    _ => None,
                };
                match asserted {
                    Some(true) => return cmp.signal.clone(),
                    Some(false) => return format!("!{}", cmp.signal),
                    None => {}
                }
            }
        }
        format!("{}{}{}", cmp.signal, cmp.op, cmp.value)
    }

    fn logic_op(&self, op: LogicOp) -> &'static str {
        match op {
            LogicOp::And => "&",
            LogicOp::Or => "|",
            LogicOp::Not => "!",
        }
    }
}

/// Renders a guard as a diagram label.
pub fn guard_label(fsm: &Fsm, guard: &Condition) -> FsmcResult<String> {
    ConditionRenderer::new(&LabelStyle, fsm).render(guard)
}

/// Renders the outputs driven by `transition`: every output in declaration
/// order, with its assigned value or its default.
pub fn output_label(fsm: &Fsm, transition: &Transition) -> FsmcResult<String> {
    let assignments = match &transition.assignments {
        Some(cond) => cond
            .assignments()
            .map_err(|err| InternalError::new(format!("transition {}: {err}", transition.order)))?,
        None => Vec::new(),
    };
    let values: Vec<String> = fsm
        .outputs
        .iter()
        .map(|out| {
            let value = assignments
                .iter()
                .find(|a| a.target == out.name)
                .map_or_else(|| out.default.to_string(), |a| a.value.to_string());
            format!("{} = {value}", out.name)
        })
        .collect();
    Ok(format!("{{{}}}", values.join(", ")))
}

/// Renders the edge label of `transition`: its group, then its outputs.
pub fn edge_label(fsm: &Fsm, transition: &Transition) -> FsmcResult<String> {
    Ok(format!(
        "{}\n{}",
        fsm.group_of(transition),
        output_label(fsm, transition)?
    ))
}

/// Renders the legend: one line per group with its first guard, then the
/// output list.
pub fn legend(fsm: &Fsm) -> FsmcResult<String> {
    let mut text = String::from("Transitions:\n");
    for (group, order) in fsm.groups.representatives() {
        let t = fsm
            .transitions
            .get(order)
            .ok_or_else(|| InternalError::new(format!("group {group} has no transition {order}")))?;
        text.push_str(&format!("{group} --> {}\n", guard_label(fsm, &t.guard)?));
    }
    let names: Vec<&str> = fsm.outputs.iter().map(|o| o.name.as_str()).collect();
    text.push_str(&format!("\nOutputs:\n{{{}}}", names.join(", ")));
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmc_ir::{GroupMap, Input, MachineKind, Output, State, TransitionTable};

    fn fsm_with(guards: Vec<Condition>) -> Fsm {
        let mut table = TransitionTable::new();
        let n = guards.len();
        for guard in guards {
            table.push("A", "B", guard, Some(Condition::eq_literal("count", 3)));
        }
        Fsm {
            name: "ctrl".into(),
            kind: MachineKind::Mealy,
            clock: Input::bit("clk"),
            reset: Input::bit("rst_n"),
            inputs: vec![
                Input::bit("valid"),
                Input::bit("clear"),
                Input::new("mode", BitWidth::new(3)),
            ],
            outputs: vec![
                Output::new("count", BitWidth::new(2), 0),
                Output::new("done", BitWidth::ONE, 1),
            ],
            default_state: State::reset("A"),
            states: vec![State::new("B")],
            transitions: table.into_transitions(),
            groups: GroupMap::from_groups((1..=n as u32).collect()),
        }
    }

    fn label(cond: Condition) -> String {
        let fsm = fsm_with(vec![cond.clone()]);
        guard_label(&fsm, &cond).unwrap()
    }

    #[test]
    fn one_bit_short_forms() {
        assert_eq!(label(Condition::eq_literal("valid", 1)), "valid");
        assert_eq!(label(Condition::eq_literal("valid", 0)), "!valid");
        assert_eq!(
            label(Condition::compare("valid", CmpOp::Ne, Operand::Literal(1))),
            "!valid"
        );
        assert_eq!(
            label(Condition::compare("valid", CmpOp::Ne, Operand::Literal(0))),
            "valid"
        );
    }

    #[test]
    fn wide_signals_keep_operator() {
        assert_eq!(label(Condition::eq_literal("mode", 1)), "mode=1");
        assert_eq!(
            label(Condition::compare("mode", CmpOp::Ge, Operand::Literal(4))),
            "mode>=4"
        );
        assert_eq!(
            label(Condition::compare("valid", CmpOp::Eq, Operand::Signal("clear".into()))),
            "valid=clear"
        );
    }

    #[test]
    fn compound_labels() {
        let cond = Condition::and(
            Condition::eq_literal("valid", 1),
            Condition::not(Condition::eq_literal("clear", 1)),
        );
        assert_eq!(label(cond), "(valid)&(!clear)");
        let cond = Condition::not(Condition::or(
            Condition::eq_literal("valid", 1),
            Condition::eq_literal("clear", 1),
        ));
        assert_eq!(label(cond), "!((valid)|(clear))");
    }

    #[test]
    fn outputs_with_defaults() {
        let fsm = fsm_with(vec![Condition::eq_literal("valid", 1)]);
        assert_eq!(
            edge_label(&fsm, &fsm.transitions[0]).unwrap(),
            "1\n{count = 3, done = 1}"
        );
    }

    #[test]
    fn legend_lists_groups_and_outputs() {
        let fsm = fsm_with(vec![
            Condition::eq_literal("valid", 1),
            Condition::eq_literal("clear", 1),
        ]);
        assert_eq!(
            legend(&fsm).unwrap(),
            "Transitions:\n1 --> valid\n2 --> clear\n\nOutputs:\n{count, done}"
        );
    }
}
