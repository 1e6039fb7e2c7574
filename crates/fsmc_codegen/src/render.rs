//! Shared traversal for turning a [`Condition`] into text.
//!
//! [`ConditionRenderer`] walks the tree once; a [`RenderStyle`] decides the
//! text of each comparison and the spelling of each logical operator. RTL
//! guards and diagram labels are two styles over the same walk.

use fsmc_common::{BitWidth, FsmcResult, InternalError};
use fsmc_ir::{Comparison, Condition, ConditionFold, Fsm, LogicOp};

/// Rendered text of a subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The text.
    pub text: String,
    /// `true` if the text came from a single comparison.
    pub atomic: bool,
}

/// Per-node text policy.
pub trait RenderStyle {
    /// Renders a comparison leaf; `width` is the width of its left signal.
    fn comparison(&self, cmp: &Comparison, width: BitWidth) -> String;

    /// Spelling of a logical operator, spacing included.
    fn logic_op(&self, op: LogicOp) -> &'static str;

    /// Renders a negation.
    fn negate(&self, operand: Rendered) -> String {
        if operand.atomic {
            format!("{}{}", self.logic_op(LogicOp::Not), operand.text)
        } else {
            format!("{}({})", self.logic_op(LogicOp::Not), operand.text)
        }
    }

    /// Renders a binary `and`/`or`.
    fn combine(&self, op: LogicOp, lhs: Rendered, rhs: Rendered) -> String {
        format!("({}){}({})", lhs.text, self.logic_op(op), rhs.text)
    }
}

/// Looks up the width of any signal of `fsm`: clock, reset, inputs, outputs.
pub fn signal_width(fsm: &Fsm, name: &str) -> Option<BitWidth> {
    if fsm.clock.name == name || fsm.reset.name == name {
        return Some(BitWidth::ONE);
    }
    fsm.input(name)
        .map(|i| i.width)
        .or_else(|| fsm.output(name).map(|o| o.width))
}

/// A [`ConditionFold`] that renders with a given style.
pub struct ConditionRenderer<'a, S: RenderStyle> {
    style: &'a S,
    fsm: &'a Fsm,
}

impl<'a, S: RenderStyle> ConditionRenderer<'a, S> {
    /// Creates a renderer resolving signal widths against `fsm`.
    pub fn new(style: &'a S, fsm: &'a Fsm) -> Self {
        Self { style, fsm }
    }

    /// Renders a whole condition.
    pub fn render(&mut self, cond: &Condition) -> FsmcResult<String> {
        cond.fold(self).map(|r| r.text)
    }
}

impl<S: RenderStyle> ConditionFold for ConditionRenderer<'_, S> {
    type Output = FsmcResult<Rendered>;

    fn compare(&mut self, cmp: &Comparison) -> FsmcResult<Rendered> {
        let width = signal_width(self.fsm, &cmp.signal)
            .ok_or_else(|| InternalError::missing_signal(&cmp.signal))?;
        Ok(Rendered {
            text: self.style.comparison(cmp, width),
            atomic: true,
        })
    }

    fn not(&mut self, operand: FsmcResult<Rendered>) -> FsmcResult<Rendered> {
        Ok(Rendered {
            text: self.style.negate(operand?),
            atomic: false,
        })
    }

    fn binary(
        &mut self,
        op: LogicOp,
        lhs: FsmcResult<Rendered>,
        rhs: FsmcResult<Rendered>,
    ) -> FsmcResult<Rendered> {
        Ok(Rendered {
            text: self.style.combine(op, lhs?, rhs?),
            atomic: false,
        })
    }
}
