//! Condition expression trees for transition guards and output assignments.
//!
//! A [`Condition`] is a tagged sum type: every consumer (width inference,
//! equivalence evaluation, RTL and label rendering) matches it exhaustively,
//! usually through the shared [`ConditionFold`] traversal.

use crate::error::IrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A comparison operator between a signal and a literal or another signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    /// Equality (`=`).
    Eq,
    /// Inequality (`!=`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl CmpOp {
    /// Every comparator, in the order the textual forms are documented.
    pub const ALL: [CmpOp; 6] = [
        CmpOp::Eq,
        CmpOp::Ne,
        CmpOp::Lt,
        CmpOp::Le,
        CmpOp::Gt,
        CmpOp::Ge,
    ];

    /// Returns the textual form used in table expressions.
    pub fn as_str(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }

    /// Applies the comparison to two unsigned values.
    pub fn evaluate(self, lhs: u64, rhs: u64) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
        }
    }
}

impl FromStr for CmpOp {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CmpOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| IrError::UnknownComparator(s.to_string()))
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOp {
    /// Conjunction (`and`).
    And,
    /// Disjunction (`or`).
    Or,
    /// Negation (`not`).
    Not,
}

impl LogicOp {
    /// Returns the keyword form used in table expressions.
    pub fn keyword(self) -> &'static str {
        match self {
            LogicOp::And => "and",
            LogicOp::Or => "or",
            LogicOp::Not => "not",
        }
    }
}

impl FromStr for LogicOp {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(LogicOp::And),
            "or" => Ok(LogicOp::Or),
            "not" => Ok(LogicOp::Not),
            _ => Err(IrError::UnknownLogicOp(s.to_string())),
        }
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The right-hand side of a comparison: an integer literal or another signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// A non-negative integer literal.
    Literal(u64),
    /// A reference to another signal by name.
    Signal(String),
}

impl Operand {
    /// Returns the literal value, if this is a literal.
    pub fn as_literal(&self) -> Option<u64> {
        match self {
            Operand::Literal(v) => Some(*v),
            Operand::Signal(_) => None,
        }
    }

    /// Returns the referenced signal name, if this is a signal reference.
    pub fn as_signal(&self) -> Option<&str> {
        match self {
            Operand::Literal(_) => None,
            Operand::Signal(name) => Some(name),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "{v}"),
            Operand::Signal(name) => f.write_str(name),
        }
    }
}

/// A leaf comparison `signal <op> value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    /// The signal on the left-hand side.
    pub signal: String,
    /// The comparator.
    pub op: CmpOp,
    /// The literal or signal on the right-hand side.
    pub value: Operand,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.signal, self.op, self.value)
    }
}

/// A boolean condition over named signals.
///
/// Guards may use every node kind. Output assignments are restricted to
/// comparisons joined by [`Condition::And`]; see [`Condition::assignments`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// A leaf comparison.
    Compare(Comparison),
    /// Logical negation.
    Not(Box<Condition>),
    /// Logical conjunction.
    And(Box<Condition>, Box<Condition>),
    /// Logical disjunction.
    Or(Box<Condition>, Box<Condition>),
}

/// A single output assignment taken from an assignment expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// The output being driven.
    pub target: &'a str,
    /// The value driven onto it.
    pub value: &'a Operand,
}

/// A bottom-up traversal over a [`Condition`].
///
/// Implementors decide what each node produces; [`Condition::fold`] supplies
/// the recursion. Renderers, evaluators and collectors share this traversal
/// and differ only in their per-node policy.
pub trait ConditionFold {
    /// The value produced for each node.
    type Output;

    /// Produces the value for a leaf comparison.
    fn compare(&mut self, cmp: &Comparison) -> Self::Output;

    /// Combines the value of a negated operand.
    fn not(&mut self, operand: Self::Output) -> Self::Output;

    /// Combines the values of both sides of an `and`/`or` node.
    fn binary(&mut self, op: LogicOp, lhs: Self::Output, rhs: Self::Output) -> Self::Output;
}

impl Condition {
    /// Creates a comparison leaf.
    pub fn compare(signal: impl Into<String>, op: CmpOp, value: Operand) -> Self {
        Condition::Compare(Comparison {
            signal: signal.into(),
            op,
            value,
        })
    }

    /// Creates `signal = literal`.
    pub fn eq_literal(signal: impl Into<String>, value: u64) -> Self {
        Self::compare(signal, CmpOp::Eq, Operand::Literal(value))
    }

    /// Creates `not operand`.
    pub fn not(operand: Condition) -> Self {
        Condition::Not(Box::new(operand))
    }

    /// Creates `lhs and rhs`.
    pub fn and(lhs: Condition, rhs: Condition) -> Self {
        Condition::And(Box::new(lhs), Box::new(rhs))
    }

    /// Creates `lhs or rhs`.
    pub fn or(lhs: Condition, rhs: Condition) -> Self {
        Condition::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Runs a [`ConditionFold`] over this tree, left operand first.
    pub fn fold<F: ConditionFold>(&self, folder: &mut F) -> F::Output {
        match self {
            Condition::Compare(cmp) => folder.compare(cmp),
            Condition::Not(operand) => {
                let inner = operand.fold(folder);
                folder.not(inner)
            }
            Condition::And(lhs, rhs) => {
                let l = lhs.fold(folder);
                let r = rhs.fold(folder);
                folder.binary(LogicOp::And, l, r)
            }
            Condition::Or(lhs, rhs) => {
                let l = lhs.fold(folder);
                let r = rhs.fold(folder);
                folder.binary(LogicOp::Or, l, r)
            }
        }
    }

    /// Returns every comparison leaf, in left-to-right order.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Condition::Compare(cmp) => out.push(cmp),
            Condition::Not(operand) => operand.collect_comparisons(out),
            Condition::And(lhs, rhs) | Condition::Or(lhs, rhs) => {
                lhs.collect_comparisons(out);
                rhs.collect_comparisons(out);
            }
        }
    }

    /// Flattens an assignment expression into its individual assignments.
    ///
    /// Only `=` comparisons joined by `and` are valid; `or` and `not` nodes
    /// and other comparators are rejected.
    pub fn assignments(&self) -> Result<Vec<Assignment<'_>>, IrError> {
        let mut out = Vec::new();
        self.collect_assignments(&mut out)?;
        Ok(out)
    }

    fn collect_assignments<'a>(&'a self, out: &mut Vec<Assignment<'a>>) -> Result<(), IrError> {
        match self {
            Condition::Compare(cmp) => {
                if cmp.op != CmpOp::Eq {
                    return Err(IrError::AssignmentOperator {
                        target: cmp.signal.clone(),
                        op: cmp.op.to_string(),
                    });
                }
                out.push(Assignment {
                    target: &cmp.signal,
                    value: &cmp.value,
                });
                Ok(())
            }
            Condition::And(lhs, rhs) => {
                lhs.collect_assignments(out)?;
                rhs.collect_assignments(out)
            }
            Condition::Not(_) => Err(IrError::AssignmentShape(LogicOp::Not)),
            Condition::Or(_, _) => Err(IrError::AssignmentShape(LogicOp::Or)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare(cmp) => write!(f, "{cmp}"),
            Condition::Not(operand) => write!(f, "not ({operand})"),
            Condition::And(lhs, rhs) => write!(f, "({lhs}) and ({rhs})"),
            Condition::Or(lhs, rhs) => write!(f, "({lhs}) or ({rhs})"),
        }
    }
}
