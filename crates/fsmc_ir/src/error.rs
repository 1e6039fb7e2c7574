//! Errors raised while constructing or interpreting IR values.

use crate::expr::LogicOp;

/// Errors produced by IR-level conversions and shape checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// A comparison operator outside `=`, `!=`, `<`, `<=`, `>`, `>=`.
    #[error("unsupported comparison operator `{0}`")]
    UnknownComparator(String),

    /// A logical operator outside `and`, `or`, `not`.
    #[error("unsupported logical operator `{0}`")]
    UnknownLogicOp(String),

    /// An `or` or `not` node inside an output-assignment expression.
    #[error("`{0}` is not allowed in an output assignment")]
    AssignmentShape(LogicOp),

    /// An assignment written with a comparator other than `=`.
    #[error("assignment to `{target}` uses `{op}` instead of `=`")]
    AssignmentOperator {
        /// The assigned output.
        target: String,
        /// The comparator that was used.
        op: String,
    },
}
