//! Intermediate representation of a compiled finite-state machine.
//!
//! The IR is the data model every later stage reads: [`Input`]/[`Output`]
//! signals, [`State`]s, the [`Condition`] expression tree used for guards and
//! output assignments, the declared [`TransitionTable`], the [`GroupMap`]
//! produced by equivalence partitioning, and the [`Fsm`] aggregate that owns
//! all of them.

#![warn(missing_docs)]

pub mod error;
pub mod expr;
pub mod fsm;
pub mod group;
pub mod signal;
pub mod state;
pub mod transition;

pub use error::IrError;
pub use expr::{Assignment, CmpOp, Comparison, Condition, ConditionFold, LogicOp, Operand};
pub use fsm::{Fsm, MachineKind};
pub use group::GroupMap;
pub use signal::{Input, Output};
pub use state::State;
pub use transition::{Transition, TransitionTable};
