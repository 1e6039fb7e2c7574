//! User-facing findings of the fsmc pipeline.
//!
//! Every stage reports problems in the transition table as [`Diagnostic`]s
//! pushed into a shared [`DiagnosticSink`] instead of returning Rust errors.
//! The CLI prints them with a [`DiagnosticRenderer`]: [`TerminalRenderer`]
//! for people and [`JsonRenderer`] for tools.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;
pub mod snippet;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
pub use snippet::Snippet;
