//! The error type shared by code generation and the compile stage.

/// Result of a step that can only fail if fsmc itself is wrong.
///
/// Code generation receives an `Fsm` that compilation has
/// already checked: every guard and assignment names a known port, and every
/// assignment is a plain list of `=` writes. Problems with the input table
/// never travel through this type; they are diagnostics.
pub type FsmcResult<T> = Result<T, InternalError>;

/// A broken invariant between compilation and code generation.
///
/// Seeing one of these means a checked machine still contained something the
/// generators cannot express, so the run stops before any file is written.
#[derive(Debug, thiserror::Error)]
#[error("internal compiler error: {message}")]
pub struct InternalError {
    /// What the generator was doing and which item it could not resolve.
    pub message: String,
}

impl InternalError {
    /// Wraps a free-form description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A port referenced by a guard or assignment is absent from the
    /// machine's interface.
    pub fn missing_signal(name: &str) -> Self {
        Self::new(format!("signal `{name}` missing from the interface"))
    }
}
