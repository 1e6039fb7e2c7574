//! Shape checks run before inference.

use crate::errors;
use crate::options::CompileOptions;
use fsmc_diagnostics::{Diagnostic, DiagnosticSink, Snippet};
use fsmc_ir::{IrError, MachineKind, TransitionTable};

/// Checks that `table` can be compiled under `options`.
///
/// Reports every problem found and returns `false` if any of them is fatal.
pub fn validate_table(
    table: &TransitionTable,
    options: &CompileOptions,
    sink: &DiagnosticSink,
) -> bool {
    let mut ok = true;

    if options.kind == MachineKind::Moore {
        sink.emit(errors::error_moore_unsupported());
        ok = false;
    }
    if table.is_empty() {
        sink.emit(errors::error_empty_table());
        return false;
    }

    for t in table.transitions() {
        if let Some(assignments) = &t.assignments {
            let snippet =
                || Snippet::whole(format!("transition {}, set", t.order), assignments.to_string());
            match assignments.assignments() {
                Ok(_) => {}
                Err(IrError::AssignmentShape(op)) => {
                    sink.emit(errors::error_assignment_shape(op.keyword(), snippet()));
                    ok = false;
                }
                Err(IrError::AssignmentOperator { target, op }) => {
                    sink.emit(errors::error_assignment_operator(&target, &op, snippet()));
                    ok = false;
                }
                Err(other) => {
                    sink.emit(Diagnostic::error(errors::E201, other.to_string()));
                    ok = false;
                }
            }
        }

        let clock_used = t.guard.comparisons().iter().any(|cmp| {
            cmp.signal == options.clock || cmp.value.as_signal() == Some(options.clock.as_str())
        });
        if clock_used {
            let snippet =
                Snippet::whole(format!("transition {}, when", t.order), t.guard.to_string());
            sink.emit(errors::warn_clock_in_guard(&options.clock, snippet));
        }
    }

    ok
}
