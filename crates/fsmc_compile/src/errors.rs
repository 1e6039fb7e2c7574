//! Diagnostic codes and helper functions for compile errors and warnings.
//!
//! Error codes `E200`--`E208` cover tables that cannot be compiled (empty
//! tables, malformed assignments, role conflicts, unsupported machine
//! kinds, bad signal settings, name clashes). Warning codes `W201`--`W205` cover issues
//! the compiler recovers from.

use fsmc_diagnostics::{Category, Diagnostic, DiagnosticCode, Snippet};

/// The transition table has no rows.
pub const E200: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 200,
};

/// An output assignment contains `or` or `not`.
pub const E201: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 201,
};

/// An output assignment uses a comparator other than `=`.
pub const E202: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 202,
};

/// A signal is used both as an input and as an output.
pub const E203: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 203,
};

/// The requested machine kind is not supported.
pub const E204: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 204,
};

/// Settings were given for an output that no transition assigns.
pub const E205: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 205,
};

/// An output default does not fit the output's declared width.
pub const E206: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 206,
};

/// A literal in the table does not fit a signal's declared width.
pub const E207: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 207,
};

/// A state has the same name as a signal.
pub const E208: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 208,
};

/// The explicit default state does not appear in the table.
pub const W201: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 201,
};

/// No state was marked as default; the first state was used.
pub const W202: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 202,
};

/// The input domain is too large to enumerate.
pub const W203: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 203,
};

/// The clock signal is referenced inside a guard.
pub const W204: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 204,
};

/// Settings were given for an input that no guard references.
pub const W205: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 205,
};

/// Creates a diagnostic for an empty transition table.
pub fn error_empty_table() -> Diagnostic {
    Diagnostic::error(E200, "transition table is empty")
        .with_help("add at least one `[[transitions]]` entry")
}

/// Creates a diagnostic for `or`/`not` inside an output assignment.
pub fn error_assignment_shape(op: &str, snippet: Snippet) -> Diagnostic {
    Diagnostic::error(E201, format!("`{op}` is not allowed in an output assignment"))
        .with_snippet(snippet)
        .with_note("an assignment is a list of simultaneous writes joined with `and`")
}

/// Creates a diagnostic for an assignment written with the wrong comparator.
pub fn error_assignment_operator(target: &str, op: &str, snippet: Snippet) -> Diagnostic {
    Diagnostic::error(
        E202,
        format!("assignment to `{target}` uses `{op}` instead of `=`"),
    )
    .with_snippet(snippet)
}

/// Creates a diagnostic for a signal used as both input and output.
pub fn error_role_conflict(name: &str) -> Diagnostic {
    Diagnostic::error(
        E203,
        format!("signal `{name}` is used both as an input and as an output"),
    )
    .with_help("rename one of them; guards read inputs and assignments drive outputs")
}

/// Creates a diagnostic for a Moore machine request.
pub fn error_moore_unsupported() -> Diagnostic {
    Diagnostic::error(E204, "Moore machines are not supported")
        .with_help("set `fsm.kind = \"mealy\"` and attach outputs to transitions")
}

/// Creates a diagnostic for settings on an output that is never assigned.
pub fn error_unassigned_output(name: &str) -> Diagnostic {
    Diagnostic::error(
        E205,
        format!("output `{name}` is configured but never assigned by any transition"),
    )
}

/// Creates a diagnostic for an output default wider than its declared width.
pub fn error_default_too_wide(name: &str, default: u64, width: u32) -> Diagnostic {
    Diagnostic::error(
        E206,
        format!("default value {default} of output `{name}` does not fit in {width} bit(s)"),
    )
}

/// Creates a diagnostic for a literal wider than a signal's fixed width.
pub fn error_literal_too_wide(name: &str, literal: u64, width: u32) -> Diagnostic {
    Diagnostic::error(
        E207,
        format!("literal {literal} used with `{name}` does not fit in {width} bit(s)"),
    )
    .with_note("the value would be truncated in the generated module")
    .with_help(format!("widen `{name}` or remove its width setting"))
}

/// Creates a diagnostic for a state named like a port.
pub fn error_state_signal_clash(name: &str) -> Diagnostic {
    Diagnostic::error(
        E208,
        format!("state `{name}` has the same name as a signal"),
    )
    .with_note("states and ports share one namespace in the generated module")
}

/// Creates a warning for an explicit default state that is not in the table.
pub fn warn_default_state_missing(name: &str) -> Diagnostic {
    Diagnostic::warning(
        W201,
        format!("default state `{name}` does not appear in the transition table"),
    )
    .with_note("the state was added with no outgoing transitions")
}

/// Creates a warning for falling back to the first state as default.
pub fn warn_default_state_fallback(name: &str) -> Diagnostic {
    Diagnostic::warning(
        W202,
        format!("no default state could be marked; using `{name}`"),
    )
}

/// Creates a warning for an input domain too large to enumerate.
pub fn warn_domain_too_large(size: Option<u64>, limit: u64) -> Diagnostic {
    let size = size.map_or_else(|| "more than 2^64".to_string(), |s| s.to_string());
    Diagnostic::warning(
        W203,
        format!("input domain has {size} assignments, above the limit of {limit}"),
    )
    .with_note("guards were grouped by structural equality instead")
    .with_help("raise `equivalence.max_assignments` or narrow the inputs")
}

/// Creates a warning for the clock appearing inside a guard.
pub fn warn_clock_in_guard(clock: &str, snippet: Snippet) -> Diagnostic {
    Diagnostic::warning(W204, format!("clock `{clock}` is referenced in a guard"))
        .with_snippet(snippet)
}

/// Creates a warning for settings on an input that no guard references.
pub fn warn_unused_input(name: &str) -> Diagnostic {
    Diagnostic::warning(
        W205,
        format!("input `{name}` is configured but never referenced"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmc_diagnostics::Severity;

    #[test]
    fn error_code_formats() {
        assert_eq!(format!("{E200}"), "E200");
        assert_eq!(format!("{E206}"), "E206");
        assert_eq!(format!("{E208}"), "E208");
        assert_eq!(format!("{W201}"), "W201");
        assert_eq!(format!("{W205}"), "W205");
    }

    #[test]
    fn role_conflict_diagnostic() {
        let d = error_role_conflict("count");
        assert_eq!(d.code, E203);
        assert_eq!(d.severity, Severity::Error);
        assert!(d.message.contains("count"));
    }

    #[test]
    fn domain_warning_reports_overflow() {
        let d = warn_domain_too_large(None, 1 << 20);
        assert_eq!(d.severity, Severity::Warning);
        assert!(d.message.contains("more than 2^64"));
        assert!(!d.notes.is_empty());
    }

    #[test]
    fn literal_too_wide_names_signal_and_width() {
        let d = error_literal_too_wide("mode", 5, 2);
        assert_eq!(d.code, E207);
        assert!(d.message.contains("`mode`"));
        assert!(d.message.contains("2 bit(s)"));
    }

    #[test]
    fn default_state_warning() {
        let d = warn_default_state_missing("BOOT");
        assert_eq!(d.code, W201);
        assert!(d.message.contains("BOOT"));
    }
}
