//! Diagnostic codes emitted while lexing and parsing condition expressions.

use fsmc_diagnostics::code::{Category, DiagnosticCode};
use fsmc_diagnostics::{Diagnostic, Snippet};

/// A character that cannot start any token.
pub const E101: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
/// The parser expected one thing and found another.
pub const E102: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
/// An operator spelling outside the supported set.
pub const E103: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
/// An integer literal that does not fit in 64 bits.
pub const E104: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);

pub(crate) fn error_unexpected_char(ch: char, snippet: Snippet) -> Diagnostic {
    Diagnostic::error(E101, format!("unexpected character `{ch}`")).with_snippet(snippet)
}

pub(crate) fn error_expected(expected: &str, found: &str, snippet: Snippet) -> Diagnostic {
    Diagnostic::error(E102, format!("expected {expected}, found {found}")).with_snippet(snippet)
}

pub(crate) fn error_unsupported_operator(op: &str, snippet: Snippet) -> Diagnostic {
    let diag = Diagnostic::error(E103, format!("unsupported operator `{op}`")).with_snippet(snippet);
    match op {
        "==" => diag.with_help("equality is written with a single `=`"),
        "<>" | "=!" => diag.with_help("inequality is written `!=`"),
        "=<" | "=>" => diag.with_help("relational operators are `<`, `<=`, `>` and `>=`"),
        "&" => diag.with_help("use `and` or `&&`"),
        "|" => diag.with_help("use `or` or `||`"),
        _ => diag.with_note("supported operators: = != < <= > >= and or not && || !"),
    }
}

pub(crate) fn error_literal_range(text: &str, snippet: Snippet) -> Diagnostic {
    Diagnostic::error(E104, format!("integer literal `{text}` does not fit in 64 bits"))
        .with_snippet(snippet)
}
