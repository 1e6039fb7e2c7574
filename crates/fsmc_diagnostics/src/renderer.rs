//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error[E103]: unsupported operator `==`
///   --> transition 1, when:9
///    |
///    | valid == 1
///    |       ^^ use `=` for equality
///    |
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, ansi: &str) -> String {
        if self.color {
            format!("\x1b[{ansi}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        let ansi = if diag.severity.is_error() { "1;31" } else { "1;33" };
        let head = self.paint(&format!("{}[{}]", diag.severity, diag.code), ansi);
        out.push_str(&format!("{head}: {}\n", diag.message));

        if let Some(snippet) = &diag.snippet {
            out.push_str(&format!("  --> {}:{}\n", snippet.origin, snippet.column()));
            out.push_str("   |\n");
            out.push_str(&format!("   | {}\n", snippet.text));

            let pad = " ".repeat(snippet.column() - 1);
            let carets = "^".repeat(
                snippet
                    .text
                    .get(snippet.start..snippet.end)
                    .map_or(1, |range| range.chars().count())
                    .max(1),
            );
            out.push_str(&format!("   | {pad}{}\n", self.paint(&carets, ansi)));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

/// Renders each diagnostic as one line of JSON.
pub struct JsonRenderer;

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        // Diagnostic contains only strings, integers and enums.
        serde_json::to_string(diag).unwrap_or_default()
    }
}
