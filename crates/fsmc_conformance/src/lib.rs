//! Conformance test helpers for fsmc.
//!
//! Runs table text through the whole pipeline (load, compile, generate) and
//! returns structured results for assertion in integration tests.

#![warn(missing_docs)]

use fsmc_config::load_config_from_str;
use fsmc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use fsmc_ir::Fsm;

/// The counter table used throughout the integration tests.
pub const COUNTER: &str = include_str!("../../../demos/counter.toml");

/// The magnitude comparator, driven by symbolic guards.
pub const COMPARE: &str = include_str!("../../../demos/compare.toml");

/// Result of loading and compiling a table.
pub struct PipelineResult {
    /// The compiled machine, absent when a fatal error was reported.
    pub fsm: Option<Fsm>,
    /// All diagnostics emitted during compilation.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// The compiled machine. Panics if compilation failed.
    pub fn fsm(&self) -> &Fsm {
        match &self.fsm {
            Some(fsm) => fsm,
            None => panic!("compilation failed: {:#?}", self.diagnostics),
        }
    }

    /// Whether a diagnostic with `code` was emitted.
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    /// Group number of each transition in table order.
    pub fn groups(&self) -> Vec<u32> {
        let fsm = self.fsm();
        fsm.transitions.iter().map(|t| fsm.group_of(t)).collect()
    }
}

/// Loads `source` as a table file and compiles it.
///
/// Panics if the TOML itself is invalid; compile problems are returned as
/// diagnostics.
pub fn compile_str(source: &str) -> PipelineResult {
    let config = match load_config_from_str(source) {
        Ok(config) => config,
        Err(e) => panic!("invalid table: {e}"),
    };
    let sink = DiagnosticSink::new();
    let fsm = fsmc_compile::compile_config(&config, &sink);
    PipelineResult {
        fsm,
        has_errors: sink.has_errors(),
        error_count: sink.error_count(),
        warning_count: sink.warning_count(),
        diagnostics: sink.take_all(),
    }
}

/// Builds a table file from `(from, to, when, set)` rows.
pub fn table(rows: &[(&str, &str, &str, Option<&str>)]) -> String {
    let mut out = String::new();
    for (from, to, when, set) in rows {
        out.push_str(&format!(
            "[[transitions]]\nfrom = \"{from}\"\nto = \"{to}\"\nwhen = \"{when}\"\n"
        ));
        if let Some(set) = set {
            out.push_str(&format!("set = \"{set}\"\n"));
        }
        out.push('\n');
    }
    out
}

/// Compiles `source` and returns its SystemVerilog module.
pub fn rtl_of(source: &str) -> String {
    let result = compile_str(source);
    match fsmc_codegen::generate_rtl(result.fsm()) {
        Ok(text) => text,
        Err(e) => panic!("{e}"),
    }
}

/// Compiles `source` and returns its diagram as DOT text.
pub fn dot_of(source: &str) -> String {
    let result = compile_str(source);
    match fsmc_codegen::build_diagram(result.fsm()) {
        Ok(diagram) => diagram.to_dot(),
        Err(e) => panic!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_builder_round_trips_through_loader() {
        let src = table(&[("A", "B", "x = 1", Some("y = 1")), ("B", "A", "x = 0", None)]);
        let config = load_config_from_str(&src).unwrap();
        assert_eq!(config.transitions.len(), 2);
        assert_eq!(config.transitions[0].set.as_deref(), Some("y = 1"));
        assert!(config.transitions[1].set.is_none());
    }

    #[test]
    fn counter_demo_compiles_cleanly() {
        let result = compile_str(COUNTER);
        assert!(!result.has_errors);
        assert_eq!(result.warning_count, 0);
        assert_eq!(result.fsm().name, "ctrl");
    }
}
