//! Lowering of a loaded table file into a [`TransitionTable`].

use fsmc_config::FsmConfig;
use fsmc_diagnostics::DiagnosticSink;
use fsmc_ir::TransitionTable;
use fsmc_parser::parse_condition;

/// Parses every guard and assignment string of `config` into a table.
///
/// All rows are parsed even after a failure so that every malformed
/// expression is reported in one run. Returns `None` if any row failed.
pub fn build_table(config: &FsmConfig, sink: &DiagnosticSink) -> Option<TransitionTable> {
    let mut table = TransitionTable::new();
    let mut failed = false;

    for (i, row) in config.transitions.iter().enumerate() {
        let guard = parse_condition(&row.when, &format!("transition {i}, when"), sink);
        let assignments = match row.set.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                match parse_condition(text, &format!("transition {i}, set"), sink) {
                    Some(cond) => Some(cond),
                    None => {
                        failed = true;
                        None
                    }
                }
            }
            _ => None,
        };
        match guard {
            Some(guard) if !failed => {
                table.push(row.from.trim(), row.to.trim(), guard, assignments);
            }
            _ => failed = true,
        }
    }

    if failed {
        None
    } else {
        Some(table)
    }
}
