//! Parser for the condition language used in transition tables.
//!
//! Guards (`valid = 1 and clear = 0`) and output assignments
//! (`count = 3 and done = 1`) share one grammar: comparisons of a signal
//! against an integer or another signal, combined with `and`, `or` and
//! `not`. Keywords are case-insensitive and `&&`, `||`, `!` are accepted as
//! synonyms. The entry point is [`parse_condition`].

#![warn(missing_docs)]

pub mod errors;
pub mod lexer;
pub mod parser;
pub mod token;

use fsmc_diagnostics::DiagnosticSink;
use fsmc_ir::Condition;

pub use parser::ExprParser;

/// Parses a single condition expression.
///
/// Returns `None` if the text is malformed; the reason has been emitted to
/// `sink` with a snippet pointing at the offending token. `origin` labels the
/// snippet (e.g., `transition 2, when`).
pub fn parse_condition(text: &str, origin: &str, sink: &DiagnosticSink) -> Option<Condition> {
    let tokens = lexer::lex(text, origin, sink);
    if tokens.iter().any(|t| t.kind == token::ExprToken::Error) {
        return None;
    }
    ExprParser::new(tokens, text, origin, sink).parse()
}
