//! Pratt parser for guard and output-assignment expressions.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr       := expr "or" expr | expr "and" expr | "not" expr | primary
//! primary    := "(" expr ")" | comparison
//! comparison := NAME CMP (INTEGER | NAME)
//! ```
//!
//! `or` binds looser than `and`, which binds looser than `not`. A comparison
//! is atomic, so `not valid = 0` negates the whole comparison.

use crate::errors;
use crate::token::{ExprToken, Token};
use fsmc_diagnostics::{DiagnosticSink, Snippet};
use fsmc_ir::{Condition, LogicOp, Operand};

/// Binding power of the prefix `not` operator.
const PREFIX_NOT_BP: u8 = 5;

/// Returns (left, right) binding power for binary logical operators.
fn infix_binding_power(op: LogicOp) -> (u8, u8) {
    match op {
        LogicOp::Or => (1, 2),
        LogicOp::And => (3, 4),
        LogicOp::Not => (PREFIX_NOT_BP, PREFIX_NOT_BP),
    }
}

/// A parser over the token stream of a single expression.
///
/// Errors are emitted to the sink and the parse is abandoned by returning
/// `None`; expressions are short enough that recovery buys nothing.
pub struct ExprParser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
    origin: &'src str,
    sink: &'src DiagnosticSink,
}

impl<'src> ExprParser<'src> {
    /// Creates a parser over tokens lexed from `source`.
    pub fn new(
        tokens: Vec<Token>,
        source: &'src str,
        origin: &'src str,
        sink: &'src DiagnosticSink,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            origin,
            sink,
        }
    }

    fn current_token(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(Token {
            kind: ExprToken::Eof,
            start: self.source.len(),
            end: self.source.len(),
        })
    }

    fn current(&self) -> ExprToken {
        self.current_token().kind
    }

    fn current_text(&self) -> &'src str {
        let token = self.current_token();
        self.source.get(token.start..token.end).unwrap_or("")
    }

    fn at(&self, kind: ExprToken) -> bool {
        self.current() == kind
    }

    fn advance(&mut self) {
        if !self.at(ExprToken::Eof) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: ExprToken) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: ExprToken) -> Option<()> {
        if self.eat(kind) {
            Some(())
        } else {
            self.expected(kind.describe())
        }
    }

    /// Emits an "expected X" error at the current token and returns `None`.
    ///
    /// Error tokens already carry a lexer diagnostic, so nothing new is
    /// emitted for them.
    fn expected<T>(&self, what: &str) -> Option<T> {
        let token = self.current_token();
        if token.kind != ExprToken::Error {
            let found = match token.kind {
                ExprToken::Identifier | ExprToken::Integer => format!("`{}`", self.current_text()),
                kind => kind.describe().to_string(),
            };
            let snippet = Snippet::new(self.origin, self.source, token.start, token.end);
            self.sink
                .emit(errors::error_expected(what, &found, snippet));
        }
        None
    }

    /// Parses a complete expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Option<Condition> {
        let cond = self.parse_expr_bp(0)?;
        if !self.at(ExprToken::Eof) {
            return self.expected("`and`, `or` or end of expression");
        }
        Some(cond)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Option<Condition> {
        let mut lhs = self.parse_prefix()?;

        while let Some(op) = self.current().as_binary_op() {
            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_expr_bp(r_bp)?;
            lhs = match op {
                LogicOp::And => Condition::and(lhs, rhs),
                _ => Condition::or(lhs, rhs),
            };
        }

        Some(lhs)
    }

    fn parse_prefix(&mut self) -> Option<Condition> {
        match self.current() {
            ExprToken::Not => {
                self.advance();
                let operand = self.parse_expr_bp(PREFIX_NOT_BP)?;
                Some(Condition::not(operand))
            }
            ExprToken::LeftParen => {
                self.advance();
                let inner = self.parse_expr_bp(0)?;
                self.expect(ExprToken::RightParen)?;
                Some(inner)
            }
            ExprToken::Identifier => self.parse_comparison(),
            _ => self.expected("signal name, `not` or `(`"),
        }
    }

    fn parse_comparison(&mut self) -> Option<Condition> {
        let signal = self.current_text().to_string();
        self.advance();

        let Some(op) = self.current().as_cmp_op() else {
            return self.expected("comparison operator");
        };
        self.advance();

        let value = match self.current() {
            ExprToken::Integer => {
                let digits: String = self.current_text().chars().filter(|c| *c != '_').collect();
                // The lexer already rejected literals that overflow.
                let Ok(value) = digits.parse::<u64>() else {
                    return None;
                };
                Operand::Literal(value)
            }
            ExprToken::Identifier => Operand::Signal(self.current_text().to_string()),
            _ => return self.expected("integer or signal name"),
        };
        self.advance();

        Some(Condition::compare(signal, op, value))
    }
}
