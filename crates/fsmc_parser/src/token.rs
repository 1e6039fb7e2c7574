//! Token types for the condition-expression lexer.
//!
//! Defines the [`ExprToken`] enum covering keywords, comparators, logical
//! operators, punctuation and literals, plus the [`Token`] struct pairing a
//! token kind with its byte range in the expression text.

use fsmc_ir::{CmpOp, LogicOp};

/// A condition-expression token kind.
///
/// Literal and identifier values are not stored in the token; they are
/// retrieved from the source text using the token's range.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ExprToken {
    /// A signal name.
    Identifier,
    /// A decimal integer literal.
    Integer,
    /// `and` (any case) or `&&`.
    And,
    /// `or` (any case) or `||`.
    Or,
    /// `not` (any case) or `!`.
    Not,
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// A lexing error; a diagnostic has already been emitted.
    Error,
    /// End of input.
    Eof,
}

impl ExprToken {
    /// Returns the comparator this token denotes, if any.
    pub fn as_cmp_op(self) -> Option<CmpOp> {
        match self {
            ExprToken::Eq => Some(CmpOp::Eq),
            ExprToken::Ne => Some(CmpOp::Ne),
            ExprToken::Lt => Some(CmpOp::Lt),
            ExprToken::Le => Some(CmpOp::Le),
            ExprToken::Gt => Some(CmpOp::Gt),
            ExprToken::Ge => Some(CmpOp::Ge),
            _ => None,
        }
    }

    /// Returns the binary logical operator this token denotes, if any.
    pub fn as_binary_op(self) -> Option<LogicOp> {
        match self {
            ExprToken::And => Some(LogicOp::And),
            ExprToken::Or => Some(LogicOp::Or),
            _ => None,
        }
    }

    /// Human-readable description used in "expected X, found Y" messages.
    pub fn describe(self) -> &'static str {
        match self {
            ExprToken::Identifier => "signal name",
            ExprToken::Integer => "integer",
            ExprToken::And => "`and`",
            ExprToken::Or => "`or`",
            ExprToken::Not => "`not`",
            ExprToken::Eq => "`=`",
            ExprToken::Ne => "`!=`",
            ExprToken::Lt => "`<`",
            ExprToken::Le => "`<=`",
            ExprToken::Gt => "`>`",
            ExprToken::Ge => "`>=`",
            ExprToken::LeftParen => "`(`",
            ExprToken::RightParen => "`)`",
            ExprToken::Error => "invalid token",
            ExprToken::Eof => "end of expression",
        }
    }
}

/// Looks up a word as a logical keyword. Keywords are case-insensitive.
pub fn lookup_keyword(word: &str) -> Option<ExprToken> {
    match word.parse::<LogicOp>().ok()? {
        LogicOp::And => Some(ExprToken::And),
        LogicOp::Or => Some(ExprToken::Or),
        LogicOp::Not => Some(ExprToken::Not),
    }
}

/// Maps an operator spelling to its token, if the spelling is supported.
pub fn lookup_operator(text: &str) -> Option<ExprToken> {
    match text {
        "&&" => Some(ExprToken::And),
        "||" => Some(ExprToken::Or),
        "!" => Some(ExprToken::Not),
        _ => text.parse::<CmpOp>().ok().map(|op| match op {
            CmpOp::Eq => ExprToken::Eq,
            CmpOp::Ne => ExprToken::Ne,
            CmpOp::Lt => ExprToken::Lt,
            CmpOp::Le => ExprToken::Le,
            CmpOp::Gt => ExprToken::Gt,
            CmpOp::Ge => ExprToken::Ge,
        }),
    }
}

/// A token with its byte range in the expression text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token {
    /// The token kind.
    pub kind: ExprToken,
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}
