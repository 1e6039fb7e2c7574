//! Lexical analyzer for condition expressions.
//!
//! Converts a guard or output-assignment string into a sequence of
//! [`Token`]s. Operators are scanned as maximal runs of operator characters
//! and then matched against the supported spellings, so `==` or `=>` are
//! reported as a whole instead of silently splitting into two tokens.
//! Errors are reported to the [`DiagnosticSink`] and produce
//! [`ExprToken::Error`] tokens.

use crate::errors;
use crate::token::{lookup_keyword, lookup_operator, ExprToken, Token};
use fsmc_diagnostics::{DiagnosticSink, Snippet};

/// Lexes an expression into tokens.
///
/// Whitespace is skipped. The returned vector always ends with an
/// [`ExprToken::Eof`] token. `origin` names where the text came from and is
/// only used for diagnostics.
pub fn lex(source: &str, origin: &str, sink: &DiagnosticSink) -> Vec<Token> {
    let mut lexer = Lexer {
        text: source,
        source: source.as_bytes(),
        pos: 0,
        origin,
        sink,
    };
    lexer.lex_all()
}

fn is_operator_byte(b: u8) -> bool {
    matches!(b, b'=' | b'!' | b'<' | b'>' | b'&' | b'|')
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

struct Lexer<'a> {
    text: &'a str,
    source: &'a [u8],
    pos: usize,
    origin: &'a str,
    sink: &'a DiagnosticSink,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.pos += 1;
            }
            if self.pos >= self.source.len() {
                tokens.push(Token {
                    kind: ExprToken::Eof,
                    start: self.pos,
                    end: self.pos,
                });
                break;
            }
            tokens.push(self.next_token());
        }
        tokens
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn snippet(&self, start: usize) -> Snippet {
        Snippet::new(self.origin, self.text, start, self.pos)
    }

    fn token(&self, kind: ExprToken, start: usize) -> Token {
        Token {
            kind,
            start,
            end: self.pos,
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let Some(b) = self.peek() else {
            return self.token(ExprToken::Eof, start);
        };

        match b {
            b'(' => {
                self.pos += 1;
                self.token(ExprToken::LeftParen, start)
            }
            b')' => {
                self.pos += 1;
                self.token(ExprToken::RightParen, start)
            }
            b if b.is_ascii_digit() => self.lex_integer(start),
            b if is_ident_start(b) => self.lex_word(start),
            b if is_operator_byte(b) => self.lex_operator(start),
            _ => self.lex_unexpected(start),
        }
    }

    fn lex_integer(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(|b| b.is_ascii_digit() || b == b'_') {
            self.pos += 1;
        }
        let text = &self.text[start..self.pos];
        let digits: String = text.chars().filter(|c| *c != '_').collect();
        if digits.parse::<u64>().is_err() {
            self.sink
                .emit(errors::error_literal_range(text, self.snippet(start)));
            return self.token(ExprToken::Error, start);
        }
        self.token(ExprToken::Integer, start)
    }

    fn lex_word(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        let word = &self.text[start..self.pos];
        let kind = lookup_keyword(word).unwrap_or(ExprToken::Identifier);
        self.token(kind, start)
    }

    fn lex_operator(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(is_operator_byte) {
            self.pos += 1;
        }
        let text = &self.text[start..self.pos];
        if let Some(kind) = lookup_operator(text) {
            return self.token(kind, start);
        }
        // A run of bangs is a stack of negations.
        if text.bytes().all(|b| b == b'!') {
            self.pos = start + 1;
            return self.token(ExprToken::Not, start);
        }
        self.sink
            .emit(errors::error_unsupported_operator(text, self.snippet(start)));
        self.token(ExprToken::Error, start)
    }

    fn lex_unexpected(&mut self, start: usize) -> Token {
        let ch = self.text[start..].chars().next().unwrap_or('\0');
        self.pos += ch.len_utf8().max(1);
        self.sink
            .emit(errors::error_unexpected_char(ch, self.snippet(start)));
        self.token(ExprToken::Error, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmc_diagnostics::Diagnostic;

    fn lex_tokens(source: &str) -> Vec<Token> {
        let sink = DiagnosticSink::new();
        let tokens = lex(source, "test", &sink);
        assert!(
            !sink.has_errors(),
            "unexpected errors: {:?}",
            sink.diagnostics()
        );
        tokens
    }

    fn lex_tokens_with_errors(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        let sink = DiagnosticSink::new();
        let tokens = lex(source, "test", &sink);
        (tokens, sink.take_all())
    }

    fn kinds(tokens: &[Token]) -> Vec<ExprToken> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(kinds(&lex_tokens("")), vec![ExprToken::Eof]);
        assert_eq!(kinds(&lex_tokens("  \t ")), vec![ExprToken::Eof]);
    }

    #[test]
    fn simple_comparison() {
        let tokens = lex_tokens("valid = 1");
        assert_eq!(
            kinds(&tokens),
            vec![
                ExprToken::Identifier,
                ExprToken::Eq,
                ExprToken::Integer,
                ExprToken::Eof
            ]
        );
        assert_eq!((tokens[0].start, tokens[0].end), (0, 5));
        assert_eq!((tokens[2].start, tokens[2].end), (8, 9));
    }

    #[test]
    fn no_whitespace_needed() {
        let tokens = lex_tokens("count>=3");
        assert_eq!(
            kinds(&tokens),
            vec![
                ExprToken::Identifier,
                ExprToken::Ge,
                ExprToken::Integer,
                ExprToken::Eof
            ]
        );
    }

    #[test]
    fn keywords_and_symbols() {
        let tokens = lex_tokens("(NOT a = 0) AND b != c || !d < 2 && e <= 1 or f > 0");
        assert_eq!(
            kinds(&tokens),
            vec![
                ExprToken::LeftParen,
                ExprToken::Not,
                ExprToken::Identifier,
                ExprToken::Eq,
                ExprToken::Integer,
                ExprToken::RightParen,
                ExprToken::And,
                ExprToken::Identifier,
                ExprToken::Ne,
                ExprToken::Identifier,
                ExprToken::Or,
                ExprToken::Not,
                ExprToken::Identifier,
                ExprToken::Lt,
                ExprToken::Integer,
                ExprToken::And,
                ExprToken::Identifier,
                ExprToken::Le,
                ExprToken::Integer,
                ExprToken::Or,
                ExprToken::Identifier,
                ExprToken::Gt,
                ExprToken::Integer,
                ExprToken::Eof,
            ]
        );
    }

    #[test]
    fn stacked_bangs() {
        let tokens = lex_tokens("!!a = 1");
        assert_eq!(
            kinds(&tokens),
            vec![
                ExprToken::Not,
                ExprToken::Not,
                ExprToken::Identifier,
                ExprToken::Eq,
                ExprToken::Integer,
                ExprToken::Eof
            ]
        );
    }

    #[test]
    fn identifiers_with_digits_and_underscores() {
        let tokens = lex_tokens("rst_n2 = 0");
        assert_eq!(tokens[0].kind, ExprToken::Identifier);
        assert_eq!(tokens[0].end, 6);
    }

    #[test]
    fn double_equals_rejected() {
        let (tokens, diags) = lex_tokens_with_errors("a == 1");
        assert_eq!(tokens[1].kind, ExprToken::Error);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, errors::E103);
        assert!(diags[0].message.contains("=="));
        assert!(!diags[0].help.is_empty());
    }

    #[test]
    fn single_ampersand_rejected() {
        let (_, diags) = lex_tokens_with_errors("a = 1 & b = 0");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, errors::E103);
    }

    #[test]
    fn unexpected_character() {
        let (tokens, diags) = lex_tokens_with_errors("a = 1 + 2");
        assert!(kinds(&tokens).contains(&ExprToken::Error));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, errors::E101);
        let snippet = diags[0].snippet.as_ref().unwrap();
        assert_eq!(snippet.column(), 7);
    }

    #[test]
    fn literal_overflow() {
        let (tokens, diags) = lex_tokens_with_errors("a = 99999999999999999999999");
        assert_eq!(tokens[2].kind, ExprToken::Error);
        assert_eq!(diags[0].code, errors::E104);
    }
}
