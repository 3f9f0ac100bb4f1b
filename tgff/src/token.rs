/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Token model shared by the lexer and the parser.
//!
//! A [`Token`] owns a copy of the text it was lexed from, so the lexer's read
//! buffer is never shared by reference and tokens can be moved across the
//! lexer → parser queue freely.
//!
//! Numbers are kept as text until the parser asks for a typed value.  The
//! lexer only emits [`TokenKind::Number`] for text matching the numeric
//! grammar, so [`Token::to_float`] never fails on a `Number` token;
//! [`Token::to_uint`] can still refuse a signed or fractional literal (e.g.
//! `-4.2` where a task type is expected).

use std::fmt;

// ── TokenKind ─────────────────────────────────────────────────────────────────

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Lexical failure; `text` carries the message.  Always the last token.
    Error,
    /// `{`
    BlockOpen,
    /// `}`
    BlockClose,
    /// `@KEYWORD`; `text` holds the keyword without the `@`.
    Control,
    /// Uppercase identifier such as `TASK` or `HARD_DEADLINE`.
    Ident,
    /// Lowercase name such as `t0_1`.
    Name,
    /// Signed or unsigned decimal literal.
    Number,
    /// One word of a `#` header line.
    Title,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Error => "Error",
            TokenKind::BlockOpen => "Block Open",
            TokenKind::BlockClose => "Block Close",
            TokenKind::Control => "Control",
            TokenKind::Ident => "Ident",
            TokenKind::Name => "Name",
            TokenKind::Number => "Number",
            TokenKind::Title => "Title",
        };
        f.write_str(s)
    }
}

// ── Token ─────────────────────────────────────────────────────────────────────

/// A single lexeme: its kind, the exact source text, and the line it started
/// on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based source line, used for diagnostics only.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Returns `true` if this token has the given kind and exactly the given
    /// text (case-sensitive).
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Parse the text as an unsigned integer.
    ///
    /// Returns `None` for negative or fractional literals and for values that
    /// do not fit in `u64`.
    pub fn to_uint(&self) -> Option<u64> {
        self.text.parse().ok()
    }

    /// Parse the text as a double-precision float.
    pub fn to_float(&self) -> Option<f64> {
        self.text.parse().ok()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}) at line {}", self.kind, self.text, self.line)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> Token {
        Token::new(TokenKind::Number, text, 1)
    }

    #[test]
    fn to_uint_accepts_plain_and_plus_signed_integers() {
        assert_eq!(number("1180").to_uint(), Some(1180));
        assert_eq!(number("+42").to_uint(), Some(42));
        assert_eq!(number("0").to_uint(), Some(0));
    }

    #[test]
    fn to_uint_rejects_negative_and_fractional_literals() {
        assert_eq!(number("-1").to_uint(), None);
        assert_eq!(number("4.2").to_uint(), None);
        assert_eq!(number("99999999999999999999999").to_uint(), None);
    }

    #[test]
    fn to_float_parses_every_number_shape() {
        assert_eq!(number("70.1121").to_float(), Some(70.1121));
        assert_eq!(number("-4.2").to_float(), Some(-4.2));
        assert_eq!(number("+42.0").to_float(), Some(42.0));
        assert_eq!(number("7").to_float(), Some(7.0));
        assert_eq!(number("1.5e3").to_float(), Some(1500.0));
    }

    #[test]
    fn is_matches_kind_and_exact_text() {
        let t = Token::new(TokenKind::Ident, "TYPE", 3);
        assert!(t.is(TokenKind::Ident, "TYPE"));
        assert!(!t.is(TokenKind::Ident, "type"));
        assert!(!t.is(TokenKind::Name, "TYPE"));
    }

    #[test]
    fn display_names_kind_text_and_line() {
        let t = Token::new(TokenKind::BlockClose, "}", 12);
        assert_eq!(t.to_string(), "Block Close (\"}\") at line 12");
    }
}
