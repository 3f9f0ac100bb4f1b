/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Streaming TGFF lexer.
//!
//! The lexer is a finite state machine over a buffered byte source.  Each
//! call to [`Iterator::next`] drives the machine until it emits exactly one
//! token, so the parser can pull tokens lazily and the whole input never has
//! to be in memory at once.
//!
//! ```text
//!              ┌──────────── whitespace ────────────┐
//!              ▼                                    │
//!          Dispatch ──@──► Control ─────────────────┤
//!              │ ──#──► Comment ──rule──► (skip line)┤
//!              │              └──────► Titles ──EOL──┤
//!              │ ──{ }─► BlockOpen / BlockClose ─────┤
//!              │ ──±0-9► Number ─────────────────────┤
//!              │ ──A-Z─► Ident ──────────────────────┤
//!              │ ──a-z─► Name ───────────────────────┘
//!              │ ──EOF─► Done
//!              └──other► Error ──► Done
//! ```
//!
//! Lexical failures are reported in-band as a single [`TokenKind::Error`]
//! token, after which the iterator is exhausted.  Failures of the underlying
//! reader are yielded unchanged as `Err(io::Error)`.

pub mod chars;

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

use tracing::trace;

use crate::token::{Token, TokenKind};

// ── Options ───────────────────────────────────────────────────────────────────

/// Switches for optional lexical extensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Accept an exponent suffix on numbers (`1.5e3`, `2E-4`).
    ///
    /// Off by default: the baseline format has no exponents, and with the
    /// extension off `1e5` lexes as the number `1` followed by the name `e5`.
    pub exponent: bool,
}

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Dispatch,
    Control,
    Comment,
    Titles,
    BlockOpen,
    BlockClose,
    Ident,
    Name,
    Number,
    Error(String),
    Done,
}

/// Tokenizer over any [`Read`] source.
pub struct Lexer<R> {
    reader: BufReader<R>,
    options: LexerOptions,
    state: State,
    /// Bytes of the token currently being read.
    buffer: Vec<u8>,
    /// Token produced by the last step, handed out by `next()`.
    emitted: Option<Token>,
    line: u32,
}

impl<R> fmt::Debug for Lexer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("state", &self.state)
            .field("line", &self.line)
            .field("options", &self.options)
            .finish()
    }
}

impl<R: Read> Lexer<R> {
    /// Create a lexer with the baseline grammar.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, LexerOptions::default())
    }

    pub fn with_options(reader: R, options: LexerOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
            state: State::Dispatch,
            buffer: Vec::new(),
            emitted: None,
            line: 1,
        }
    }

    fn step(&mut self, state: State) -> io::Result<State> {
        match state {
            State::Dispatch => self.dispatch(),
            State::Control => self.control(),
            State::Comment => self.comment(),
            State::Titles => self.titles(),
            State::BlockOpen => {
                self.bump()?;
                self.emit(TokenKind::BlockOpen, "{".to_string());
                Ok(State::Dispatch)
            }
            State::BlockClose => {
                self.bump()?;
                self.emit(TokenKind::BlockClose, "}".to_string());
                Ok(State::Dispatch)
            }
            State::Ident => {
                self.read_while(chars::is_ident)?;
                Ok(self.emit_buffer(TokenKind::Ident, State::Dispatch))
            }
            State::Name => {
                self.read_while(chars::is_name)?;
                Ok(self.emit_buffer(TokenKind::Name, State::Dispatch))
            }
            State::Number => self.number(),
            State::Error(message) => {
                self.emit(TokenKind::Error, message);
                Ok(State::Done)
            }
            State::Done => Ok(State::Done),
        }
    }

    fn dispatch(&mut self) -> io::Result<State> {
        self.skip_while(chars::is_whitespace)?;

        let next = match self.peek()? {
            None => State::Done,
            Some(chars::CONTROL) => State::Control,
            Some(chars::COMMENT) => State::Comment,
            Some(chars::BLOCK_OPEN) => State::BlockOpen,
            Some(chars::BLOCK_CLOSE) => State::BlockClose,
            Some(c) if chars::is_number_start(c) => State::Number,
            Some(c) if chars::is_ident_start(c) => State::Ident,
            Some(c) if chars::is_name_start(c) => State::Name,
            Some(c) => State::Error(format!("unknown token starting from {}", describe(c))),
        };
        Ok(next)
    }

    fn control(&mut self) -> io::Result<State> {
        self.bump()?; // '@'

        if self.read_while(chars::is_ident)? == 0 {
            let found = match self.peek()? {
                Some(c) => describe(c),
                None => "end of input".to_string(),
            };
            return Ok(State::Error(format!(
                "expected a keyword after '@', found {found}"
            )));
        }

        Ok(self.emit_buffer(TokenKind::Control, State::Dispatch))
    }

    fn comment(&mut self) -> io::Result<State> {
        self.bump()?; // '#'

        match self.peek()? {
            Some(c) if chars::is_rule(c) => {
                self.skip_while(|c| c != chars::NEWLINE)?;
                Ok(State::Dispatch)
            }
            _ => Ok(State::Titles),
        }
    }

    /// One title per whitespace-delimited word until the end of the line.
    fn titles(&mut self) -> io::Result<State> {
        self.skip_while(chars::is_inline_whitespace)?;

        match self.peek()? {
            None | Some(chars::NEWLINE) => Ok(State::Dispatch),
            Some(_) => {
                self.read_while(|c| !chars::is_whitespace(c))?;
                Ok(self.emit_buffer(TokenKind::Title, State::Titles))
            }
        }
    }

    fn number(&mut self) -> io::Result<State> {
        self.read_one(chars::is_sign)?;
        if self.read_while(chars::is_digit)? == 0 {
            return Ok(self.malformed_number());
        }

        if self.read_one(|c| c == chars::DOT)? && self.read_while(chars::is_digit)? == 0 {
            return Ok(self.malformed_number());
        }

        if self.options.exponent && self.read_one(chars::is_exponent)? {
            self.read_one(chars::is_sign)?;
            if self.read_while(chars::is_digit)? == 0 {
                return Ok(self.malformed_number());
            }
        }

        Ok(self.emit_buffer(TokenKind::Number, State::Dispatch))
    }

    fn malformed_number(&mut self) -> State {
        let text = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        State::Error(format!("malformed number '{text}'"))
    }

    // ── Emission ──────────────────────────────────────────────────────────────

    fn emit(&mut self, kind: TokenKind, text: String) {
        trace!(%kind, text = %text, line = self.line, "lexed token");
        self.emitted = Some(Token::new(kind, text, self.line));
    }

    /// Emit the buffered bytes as one token and continue in `next`.
    ///
    /// Every class except titles is ASCII by construction.  A title that is
    /// not valid UTF-8 is a lexical error, never a lossy copy.
    fn emit_buffer(&mut self, kind: TokenKind, next: State) -> State {
        match String::from_utf8(std::mem::take(&mut self.buffer)) {
            Ok(text) => {
                self.emit(kind, text);
                next
            }
            Err(e) => State::Error(format!(
                "invalid UTF-8 in {} '{}'",
                kind.to_string().to_lowercase(),
                String::from_utf8_lossy(e.as_bytes())
            )),
        }
    }

    // ── Byte-level primitives ─────────────────────────────────────────────────

    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Consume the next byte if `accept` allows it.
    fn eat(&mut self, accept: impl Fn(u8) -> bool) -> io::Result<Option<u8>> {
        match self.peek()? {
            Some(c) if accept(c) => {
                self.reader.consume(1);
                if c == chars::NEWLINE {
                    self.line += 1;
                }
                Ok(Some(c))
            }
            _ => Ok(None),
        }
    }

    fn bump(&mut self) -> io::Result<()> {
        self.eat(|_| true).map(|_| ())
    }

    /// Append at most one accepted byte to the buffer.
    fn read_one(&mut self, accept: impl Fn(u8) -> bool) -> io::Result<bool> {
        match self.eat(accept)? {
            Some(c) => {
                self.buffer.push(c);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append accepted bytes to the buffer; returns how many were read.
    fn read_while(&mut self, accept: impl Fn(u8) -> bool) -> io::Result<usize> {
        let mut count = 0;
        while let Some(c) = self.eat(&accept)? {
            self.buffer.push(c);
            count += 1;
        }
        Ok(count)
    }

    fn skip_while(&mut self, accept: impl Fn(u8) -> bool) -> io::Result<()> {
        while self.eat(&accept)?.is_some() {}
        Ok(())
    }
}

impl<R: Read> Iterator for Lexer<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let state = std::mem::replace(&mut self.state, State::Done);
            if state == State::Done {
                return None;
            }

            match self.step(state) {
                Ok(next) => {
                    self.state = next;
                    if let Some(token) = self.emitted.take() {
                        return Some(Ok(token));
                    }
                }
                // The state is already `Done`: a failed reader is not retried.
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn describe(c: u8) -> String {
    if c.is_ascii_graphic() {
        format!("'{}'", c as char)
    } else {
        format!("byte 0x{c:02X}")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_with(data: &str, options: LexerOptions) -> Vec<(TokenKind, String)> {
        Lexer::with_options(data.as_bytes(), options)
            .map(|t| {
                let t = t.expect("in-memory reads cannot fail");
                (t.kind, t.text)
            })
            .collect()
    }

    fn lex(data: &str) -> Vec<(TokenKind, String)> {
        lex_with(data, LexerOptions::default())
    }

    fn tokens(expected: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        expected.iter().map(|(k, s)| (*k, s.to_string())).collect()
    }

    // ── Token classes ─────────────────────────────────────────────────────────

    #[test]
    fn control_keywords() {
        assert_eq!(
            lex("  \t @ABCD\n   @AB_CD_42"),
            tokens(&[(TokenKind::Control, "ABCD"), (TokenKind::Control, "AB_CD_42")])
        );
    }

    #[test]
    fn comment_words_become_titles() {
        assert_eq!(
            lex("  \t \n   # one two\n #--- \n # three "),
            tokens(&[
                (TokenKind::Title, "one"),
                (TokenKind::Title, "two"),
                (TokenKind::Title, "three"),
            ])
        );
    }

    #[test]
    fn rule_lines_yield_nothing() {
        assert!(lex("#------\n##\n#====== x y\n#**").is_empty());
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        assert!(lex("").is_empty());
        assert!(lex("#").is_empty());
        assert!(lex(" \n #\r\n   #").is_empty());
    }

    #[test]
    fn identifiers() {
        assert_eq!(
            lex(" \t ABCD\t \n\n   AB_CD_42 \t\r"),
            tokens(&[(TokenKind::Ident, "ABCD"), (TokenKind::Ident, "AB_CD_42")])
        );
    }

    #[test]
    fn names() {
        assert_eq!(
            lex("\t\t  abcd\t \n  \r ab_cd_42 \t"),
            tokens(&[(TokenKind::Name, "abcd"), (TokenKind::Name, "ab_cd_42")])
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            lex("\t\t  0.42\t \n -4.2 \r +42.0 \t 1180"),
            tokens(&[
                (TokenKind::Number, "0.42"),
                (TokenKind::Number, "-4.2"),
                (TokenKind::Number, "+42.0"),
                (TokenKind::Number, "1180"),
            ])
        );
    }

    #[test]
    fn blocks_need_no_surrounding_whitespace() {
        assert_eq!(
            lex("@COMMUN 0{PERIOD 5}"),
            tokens(&[
                (TokenKind::Control, "COMMUN"),
                (TokenKind::Number, "0"),
                (TokenKind::BlockOpen, "{"),
                (TokenKind::Ident, "PERIOD"),
                (TokenKind::Number, "5"),
                (TokenKind::BlockClose, "}"),
            ])
        );
    }

    #[test]
    fn task_line() {
        assert_eq!(
            lex("TASK t0_0\tTYPE 2"),
            tokens(&[
                (TokenKind::Ident, "TASK"),
                (TokenKind::Name, "t0_0"),
                (TokenKind::Ident, "TYPE"),
                (TokenKind::Number, "2"),
            ])
        );
    }

    // ── Errors ────────────────────────────────────────────────────────────────

    #[test]
    fn control_marker_without_keyword_is_an_error() {
        let out = lex("  @ garbage");
        assert_eq!(out.len(), 1, "nothing may follow an error token: {out:?}");
        assert_eq!(out[0].0, TokenKind::Error);
        assert!(out[0].1.contains("after '@'"), "message: {}", out[0].1);
    }

    #[test]
    fn unknown_character_is_an_error_and_ends_the_stream() {
        let out = lex("PERIOD ? 5");
        assert_eq!(out[0], (TokenKind::Ident, "PERIOD".to_string()));
        assert_eq!(out[1].0, TokenKind::Error);
        assert!(out[1].1.contains("'?'"));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn sign_without_digits_is_an_error() {
        let out = lex("- 5");
        assert_eq!(out, tokens(&[(TokenKind::Error, "malformed number '-'")]));
    }

    #[test]
    fn dangling_decimal_point_is_an_error() {
        let out = lex("5. 6");
        assert_eq!(out, tokens(&[(TokenKind::Error, "malformed number '5.'")]));
    }

    #[test]
    fn non_ascii_byte_is_described_in_hex() {
        let out = lex("\u{7f}");
        assert_eq!(out[0].0, TokenKind::Error);
        assert!(out[0].1.contains("0x7F"), "message: {}", out[0].1);
    }

    // ── Exponent extension ────────────────────────────────────────────────────

    #[test]
    fn exponent_is_not_part_of_a_number_by_default() {
        assert_eq!(
            lex("1e5"),
            tokens(&[(TokenKind::Number, "1"), (TokenKind::Name, "e5")])
        );
    }

    #[test]
    fn exponent_extension_accepts_scientific_notation() {
        let options = LexerOptions { exponent: true };
        assert_eq!(
            lex_with("1.5e3 -2E-4 7e+1", options),
            tokens(&[
                (TokenKind::Number, "1.5e3"),
                (TokenKind::Number, "-2E-4"),
                (TokenKind::Number, "7e+1"),
            ])
        );
    }

    #[test]
    fn exponent_without_digits_is_an_error() {
        let options = LexerOptions { exponent: true };
        assert_eq!(
            lex_with("3e", options),
            tokens(&[(TokenKind::Error, "malformed number '3e'")])
        );
    }

    #[test]
    fn title_with_invalid_utf8_is_an_error() {
        let lexed: Vec<Token> = Lexer::new(&b"# type pr\xFFice\n 1\n"[..])
            .map(|t| t.unwrap())
            .collect();

        assert_eq!(lexed.len(), 2, "got {lexed:?}");
        assert!(lexed[0].is(TokenKind::Title, "type"));
        assert_eq!(lexed[1].kind, TokenKind::Error);
        assert!(lexed[1].text.starts_with("invalid UTF-8 in title"), "got {}", lexed[1].text);
    }

    #[test]
    fn title_with_multibyte_utf8_is_kept_exactly() {
        assert_eq!(
            lex("# durée µs\n"),
            tokens(&[(TokenKind::Title, "durée"), (TokenKind::Title, "µs")])
        );
    }

    // ── Positions and I/O ─────────────────────────────────────────────────────

    #[test]
    fn tokens_carry_their_line() {
        let lines: Vec<u32> = Lexer::new("@HYPERPERIOD 1180\n\n# a b\n}".as_bytes())
            .map(|t| t.unwrap().line)
            .collect();
        assert_eq!(lines, vec![1, 1, 3, 3, 4]);
    }

    /// Yields `data`, then fails every further read.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "source went away"));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn reader_failure_is_yielded_unchanged_and_ends_the_stream() {
        let mut lexer = Lexer::new(FailingReader { data: b"@TASK_GRAPH 0 {" });

        let mut kinds = Vec::new();
        let err = loop {
            match lexer.next() {
                Some(Ok(t)) => kinds.push(t.kind),
                Some(Err(e)) => break e,
                None => panic!("expected the reader failure to surface"),
            }
        };

        assert_eq!(
            kinds,
            vec![TokenKind::Control, TokenKind::Number, TokenKind::BlockOpen]
        );
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(lexer.next().is_none());
    }
}
