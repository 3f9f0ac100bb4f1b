/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! TGFF grammar.
//!
//! [`Parser`] consumes any `Iterator<Item = io::Result<Token>>` (the
//! [`Lexer`](crate::lexer::Lexer) itself in inline mode, or the receiving end
//! of the token queue in concurrent mode) and builds a [`Document`].
//!
//! ```text
//! file        := (hyperperiod | block)*
//! hyperperiod := '@' HYPERPERIOD NUMBER
//! block       := '@' KEYWORD NUMBER '{' (graph-body | table-body) '}'
//! graph-body  := (PERIOD NUMBER
//!                | TASK name TYPE NUMBER
//!                | ARC name FROM name TO name TYPE NUMBER
//!                | HARD_DEADLINE name ON name AT NUMBER)*
//! table-body  := (TITLE)* NUMBER*     attribute header, counts must match
//!                (TITLE)* NUMBER*     data header + row-major rows
//! ```
//!
//! A block is a graph or a table depending on the first token after `{`:
//! an identifier opens a graph, a title opens a table.  That single token of
//! lookahead is held in a private pushback slot.
//!
//! # States
//!
//! | State | Leaves on | Next |
//! |---|---|---|
//! | `TopLevel` | end of input | `Complete` |
//! | `TopLevel` | `@HYPERPERIOD n` | `TopLevel` |
//! | `TopLevel` | `@KEYWORD n {` + ident / title | `GraphBody` / `TableHeader` |
//! | `GraphBody` | `}` | `TopLevel` |
//! | `TableHeader` | attribute values read | `TableData` |
//! | `TableData` | `}` | `TopLevel` |
//!
//! Any error ends the run; the partially built document is dropped.

use std::io;

use tracing::{debug, trace, warn};

use crate::document::{columns_from_rows, Arc, Deadline, Document, Graph, Table, Task};
use crate::error::TgffError;
use crate::token::{Token, TokenKind};

/// Control keyword of the top-level hyperperiod declaration.
pub const HYPERPERIOD: &str = "HYPERPERIOD";

const PERIOD: &str = "PERIOD";
const TASK: &str = "TASK";
const ARC: &str = "ARC";
const HARD_DEADLINE: &str = "HARD_DEADLINE";

// ── State machine ─────────────────────────────────────────────────────────────

/// Parser state.  The graph or table under construction travels with the
/// state that fills it.
#[derive(Debug)]
enum State {
    TopLevel,
    GraphBody(Graph),
    TableHeader(Table),
    TableData(Table),
    Complete,
}

impl State {
    fn label(&self) -> &'static str {
        match self {
            State::TopLevel => "top level",
            State::GraphBody(_) => "graph block",
            State::TableHeader(_) => "table header",
            State::TableData(_) => "table data",
            State::Complete => "complete",
        }
    }
}

/// Token-stream consumer that builds a [`Document`].
#[derive(Debug)]
pub struct Parser<I> {
    tokens: I,
    /// One token of pushback.
    peeked: Option<Token>,
    document: Document,
}

impl<I> Parser<I>
where
    I: Iterator<Item = io::Result<Token>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            peeked: None,
            document: Document::default(),
        }
    }

    /// Run the grammar to completion.
    ///
    /// Returns the finished document once the token stream ends at the top
    /// level, or the first error encountered.  No token is pulled after the
    /// run reaches either outcome; dropping `self` on return releases the
    /// token source.
    pub fn run(mut self) -> Result<Document, TgffError> {
        let mut state = State::TopLevel;

        loop {
            trace!(state = state.label(), "parser step");

            let step = match state {
                State::TopLevel => self.top_level(),
                State::GraphBody(graph) => self.graph_body(graph),
                State::TableHeader(table) => self.table_header(table),
                State::TableData(table) => self.table_data(table),
                State::Complete => {
                    debug!(
                        hyperperiod = self.document.hyperperiod,
                        graphs = self.document.graphs.len(),
                        tables = self.document.tables.len(),
                        "parse complete"
                    );
                    return Ok(self.document);
                }
            };

            state = match step {
                Ok(next) => next,
                Err(e) => {
                    debug!(error = %e, "parse failed");
                    return Err(e);
                }
            };
        }
    }

    // ── States ────────────────────────────────────────────────────────────────

    fn top_level(&mut self) -> Result<State, TgffError> {
        const CONTEXT: &str = "control declaration";

        let keyword = match self.receive()? {
            None => return Ok(State::Complete),
            Some(t) if t.kind == TokenKind::Control => t,
            Some(t) => {
                return Err(TgffError::UnexpectedToken {
                    expected: "a control keyword",
                    found: t,
                })
            }
        };

        let number = self.require_uint("an unsigned number after the keyword", CONTEXT)?;

        if keyword.text == HYPERPERIOD {
            debug!(hyperperiod = number, "hyperperiod declared");
            self.document.hyperperiod = number;
            return Ok(State::TopLevel);
        }

        self.require(TokenKind::BlockOpen, CONTEXT)?;

        match self.receive()? {
            Some(t) if t.kind == TokenKind::Ident => {
                self.unreceive(t);
                Ok(State::GraphBody(Graph::new(keyword.text, number)))
            }
            Some(t) if t.kind == TokenKind::Title => {
                self.unreceive(t);
                Ok(State::TableHeader(Table::new(keyword.text, number)))
            }
            Some(t) => Err(TgffError::UnexpectedToken {
                expected: "a graph statement or a table header",
                found: t,
            }),
            None => Err(TgffError::UnexpectedEndOfInput { state: "block" }),
        }
    }

    fn graph_body(&mut self, mut graph: Graph) -> Result<State, TgffError> {
        const CONTEXT: &str = "graph block";

        let statement = match self.receive()? {
            Some(t) if t.kind == TokenKind::BlockClose => {
                debug!(
                    name = %graph.name,
                    number = graph.number,
                    period = graph.period,
                    tasks = graph.tasks.len(),
                    arcs = graph.arcs.len(),
                    deadlines = graph.deadlines.len(),
                    "graph parsed"
                );
                self.document.graphs.push(graph);
                return Ok(State::TopLevel);
            }
            Some(t) if t.kind == TokenKind::Ident => t,
            Some(t) => {
                return Err(TgffError::UnexpectedToken {
                    expected: "a graph statement or '}'",
                    found: t,
                })
            }
            None => return Err(TgffError::UnexpectedEndOfInput { state: CONTEXT }),
        };

        match statement.text.as_str() {
            PERIOD => graph.period = self.require_uint("an unsigned period", CONTEXT)?,
            TASK => {
                let task = self.task()?;
                graph.tasks.push(task);
            }
            ARC => {
                let arc = self.arc()?;
                graph.arcs.push(arc);
            }
            HARD_DEADLINE => {
                let deadline = self.deadline()?;
                graph.deadlines.push(deadline);
            }
            _ => {
                return Err(TgffError::UnexpectedKeyword {
                    expected: "PERIOD, TASK, ARC or HARD_DEADLINE",
                    found: statement,
                })
            }
        }

        Ok(State::GraphBody(graph))
    }

    /// `(TITLE)* NUMBER*` with as many values as titles.
    fn table_header(&mut self, mut table: Table) -> Result<State, TgffError> {
        let titles = self.take_while(TokenKind::Title)?;
        let values = self.take_while(TokenKind::Number)?;

        if titles.len() != values.len() {
            return Err(TgffError::AttributeMismatch {
                table: label(&table),
                titles: titles.len(),
                values: values.len(),
            });
        }

        for (title, value) in titles.into_iter().zip(values) {
            let value = float(value)?;
            if let Some(previous) = table.attributes.get(&title.text) {
                warn!(
                    table = %label(&table),
                    attribute = %title.text,
                    previous,
                    value,
                    "repeated attribute, keeping the last value"
                );
            }
            table.attributes.insert(title.text, value);
        }

        Ok(State::TableData(table))
    }

    /// `(TITLE)* NUMBER* '}'`, values reshaped from rows into columns.
    fn table_data(&mut self, mut table: Table) -> Result<State, TgffError> {
        let titles = self.take_while(TokenKind::Title)?;
        let values = self
            .take_while(TokenKind::Number)?
            .into_iter()
            .map(float)
            .collect::<Result<Vec<f64>, _>>()?;

        let columns = titles.len();
        let names = titles.into_iter().map(|t| t.text).collect();

        table.columns = match columns_from_rows(names, &values) {
            Some(c) => c,
            None => {
                return Err(TgffError::DataMismatch {
                    table: label(&table),
                    columns,
                    values: values.len(),
                })
            }
        };

        self.require(TokenKind::BlockClose, "table block")?;

        debug!(
            name = %table.name,
            number = table.number,
            attributes = table.attributes.len(),
            columns = table.columns.len(),
            rows = table.rows(),
            "table parsed"
        );
        self.document.tables.push(table);

        Ok(State::TopLevel)
    }

    // ── Graph statements (leading keyword already consumed) ───────────────────

    /// `TASK <name> TYPE <n>`
    fn task(&mut self) -> Result<Task, TgffError> {
        const CONTEXT: &str = "TASK statement";

        let name = self.require(TokenKind::Name, CONTEXT)?.text;
        self.require_keyword("TYPE", CONTEXT)?;
        let kind = self.require_uint("an unsigned task type", CONTEXT)?;

        Ok(Task { name, kind })
    }

    /// `ARC <name> FROM <task> TO <task> TYPE <n>`
    fn arc(&mut self) -> Result<Arc, TgffError> {
        const CONTEXT: &str = "ARC statement";

        let name = self.require(TokenKind::Name, CONTEXT)?.text;
        self.require_keyword("FROM", CONTEXT)?;
        let from = self.require(TokenKind::Name, CONTEXT)?.text;
        self.require_keyword("TO", CONTEXT)?;
        let to = self.require(TokenKind::Name, CONTEXT)?.text;
        self.require_keyword("TYPE", CONTEXT)?;
        let kind = self.require_uint("an unsigned arc type", CONTEXT)?;

        Ok(Arc {
            name,
            from,
            to,
            kind,
        })
    }

    /// `HARD_DEADLINE <name> ON <task> AT <time>`
    fn deadline(&mut self) -> Result<Deadline, TgffError> {
        const CONTEXT: &str = "HARD_DEADLINE statement";

        let name = self.require(TokenKind::Name, CONTEXT)?.text;
        self.require_keyword("ON", CONTEXT)?;
        let on = self.require(TokenKind::Name, CONTEXT)?.text;
        self.require_keyword("AT", CONTEXT)?;
        let at = self.require_uint("an unsigned deadline", CONTEXT)?;

        Ok(Deadline { name, on, at })
    }

    // ── Token primitives ──────────────────────────────────────────────────────

    /// Next token, or `None` once the stream is exhausted.
    ///
    /// Lexer error tokens and reader failures become errors here, so no
    /// state ever sees them.
    fn receive(&mut self) -> Result<Option<Token>, TgffError> {
        let token = match self.peeked.take() {
            Some(t) => t,
            None => match self.tokens.next() {
                Some(t) => t?,
                None => return Ok(None),
            },
        };

        if token.kind == TokenKind::Error {
            return Err(TgffError::Lex {
                line: token.line,
                message: token.text,
            });
        }

        Ok(Some(token))
    }

    fn unreceive(&mut self, token: Token) {
        debug_assert!(self.peeked.is_none(), "pushback slot holds one token");
        self.peeked = Some(token);
    }

    fn require(&mut self, kind: TokenKind, context: &'static str) -> Result<Token, TgffError> {
        match self.receive()? {
            Some(t) if t.kind == kind => Ok(t),
            Some(t) => Err(TgffError::UnexpectedToken {
                expected: expected(kind),
                found: t,
            }),
            None => Err(TgffError::UnexpectedEndOfInput { state: context }),
        }
    }

    fn require_keyword(
        &mut self,
        keyword: &'static str,
        context: &'static str,
    ) -> Result<(), TgffError> {
        match self.receive()? {
            Some(t) if t.is(TokenKind::Ident, keyword) => Ok(()),
            Some(t) if t.kind == TokenKind::Ident => Err(TgffError::UnexpectedKeyword {
                expected: keyword,
                found: t,
            }),
            Some(t) => Err(TgffError::UnexpectedToken {
                expected: keyword,
                found: t,
            }),
            None => Err(TgffError::UnexpectedEndOfInput { state: context }),
        }
    }

    fn require_uint(
        &mut self,
        expected: &'static str,
        context: &'static str,
    ) -> Result<u64, TgffError> {
        let token = self.require(TokenKind::Number, context)?;
        match token.to_uint() {
            Some(v) => Ok(v),
            None => Err(TgffError::InvalidNumber {
                expected,
                found: token,
            }),
        }
    }

    /// Every consecutive token of `kind`; the first other token is pushed
    /// back.  End of input simply ends the run.
    fn take_while(&mut self, kind: TokenKind) -> Result<Vec<Token>, TgffError> {
        let mut tokens = Vec::new();
        while let Some(t) = self.receive()? {
            if t.kind != kind {
                self.unreceive(t);
                break;
            }
            tokens.push(t);
        }
        Ok(tokens)
    }
}

fn float(token: Token) -> Result<f64, TgffError> {
    match token.to_float() {
        Some(v) => Ok(v),
        None => Err(TgffError::InvalidNumber {
            expected: "a real number",
            found: token,
        }),
    }
}

fn expected(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Error => "an error",
        TokenKind::BlockOpen => "'{'",
        TokenKind::BlockClose => "'}'",
        TokenKind::Control => "a control keyword",
        TokenKind::Ident => "an identifier",
        TokenKind::Name => "a name",
        TokenKind::Number => "a number",
        TokenKind::Title => "a title",
    }
}

fn label(table: &Table) -> String {
    format!("{} {}", table.name, table.number)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
