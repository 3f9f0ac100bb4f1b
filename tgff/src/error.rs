/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the TGFF pipeline.
//!
//! Every failure aborts the whole parse; the caller receives exactly one
//! [`TgffError`] and no partial document.
//!
//! | Category | Variants |
//! |---|---|
//! | lexical | `Lex` |
//! | grammar | `UnexpectedToken`, `UnexpectedKeyword`, `InvalidNumber`, `AttributeMismatch`, `DataMismatch` |
//! | truncated input | `UnexpectedEndOfInput` |
//! | byte source | `Io` (the reader's `io::Error`, untouched) |
//! | pipeline | `Pipeline` (a lexer/parser task died) |

use thiserror::Error;

use crate::token::Token;

/// Top-level error returned by every parse entry point.
#[derive(Debug, Error)]
pub enum TgffError {
    /// An unrecognised character or a malformed numeric literal.
    #[error("lexical error at line {line}: {message}")]
    Lex { line: u32, message: String },

    /// A token of the wrong kind for the current grammar position.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
    },

    /// An identifier of the right kind but not one of the keywords allowed
    /// here (`TASK`, `FROM`, `AT`, ...).
    #[error("expected keyword {expected}, found {found}")]
    UnexpectedKeyword {
        expected: &'static str,
        found: Token,
    },

    /// A number that does not fit the field it is assigned to, e.g. a
    /// negative task type.
    #[error("expected {expected}, found {found}")]
    InvalidNumber {
        expected: &'static str,
        found: Token,
    },

    /// The attribute header of a table has a different number of titles and
    /// values.
    #[error("table {table}: {titles} attribute title(s) but {values} value(s)")]
    AttributeMismatch {
        table: String,
        titles: usize,
        values: usize,
    },

    /// The data section of a table is not a whole number of rows.
    #[error("table {table}: {values} value(s) do not fill rows of {columns} column(s)")]
    DataMismatch {
        table: String,
        columns: usize,
        values: usize,
    },

    /// The token stream ended inside a block or a statement.
    #[error("unexpected end of input while parsing {state}")]
    UnexpectedEndOfInput { state: &'static str },

    /// Propagated unchanged from the byte source.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A lexer or parser task panicked or was cancelled by the runtime.
    #[error("pipeline task failed: {0}")]
    Pipeline(String),
}

impl TgffError {
    /// `true` for the grammar-level variants (as opposed to lexical, I/O and
    /// truncation failures).
    pub fn is_grammar(&self) -> bool {
        matches!(
            self,
            TgffError::UnexpectedToken { .. }
                | TgffError::UnexpectedKeyword { .. }
                | TgffError::InvalidNumber { .. }
                | TgffError::AttributeMismatch { .. }
                | TgffError::DataMismatch { .. }
        )
    }
}
