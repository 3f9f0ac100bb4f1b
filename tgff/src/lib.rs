/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! TGFF reader: Task Graphs For Free text → [`Document`].
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── token         – Token / TokenKind shared by lexer and parser
//! ├── lexer/        – byte-level state machine producing tokens
//! ├── parser/       – grammar state machine producing a Document
//! ├── document      – Document / Graph / Table result model
//! ├── pipeline      – inline and concurrent lexer → parser orchestration
//! ├── config/       – YAML parse configuration
//! ├── hyperperiod/  – LCM of graph periods
//! └── error         – TgffError
//! ```
//!
//! ```no_run
//! # fn main() -> Result<(), tgff::TgffError> {
//! let file = std::fs::File::open("graphs.tgff")?;
//! let doc = tgff::parse(file)?;
//! println!("{} graph(s), hyperperiod {}", doc.graphs.len(), doc.hyperperiod);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod hyperperiod;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod token;

pub use config::{ParseConfig, ParseMode};
pub use document::{Arc, Column, Deadline, Document, Graph, Table, Task};
pub use error::TgffError;
pub use lexer::{Lexer, LexerOptions};
pub use parser::Parser;
pub use pipeline::{parse, parse_concurrent, parse_file, parse_with, PipelineOptions};
pub use token::{Token, TokenKind};
