/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! In-memory model of a parsed TGFF file.
//!
//! ```text
//! Document
//! ├── hyperperiod
//! ├── graphs: Graph ── tasks / arcs / deadlines   (@TASK_GRAPH n { ... })
//! └── tables: Table ── attributes / columns       (@COMMUN n { # ... })
//! ```
//!
//! # Ownership model
//! The parser owns the `Document` for the whole parse.  The graph or table
//! whose block is currently open lives in the parser state and is appended
//! when its `}` is read, so sequences only ever grow.  On success the
//! finished `Document` is moved to the caller; on failure it is dropped.
//!
//! Arcs and deadlines refer to tasks by name only; nothing here resolves or
//! checks those references.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Document ──────────────────────────────────────────────────────────────────

/// Root of a parsed TGFF file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Value of the last `@HYPERPERIOD` declaration (0 if there was none).
    pub hyperperiod: u64,
    /// Graph blocks in declaration order.
    pub graphs: Vec<Graph>,
    /// Table blocks in declaration order.
    pub tables: Vec<Table>,
}

impl Document {
    /// First graph declared with this keyword and number.
    pub fn graph(&self, name: &str, number: u64) -> Option<&Graph> {
        self.graphs
            .iter()
            .find(|g| g.name == name && g.number == number)
    }

    /// First table declared with this keyword and number.
    pub fn table(&self, name: &str, number: u64) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.name == name && t.number == number)
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// A task graph block, e.g. `@TASK_GRAPH 0 { ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// The control keyword that opened the block (`TASK_GRAPH`).
    pub name: String,
    /// The literal following the keyword.  An identity, not an index.
    pub number: u64,
    /// Set by `PERIOD`; zero until then.
    pub period: u64,
    pub tasks: Vec<Task>,
    pub arcs: Vec<Arc>,
    /// `HARD_DEADLINE` entries.
    pub deadlines: Vec<Deadline>,
}

impl Graph {
    pub fn new(name: impl Into<String>, number: u64) -> Self {
        Self {
            name: name.into(),
            number,
            ..Default::default()
        }
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }
}

/// `TASK <name> TYPE <n>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u64,
}

/// `ARC <name> FROM <task> TO <task> TYPE <n>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arc {
    pub name: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: u64,
}

/// `HARD_DEADLINE <name> ON <task> AT <time>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub name: String,
    pub on: String,
    pub at: u64,
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// A data table block, e.g. `@COMMUN 0 { # price ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub number: u64,
    /// Attribute header.  A repeated title keeps the last value.
    ///
    /// `BTreeMap` so dumps list attributes in a stable order.
    pub attributes: BTreeMap<String, f64>,
    /// Data columns in header order.
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, number: u64) -> Self {
        Self {
            name: name.into(),
            number,
            ..Default::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).copied()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of data rows (every column has the same length).
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }
}

/// One named column of a table's data section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: Vec<f64>,
}

/// Rebuild columns from a row-major value list.
///
/// The source lists one full row per `names.len()` consecutive numbers; the
/// result stores `columns[i].data[j] = values[j * cols + i]`.
///
/// Returns `None` when the values do not form whole rows, including any
/// values at all with zero column names.  No names and no values is an empty
/// data section.
pub fn columns_from_rows(names: Vec<String>, values: &[f64]) -> Option<Vec<Column>> {
    let cols = names.len();
    if cols == 0 {
        return values.is_empty().then(Vec::new);
    }
    if values.len() % cols != 0 {
        return None;
    }

    let rows = values.len() / cols;
    let columns = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Column {
            name,
            data: values.iter().skip(i).step_by(cols).copied().collect(),
        })
        .collect::<Vec<_>>();

    debug_assert!(columns.iter().all(|c| c.data.len() == rows));
    Some(columns)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
