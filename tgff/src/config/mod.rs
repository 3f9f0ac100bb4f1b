/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Parse configuration loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! mode: concurrent      # inline | concurrent
//! queue_capacity: 64    # lexer → parser queue bound (concurrent mode)
//! allow_exponent: false # accept 1.5e3 style numbers
//! ```
//!
//! Every key is optional; an empty file yields [`ParseConfig::default`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::lexer::LexerOptions;
use crate::pipeline::{PipelineOptions, DEFAULT_QUEUE_CAPACITY};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Maps directly onto the YAML file layout.  Missing keys stay `None` and
/// fall back to the [`ParseConfig`] defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParseConfigFile {
    mode: Option<ParseMode>,
    queue_capacity: Option<usize>,
    allow_exponent: Option<bool>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// How the lexer and the parser are scheduled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// The parser pulls tokens from the lexer on one thread.
    #[default]
    Inline,
    /// Lexer and parser run as separate tasks joined by a bounded queue.
    Concurrent,
}

/// Effective parse settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    pub mode: ParseMode,
    /// Always at least 1 once loaded.
    pub queue_capacity: usize,
    pub allow_exponent: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::Inline,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            allow_exponent: false,
        }
    }
}

impl ParseConfig {
    /// Reads and validates the YAML file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is
    /// structurally invalid, or it contains an unknown key.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading parse configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        info!(
            mode = ?config.mode,
            queue_capacity = config.queue_capacity,
            allow_exponent = config.allow_exponent,
            "Parse configuration loaded"
        );
        Ok(config)
    }

    /// Builds a configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserialises as unit, not as a map.
        let file: ParseConfigFile = if content.trim().is_empty() {
            debug!("empty configuration, using defaults");
            ParseConfigFile::default()
        } else {
            serde_yaml::from_str(content).context("invalid parse configuration")?
        };

        let defaults = Self::default();
        let mut queue_capacity = file.queue_capacity.unwrap_or(defaults.queue_capacity);
        if queue_capacity == 0 {
            warn!("queue_capacity 0 is not usable, clamping to 1");
            queue_capacity = 1;
        }

        Ok(Self {
            mode: file.mode.unwrap_or(defaults.mode),
            queue_capacity,
            allow_exponent: file.allow_exponent.unwrap_or(defaults.allow_exponent),
        })
    }

    pub fn lexer_options(&self) -> LexerOptions {
        LexerOptions {
            exponent: self.allow_exponent,
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            lexer: self.lexer_options(),
            queue_capacity: self.queue_capacity,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
