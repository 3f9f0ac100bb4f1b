/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Lexer → parser orchestration.
//!
//! # Modes
//!
//! | Entry point | Mode | Threads |
//! |---|---|---|
//! | [`parse`], [`parse_with`] | inline: the parser pulls tokens straight from the lexer | caller's |
//! | [`parse_concurrent`] | concurrent: lexer and parser on separate blocking tasks | two tokio blocking threads |
//! | [`parse_file`] | whichever [`ParseMode`] the config selects | as selected |
//!
//! Both modes produce the same [`Document`] for the same input.
//!
//! # Concurrent mode
//!
//! ```text
//!   reader ──► Lexer ──► mpsc (bounded) ──► Parser ──► Document
//!                ▲                             │
//!                └──────── watch: stop ◄───────┘
//! ```
//!
//! The parser raises `stop` as soon as it finishes, successfully or not.  The
//! lexer races every enqueue against that signal, so once the parser is done
//! it abandons the rest of the input instead of waiting on a full queue.
//! A parse error is returned as soon as the parser has it, even while the
//! lexer is still blocked reading.
//! A task that panics drops its end of both channels, which unblocks the
//! other one; the panic is reported as [`TgffError::Pipeline`].

use std::io::{self, Read};
use std::path::Path;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinError;
use tracing::{debug, info};

use crate::config::{ParseConfig, ParseMode};
use crate::document::Document;
use crate::error::TgffError;
use crate::lexer::{Lexer, LexerOptions};
use crate::parser::Parser;
use crate::token::Token;

/// Token queue capacity used when none is configured.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Settings for [`parse_concurrent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub lexer: LexerOptions,
    /// Bound of the lexer → parser queue.  Zero is treated as one.
    pub queue_capacity: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            lexer: LexerOptions::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

// ── Inline mode ───────────────────────────────────────────────────────────────

/// Parse TGFF text from `reader` on the calling thread.
pub fn parse<R: Read>(reader: R) -> Result<Document, TgffError> {
    parse_with(reader, &LexerOptions::default())
}

/// [`parse`] with explicit lexer options.
pub fn parse_with<R: Read>(reader: R, options: &LexerOptions) -> Result<Document, TgffError> {
    Parser::new(Lexer::with_options(reader, *options)).run()
}

// ── Concurrent mode ───────────────────────────────────────────────────────────

/// Parse TGFF text with the lexer and the parser running concurrently.
///
/// Must be called from within a tokio runtime.
pub async fn parse_concurrent<R>(reader: R, options: &PipelineOptions) -> Result<Document, TgffError>
where
    R: Read + Send + 'static,
{
    let capacity = options.queue_capacity.max(1);
    let (token_tx, token_rx) = mpsc::channel::<io::Result<Token>>(capacity);
    let (stop_tx, stop_rx) = watch::channel(false);

    debug!(capacity, exponent = options.lexer.exponent, "starting concurrent pipeline");

    let lexer = Lexer::with_options(reader, options.lexer);
    let handle = Handle::current();
    let lexer_task = tokio::task::spawn_blocking(move || produce(lexer, token_tx, stop_rx, handle));

    let parser_task = tokio::task::spawn_blocking(move || {
        let result = Parser::new(ChannelTokens { rx: token_rx }).run();
        // The lexer may already be gone; nobody left to notify is fine.
        let _ = stop_tx.send(true);
        result
    });

    // A parse error is returned without joining the lexer, which may still be
    // blocked in a read; it stops on its next enqueue.
    let document = match parser_task.await.map_err(|e| task_failed("parser", e))? {
        Ok(document) => document,
        Err(e) => {
            debug!(error = %e, "parser failed, lexer left to stop on its own");
            return Err(e);
        }
    };

    // The parser only completes once the queue is closed, so the lexer is
    // finished here.  A dead lexer also closes the queue, which the parser
    // cannot tell apart from a clean end of input.
    let sent = lexer_task.await.map_err(|e| task_failed("lexer", e))?;

    debug!(tokens = sent, "concurrent pipeline finished");
    Ok(document)
}

/// Lexer side of the queue.  Returns how many items were enqueued.
fn produce<R: Read>(
    lexer: Lexer<R>,
    tx: mpsc::Sender<io::Result<Token>>,
    mut stop: watch::Receiver<bool>,
    handle: Handle,
) -> usize {
    let mut sent = 0;

    for item in lexer {
        let delivered = handle.block_on(async {
            tokio::select! {
                biased;
                // Fires on `true` and when the parser side is dropped.
                _ = stop.changed() => false,
                result = tx.send(item) => result.is_ok(),
            }
        });

        if !delivered {
            debug!(sent, "parser finished, lexer stopping early");
            return sent;
        }
        sent += 1;
    }

    sent
}

/// Parser side of the queue, seen as a plain token iterator.
struct ChannelTokens {
    rx: mpsc::Receiver<io::Result<Token>>,
}

impl Iterator for ChannelTokens {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.blocking_recv()
    }
}

fn task_failed(stage: &str, e: JoinError) -> TgffError {
    TgffError::Pipeline(format!("{stage} task: {e}"))
}

// ── Files ─────────────────────────────────────────────────────────────────────

/// Open `path` and parse it in the mode `config` selects.
///
/// Failing to open the file is an [`TgffError::Io`].
pub async fn parse_file(path: impl AsRef<Path>, config: &ParseConfig) -> Result<Document, TgffError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?.into_std().await;

    info!(path = %path.display(), mode = ?config.mode, "parsing");

    match config.mode {
        ParseMode::Inline => {
            let options = config.lexer_options();
            tokio::task::spawn_blocking(move || parse_with(file, &options))
                .await
                .map_err(|e| task_failed("inline parse", e))?
        }
        ParseMode::Concurrent => parse_concurrent(file, &config.pipeline_options()).await,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
