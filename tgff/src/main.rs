/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use tgff::config::{ParseConfig, ParseMode};
use tgff::hyperperiod;
use tgff::Document;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Parse a TGFF task-graph file and report what it contains.
///
/// Example:
///   tgff graphs.tgff --mode concurrent --dump
#[derive(Debug, Parser)]
#[command(name = "tgff", about = "TGFF task-graph file reader", long_about = None)]
struct Cli {
    /// TGFF file to parse.
    file: PathBuf,

    /// Path to a YAML parse configuration.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Override the configured parse mode.
    #[arg(short = 'm', long = "mode", value_enum)]
    mode: Option<ParseMode>,

    /// Accept exponents on numbers (1.5e3).
    #[arg(short = 'e', long = "exponent", default_value_t = false)]
    exponent: bool,

    /// Print the parsed document as YAML on stdout.
    #[arg(short = 'd', long = "dump", default_value_t = false)]
    dump: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=tgff=trace).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        file     = %cli.file.display(),
        config   = ?cli.config,
        mode     = ?cli.mode,
        exponent = cli.exponent,
        dump     = cli.dump,
        "Configuration"
    );

    if let Err(e) = run(&cli).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    // ── Effective configuration: file, then flags ─────────────────────────────
    let mut config = match &cli.config {
        Some(path) => ParseConfig::load_from_file(path)?,
        None => ParseConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    config.allow_exponent |= cli.exponent;

    // ── Parse ─────────────────────────────────────────────────────────────────
    let document = tgff::parse_file(&cli.file, &config)
        .await
        .with_context(|| format!("Failed to parse {}", cli.file.display()))?;

    summarize(&document);

    if cli.dump {
        let yaml = serde_yaml::to_string(&document).context("Failed to serialise document")?;
        print!("{yaml}");
    }

    Ok(())
}

fn summarize(document: &Document) {
    info!(
        hyperperiod = document.hyperperiod,
        graphs = document.graphs.len(),
        tables = document.tables.len(),
        "Parsed document"
    );

    for graph in &document.graphs {
        info!(
            "  [{name} {number}]  period={period}  tasks={tasks}  arcs={arcs}  deadlines={deadlines}",
            name = graph.name,
            number = graph.number,
            period = graph.period,
            tasks = graph.tasks.len(),
            arcs = graph.arcs.len(),
            deadlines = graph.deadlines.len(),
        );
    }
    for table in &document.tables {
        info!(
            "  [{name} {number}]  attributes={attributes}  columns={columns}  rows={rows}",
            name = table.name,
            number = table.number,
            attributes = table.attributes.len(),
            columns = table.columns.len(),
            rows = table.rows(),
        );
    }

    match hyperperiod::derive(document) {
        Ok(derived) if derived != document.hyperperiod => warn!(
            declared = document.hyperperiod,
            derived, "Declared hyperperiod differs from the LCM of the graph periods"
        ),
        Ok(_) => {}
        Err(e) => warn!("Cannot derive a hyperperiod: {}", e),
    }
}
