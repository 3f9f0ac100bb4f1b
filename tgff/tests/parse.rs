/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! End-to-end parsing of TGFF text through the public API.

use std::fs::File;
use std::io::Cursor;
use std::path::PathBuf;

use tgff::config::{ParseConfig, ParseMode};
use tgff::{hyperperiod, parse, parse_concurrent, parse_file, PipelineOptions, TgffError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.tgff"))
}

// ── Small inputs ──────────────────────────────────────────────────────────────

#[test]
fn hyperperiod_only() {
    let doc = parse("@HYPERPERIOD 1180".as_bytes()).unwrap();
    assert_eq!(doc.hyperperiod, 1180);
    assert!(doc.graphs.is_empty());
    assert!(doc.tables.is_empty());
}

#[test]
fn garbage_after_control_marker_fails() {
    let err = parse("  @ garbage".as_bytes()).unwrap_err();
    assert!(matches!(err, TgffError::Lex { line: 1, .. }), "got {err}");
}

#[test]
fn lowercase_argument_to_control_keyword_fails() {
    let err = parse("@HYPERPERIOD garbage".as_bytes()).unwrap_err();
    assert!(err.is_grammar(), "got {err}");
}

#[test]
fn task_graph_block() {
    let text = "\
@TASK_GRAPH 0 {
  PERIOD 590
  TASK t0_0 TYPE 2
  TASK t0_1 TYPE 3
  ARC a0_0 FROM t0_0 TO t0_1 TYPE 0
  HARD_DEADLINE d0_0 ON t0_1 AT 590
}
";
    let doc = parse(text.as_bytes()).unwrap();
    let graph = doc.graph("TASK_GRAPH", 0).unwrap();
    assert_eq!(graph.period, 590);
    assert_eq!(graph.tasks.len(), 2);
    assert_eq!(graph.arcs.len(), 1);
    assert_eq!(graph.deadlines.len(), 1);
    assert_eq!(graph.arcs[0].from, "t0_0");
    assert_eq!(graph.deadlines[0].on, "t0_1");
}

#[test]
fn commun_table_block() {
    let text = "\
@COMMUN 0 {
# price
  70.1121
#-----------
# type exec_time
  0 48.5893
  1 33.4384
}
";
    let doc = parse(text.as_bytes()).unwrap();
    let table = doc.table("COMMUN", 0).unwrap();
    assert_eq!(table.attribute("price"), Some(70.1121));
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.columns[0].name, "type");
    assert_eq!(table.columns[0].data, vec![0.0, 1.0]);
    assert_eq!(table.columns[1].name, "exec_time");
    assert_eq!(table.columns[1].data, vec![48.5893, 33.4384]);
}

#[test]
fn title_bytes_must_be_valid_utf8() {
    let err = parse(&b"@COMMUN 0 {\n# pr\xFFice\n 1\n}\n"[..]).unwrap_err();
    assert!(matches!(err, TgffError::Lex { line: 2, .. }), "got {err}");
}

#[test]
fn truncated_block_fails() {
    let err = parse("@TASK_GRAPH 0 {\n  PERIOD 590\n".as_bytes()).unwrap_err();
    assert!(matches!(err, TgffError::UnexpectedEndOfInput { .. }), "got {err}");
}

// ── Fixture ───────────────────────────────────────────────────────────────────

#[test]
fn simple_fixture() {
    let doc = parse(File::open(fixture("simple")).unwrap()).unwrap();

    assert_eq!(doc.hyperperiod, 1180);
    assert_eq!(doc.graphs.len(), 5);
    assert_eq!(doc.tables.len(), 3);

    // (period, tasks, arcs, deadlines)
    let graphs = [
        (590, 12, 19, 1),
        (1180, 20, 25, 6),
        (1180, 24, 28, 8),
        (590, 8, 7, 3),
        (1180, 20, 24, 6),
    ];
    for (i, (period, tasks, arcs, deadlines)) in graphs.into_iter().enumerate() {
        let g = &doc.graphs[i];
        assert_eq!(g.name, "TASK_GRAPH");
        assert_eq!(g.number, i as u64);
        assert_eq!(g.period, period, "graph {i}");
        assert_eq!(g.tasks.len(), tasks, "graph {i}");
        assert_eq!(g.arcs.len(), arcs, "graph {i}");
        assert_eq!(g.deadlines.len(), deadlines, "graph {i}");
    }

    for (i, price) in [70.1121, 71.4235, 80.491].into_iter().enumerate() {
        let t = &doc.tables[i];
        assert_eq!(t.name, "COMMUN");
        assert_eq!(t.number, i as u64);
        assert_eq!(t.attribute("price"), Some(price));
        assert_eq!(t.columns.len(), 2);
        assert_eq!(t.columns[0].name, "type");
        assert_eq!(t.columns[1].name, "exec_time");
        assert_eq!(t.rows(), 50);
    }

    let last = &doc.tables[2];
    let types = &last.column("type").unwrap().data;
    let times = &last.column("exec_time").unwrap().data;
    assert_eq!(types[..3], [0.0, 1.0, 2.0]);
    assert_eq!(times[..3], [48.5893, 33.4384, 34.2468]);
    assert_eq!(types[49], 49.0);
    assert_eq!(times[49], 39.25);

    assert_eq!(hyperperiod::derive(&doc).unwrap(), doc.hyperperiod);
}

#[test]
fn parsing_twice_gives_equal_documents() {
    let first = parse(File::open(fixture("simple")).unwrap()).unwrap();
    let second = parse(File::open(fixture("simple")).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_mode_matches_inline_on_fixture() {
    let text = std::fs::read(fixture("simple")).unwrap();
    let inline = parse(text.as_slice()).unwrap();

    for capacity in [1, 16, 1024] {
        let options = PipelineOptions {
            queue_capacity: capacity,
            ..Default::default()
        };
        let concurrent = parse_concurrent(Cursor::new(text.clone()), &options)
            .await
            .unwrap();
        assert_eq!(concurrent, inline, "capacity {capacity}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn parse_file_follows_configured_mode() {
    let inline = parse_file(fixture("simple"), &ParseConfig::default())
        .await
        .unwrap();

    let config = ParseConfig::from_yaml("mode: concurrent\nqueue_capacity: 4\n").unwrap();
    assert_eq!(config.mode, ParseMode::Concurrent);
    let concurrent = parse_file(fixture("simple"), &config).await.unwrap();

    assert_eq!(inline, concurrent);
}
