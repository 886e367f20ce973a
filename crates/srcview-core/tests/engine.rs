use srcview_core::{DocumentEngine, EngineEvent, Marker};
use srcview_document::SourceText;
use srcview_syntax::{
    PlainTokenizer, StyleTable, Token, TokenCategory, VecTokenizer, tokenizer_for_path,
};
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = "<?php\necho 1;\n";

fn numbered_lines(count: usize) -> String {
    (1..=count)
        .map(|n| format!("$line{n} = {n};"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn plain_engine(text: &str) -> DocumentEngine {
    let mut engine = DocumentEngine::new(Box::new(PlainTokenizer), StyleTable::default());
    engine.load(SourceText::from_string(text.to_string()));
    engine
}

fn assert_runs_match_lines(engine: &DocumentEngine) {
    let index = engine.line_index();
    let runs = engine.run_table();
    for line in 0..engine.line_count() {
        let styled: usize = runs
            .styled_runs(line)
            .iter()
            .map(|run| run.range.len())
            .sum();
        assert_eq!(styled, index.line_length(line), "styled runs of line {line}");
        assert_eq!(
            runs.line_total(line),
            index.line_span(line).len(),
            "raw runs of line {line}"
        );
    }
    assert_eq!(runs.total_len(), engine.source().len());
}

#[test]
fn run_lengths_match_line_lengths() {
    for text in ["", "a", "a\n", "\n\n", "one\ntwo\r\nthree", SAMPLE] {
        assert_runs_match_lines(&plain_engine(text));
    }
}

#[test]
fn php_highlighting_covers_every_line() {
    let text = "<?php\n/**\n * Doc\n */\nfunction f($a) {\n    return $a . \"x\\n\";\n}\n?>\n<p>done</p>\n";
    let mut engine = DocumentEngine::new(tokenizer_for_path(Some("view.php")), StyleTable::default());
    engine.load(SourceText::from_string(text));

    assert_runs_match_lines(&engine);
    let comment_line = engine.styled_line(2);
    assert!(
        comment_line
            .iter()
            .any(|segment| segment.category == TokenCategory::Comment)
    );
}

#[test]
fn multi_line_token_is_split() {
    let mut engine = DocumentEngine::new(
        Box::new(VecTokenizer::new(vec![Token::new(3, 10, TokenCategory::String)])),
        StyleTable::default(),
    );
    engine.load(SourceText::from_string(SAMPLE));

    let first: Vec<(usize, usize)> = engine
        .line_runs(0)
        .iter()
        .map(|run| (run.line, run.length))
        .collect();
    let second: Vec<(usize, usize)> = engine
        .line_runs(1)
        .iter()
        .map(|run| (run.line, run.length))
        .collect();
    assert_eq!(first, vec![(0, 3)]);
    assert_eq!(second, vec![(1, 7)]);
}

#[test]
fn malformed_tokens_do_not_break_loading() {
    let tokens = vec![
        Token::new(0, 0, TokenCategory::Keyword),
        Token::new(0, 5, TokenCategory::PhpTag),
        Token::new(12, 40, TokenCategory::Comment),
        Token::new(99, 3, TokenCategory::Number),
    ];
    let mut engine = DocumentEngine::new(Box::new(VecTokenizer::new(tokens)), StyleTable::default());
    engine.load(SourceText::from_string(SAMPLE));

    assert_eq!(engine.line_count(), 3);
    assert_eq!(engine.line_runs(0).len(), 1);
    let segments = engine.styled_line(1);
    let rebuilt: String = segments.iter().map(|segment| segment.text).collect();
    assert_eq!(rebuilt, "echo 1;");
}

#[test]
fn move_to_clamps_into_document() {
    let mut engine = plain_engine(&numbered_lines(50));
    assert_eq!(engine.line_count(), 50);

    assert_eq!(engine.move_to(0, true), 1);
    assert_eq!(engine.current_line(), Some(1));
    assert_eq!(engine.move_to(999, true), 50);
    assert_eq!(engine.current_line(), Some(50));
    assert_eq!(engine.move_to(25, true), 25);
}

#[test]
fn double_toggle_restores_breakpoint() {
    let mut engine = plain_engine(&numbered_lines(10));
    for line in [1, 5, 10] {
        let before = engine.has_breakpoint_at(line);
        engine.toggle_breakpoint_at(line);
        engine.toggle_breakpoint_at(line);
        assert_eq!(engine.has_breakpoint_at(line), before);
    }

    engine.toggle_breakpoint_at(4);
    engine.toggle_breakpoint_at(4);
    engine.toggle_breakpoint_at(4);
    assert!(engine.has_breakpoint_at(4));
}

#[test]
fn current_line_is_exclusive() {
    let mut engine = plain_engine(&numbered_lines(10));
    engine.move_to(3, true);
    engine.move_to(7, true);

    let current: Vec<usize> = engine
        .gutter(0, 9)
        .into_iter()
        .filter(|row| row.is_current)
        .map(|row| row.line + 1)
        .collect();
    assert_eq!(current, vec![7]);
}

#[test]
fn gutter_markers_combine_state() {
    let mut engine = plain_engine(&numbered_lines(12));
    engine.toggle_breakpoint_at(2);
    engine.toggle_breakpoint_at(3);
    engine.move_to(3, true);
    engine.move_to(4, false);

    let rows = engine.gutter(0, 4);
    assert_eq!(rows[1].marker, Marker::Breakpoint);
    assert_eq!(rows[2].marker, Marker::BreakpointCurrent);
    assert_eq!(rows[3].marker, Marker::None);
    assert_eq!(rows[0].label, " 1");
}

#[test]
fn gutter_width_grows_at_powers_of_ten() {
    let metrics = srcview_core::FontMetrics {
        glyph_width: 8,
        line_height: 16,
    };
    let mut engine = plain_engine(&numbered_lines(9));
    let nine = engine.gutter_width(metrics);

    engine.load(SourceText::from_string(numbered_lines(10)));
    let ten = engine.gutter_width(metrics);

    engine.load(SourceText::from_string(numbered_lines(11)));
    engine.drain_events().for_each(drop);
    let eleven = engine.gutter_width(metrics);

    assert!(ten > nine);
    assert_eq!(ten, eleven);
    assert!(!engine.has_pending_events());
}

#[test]
fn empty_document_is_usable() {
    let mut engine = plain_engine("");
    assert_eq!(engine.line_count(), 1);
    assert!(engine.run_table().is_empty());
    assert_eq!(engine.move_to(5, true), 1);
    assert_eq!(engine.toggle_breakpoint_at(1), Some(true));
    assert_eq!(engine.gutter(0, 0).len(), 1);
    assert!(engine.styled_line(0).is_empty());
    assert_eq!(engine.find("x", 1), None);
}

#[test]
fn reloading_same_file_keeps_breakpoints() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.php");
    fs::write(&path, "<?php\necho 1;\necho 2;\n").unwrap();

    let mut engine = DocumentEngine::new(Box::new(PlainTokenizer), StyleTable::default());
    engine.load(SourceText::from_path(&path).unwrap());
    engine.toggle_breakpoint_at(2);
    engine.move_to(3, true);

    fs::write(&path, "<?php\necho 1;\n").unwrap();
    engine.load(SourceText::from_path(&path).unwrap());
    assert_eq!(engine.breakpoints(), vec![2]);
    assert_eq!(engine.current_line(), None);

    let other = dir.path().join("other.php");
    fs::write(&other, "<?php\n").unwrap();
    engine.load(SourceText::from_path(&other).unwrap());
    assert!(engine.breakpoints().is_empty());
}

#[test]
fn events_follow_state_changes() {
    let mut engine = plain_engine("a\nb\nc");
    engine.drain_events().for_each(drop);

    engine.toggle_breakpoint_at(2);
    engine.move_to(3, true);
    engine.clear_current();

    let events: Vec<EngineEvent> = engine.drain_events().collect();
    assert_eq!(
        events,
        vec![
            EngineEvent::BreakpointToggled {
                line: 2,
                enabled: true
            },
            EngineEvent::GutterInvalidated,
            EngineEvent::CurrentLineChanged { line: Some(3) },
            EngineEvent::GutterInvalidated,
            EngineEvent::CurrentLineChanged { line: None },
            EngineEvent::GutterInvalidated,
        ]
    );
}
