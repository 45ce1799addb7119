//! End-to-end scenarios: markup in, revealed page out.
//!
//! Pages go through the public parser and the typewriter runner, and in
//! the last group through the viewer on a `TestBackend`.

use phosphor::config::{KeyBindings, DEFAULT_CARET, DEFAULT_SELECTOR};
use phosphor::model::{ElementKind, InlineNode};
use phosphor::parser::parse_page;
use phosphor::theme::{PreferenceStore, ThemeToggle};
use phosphor::typewriter::{
    Completion, FinishReason, Interaction, RevealTiming, RunPhase, SequentialRunner, SkipSignal,
    TextBlock,
};
use phosphor::view::{ColorConfig, PageView, TuiApp, ViewerOptions};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};

// ===== Helpers =====

fn typewriter_blocks(html: &str) -> Vec<TextBlock> {
    let page = parse_page(html, DEFAULT_SELECTOR).expect("page parses");
    PageView::split(page.blocks).1
}

fn paragraph(len: usize) -> String {
    let text: String = "typewriter".chars().cycle().take(len).collect();
    format!("<p data-typewriter>{text}</p>")
}

fn three_block_page() -> String {
    format!(
        "<h1>Title</h1>{}<p>between</p>{}{}",
        paragraph(10),
        paragraph(40),
        paragraph(200)
    )
}

// ===== Scenario A: natural completion =====

#[test]
fn parsed_blocks_reveal_in_order_without_interaction() {
    let blocks = typewriter_blocks(&three_block_page());
    let full: Vec<String> = blocks.iter().map(|b| b.content().plain_text()).collect();
    let mut runner = SequentialRunner::new(blocks, RevealTiming::default(), SkipSignal::new());

    runner.start();
    while !runner.is_finished() {
        runner.tick();
    }

    let tick_ms = runner.timing().tick_ms();
    let durations: Vec<u64> = runner
        .blocks()
        .iter()
        .map(|b| b.timeline().ticks().expect("completed") * tick_ms)
        .collect();
    assert_eq!(durations, vec![280, 1120, 1400]);

    for (block, expected) in runner.blocks().iter().zip(&full) {
        assert_eq!(&block.content().plain_text(), expected);
        assert_eq!(block.timeline().completion, Some(Completion::Progressive));
    }
    assert_eq!(runner.phase(), RunPhase::Finished(FinishReason::Completed));
    assert_eq!(runner.caret().current(), Some(2));
}

// ===== Scenario B: skip mid-reveal =====

#[test]
fn click_during_second_block_sweeps_the_third() {
    let blocks = typewriter_blocks(&three_block_page());
    let skip = SkipSignal::new();
    let mut runner = SequentialRunner::new(blocks, RevealTiming::default(), skip.clone());
    runner.start();
    for _ in 0..20 {
        runner.tick();
    }
    assert_eq!(runner.phase(), RunPhase::Running { current: 1 });

    skip.trigger(Interaction::Click);
    runner.tick();

    assert_eq!(runner.phase(), RunPhase::Finished(FinishReason::Skipped));
    let blocks = runner.blocks();
    assert!(blocks[1].is_fully_revealed());
    assert!(blocks[2].is_fully_revealed());
    assert_eq!(blocks[2].timeline().entered_at, None);
    assert!(blocks[2].caret_active());
    assert!(!blocks[1].caret_active());
}

// ===== Scenario C: whitespace and links =====

#[test]
fn link_label_is_the_only_segment() {
    let blocks = typewriter_blocks(
        r#"<p data-typewriter><span>   </span><a href="/docs">docs</a></p>"#,
    );
    assert_eq!(blocks.len(), 1);
    let block = &blocks[0];
    assert_eq!(block.segments().len(), 1);
    assert_eq!(block.segments()[0].full(), "docs");

    let mut runner = SequentialRunner::new(blocks, RevealTiming::default(), SkipSignal::new());
    runner.start();
    runner.tick();

    let block = &runner.blocks()[0];
    let segment = &block.segments()[0];
    assert_eq!(segment.live(block.content()), "d");
    let link = block
        .content()
        .roots()
        .iter()
        .filter_map(|&id| block.content().node(id))
        .find_map(|node| match node {
            InlineNode::Element {
                kind: ElementKind::Link { href },
                children,
            } => Some((href.clone(), children.clone())),
            _ => None,
        })
        .expect("link element survives");
    assert_eq!(link.0.as_deref(), Some("/docs"));
    assert_eq!(link.1, vec![segment.node()]);
}

#[test]
fn page_without_marked_blocks_finishes_at_once() {
    let blocks = typewriter_blocks("<h1>Plain</h1><p>nothing typed here</p>");
    assert!(blocks.is_empty());
    let mut runner = SequentialRunner::new(blocks, RevealTiming::default(), SkipSignal::new());
    assert_eq!(
        runner.start(),
        RunPhase::Finished(FinishReason::Completed)
    );
}

// ===== Viewer =====

fn viewer(html: &str, name: &str) -> TuiApp<TestBackend> {
    let page = parse_page(html, DEFAULT_SELECTOR).expect("page parses");
    let dir = std::env::temp_dir().join(format!("phosphor_test_scenario_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    let theme = ThemeToggle::load(PreferenceStore::new(dir.join("preferences.toml")));
    let options = ViewerOptions {
        fallback_title: "scenario.html".to_string(),
        timing: RevealTiming::default(),
        caret: DEFAULT_CARET.to_string(),
        colors: ColorConfig::new(false),
        key_bindings: KeyBindings::default(),
    };
    let terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
    TuiApp::with_terminal(terminal, page, theme, options)
}

#[test]
fn viewer_reveals_page_on_its_own_clock() {
    let mut app = viewer(&three_block_page(), "clock");
    let t0 = Instant::now();
    app.start(t0);

    let mut now = t0;
    let mut guard = 0;
    while !app.runner().is_finished() {
        now = app.next_deadline().max(now);
        app.advance_clock(now);
        guard += 1;
        assert!(guard < 1000, "viewer never finished");
    }

    let elapsed = now.duration_since(t0);
    assert!(elapsed >= Duration::from_millis(2800), "{elapsed:?}");
    assert!(
        app.runner().blocks().iter().all(TextBlock::is_fully_revealed)
    );
    app.draw().expect("draw");
}

#[test]
fn viewer_layout_is_stable_while_typing() {
    let mut app = viewer(&three_block_page(), "stable");
    let t0 = Instant::now();
    app.start(t0);
    let height = app.page().content_height(app.runner().blocks());

    for k in 1..=60 {
        app.advance_clock(t0 + Duration::from_millis(28 * k));
        app.draw().expect("draw");
        assert_eq!(app.page().content_height(app.runner().blocks()), height);
    }
}
