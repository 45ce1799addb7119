//! Property-based tests for the reveal engine.
//!
//! Tests validate:
//! 1. Every segment ends at its full value, with or without a skip
//! 2. Revealed text only grows, by at most one step per tick
//! 3. Per-block duration stays near the ceiling
//! 4. Reserved height covers the fully revealed block
//! 5. Once set, skip is never observed unset

use phosphor::model::{BlockKind, InlineTree};
use phosphor::typewriter::height::measure_rows;
use phosphor::typewriter::{
    Interaction, RevealTiming, SequentialRunner, SkipSignal, SkipSource, TextBlock,
};
use proptest::prelude::*;

// ===== Strategies =====

fn text_part() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,12}( [a-z]{1,12}){0,6}",
        "\\PC{0,20}",
        Just("   ".to_string()),
    ]
}

fn block_parts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text_part(), 0..5)
}

fn make_block(parts: &[String]) -> TextBlock {
    let mut tree = InlineTree::new();
    for part in parts {
        tree.push_text(None, part.clone());
    }
    TextBlock::new(BlockKind::Paragraph, tree)
}

fn fully_revealed(block: &TextBlock) -> bool {
    block
        .segments()
        .iter()
        .all(|segment| segment.live(block.content()) == segment.full())
}

// ===== Property 1: Full reveal =====

proptest! {
    #[test]
    fn every_segment_ends_full(
        blocks in prop::collection::vec(block_parts(), 0..5),
        skip_at in prop::option::of(0usize..200),
    ) {
        let blocks: Vec<TextBlock> = blocks.iter().map(|p| make_block(p)).collect();
        let skip = SkipSignal::new();
        let mut runner = SequentialRunner::new(blocks, RevealTiming::default(), skip.clone());
        runner.start();

        let mut ticks = 0;
        while !runner.is_finished() {
            if skip_at == Some(ticks) {
                skip.trigger(Interaction::Click);
            }
            runner.tick();
            let carets = runner.blocks().iter().filter(|b| b.caret_active()).count();
            prop_assert!(carets <= 1);
            ticks += 1;
            prop_assert!(ticks < 100_000);
        }

        for block in runner.blocks() {
            prop_assert!(block.is_typed());
            prop_assert!(block.is_visible());
            prop_assert!(fully_revealed(block));
        }
        if let Some(last) = runner.blocks().len().checked_sub(1) {
            prop_assert_eq!(runner.caret().current(), Some(last));
            prop_assert!(runner.blocks()[last].caret_active());
        }
    }
}

// ===== Property 2: Monotonic progress =====

proptest! {
    #[test]
    fn revealed_text_only_grows(parts in block_parts(), tick_ms in 1u64..60) {
        let timing = RevealTiming::new(tick_ms, 1500);
        let block = make_block(&parts);
        let step = timing.chars_per_tick(block.total_chars());
        let mut runner = SequentialRunner::new(vec![block], timing, SkipSignal::new());
        runner.start();

        let mut previous = runner.blocks()[0].content().plain_text();
        while !runner.is_finished() {
            let result = runner.tick();
            prop_assert!(result.revealed <= step);
            let current = runner.blocks()[0].content().plain_text();
            prop_assert!(current.chars().count() >= previous.chars().count());
            previous = current;
        }
    }
}

// ===== Property 3: Rate bounds =====

proptest! {
    #[test]
    fn short_blocks_type_one_char_per_tick(
        (tick_ms, total) in (1u64..100).prop_flat_map(|tick| (Just(tick), 1usize..=(1500 / tick) as usize)),
    ) {
        let timing = RevealTiming::new(tick_ms, 1500);
        prop_assert_eq!(timing.chars_per_tick(total), 1);
        prop_assert_eq!(timing.ticks_for(total), total);
    }

    #[test]
    fn long_blocks_stay_near_the_ceiling(total in 1usize..5000, tick_ms in 1u64..100) {
        let timing = RevealTiming::new(tick_ms, 1500);
        prop_assume!(total as u64 * tick_ms > 1500);
        let duration = timing.ticks_for(total) as u64 * tick_ms;
        // rounding the step down can stretch the reveal by at most half again
        prop_assert!(duration <= 1500 * 3 / 2 + tick_ms, "duration {duration}");
        prop_assert!(timing.chars_per_tick(total) >= 1);
    }
}

// ===== Property 4: No layout shift =====

proptest! {
    #[test]
    fn reserved_height_covers_revealed_block(
        words in prop::collection::vec("[a-z]{1,10}", 1..30),
        width in 12u16..80,
    ) {
        let text = words.join(" ");
        let mut runner = SequentialRunner::new(
            vec![make_block(&[text])],
            RevealTiming::default(),
            SkipSignal::new(),
        );
        runner.reserve_heights(width, "█");
        let reserved = runner.blocks()[0].reserved_height();
        runner.start();
        while !runner.is_finished() {
            runner.tick();
            prop_assert_eq!(runner.blocks()[0].reserved_height(), reserved);
        }

        let block = &runner.blocks()[0];
        let natural = measure_rows(block.kind(), block.content(), width, None);
        prop_assert!(reserved >= natural, "reserved {reserved} < natural {natural}");
    }
}

// ===== Property 5: Monotonic skip =====

proptest! {
    #[test]
    fn skip_never_reverts(interactions in prop::collection::vec(0u8..3, 1..10)) {
        let skip = SkipSignal::new();
        let observer = skip.clone();
        for (i, kind) in interactions.iter().enumerate() {
            let by = match kind {
                0 => Interaction::Click,
                1 => Interaction::TouchStart,
                _ => Interaction::KeyDown,
            };
            prop_assert_eq!(skip.trigger(by), i == 0);
            prop_assert!(observer.is_set());
        }
    }
}
