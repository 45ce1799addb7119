//! Per-block typewriter state machine.
//!
//! ```text
//! Pending ──enter──▶ Revealing ──tick…──▶ Complete(Progressive)
//!    │                    │
//!    │                    └──tick, skip set──▶ Complete(Skipped)
//!    └──enter, skip set / nothing to type──▶ Complete(..)
//! ```
//!
//! The controller knows nothing about timers: a driver (the runner, the
//! event loop, or a test) calls [`TypewriterController::tick`] once per
//! interval.

use super::block::TextBlock;
use super::caret::CaretHolder;
use super::skip::SkipSource;
use std::time::Duration;
use tracing::debug;

/// Default interval between ticks, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 28;

/// Default ceiling on one block's reveal, in milliseconds.
pub const DEFAULT_MAX_DURATION_MS: u64 = 1500;

/// Tick interval and duration ceiling for progressive reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    tick_ms: u64,
    max_duration_ms: u64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS, DEFAULT_MAX_DURATION_MS)
    }
}

impl RevealTiming {
    /// `tick_ms` is clamped to at least 1.
    pub fn new(tick_ms: u64, max_duration_ms: u64) -> Self {
        Self {
            tick_ms: tick_ms.max(1),
            max_duration_ms,
        }
    }

    /// Interval between ticks in milliseconds.
    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// Duration ceiling in milliseconds.
    pub fn max_duration_ms(&self) -> u64 {
        self.max_duration_ms
    }

    /// Interval between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Chars revealed per tick for a block of `total` chars.
    ///
    /// One char per tick, unless that would take longer than the ceiling,
    /// in which case the step grows so the reveal fits in
    /// `min(max_duration, total * tick)`: `max(1, round(total / ticks))`.
    pub fn chars_per_tick(&self, total: usize) -> usize {
        if total == 0 {
            return 1;
        }
        let natural = (total as u64).saturating_mul(self.tick_ms);
        let duration = natural.min(self.max_duration_ms);
        if duration == 0 {
            return total;
        }
        let ticks = duration as f64 / self.tick_ms as f64;
        ((total as f64 / ticks).round() as usize).max(1)
    }

    /// Ticks a progressive reveal of `total` chars takes.
    pub fn ticks_for(&self, total: usize) -> usize {
        total.div_ceil(self.chars_per_tick(total))
    }
}

/// How a block reached `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every char was typed out (or there was nothing to type).
    Progressive,
    /// The skip signal cut the reveal short.
    Skipped,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Not entered yet; the block is untouched.
    Pending,
    /// Typing out chars on each tick.
    Revealing,
    /// Terminal.
    Complete(Completion),
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Chars that became visible during this tick.
    pub revealed: usize,
    /// True once the controller is complete.
    pub done: bool,
}

/// Drives the reveal of one block.
#[derive(Debug, Clone)]
pub struct TypewriterController {
    index: usize,
    timing: RevealTiming,
    state: RevealState,
    step: usize,
    segment: usize,
    written: usize,
    total: usize,
    unsignalled: Option<Completion>,
}

impl TypewriterController {
    /// Controller for the block at `index`.
    pub fn new(index: usize, timing: RevealTiming) -> Self {
        Self {
            index,
            timing,
            state: RevealState::Pending,
            step: 1,
            segment: 0,
            written: 0,
            total: 0,
            unsignalled: None,
        }
    }

    /// Index of the driven block.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Chars per tick, fixed on entry.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Start revealing.
    ///
    /// Marks the block typed and visible and moves the caret to it. With
    /// skip already set the block is revealed in full and completes at
    /// once; a block without segments completes at once untouched.
    /// Entering a controller that already left `Pending`, or whose block
    /// was already typed, changes nothing.
    pub fn enter<S: SkipSource + ?Sized>(
        &mut self,
        blocks: &mut [TextBlock],
        caret: &mut CaretHolder,
        skip: &S,
    ) -> RevealState {
        if self.state != RevealState::Pending {
            return self.state;
        }
        let index = self.index;
        match blocks.get(index) {
            Some(block) if !block.is_typed() => {}
            _ => {
                self.finish(Completion::Progressive);
                return self.state;
            }
        }

        blocks[index].mark_typed();
        blocks[index].show();
        caret.attach(blocks, index);
        let block = &mut blocks[index];

        if skip.is_set() {
            block.reveal_segments();
            debug!(block = index, "typewriter block revealed instantly");
            self.finish(Completion::Skipped);
            return self.state;
        }

        self.total = block.total_chars();
        if self.total == 0 {
            self.finish(Completion::Progressive);
            return self.state;
        }

        block.clear_segments();
        self.step = self.timing.chars_per_tick(self.total);
        self.state = RevealState::Revealing;
        debug!(
            block = index,
            total = self.total,
            step = self.step,
            "typewriter block entered"
        );
        self.state
    }

    /// Advance one interval using the computed step.
    pub fn tick<S: SkipSource + ?Sized>(&mut self, block: &mut TextBlock, skip: &S) -> TickResult {
        self.advance(block, self.step, skip)
    }

    /// Reveal up to `budget` chars across segments in order.
    ///
    /// A segment that fills up hands the rest of the budget to the next
    /// one. Reaching the total clamps every segment to its exact full
    /// value. Skip, if set, finishes the block instead.
    pub fn advance<S: SkipSource + ?Sized>(
        &mut self,
        block: &mut TextBlock,
        budget: usize,
        skip: &S,
    ) -> TickResult {
        match self.state {
            RevealState::Revealing => {}
            RevealState::Pending => {
                return TickResult {
                    revealed: 0,
                    done: false,
                }
            }
            RevealState::Complete(_) => {
                return TickResult {
                    revealed: 0,
                    done: true,
                }
            }
        }

        if skip.is_set() {
            let hidden = self.total.saturating_sub(self.written);
            block.reveal_segments();
            self.written = self.total;
            debug!(block = self.index, hidden, "typewriter block skipped");
            self.finish(Completion::Skipped);
            return TickResult {
                revealed: hidden,
                done: true,
            };
        }

        let mut remain = budget;
        let mut revealed = 0;
        while remain > 0 && self.segment < block.segments().len() {
            let taken = block.append_to_segment(self.segment, remain);
            revealed += taken;
            remain -= taken;
            if block.segments()[self.segment].is_revealed() {
                self.segment += 1;
            }
        }
        self.written += revealed;

        if self.written >= self.total {
            block.reveal_segments();
            debug!(block = self.index, "typewriter block complete");
            self.finish(Completion::Progressive);
        }

        TickResult {
            revealed,
            done: self.is_complete(),
        }
    }

    /// True once in `Complete`.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, RevealState::Complete(_))
    }

    /// The completion signal. Yields `Some` exactly once, after the
    /// transition into `Complete`.
    pub fn take_completion(&mut self) -> Option<Completion> {
        self.unsignalled.take()
    }

    fn finish(&mut self, completion: Completion) {
        self.state = RevealState::Complete(completion);
        self.unsignalled = Some(completion);
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
