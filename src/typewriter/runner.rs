//! Sequential reveal of every typewriter block in document order.

use super::block::TextBlock;
use super::caret::CaretHolder;
use super::controller::{Completion, RevealTiming, TickResult, TypewriterController};
use super::height;
use super::skip::{SkipSignal, SkipSource};
use tracing::{debug, info};

/// Why the runner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Every block was typed out in turn.
    Completed,
    /// Skip cut the sequence short; remaining blocks were swept.
    Skipped,
}

/// Runner progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// [`SequentialRunner::start`] not called yet.
    NotStarted,
    /// Block `current` is revealing.
    Running {
        /// Index of the active block.
        current: usize,
    },
    /// Nothing left to do.
    Finished(FinishReason),
}

/// Drives one controller at a time, in document order.
///
/// Block *i + 1* is entered only after block *i* signalled completion.
/// When skip is observed after a completion the loop stops and the
/// remaining blocks are swept to their full text without ticking.
#[derive(Debug)]
pub struct SequentialRunner<S = SkipSignal> {
    blocks: Vec<TextBlock>,
    controllers: Vec<TypewriterController>,
    caret: CaretHolder,
    skip: S,
    timing: RevealTiming,
    phase: RunPhase,
    ticks: u64,
}

impl<S: SkipSource> SequentialRunner<S> {
    /// Runner over `blocks`, which must already be snapshotted.
    pub fn new(blocks: Vec<TextBlock>, timing: RevealTiming, skip: S) -> Self {
        let controllers = (0..blocks.len())
            .map(|index| TypewriterController::new(index, timing))
            .collect();
        Self {
            blocks,
            controllers,
            caret: CaretHolder::new(),
            skip,
            timing,
            phase: RunPhase::NotStarted,
            ticks: 0,
        }
    }

    /// All blocks in document order.
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// One block.
    pub fn block(&self, index: usize) -> Option<&TextBlock> {
        self.blocks.get(index)
    }

    /// Current caret holder.
    pub fn caret(&self) -> CaretHolder {
        self.caret
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Reveal timing shared by every controller.
    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    /// True once finished, whichever way.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, RunPhase::Finished(_))
    }

    /// Ticks processed so far.
    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks
    }

    /// Wall time the processed ticks represent, in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.ticks * self.timing.tick_ms()
    }

    /// Blocks that are typed and no longer revealing.
    pub fn completed_count(&self) -> usize {
        let active = match self.phase {
            RunPhase::Running { current } => Some(current),
            RunPhase::NotStarted | RunPhase::Finished(_) => None,
        };
        self.blocks
            .iter()
            .enumerate()
            .filter(|(index, block)| block.is_typed() && Some(*index) != active)
            .count()
    }

    /// Measure and pin every block's height for `width` columns.
    pub fn reserve_heights(&mut self, width: u16, caret: &str) {
        height::reserve_heights(&mut self.blocks, width, caret);
    }

    /// Enter the first block. Calling it again changes nothing.
    pub fn start(&mut self) -> RunPhase {
        if self.phase == RunPhase::NotStarted {
            info!(blocks = self.blocks.len(), "starting typewriter sequence");
            self.enter_from(0);
        }
        self.phase
    }

    /// Fire one tick interval for the active block.
    pub fn tick(&mut self) -> TickResult {
        let RunPhase::Running { current } = self.phase else {
            return TickResult {
                revealed: 0,
                done: self.is_finished(),
            };
        };
        self.ticks += 1;
        let result = self.controllers[current].tick(&mut self.blocks[current], &self.skip);
        if let Some(completion) = self.controllers[current].take_completion() {
            self.on_complete(current, completion);
        }
        TickResult {
            revealed: result.revealed,
            done: self.is_finished(),
        }
    }

    /// Enter blocks from `index` on until one needs ticking.
    fn enter_from(&mut self, mut index: usize) {
        loop {
            if index >= self.blocks.len() {
                self.finish(FinishReason::Completed);
                return;
            }
            self.controllers[index].enter(&mut self.blocks, &mut self.caret, &self.skip);
            self.blocks[index].timeline_mut().entered_at = Some(self.ticks);
            match self.controllers[index].take_completion() {
                Some(completion) => {
                    self.record_completion(index, completion);
                    if self.skip.is_set() {
                        self.sweep();
                        return;
                    }
                    index += 1;
                }
                None => {
                    self.phase = RunPhase::Running { current: index };
                    return;
                }
            }
        }
    }

    fn on_complete(&mut self, index: usize, completion: Completion) {
        self.record_completion(index, completion);
        if self.skip.is_set() {
            self.sweep();
        } else {
            self.enter_from(index + 1);
        }
    }

    fn record_completion(&mut self, index: usize, completion: Completion) {
        let timeline = self.blocks[index].timeline_mut();
        timeline.completed_at = Some(self.ticks);
        timeline.completion = Some(completion);
        debug!(block = index, ?completion, tick = self.ticks, "block complete");
    }

    /// Reveal every untyped block at once and park the caret on the last.
    fn sweep(&mut self) {
        let mut swept = 0;
        for block in self.blocks.iter_mut().filter(|b| !b.is_typed()) {
            block.mark_typed();
            block.show();
            block.reveal_segments();
            swept += 1;
        }
        debug!(swept, "swept remaining typewriter blocks");
        self.finish(FinishReason::Skipped);
    }

    fn finish(&mut self, reason: FinishReason) {
        if let Some(last) = self.blocks.len().checked_sub(1) {
            self.caret.attach(&mut self.blocks, last);
        }
        self.phase = RunPhase::Finished(reason);
        info!(?reason, ticks = self.ticks, "typewriter sequence finished");
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
