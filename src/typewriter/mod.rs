//! Typewriter reveal engine.
//!
//! Pure core: nothing here touches a terminal or a clock. Blocks are
//! snapshotted once ([`snapshot`]), have their final height pinned
//! ([`height`]), and are then revealed one at a time by the
//! [`SequentialRunner`], which drives a [`TypewriterController`] per block
//! and watches a [`SkipSource`].

pub mod block;
pub mod caret;
pub mod controller;
pub mod height;
pub mod runner;
pub mod segment;
pub mod skip;
pub mod snapshot;

pub use block::{TextBlock, Timeline};
pub use caret::CaretHolder;
pub use controller::{
    Completion, RevealState, RevealTiming, TickResult, TypewriterController,
    DEFAULT_MAX_DURATION_MS, DEFAULT_TICK_MS,
};
pub use runner::{FinishReason, RunPhase, SequentialRunner};
pub use segment::TextSegment;
pub use skip::{Interaction, SkipSignal, SkipSource};
pub use snapshot::snapshot_segments;
