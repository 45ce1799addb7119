//! Global "skip all remaining animation" signal.

use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

/// Read side of the skip flag, as seen by controllers and the runner.
pub trait SkipSource {
    /// True once any qualifying interaction happened. Never reverts.
    fn is_set(&self) -> bool;
}

impl<S: SkipSource + ?Sized> SkipSource for &S {
    fn is_set(&self) -> bool {
        (**self).is_set()
    }
}

/// Interactions that request a skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Pointer button press.
    Click,
    /// Touch start, for hosts that report touches separately from clicks.
    TouchStart,
    /// Any key press.
    KeyDown,
}

/// Shared, monotonic skip flag.
///
/// Clones observe the same flag. The event loop holds one handle to
/// trigger it; the runner holds another to read it.
#[derive(Debug, Clone, Default)]
pub struct SkipSignal {
    flag: Rc<Cell<bool>>,
}

impl SkipSignal {
    /// Create an unset signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Returns `true` only for the interaction that set it.
    pub fn trigger(&self, by: Interaction) -> bool {
        if self.flag.get() {
            return false;
        }
        self.flag.set(true);
        info!(?by, "skipping remaining typewriter animation");
        true
    }
}

impl SkipSource for SkipSignal {
    fn is_set(&self) -> bool {
        self.flag.get()
    }
}
