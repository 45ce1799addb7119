//! Title and status bars.
//!
//! Pure widgets: everything they show is passed in by the caller.

use crate::theme::Phosphor;
use crate::typewriter::{RunPhase, SequentialRunner, SkipSource};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Key hints shown at the right of the status bar.
const KEY_HINTS: &str = "q quit  t phosphor";

/// Separator between status bar fields.
const SEPARATOR: &str = " │ ";

/// Reveal progress as shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Block `current` (1-based) of `total` is typing.
    Typing {
        /// 1-based index of the active block.
        current: usize,
        /// Typewriter blocks on the page.
        total: usize,
    },
    /// Nothing left to reveal.
    Done,
}

impl Progress {
    /// Progress of `runner`.
    pub fn of<S: SkipSource>(runner: &SequentialRunner<S>) -> Self {
        match runner.phase() {
            RunPhase::Running { current } => Self::Typing {
                current: current + 1,
                total: runner.blocks().len(),
            },
            RunPhase::NotStarted | RunPhase::Finished(_) => Self::Done,
        }
    }

    /// Status bar text.
    pub fn label(self) -> String {
        match self {
            Self::Typing { current, total } => format!("typing {current}/{total}"),
            Self::Done => "done".to_string(),
        }
    }
}

/// Full status line text.
pub fn status_text(phosphor: Phosphor, progress: Progress) -> String {
    [phosphor.label(), progress.label().as_str(), KEY_HINTS].join(SEPARATOR)
}

/// Render the one-row title bar.
pub fn render_title_bar(frame: &mut Frame, area: Rect, title: &str, style: Style) {
    let bar = Paragraph::new(Line::from(title.to_string())).style(style);
    frame.render_widget(bar, area);
}

/// Render the one-row status bar.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    phosphor: Phosphor,
    progress: Progress,
    style: Style,
) {
    let bar = Paragraph::new(Line::from(status_text(phosphor, progress))).style(style);
    frame.render_widget(bar, area);
}
