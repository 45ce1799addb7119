//! Terminal page viewer (impure shell).
//!
//! Owns the terminal, the typewriter runner and the clocks that drive it.
//! Every key press and mouse button press sets the skip signal; the
//! runner notices it on its next tick.

pub mod page;
pub mod status;
mod styles;

pub use page::{PageSlot, PageView, BLOCK_GAP};
pub use status::{status_text, Progress};
pub use styles::ColorConfig;

use crate::config::KeyBindings;
use crate::model::{KeyAction, Page};
use crate::theme::{Palette, ThemeToggle};
use crate::typewriter::{Interaction, RevealTiming, SequentialRunner, SkipSignal};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Margin, Size},
    text::Span,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

/// Caret blink half-period.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Blank columns left and right of the page body.
pub const PAGE_MARGIN: u16 = 1;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Viewer settings resolved by the caller.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Title bar text when the page has no `<title>`.
    pub fallback_title: String,
    /// Reveal timing for every typewriter block.
    pub timing: RevealTiming,
    /// Caret glyph.
    pub caret: String,
    /// Colour handling.
    pub colors: ColorConfig,
    /// Key map.
    pub key_bindings: KeyBindings,
}

/// Main TUI application
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    runner: SequentialRunner<SkipSignal>,
    skip: SkipSignal,
    page: PageView,
    title: String,
    theme: ThemeToggle,
    colors: ColorConfig,
    key_bindings: KeyBindings,
    caret: String,
    caret_on: bool,
    next_tick: Option<Instant>,
    next_blink: Instant,
    size: Size,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Enter raw mode and the alternate screen and build the viewer.
    pub fn new(page: Page, theme: ThemeToggle, options: ViewerOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, page, theme, options))
    }

    /// Run the event loop until the user quits.
    ///
    /// Sleeps in `event::poll` until the next tick or blink is due, so an
    /// idle, fully revealed page only wakes for the caret blink.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.start(Instant::now());
        self.draw()?;

        loop {
            let timeout = self.next_deadline().saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                let quit = match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        false
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        false
                    }
                    _ => false,
                };
                if quit {
                    return Ok(());
                }
                self.draw()?;
            }

            if self.advance_clock(Instant::now()) {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the viewer on an already prepared terminal.
    ///
    /// Heights are reserved for the terminal's current width before
    /// anything is shown.
    pub fn with_terminal(
        terminal: Terminal<B>,
        page: Page,
        theme: ThemeToggle,
        options: ViewerOptions,
    ) -> Self {
        let size = terminal.size().unwrap_or(Size {
            width: 80,
            height: 24,
        });
        let skip = SkipSignal::new();
        let (page_view, blocks) = PageView::split(page.blocks);
        let runner = SequentialRunner::new(blocks, options.timing, skip.clone());
        let title = page.title.unwrap_or(options.fallback_title);

        let mut app = Self {
            terminal,
            runner,
            skip,
            page: page_view,
            title,
            theme,
            colors: options.colors,
            key_bindings: options.key_bindings,
            caret: options.caret,
            caret_on: true,
            next_tick: None,
            next_blink: Instant::now() + BLINK_INTERVAL,
            size,
        };
        app.relayout(size);
        app
    }

    /// Start the reveal sequence with `now` as time zero.
    pub fn start(&mut self, now: Instant) {
        self.runner.start();
        let interval = self.runner.timing().tick_interval();
        self.next_tick = (!self.runner.is_finished()).then(|| now + interval);
        self.next_blink = now + BLINK_INTERVAL;
    }

    /// The runner driving the page's typewriter blocks.
    pub fn runner(&self) -> &SequentialRunner<SkipSignal> {
        &self.runner
    }

    /// The page layout.
    pub fn page(&self) -> &PageView {
        &self.page
    }

    /// The phosphor toggle.
    pub fn theme(&self) -> &ThemeToggle {
        &self.theme
    }

    /// The terminal, for inspecting a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Earliest instant anything on screen changes by itself.
    pub fn next_deadline(&self) -> Instant {
        match self.next_tick {
            Some(tick) => tick.min(self.next_blink),
            None => self.next_blink,
        }
    }

    /// Fire whatever tick or blink is due at `now`. Returns true when the
    /// screen needs redrawing.
    pub fn advance_clock(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(deadline) = self.next_tick {
            if now >= deadline {
                self.runner.tick();
                self.next_tick = if self.runner.is_finished() {
                    None
                } else {
                    Some(now + self.runner.timing().tick_interval())
                };
                changed = true;
            }
        }

        if now >= self.next_blink {
            self.caret_on = !self.caret_on;
            self.next_blink = now + BLINK_INTERVAL;
            changed = true;
        }

        changed
    }

    /// Handle a keyboard event. Returns true when the viewer should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        self.skip.trigger(Interaction::KeyDown);

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "key action");

        let rows = self.viewport_rows();
        let page_step = i32::from(rows.max(1));
        let blocks = self.runner.blocks();
        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollUp => self.page.scroll_by(-1, blocks, rows),
            KeyAction::ScrollDown => self.page.scroll_by(1, blocks, rows),
            KeyAction::PageUp => self.page.scroll_by(-page_step, blocks, rows),
            KeyAction::PageDown => self.page.scroll_by(page_step, blocks, rows),
            KeyAction::ScrollToTop => self.page.scroll_to_top(),
            KeyAction::ScrollToBottom => self.page.scroll_to_bottom(blocks, rows),
            KeyAction::TogglePhosphor => self.toggle_phosphor(),
        }
        false
    }

    /// Handle a mouse event.
    ///
    /// Any button press skips. The wheel scrolls without skipping.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let rows = self.viewport_rows();
        match mouse.kind {
            MouseEventKind::Down(_) => {
                self.skip.trigger(Interaction::Click);
            }
            MouseEventKind::ScrollUp => {
                self.page.scroll_by(-WHEEL_ROWS, self.runner.blocks(), rows);
            }
            MouseEventKind::ScrollDown => {
                self.page.scroll_by(WHEEL_ROWS, self.runner.blocks(), rows);
            }
            _ => {}
        }
    }

    /// Handle a terminal resize: heights are re-measured for the new width.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.sync_layout(Size { width, height });
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        self.sync_layout(size);

        let phosphor = self.theme.current();
        let palette = self.colors.palette(phosphor);
        let styles = palette.inline_styles();
        let caret = self.caret_span(&palette);
        let progress = Progress::of(&self.runner);
        let page = &self.page;
        let blocks = self.runner.blocks();
        let title = self.title.as_str();

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(frame.area());

            frame.buffer_mut().set_style(chunks[1], palette.text);
            status::render_title_bar(frame, chunks[0], title, palette.bar);
            let body = chunks[1].inner(Margin {
                horizontal: PAGE_MARGIN,
                vertical: 0,
            });
            page.render(frame, body, blocks, &styles, &caret);
            status::render_status_bar(frame, chunks[2], phosphor, progress, palette.bar);
        })?;

        Ok(())
    }

    fn caret_span(&self, palette: &Palette) -> Span<'static> {
        if self.caret_on {
            Span::styled(self.caret.clone(), palette.caret)
        } else {
            Span::raw(" ".repeat(self.caret.width()))
        }
    }

    fn toggle_phosphor(&mut self) {
        match self.theme.toggle() {
            Ok(phosphor) => info!(%phosphor, "switched phosphor"),
            Err(error) => warn!(
                %error,
                phosphor = %self.theme.current(),
                "switched phosphor but could not save the preference"
            ),
        }
    }

    /// Rows available to the page body.
    fn viewport_rows(&self) -> u16 {
        self.size.height.saturating_sub(2)
    }

    fn content_width(width: u16) -> u16 {
        width.saturating_sub(2 * PAGE_MARGIN)
    }

    /// Re-measure only when the content width actually changed.
    fn sync_layout(&mut self, size: Size) {
        if Self::content_width(size.width) != self.page.width() {
            self.relayout(size);
        } else {
            self.size = size;
            let rows = self.viewport_rows();
            self.page.clamp_scroll(self.runner.blocks(), rows);
        }
    }

    fn relayout(&mut self, size: Size) {
        self.size = size;
        let width = Self::content_width(size.width);
        self.page.relayout(width);
        self.runner.reserve_heights(width, &self.caret);
        let rows = self.viewport_rows();
        self.page.clamp_scroll(self.runner.blocks(), rows);
        debug!(width, "page laid out");
    }
}

/// Show `page` in the terminal until the user quits.
///
/// Handles terminal setup and always restores the terminal afterwards.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(page: Page, theme: ThemeToggle, options: ViewerOptions) -> Result<(), TuiError> {
    let result = TuiApp::new(page, theme, options).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
