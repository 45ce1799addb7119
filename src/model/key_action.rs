//! Domain-level keyboard actions independent of key bindings.

/// Actions that key bindings map onto.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
///
/// Every key press also counts as a skip interaction before its action runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Leave the viewer. Default: q/Esc/Ctrl+c
    Quit,
    /// Scroll the page up one row. Default: k/↑
    ScrollUp,
    /// Scroll the page down one row. Default: j/↓
    ScrollDown,
    /// Scroll up by one page height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page height. Default: Ctrl+d/Page Down/Space
    PageDown,
    /// Jump to the top of the page. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom of the page. Default: G/End
    ScrollToBottom,
    /// Flip between green and amber phosphor. Default: t
    TogglePhosphor,
}
