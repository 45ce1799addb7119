//! Phosphor: a terminal page viewer with typewriter reveals.
//!
//! An HTML page is parsed into blocks. Blocks matching a selector are
//! revealed one after another, a few characters per tick, with a blinking
//! caret on the block being typed; everything else is shown at once. Any
//! key or mouse button press skips straight to the fully revealed page.
//!
//! The pure core ([`model`], [`parser`], [`render`], [`typewriter`],
//! [`theme`]) never touches the terminal; [`view`] is the impure shell
//! that owns it.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;
pub mod theme;
pub mod typewriter;
pub mod view;
