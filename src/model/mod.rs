//! Domain model types (pure).
//!
//! Page structure, inline markup trees and the error types shared by the
//! input and parsing boundaries.

pub mod document;
pub mod error;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use document::{BlockKind, ElementKind, InlineNode, InlineTree, Page, PageBlock};
pub use error::{DocumentError, InputError};
pub use identifiers::NodeId;
pub use key_action::KeyAction;
