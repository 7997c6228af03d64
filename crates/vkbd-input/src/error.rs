#![forbid(unsafe_code)]

//! Error types for the keyboard and its text edits.
//!
//! # Failure Modes
//!
//! - [`SinkError`]: the host's text buffer refused a write.
//! - [`EditError`]: a splice could not be applied; the sink is left exactly
//!   as it was. The keyboard logs these and carries on.
//! - [`KeyboardError`]: the activation itself is invalid (a code outside the
//!   catalog). This is a wiring bug in the host and is returned to the caller.

use thiserror::Error;
use vkbd_core::KeyCode;

/// Rejection reported by a [`TextSink`](crate::sink::TextSink).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The requested caret lies past the end of the text.
    #[error("caret {caret} is outside 0..={len}")]
    CaretOutOfRange { caret: usize, len: usize },

    /// The sink does not accept edits.
    #[error("sink is read-only")]
    ReadOnly,
}

/// Failure of a single insertion or deletion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The sink's caret does not fit its own text.
    #[error("caret {caret} is past the end of a {len}-grapheme text")]
    InvalidCaretRange { caret: usize, len: usize },

    /// The sink refused the spliced text or the new caret.
    #[error("sink rejected the edit: {0}")]
    Rejected(#[from] SinkError),
}

/// Error returned by [`VirtualKeyboard::activate`](crate::keyboard::VirtualKeyboard::activate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyboardError {
    /// The host dispatched a code that is not on the keyboard.
    #[error("key {0} is not in the keyboard catalog")]
    UnknownKey(KeyCode),
}
