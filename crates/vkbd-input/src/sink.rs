#![forbid(unsafe_code)]

//! Insertion sinks: the external text buffers the keyboard types into.
//!
//! The keyboard never owns a sink. It asks the [`Host`](crate::host::Host)
//! for the sink behind the current focus target on every activation and
//! drops the borrow before the activation returns.
//!
//! Caret positions count grapheme clusters, so "ã" and "~e" advance the
//! caret by one and two positions respectively.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::SinkError;

/// A text buffer with a caret.
pub trait TextSink {
    /// Full current text.
    fn text(&self) -> String;

    /// Replace the full text.
    fn set_text(&mut self, text: String) -> Result<(), SinkError>;

    /// Caret position in graphemes.
    fn caret(&self) -> usize;

    /// Move the caret. Positions past the end are rejected.
    fn set_caret(&mut self, caret: usize) -> Result<(), SinkError>;
}

/// Number of grapheme clusters in `text`.
#[must_use]
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of grapheme `index`, or `text.len()` past the end.
#[must_use]
pub fn grapheme_byte_offset(text: &str, index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// In-memory [`TextSink`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSink {
    value: String,
    caret: usize,
    read_only: bool,
}

impl BufferSink {
    /// Empty buffer, caret at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text (builder). The caret moves to the end.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.value = text.into();
        self.caret = grapheme_len(&self.value);
        self
    }

    /// Set the caret (builder), clamped to the text.
    #[must_use]
    pub fn with_caret(mut self, caret: usize) -> Self {
        self.caret = caret.min(grapheme_len(&self.value));
        self
    }

    /// Refuse every write (builder).
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl TextSink for BufferSink {
    fn text(&self) -> String {
        self.value.clone()
    }

    fn set_text(&mut self, text: String) -> Result<(), SinkError> {
        if self.read_only {
            return Err(SinkError::ReadOnly);
        }
        self.value = text;
        self.caret = self.caret.min(grapheme_len(&self.value));
        Ok(())
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, caret: usize) -> Result<(), SinkError> {
        let len = grapheme_len(&self.value);
        if caret > len {
            return Err(SinkError::CaretOutOfRange { caret, len });
        }
        self.caret = caret;
        Ok(())
    }
}
