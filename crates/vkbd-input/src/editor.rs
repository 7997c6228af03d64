#![forbid(unsafe_code)]

//! Caret-aware insertion and deletion against a [`TextSink`].
//!
//! # Invariants
//!
//! 1. **All or nothing**: the spliced text is computed in full before the sink
//!    is touched. If the sink refuses the new caret after accepting the text,
//!    the previous text and caret are written back.
//! 2. **Caret follows the edit**: after `insert`, the caret sits right after
//!    the inserted text, counted in graphemes of the spliced result; after
//!    `backspace`, it moves back by one grapheme.
//! 3. **Boundaries are no-ops**: backspace on empty text or at position 0
//!    changes nothing.

use crate::error::EditError;
use crate::sink::{TextSink, grapheme_byte_offset, grapheme_len};

/// What an edit did to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text was inserted; the caret is now at `caret`.
    Inserted { caret: usize },
    /// `removed` was deleted; the caret is now at `caret`.
    Deleted { removed: String, caret: usize },
    /// Nothing to do.
    Unchanged,
}

/// Stateless editing operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEditor;

impl TextEditor {
    /// Insert `text` at the sink's caret and move the caret past it.
    pub fn insert(sink: &mut dyn TextSink, text: &str) -> Result<EditOutcome, EditError> {
        let caret = sink.caret();
        let full = sink.text();
        let len = grapheme_len(&full);
        if caret > len {
            return Err(EditError::InvalidCaretRange { caret, len });
        }

        let offset = grapheme_byte_offset(&full, caret);
        let mut spliced = String::with_capacity(full.len() + text.len());
        spliced.push_str(&full[..offset]);
        spliced.push_str(text);
        spliced.push_str(&full[offset..]);

        // A Prepend character before the caret can absorb the inserted text,
        // so count the spliced prefix rather than adding lengths.
        let new_caret = grapheme_len(&spliced[..offset + text.len()]);
        Self::commit(sink, full, caret, spliced, new_caret)?;
        Ok(EditOutcome::Inserted { caret: new_caret })
    }

    /// Delete the grapheme before the caret.
    pub fn backspace(sink: &mut dyn TextSink) -> Result<EditOutcome, EditError> {
        let caret = sink.caret();
        let full = sink.text();
        if full.is_empty() || caret == 0 {
            return Ok(EditOutcome::Unchanged);
        }
        let len = grapheme_len(&full);
        if caret > len {
            return Err(EditError::InvalidCaretRange { caret, len });
        }

        let start = grapheme_byte_offset(&full, caret - 1);
        let end = grapheme_byte_offset(&full, caret);
        let removed = full[start..end].to_owned();
        let mut spliced = String::with_capacity(full.len() - removed.len());
        spliced.push_str(&full[..start]);
        spliced.push_str(&full[end..]);

        Self::commit(sink, full, caret, spliced, caret - 1)?;
        Ok(EditOutcome::Deleted {
            removed,
            caret: caret - 1,
        })
    }

    fn commit(
        sink: &mut dyn TextSink,
        previous: String,
        previous_caret: usize,
        text: String,
        caret: usize,
    ) -> Result<(), EditError> {
        sink.set_text(text)?;
        if let Err(err) = sink.set_caret(caret) {
            if let Err(restore) = sink
                .set_text(previous)
                .and_then(|()| sink.set_caret(previous_caret))
            {
                tracing::warn!(message = "editor.restore_failed", error = %restore);
            }
            return Err(err.into());
        }
        Ok(())
    }
}
