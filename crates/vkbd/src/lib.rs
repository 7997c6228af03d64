#![forbid(unsafe_code)]

//! ABNT2 virtual keyboard public facade.
//!
//! This crate re-exports the types a host toolkit needs from the internal
//! crates and offers a prelude. A host implements [`Host`], builds one
//! [`VirtualKeyboard`] with the ids of its button widgets, and forwards
//! button clicks to [`VirtualKeyboard::activate`] and focus changes to
//! [`VirtualKeyboard::on_host_focus_changed`].

// --- Core re-exports -------------------------------------------------------

pub use vkbd_core::config::{ENV_PRECOMPOSED_TILDE, ENV_RESTORE_FOCUS};
pub use vkbd_core::{
    Composition, DeadKey, DiacriticComposer, DiacriticKind, Key, KeyCatalog, KeyCode, KeyRole,
    KeyboardConfig, Locks, ModifierKey, ModifierState,
};

// --- Input re-exports ------------------------------------------------------

pub use vkbd_input::{
    Activation, BufferSink, EditError, EditOutcome, FocusTracker, Host, IgnoreReason,
    KeyboardError, SinkError, TextEditor, TextSink, VirtualKeyboard, WidgetId, grapheme_len,
};

/// Standard result type for keyboard activations.
pub type Result<T> = std::result::Result<T, KeyboardError>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Activation, BufferSink, Host, IgnoreReason, KeyCode, KeyboardConfig, KeyboardError,
        Result, TextSink, VirtualKeyboard, WidgetId,
    };

    pub use crate::{core, input};
}

pub use vkbd_core as core;
pub use vkbd_input as input;
