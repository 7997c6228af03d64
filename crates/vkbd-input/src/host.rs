#![forbid(unsafe_code)]

//! The host side of the keyboard: widgets, focus, and drawing.
//!
//! The keyboard owns no widgets. Everything it needs from the UI toolkit
//! goes through [`Host`], which is passed into each call so the keyboard can
//! be driven headless in tests.
//!
//! # Example
//!
//! ```ignore
//! let mut keyboard = VirtualKeyboard::new(button_ids);
//! keyboard.bind_initial_focus(&host);
//! keyboard.sync_labels(&mut host);
//!
//! // on every button click
//! keyboard.activate(&mut host, KeyCode::Char('a'))?;
//! ```

use std::fmt;

use vkbd_core::KeyCode;

use crate::sink::TextSink;

/// Opaque widget handle chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Services the keyboard consumes from the UI toolkit.
pub trait Host {
    /// Give keyboard focus to `widget`.
    fn request_focus(&mut self, widget: WidgetId);

    /// The widget after `widget` in focus traversal order.
    fn next_focusable(&self, widget: WidgetId) -> Option<WidgetId>;

    /// The text buffer behind `widget`, if it is a text field.
    fn text_sink(&mut self, widget: WidgetId) -> Option<&mut dyn TextSink>;

    /// Show `label` on the button for `code`.
    fn render_key_label(&mut self, code: KeyCode, label: &str);

    /// Highlight or un-highlight the button for `code`.
    fn set_key_highlight(&mut self, code: KeyCode, highlighted: bool);

    /// The widget that currently holds focus.
    fn focus_owner(&self) -> Option<WidgetId> {
        None
    }

    /// The first widget in focus traversal order.
    fn first_focusable(&self) -> Option<WidgetId> {
        None
    }
}
