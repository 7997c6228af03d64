#![forbid(unsafe_code)]

//! Input: text sinks, caret-aware editing, focus tracking, and activation.
//!
//! # Role in the virtual keyboard
//! `vkbd-input` connects the `vkbd-core` model to a host toolkit. The host
//! implements [`Host`] (focus, widget lookup, label rendering) and exposes
//! its text fields as [`TextSink`]s; [`VirtualKeyboard::activate`] does the
//! rest.
//!
//! # Primary responsibilities
//! - **TextSink / BufferSink**: text plus grapheme caret, the only thing the
//!   keyboard writes to.
//! - **TextEditor**: all-or-nothing insert and backspace at the caret.
//! - **FocusTracker**: which widget receives typed text; keyboard buttons
//!   never do.
//! - **VirtualKeyboard**: the per-click state machine.
//!
//! # Example
//!
//! ```
//! use vkbd_core::KeyCode;
//! use vkbd_input::{Activation, BufferSink, Host, TextSink, VirtualKeyboard, WidgetId};
//!
//! struct OneField(BufferSink);
//!
//! impl Host for OneField {
//!     fn request_focus(&mut self, _widget: WidgetId) {}
//!     fn next_focusable(&self, _widget: WidgetId) -> Option<WidgetId> { None }
//!     fn text_sink(&mut self, _widget: WidgetId) -> Option<&mut dyn TextSink> {
//!         Some(&mut self.0)
//!     }
//!     fn render_key_label(&mut self, _code: KeyCode, _label: &str) {}
//!     fn set_key_highlight(&mut self, _code: KeyCode, _on: bool) {}
//! }
//!
//! let mut host = OneField(BufferSink::new());
//! let mut keyboard = VirtualKeyboard::new([WidgetId(100)]);
//! keyboard.attach_sink(WidgetId(1));
//! keyboard.activate(&mut host, KeyCode::DeadTilde).unwrap();
//! let typed = keyboard.activate(&mut host, KeyCode::Char('a')).unwrap();
//! assert_eq!(typed, Activation::Inserted("ã".into()));
//! assert_eq!(host.0.value(), "ã");
//! ```

pub mod editor;
pub mod error;
pub mod focus;
pub mod host;
pub mod keyboard;
pub mod sink;

pub use editor::{EditOutcome, TextEditor};
pub use error::{EditError, KeyboardError, SinkError};
pub use focus::FocusTracker;
pub use host::{Host, WidgetId};
pub use keyboard::{Activation, IgnoreReason, VirtualKeyboard};
pub use sink::{BufferSink, TextSink, grapheme_len};
