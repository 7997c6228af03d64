#![forbid(unsafe_code)]

//! Tracking which widget receives typed text.
//!
//! Clicking a keyboard button moves host focus onto that button, so "the
//! widget that has focus now" is the wrong target. The tracker instead
//! remembers the widget that had focus *before* focus landed on a button,
//! and ignores transitions that start on the keyboard's own buttons.
//!
//! # Invariants
//!
//! 1. The current target is never one of the keyboard's buttons.
//! 2. Tab only moves the target when the host reports a successor.

use ahash::AHashSet;

use crate::host::{Host, WidgetId};
use crate::sink::TextSink;

/// The keyboard's view of host focus.
#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    buttons: AHashSet<WidgetId>,
    current: Option<WidgetId>,
}

impl FocusTracker {
    /// Tracker that treats `buttons` as the keyboard's own widgets.
    pub fn new<I>(buttons: I) -> Self
    where
        I: IntoIterator<Item = WidgetId>,
    {
        Self {
            buttons: buttons.into_iter().collect(),
            current: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<WidgetId> {
        self.current
    }

    #[must_use]
    pub fn is_keyboard_button(&self, widget: WidgetId) -> bool {
        self.buttons.contains(&widget)
    }

    /// Make `widget` the current target. Keyboard buttons are refused.
    pub fn adopt(&mut self, widget: WidgetId) -> bool {
        if self.is_keyboard_button(widget) {
            return false;
        }
        if self.current != Some(widget) {
            tracing::debug!(message = "focus.adopted", widget = %widget);
        }
        self.current = Some(widget);
        true
    }

    /// Host focus moved from `previous` to `next`.
    ///
    /// Adopts `previous` unless it is absent or one of the keyboard's
    /// buttons. Returns whether the target was (re)assigned.
    pub fn on_host_focus_changed(
        &mut self,
        previous: Option<WidgetId>,
        next: Option<WidgetId>,
    ) -> bool {
        match previous {
            Some(widget) if !self.is_keyboard_button(widget) => self.adopt(widget),
            _ => {
                tracing::trace!(
                    message = "focus.ignored",
                    previous = ?previous,
                    next = ?next
                );
                false
            }
        }
    }

    /// Move the target to the next focusable widget after it.
    ///
    /// Keyboard buttons in the traversal order are skipped. Returns the new
    /// target, or `None` if nothing changed.
    pub fn on_tab<H>(&mut self, host: &mut H) -> Option<WidgetId>
    where
        H: Host + ?Sized,
    {
        let start = self.current?;
        let mut candidate = host.next_focusable(start);
        // bounded so a traversal cycle made only of buttons terminates
        for _ in 0..=self.buttons.len() {
            match candidate {
                Some(widget) if widget == start => return None,
                Some(widget) if self.is_keyboard_button(widget) => {
                    candidate = host.next_focusable(widget);
                }
                Some(widget) => {
                    host.request_focus(widget);
                    self.adopt(widget);
                    return Some(widget);
                }
                None => return None,
            }
        }
        None
    }

    /// The current target narrowed to a text sink.
    pub fn current_text_sink<'h, H>(&self, host: &'h mut H) -> Option<&'h mut dyn TextSink>
    where
        H: Host + ?Sized,
    {
        host.text_sink(self.current?)
    }
}
