#![forbid(unsafe_code)]

//! The virtual keyboard: one entry point per button click.
//!
//! [`VirtualKeyboard::activate`] is the only thing a host needs to call when
//! a button is clicked. It looks the key up, re-focuses the insertion
//! target, and then dispatches on the key's role:
//!
//! | Role | Needs a sink | Effect |
//! |------|--------------|--------|
//! | Character | yes | compose with pending accent, apply case, insert, release shift |
//! | Dead key | no | arm accent (shift picks the alternate), release shift |
//! | Caps-lock / Shift | no | toggle, relabel, highlight |
//! | Backspace | yes | drop pending accent, delete before caret |
//! | Tab | no | drop pending accent, move target to next focusable widget |
//!
//! # Failure Modes
//!
//! - Character or backspace without a text sink: nothing happens
//!   ([`IgnoreReason::NoActiveSink`]); pending accent and shift are kept.
//! - Sink rejects the splice: the sink is left untouched, the failure is
//!   logged at `warn`, and the activation still counts (accent consumed,
//!   shift released).
//! - Unknown key code: [`KeyboardError::UnknownKey`], no state touched.

use vkbd_core::{
    Composition, DeadKey, DiacriticComposer, DiacriticKind, Key, KeyCatalog, KeyCode, KeyRole,
    KeyboardConfig, ModifierKey, ModifierState,
};

use crate::editor::{EditOutcome, TextEditor};
use crate::error::KeyboardError;
use crate::focus::FocusTracker;
use crate::host::{Host, WidgetId};

/// Why an activation had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No focused widget, or the focused widget is not a text field.
    NoActiveSink,
    /// The sink refused the edit.
    EditRejected,
    /// Backspace at the start of the text.
    NothingToDelete,
}

/// What an activation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Text was typed into the current sink.
    Inserted(String),
    /// A grapheme was deleted from the current sink.
    Deleted(String),
    /// A dead key armed an accent.
    DiacriticArmed(DiacriticKind),
    /// Caps-lock changed to the contained value.
    CapsLockToggled(bool),
    /// Shift changed to the contained value.
    ShiftToggled(bool),
    /// Tab moved the target (or found nowhere to go).
    FocusAdvanced(Option<WidgetId>),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

/// ABNT2 on-screen keyboard state for one keyboard instance.
#[derive(Debug, Clone)]
pub struct VirtualKeyboard {
    catalog: &'static KeyCatalog,
    config: KeyboardConfig,
    modifiers: ModifierState,
    composer: DiacriticComposer,
    focus: FocusTracker,
}

impl VirtualKeyboard {
    /// Keyboard with default configuration whose buttons are `buttons`.
    pub fn new<I>(buttons: I) -> Self
    where
        I: IntoIterator<Item = WidgetId>,
    {
        Self::with_config(KeyboardConfig::default(), buttons)
    }

    /// Keyboard with an explicit configuration.
    pub fn with_config<I>(config: KeyboardConfig, buttons: I) -> Self
    where
        I: IntoIterator<Item = WidgetId>,
    {
        Self {
            catalog: KeyCatalog::abnt2(),
            config,
            modifiers: ModifierState::new(),
            composer: DiacriticComposer::new().with_precomposed_tilde(config.precomposed_tilde),
            focus: FocusTracker::new(buttons),
        }
    }

    // --- State access ---

    #[must_use]
    pub fn catalog(&self) -> &'static KeyCatalog {
        self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    #[must_use]
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    #[must_use]
    pub fn pending_diacritic(&self) -> Option<DiacriticKind> {
        self.composer.pending()
    }

    #[must_use]
    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    /// Widget that currently receives typed text.
    #[must_use]
    pub fn current_target(&self) -> Option<WidgetId> {
        self.focus.current()
    }

    /// The label a button should show right now.
    #[must_use]
    pub fn label(&self, code: KeyCode) -> Option<String> {
        self.catalog.get(code).map(|key| key.label(&self.modifiers))
    }

    // --- Focus ---

    /// Pick the initial target: the host's focus owner, else its first
    /// focusable widget.
    pub fn bind_initial_focus<H>(&mut self, host: &H) -> Option<WidgetId>
    where
        H: Host + ?Sized,
    {
        let widget = host
            .focus_owner()
            .filter(|widget| !self.focus.is_keyboard_button(*widget))
            .or_else(|| host.first_focusable())?;
        self.focus.adopt(widget).then_some(widget)
    }

    /// Redirect typing to `widget`. Keyboard buttons are refused.
    pub fn attach_sink(&mut self, widget: WidgetId) -> bool {
        self.focus.adopt(widget)
    }

    /// Forward a host focus transition.
    pub fn on_host_focus_changed(
        &mut self,
        previous: Option<WidgetId>,
        next: Option<WidgetId>,
    ) -> bool {
        self.focus.on_host_focus_changed(previous, next)
    }

    // --- Rendering ---

    /// Push every label and every highlight to the host.
    pub fn sync_labels<H>(&self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        self.render_labels(host, self.catalog.keys());
        host.set_key_highlight(KeyCode::CapsLock, self.modifiers.caps_lock());
        host.set_key_highlight(KeyCode::Shift, self.modifiers.shift());
        self.render_pending(host);
    }

    /// Highlight the dead key whose accent is pending, and only that one.
    fn render_pending<H>(&self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        let pending = self.composer.pending().map(DiacriticKind::dead_key);
        for dead in [DeadKey::Acute, DeadKey::Tilde] {
            host.set_key_highlight(dead.code(), pending == Some(dead));
        }
    }

    fn render_labels<'k, H, I>(&self, host: &mut H, keys: I)
    where
        H: Host + ?Sized,
        I: Iterator<Item = &'k Key>,
    {
        for key in keys {
            host.render_key_label(key.code(), &key.label(&self.modifiers));
        }
    }

    // --- Activation ---

    /// Handle a click on the button for `code`.
    pub fn activate<H>(&mut self, host: &mut H, code: KeyCode) -> Result<Activation, KeyboardError>
    where
        H: Host + ?Sized,
    {
        let catalog = self.catalog;
        let Some(key) = catalog.get(code) else {
            tracing::error!(message = "keyboard.unknown_key", key = %code);
            return Err(KeyboardError::UnknownKey(code));
        };
        let role = key.role();
        let _span = tracing::debug_span!(
            "keyboard.activate",
            key = %code,
            role = role.name(),
            caps_lock = self.modifiers.caps_lock(),
            shift = self.modifiers.shift(),
            pending = self.composer.pending().map(DiacriticKind::name)
        )
        .entered();

        if self.config.restore_focus
            && let Some(target) = self.focus.current()
        {
            host.request_focus(target);
        }

        let activation = match role {
            KeyRole::Character => self.type_key(host, key),
            KeyRole::DeadKey(dead) => self.arm_diacritic(host, dead),
            KeyRole::Modifier(ModifierKey::CapsLock) => {
                Activation::CapsLockToggled(self.toggle_caps_lock(host))
            }
            KeyRole::Modifier(ModifierKey::Shift) => {
                Activation::ShiftToggled(self.toggle_shift(host))
            }
            KeyRole::Backspace => self.backspace(host),
            KeyRole::Tab => self.advance_focus(host),
        };
        tracing::trace!(message = "keyboard.activated", outcome = ?activation);
        Ok(activation)
    }

    /// Flip caps-lock, relabel letter keys, and highlight the key.
    pub fn toggle_caps_lock<H>(&mut self, host: &mut H) -> bool
    where
        H: Host + ?Sized,
    {
        let on = self.modifiers.toggle_caps_lock();
        self.render_labels(host, self.catalog.letters_with_shift_variant());
        host.set_key_highlight(KeyCode::CapsLock, on);
        tracing::debug!(message = "keyboard.modifier.toggled", modifier = "caps_lock", on);
        on
    }

    /// Flip shift, relabel every key with a shifted form, and highlight the key.
    pub fn toggle_shift<H>(&mut self, host: &mut H) -> bool
    where
        H: Host + ?Sized,
    {
        let on = self.modifiers.toggle_shift();
        self.render_shift_labels(host, on);
        tracing::debug!(message = "keyboard.modifier.toggled", modifier = "shift", on);
        on
    }

    /// One-shot release after shift has been spent. Relabels once.
    fn release_shift<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        if self.modifiers.release_shift() {
            self.render_shift_labels(host, false);
            tracing::trace!(message = "keyboard.shift.released");
        }
    }

    fn render_shift_labels<H>(&self, host: &mut H, on: bool)
    where
        H: Host + ?Sized,
    {
        self.render_labels(host, self.catalog.shift_variants());
        host.set_key_highlight(KeyCode::Shift, on);
    }

    fn type_key<H>(&mut self, host: &mut H, key: &Key) -> Activation
    where
        H: Host + ?Sized,
    {
        if self.focus.current_text_sink(host).is_none() {
            tracing::debug!(message = "keyboard.no_sink", key = %key.code());
            return Activation::Ignored(IgnoreReason::NoActiveSink);
        }

        let had_pending = self.composer.is_pending();
        let composed = match self.composer.compose(key) {
            Composition::Composed(glyph) => Some(glyph),
            Composition::Plain => None,
        };
        if had_pending {
            self.render_pending(host);
        }
        let text = self.modifiers.emitted_text(key, composed);
        let result = match self.focus.current_text_sink(host) {
            Some(sink) => TextEditor::insert(sink, &text),
            None => return Activation::Ignored(IgnoreReason::NoActiveSink),
        };
        self.release_shift(host);

        match result {
            Ok(_) => {
                tracing::debug!(message = "keyboard.insert", text = %text, composed = composed.is_some());
                Activation::Inserted(text)
            }
            Err(err) => {
                tracing::warn!(message = "keyboard.insert.rejected", error = %err);
                Activation::Ignored(IgnoreReason::EditRejected)
            }
        }
    }

    fn arm_diacritic<H>(&mut self, host: &mut H, dead: DeadKey) -> Activation
    where
        H: Host + ?Sized,
    {
        let kind = self.composer.arm(dead, self.modifiers.shift());
        self.render_pending(host);
        self.release_shift(host);
        tracing::debug!(
            message = "keyboard.diacritic.armed",
            kind = kind.name(),
            mark = kind.mark()
        );
        Activation::DiacriticArmed(kind)
    }

    fn backspace<H>(&mut self, host: &mut H) -> Activation
    where
        H: Host + ?Sized,
    {
        if self.focus.current_text_sink(host).is_none() {
            return Activation::Ignored(IgnoreReason::NoActiveSink);
        }
        self.drop_pending(host);

        let result = match self.focus.current_text_sink(host) {
            Some(sink) => TextEditor::backspace(sink),
            None => return Activation::Ignored(IgnoreReason::NoActiveSink),
        };
        match result {
            Ok(EditOutcome::Deleted { removed, .. }) => {
                tracing::debug!(message = "keyboard.delete", removed = %removed);
                Activation::Deleted(removed)
            }
            Ok(_) => Activation::Ignored(IgnoreReason::NothingToDelete),
            Err(err) => {
                tracing::warn!(message = "keyboard.delete.rejected", error = %err);
                Activation::Ignored(IgnoreReason::EditRejected)
            }
        }
    }

    fn advance_focus<H>(&mut self, host: &mut H) -> Activation
    where
        H: Host + ?Sized,
    {
        self.drop_pending(host);
        Activation::FocusAdvanced(self.focus.on_tab(host))
    }

    fn drop_pending<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        if let Some(kind) = self.composer.reset() {
            self.render_pending(host);
            tracing::trace!(message = "keyboard.diacritic.dropped", kind = kind.name());
        }
    }
}
