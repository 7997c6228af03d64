#![forbid(unsafe_code)]

//! Test harness for the virtual keyboard.
//!
//! [`RecordingHost`] is an in-memory [`Host`]: it owns a few [`BufferSink`]
//! text fields, a cyclic focus order, and records every focus request, label
//! render, and highlight change the keyboard makes. [`Form`] wires one up
//! with a keyboard the way an application window would.

use ahash::AHashMap;
use vkbd_core::{KeyCatalog, KeyCode, KeyboardConfig};
use vkbd_input::{
    Activation, BufferSink, Host, KeyboardError, TextSink, VirtualKeyboard, WidgetId,
};

/// First text field of the standard form.
pub const FIELD_A: WidgetId = WidgetId(1);
/// Second text field of the standard form.
pub const FIELD_B: WidgetId = WidgetId(2);
/// A focusable widget that does not accept text.
pub const LABEL: WidgetId = WidgetId(3);

/// Ids of keyboard buttons start here, one per catalog key.
pub const BUTTON_BASE: u64 = 1000;

/// One widget id per key, in layout order.
#[must_use]
pub fn button_ids(catalog: &KeyCatalog) -> Vec<WidgetId> {
    (BUTTON_BASE..)
        .zip(catalog.keys())
        .map(|(id, _)| WidgetId(id))
        .collect()
}

/// In-memory host that records what the keyboard asks of it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    fields: AHashMap<WidgetId, BufferSink>,
    order: Vec<WidgetId>,
    focus_owner: Option<WidgetId>,
    focus_requests: Vec<WidgetId>,
    labels: AHashMap<KeyCode, String>,
    label_renders: usize,
    highlights: AHashMap<KeyCode, bool>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field to the focus order.
    #[must_use]
    pub fn with_field(mut self, widget: WidgetId, sink: BufferSink) -> Self {
        self.fields.insert(widget, sink);
        self.order.push(widget);
        self
    }

    /// Append a focusable widget that has no text.
    #[must_use]
    pub fn with_widget(mut self, widget: WidgetId) -> Self {
        self.order.push(widget);
        self
    }

    /// Append several non-text widgets (typically the keyboard buttons).
    #[must_use]
    pub fn with_widgets<I>(mut self, widgets: I) -> Self
    where
        I: IntoIterator<Item = WidgetId>,
    {
        self.order.extend(widgets);
        self
    }

    #[must_use]
    pub fn with_focus_owner(mut self, widget: WidgetId) -> Self {
        self.focus_owner = Some(widget);
        self
    }

    /// Simulate the user clicking a widget: host focus moves there.
    pub fn click(&mut self, widget: WidgetId) -> Option<WidgetId> {
        self.focus_owner.replace(widget)
    }

    #[must_use]
    pub fn field(&self, widget: WidgetId) -> Option<&BufferSink> {
        self.fields.get(&widget)
    }

    pub fn field_mut(&mut self, widget: WidgetId) -> Option<&mut BufferSink> {
        self.fields.get_mut(&widget)
    }

    /// Text of a field, or `None` if `widget` is not a field.
    #[must_use]
    pub fn text(&self, widget: WidgetId) -> Option<&str> {
        self.fields.get(&widget).map(BufferSink::value)
    }

    #[must_use]
    pub fn caret(&self, widget: WidgetId) -> Option<usize> {
        self.fields.get(&widget).map(|sink| sink.caret())
    }

    #[must_use]
    pub fn label(&self, code: KeyCode) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    /// Snapshot of every label drawn so far, by key.
    #[must_use]
    pub fn labels(&self) -> AHashMap<KeyCode, String> {
        self.labels.clone()
    }

    /// Number of `render_key_label` calls.
    #[must_use]
    pub fn label_renders(&self) -> usize {
        self.label_renders
    }

    #[must_use]
    pub fn is_highlighted(&self, code: KeyCode) -> bool {
        self.highlights.get(&code).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn focus_requests(&self) -> &[WidgetId] {
        &self.focus_requests
    }

    pub fn clear_focus_requests(&mut self) {
        self.focus_requests.clear();
    }
}

impl Host for RecordingHost {
    fn request_focus(&mut self, widget: WidgetId) {
        tracing::trace!(message = "harness.focus.request", widget = %widget);
        self.focus_requests.push(widget);
        self.focus_owner = Some(widget);
    }

    fn next_focusable(&self, widget: WidgetId) -> Option<WidgetId> {
        let index = self.order.iter().position(|w| *w == widget)?;
        self.order.get((index + 1) % self.order.len()).copied()
    }

    fn text_sink(&mut self, widget: WidgetId) -> Option<&mut dyn TextSink> {
        self.fields
            .get_mut(&widget)
            .map(|sink| sink as &mut dyn TextSink)
    }

    fn render_key_label(&mut self, code: KeyCode, label: &str) {
        self.label_renders += 1;
        self.labels.insert(code, label.to_owned());
    }

    fn set_key_highlight(&mut self, code: KeyCode, highlighted: bool) {
        self.highlights.insert(code, highlighted);
    }

    fn focus_owner(&self) -> Option<WidgetId> {
        self.focus_owner
    }

    fn first_focusable(&self) -> Option<WidgetId> {
        self.order.first().copied()
    }
}

/// A window with two text fields, a label, and the keyboard below them.
///
/// Focus order is `FIELD_A`, `FIELD_B`, `LABEL`, then every keyboard button.
#[derive(Debug)]
pub struct Form {
    pub keyboard: VirtualKeyboard,
    pub host: RecordingHost,
    buttons: AHashMap<KeyCode, WidgetId>,
}

impl Form {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(KeyboardConfig::default())
    }

    #[must_use]
    pub fn with_config(config: KeyboardConfig) -> Self {
        Self::with_fields(config, BufferSink::new(), BufferSink::new())
    }

    /// Form whose fields start with the given contents.
    #[must_use]
    pub fn with_fields(config: KeyboardConfig, field_a: BufferSink, field_b: BufferSink) -> Self {
        let catalog = KeyCatalog::abnt2();
        let ids = button_ids(catalog);
        let mut host = RecordingHost::new()
            .with_field(FIELD_A, field_a)
            .with_field(FIELD_B, field_b)
            .with_widget(LABEL)
            .with_widgets(ids.iter().copied());
        let mut keyboard = VirtualKeyboard::with_config(config, ids.iter().copied());
        if let Some(target) = keyboard.bind_initial_focus(&host) {
            host.click(target);
        }
        keyboard.sync_labels(&mut host);
        let buttons = catalog.keys().map(|key| key.code()).zip(ids).collect();
        Self {
            keyboard,
            host,
            buttons,
        }
    }

    /// Button widget for `code`, if the keyboard has one.
    #[must_use]
    pub fn button(&self, code: KeyCode) -> Option<WidgetId> {
        self.buttons.get(&code).copied()
    }

    /// Click one key. Host focus moves onto the button first, as it would
    /// with a real mouse click; codes without a button are sent directly.
    pub fn press(&mut self, code: KeyCode) -> Result<Activation, KeyboardError> {
        if let Some(button) = self.button(code) {
            self.click(button);
        }
        self.keyboard.activate(&mut self.host, code)
    }

    /// Click keys in order, stopping at the first error.
    pub fn press_all<I>(&mut self, codes: I) -> Result<Vec<Activation>, KeyboardError>
    where
        I: IntoIterator<Item = KeyCode>,
    {
        codes.into_iter().map(|code| self.press(code)).collect()
    }

    /// Click the character key for each char of `text`.
    pub fn type_chars(&mut self, text: &str) -> Result<Vec<Activation>, KeyboardError> {
        self.press_all(text.chars().map(KeyCode::Char))
    }

    /// Move host focus to `widget` the way a mouse click would, and report
    /// the transition to the keyboard.
    pub fn click(&mut self, widget: WidgetId) -> bool {
        let previous = self.host.click(widget);
        self.keyboard.on_host_focus_changed(previous, Some(widget))
    }

    /// Text of `widget`, or empty if it is not a field.
    #[must_use]
    pub fn text(&self, widget: WidgetId) -> &str {
        self.host.text(widget).unwrap_or_default()
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}
