#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vkbd_core::{KeyCatalog, KeyCode, KeyboardConfig};
use vkbd_harness::{FIELD_A, FIELD_B, Form, LABEL};
use vkbd_input::{BufferSink, grapheme_len};

#[derive(Debug, Arbitrary)]
enum Step {
    /// Click the key at this index in layout order.
    Key(u8),
    /// Click a code that may be missing from the catalog.
    Raw(char),
    /// Move host focus by clicking a form widget.
    Click(u8),
    /// Move the caret of the current field.
    Caret(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    precomposed_tilde: bool,
    restore_focus: bool,
    initial: String,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let config = KeyboardConfig::default()
        .with_precomposed_tilde(input.precomposed_tilde)
        .with_restore_focus(input.restore_focus);
    let mut form = Form::with_fields(config, BufferSink::new().with_text(input.initial), BufferSink::new());
    let codes: Vec<KeyCode> = KeyCatalog::abnt2().keys().map(|key| key.code()).collect();

    for step in input.steps.into_iter().take(256) {
        match step {
            Step::Key(index) => {
                let code = codes[usize::from(index) % codes.len()];
                assert!(form.press(code).is_ok(), "catalog key {code} failed");
            }
            Step::Raw(c) => {
                let result = form.press(KeyCode::Char(c));
                assert_eq!(result.is_ok(), KeyCatalog::abnt2().contains(KeyCode::Char(c)));
            }
            Step::Click(index) => {
                let widgets = [FIELD_A, FIELD_B, LABEL];
                form.click(widgets[usize::from(index) % widgets.len()]);
            }
            Step::Caret(pos) => {
                if let Some(field) = form.keyboard.current_target()
                    && let Some(sink) = form.host.field_mut(field)
                {
                    let len = grapheme_len(sink.value());
                    let _ = vkbd_input::TextSink::set_caret(sink, usize::from(pos) % (len + 1));
                }
            }
        }

        for field in [FIELD_A, FIELD_B] {
            let caret = form.host.caret(field).unwrap_or(0);
            assert!(caret <= grapheme_len(form.text(field)), "caret out of range");
        }
        if let Some(target) = form.keyboard.current_target() {
            assert!(!form.keyboard.focus().is_keyboard_button(target));
        }
    }
});
