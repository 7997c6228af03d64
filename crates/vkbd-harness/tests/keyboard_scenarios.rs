//! End-to-end keyboard scenarios driven through the recording host.
//!
//! Every test builds a [`Form`] (two text fields, a label, and one button per
//! key) and clicks keys the way a user would: host focus first moves onto the
//! button, then the keyboard handles the activation.

use vkbd_core::{DiacriticKind, KeyCatalog, KeyCode, KeyboardConfig};
use vkbd_harness::{FIELD_A, FIELD_B, Form, LABEL};
use vkbd_input::{Activation, BufferSink, IgnoreReason, KeyboardError, TextSink};

const SHIFT: KeyCode = KeyCode::Shift;
const CAPS: KeyCode = KeyCode::CapsLock;
const ACUTE: KeyCode = KeyCode::DeadAcute;
const TILDE: KeyCode = KeyCode::DeadTilde;

fn ch(c: char) -> KeyCode {
    KeyCode::Char(c)
}

// ── Modifiers ───────────────────────────────────────────────────────────

#[test]
fn double_shift_restores_state_and_labels() {
    let mut form = Form::new();
    let modifiers = form.keyboard.modifiers();
    let labels = form.host.labels();

    form.press_all([SHIFT, SHIFT]).expect("catalog keys");

    assert_eq!(form.keyboard.modifiers(), modifiers);
    assert_eq!(form.host.labels(), labels);
    assert!(!form.host.is_highlighted(SHIFT));
}

#[test]
fn shift_relabels_every_shifted_key() {
    let mut form = Form::new();
    form.press(SHIFT).expect("catalog key");
    assert!(form.host.is_highlighted(SHIFT));
    assert_eq!(form.host.label(ch('a')), Some("A"));
    assert_eq!(form.host.label(ch('1')), Some("1"));
    assert_eq!(form.host.label(ch('\'')), Some("\""));
    assert_eq!(form.host.label(ch(',')), Some("<"));
    assert_eq!(form.host.label(ACUTE), Some("`"));
    assert_eq!(form.host.label(TILDE), Some("^"));
}

#[test]
fn shift_auto_releases_after_letter() {
    let mut form = Form::new();
    form.press(SHIFT).expect("catalog key");
    let typed = form.press(ch('a')).expect("catalog key");

    assert_eq!(typed, Activation::Inserted("A".to_owned()));
    assert_eq!(form.text(FIELD_A), "A");
    assert!(!form.keyboard.modifiers().shift());
    assert!(!form.host.is_highlighted(SHIFT));
    assert_eq!(form.host.label(ch('a')), Some("a"));
}

#[test]
fn caps_lock_with_one_shot_shift() {
    let mut form = Form::new();
    form.press_all([CAPS, SHIFT, ch('b')]).expect("catalog keys");

    assert_eq!(form.text(FIELD_A), "B");
    assert!(!form.keyboard.modifiers().shift());
    assert!(form.keyboard.modifiers().caps_lock());
    assert!(form.host.is_highlighted(CAPS));
    assert_eq!(form.host.label(ch('b')), Some("B"));
}

#[test]
fn caps_lock_relabels_letters_only() {
    let mut form = Form::new();
    form.press(CAPS).expect("catalog key");

    assert_eq!(form.host.label(ch('q')), Some("Q"));
    assert_eq!(form.host.label(ch('ç')), Some("Ç"));
    assert_eq!(form.host.label(ch('1')), Some("1"));
    assert_eq!(form.host.label(ACUTE), Some("´"));

    form.type_chars("ola, 2").expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "OLA, 2");
}

#[test]
fn caps_lock_off_restores_lowercase() {
    let mut form = Form::new();
    form.press_all([CAPS, ch('x'), CAPS, ch('x')]).expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "Xx");
    assert_eq!(form.host.label(ch('x')), Some("x"));
    assert!(!form.host.is_highlighted(CAPS));
}

#[test]
fn shift_on_punctuation_and_digits() {
    let mut form = Form::new();
    form.press_all([SHIFT, ch('-'), SHIFT, ch(';'), ch(';'), SHIFT, ch('1')])
        .expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "_:;1");
    assert!(!form.keyboard.modifiers().shift());
}

// ── Dead keys ───────────────────────────────────────────────────────────

#[test]
fn acute_composes_vowel() {
    let mut form = Form::new();
    form.press(ACUTE).expect("catalog key");
    assert_eq!(form.keyboard.pending_diacritic(), Some(DiacriticKind::Acute));
    form.press(ch('a')).expect("catalog key");

    assert_eq!(form.text(FIELD_A), "á");
    assert_eq!(form.keyboard.pending_diacritic(), None);
}

#[test]
fn shifted_acute_is_grave() {
    let mut form = Form::new();
    let armed = form.press_all([SHIFT, ACUTE]).expect("catalog keys");
    assert_eq!(armed[1], Activation::DiacriticArmed(DiacriticKind::Grave));
    assert!(!form.keyboard.modifiers().shift());

    form.press(ch('e')).expect("catalog key");
    assert_eq!(form.text(FIELD_A), "è");
}

#[test]
fn non_vowel_after_accent_types_plain() {
    let mut form = Form::new();
    form.press_all([ACUTE, ch('k'), ch('a')]).expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "ka");
}

#[test]
fn portuguese_words() {
    let mut form = Form::new();
    form.press_all([
        ch('c'),
        ch('o'),
        ch('r'),
        ch('a'),
        ch('ç'),
        TILDE,
        ch('a'),
        ch('o'),
        ch(' '),
        SHIFT,
        TILDE,
        ch('e'),
        ch(' '),
        SHIFT,
        ch('a'),
        ACUTE,
        ch('a'),
    ])
    .expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "coração ê Aá");
}

#[test]
fn shift_after_accent_capitalises_composed_vowel() {
    let mut form = Form::new();
    form.press_all([TILDE, SHIFT, ch('o')]).expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "Õ");
    assert!(!form.keyboard.modifiers().shift());
}

#[test]
fn tilde_fallback_and_precomposed_config() {
    let mut form = Form::new();
    form.press_all([TILDE, ch('e'), TILDE, ch('u')]).expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "~e~u");
    assert_eq!(form.host.caret(FIELD_A), Some(4));

    let mut form = Form::with_config(KeyboardConfig::default().with_precomposed_tilde(true));
    form.press_all([TILDE, ch('e'), TILDE, ch('i')]).expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "ẽĩ");
}

#[test]
fn second_dead_key_replaces_first() {
    let mut form = Form::new();
    form.press_all([ACUTE, SHIFT, TILDE, ch('a')]).expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "â");
}

#[test]
fn modifiers_keep_pending_accent() {
    let mut form = Form::new();
    form.press_all([ACUTE, CAPS, ch('i')]).expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "Í");
}

#[test]
fn pending_accent_highlights_its_dead_key() {
    let mut form = Form::new();
    assert!(!form.host.is_highlighted(ACUTE));
    assert!(!form.host.is_highlighted(TILDE));

    form.press_all([SHIFT, TILDE]).expect("catalog keys");
    assert_eq!(form.host.label(TILDE), Some("~"));
    assert!(form.host.is_highlighted(TILDE));
    assert!(!form.host.is_highlighted(ACUTE));

    form.press(ACUTE).expect("catalog key");
    assert!(form.host.is_highlighted(ACUTE));
    assert!(!form.host.is_highlighted(TILDE));

    form.press(ch('o')).expect("catalog key");
    assert_eq!(form.text(FIELD_A), "ó");
    assert!(!form.host.is_highlighted(ACUTE));
}

// ── Editing ─────────────────────────────────────────────────────────────

#[test]
fn insertion_happens_at_caret() {
    let mut form = Form::with_fields(
        KeyboardConfig::default(),
        BufferSink::new().with_text("helo").with_caret(3),
        BufferSink::new(),
    );
    form.press(ch('l')).expect("catalog key");
    assert_eq!(form.text(FIELD_A), "hello");
    assert_eq!(form.host.caret(FIELD_A), Some(4));
}

#[test]
fn typing_after_prepend_character_is_not_lost() {
    let mut form = Form::with_fields(
        KeyboardConfig::default(),
        BufferSink::new().with_text("1\u{600}"),
        BufferSink::new(),
    );
    let typed = form.press(ch('a')).expect("catalog key");
    assert_eq!(typed, Activation::Inserted("a".to_owned()));
    assert_eq!(form.text(FIELD_A), "1\u{600}a");
    assert_eq!(form.host.caret(FIELD_A), Some(2));

    form.press(ch('b')).expect("catalog key");
    assert_eq!(form.text(FIELD_A), "1\u{600}ab");
}

#[test]
fn backspace_on_empty_field_is_noop() {
    let mut form = Form::new();
    let result = form.press(KeyCode::Backspace).expect("catalog key");
    assert_eq!(result, Activation::Ignored(IgnoreReason::NothingToDelete));
    assert_eq!(form.text(FIELD_A), "");
    assert_eq!(form.host.caret(FIELD_A), Some(0));
}

#[test]
fn backspace_removes_accented_grapheme() {
    let mut form = Form::new();
    form.press_all([ch('p'), TILDE, ch('a'), ch('o')]).expect("catalog keys");
    let caret = form.host.caret(FIELD_A).expect("field");
    form.host
        .field_mut(FIELD_A)
        .expect("field")
        .set_caret(caret - 1)
        .expect("caret in range");

    let result = form.press(KeyCode::Backspace).expect("catalog key");
    assert_eq!(result, Activation::Deleted("ã".to_owned()));
    assert_eq!(form.text(FIELD_A), "po");
    assert_eq!(form.host.caret(FIELD_A), Some(1));
}

#[test]
fn backspace_discards_pending_accent() {
    let mut form = Form::new();
    form.press_all([ch('x'), ACUTE, KeyCode::Backspace, ch('a')])
        .expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "a");
}

#[test]
fn read_only_field_is_left_alone() {
    let mut form = Form::with_fields(
        KeyboardConfig::default(),
        BufferSink::new().with_text("fixo").read_only(),
        BufferSink::new(),
    );
    let results = form.press_all([SHIFT, ch('a')]).expect("catalog keys");
    assert_eq!(results[1], Activation::Ignored(IgnoreReason::EditRejected));
    assert_eq!(form.text(FIELD_A), "fixo");
    assert!(!form.keyboard.modifiers().shift());
}

// ── Focus ───────────────────────────────────────────────────────────────

#[test]
fn clicking_a_button_keeps_the_field() {
    let mut form = Form::new();
    let button = form.button(ch('a')).expect("button for a");
    assert_eq!(form.keyboard.current_target(), Some(FIELD_A));

    form.click(button);
    assert_eq!(form.keyboard.current_target(), Some(FIELD_A));

    form.press(ch('a')).expect("catalog key");
    assert_eq!(form.text(FIELD_A), "a");
}

#[test]
fn focus_leaving_second_field_switches_target() {
    let mut form = Form::new();
    form.click(FIELD_B);
    form.type_chars("oi").expect("catalog keys");
    assert_eq!(form.text(FIELD_A), "");
    assert_eq!(form.text(FIELD_B), "oi");
    assert_eq!(form.keyboard.current_target(), Some(FIELD_B));
}

#[test]
fn activation_restores_host_focus() {
    let mut form = Form::new();
    form.host.clear_focus_requests();
    form.press_all([SHIFT, ch('x')]).expect("catalog keys");
    assert_eq!(form.host.focus_requests(), &[FIELD_A, FIELD_A]);
}

#[test]
fn restore_focus_can_be_turned_off() {
    let mut form = Form::with_config(KeyboardConfig::default().with_restore_focus(false));
    form.host.clear_focus_requests();
    form.press(ch('x')).expect("catalog key");
    assert!(form.host.focus_requests().is_empty());
    assert_eq!(form.text(FIELD_A), "x");
}

#[test]
fn tab_walks_the_form_and_skips_buttons() {
    let mut form = Form::new();
    assert_eq!(
        form.press(KeyCode::Tab).expect("catalog key"),
        Activation::FocusAdvanced(Some(FIELD_B))
    );
    assert_eq!(
        form.press(KeyCode::Tab).expect("catalog key"),
        Activation::FocusAdvanced(Some(LABEL))
    );

    let typed = form.press(ch('z')).expect("catalog key");
    assert_eq!(typed, Activation::Ignored(IgnoreReason::NoActiveSink));

    assert_eq!(
        form.press(KeyCode::Tab).expect("catalog key"),
        Activation::FocusAdvanced(Some(FIELD_A))
    );
    form.press(ch('z')).expect("catalog key");
    assert_eq!(form.text(FIELD_A), "z");
}

#[test]
fn tab_discards_pending_accent() {
    let mut form = Form::new();
    form.press_all([ACUTE, KeyCode::Tab, ch('a')]).expect("catalog keys");
    assert_eq!(form.text(FIELD_B), "a");
    assert_eq!(form.keyboard.pending_diacritic(), None);
}

// ── Errors ──────────────────────────────────────────────────────────────

#[test]
fn unknown_key_is_rejected_without_side_effects() {
    let mut form = Form::new();
    form.press(SHIFT).expect("catalog key");
    let renders = form.host.label_renders();

    assert_eq!(
        form.press(ch('@')),
        Err(KeyboardError::UnknownKey(ch('@')))
    );
    assert!(form.keyboard.modifiers().shift());
    assert_eq!(form.host.label_renders(), renders);
    assert_eq!(form.text(FIELD_A), "");
}

#[test]
fn press_all_stops_at_first_unknown_key() {
    let mut form = Form::new();
    let result = form.press_all([ch('a'), ch('€'), ch('b')]);
    assert_eq!(result, Err(KeyboardError::UnknownKey(ch('€'))));
    assert_eq!(form.text(FIELD_A), "a");
}

#[test]
fn every_catalog_key_activates() {
    let mut form = Form::new();
    let codes: Vec<KeyCode> = KeyCatalog::abnt2().keys().map(|key| key.code()).collect();
    for code in codes {
        assert!(form.press(code).is_ok(), "{code} should activate");
    }
}
