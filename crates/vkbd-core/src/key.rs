#![forbid(unsafe_code)]

//! Key definitions and the ABNT2 key catalog.
//!
//! Every key on the keyboard is described once by a [`Key`]: its [`KeyCode`],
//! the glyph it produces unshifted, and the glyph it produces with shift.
//! Keys are compared by code, never by instance, so the catalog can hand out
//! plain references and callers can match on `KeyCode` values.
//!
//! # Layout
//!
//! ```text
//! '  1  2  3  4  5  6  7  8  9  0  -  <<<
//! Tab  q  w  e  r  t  y  u  i  o  p  ´  [
//! Caps  a  s  d  f  g  h  j  k  l  ç  ~  ]
//! Shift  \  z  x  c  v  b  n  m  ,  .  ;  /
//!                  [ space ]
//! ```
//!
//! # Design Notes
//!
//! - Printable keys are identified by their unshifted glyph (`KeyCode::Char`).
//! - Digits have no shifted form; `shifted == base` for them.
//! - Letter keys carry their uppercase form as the shifted value so label
//!   updates treat them like any other shift variant.

use std::fmt;
use std::sync::OnceLock;

use ahash::AHashMap;

use crate::diacritic::DiacriticKind;
use crate::modifiers::ModifierState;

/// Identity of a key on the virtual keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable key, named by its unshifted glyph (`' '` is the space bar).
    Char(char),

    /// Deletes the grapheme before the caret.
    Backspace,

    /// Moves the insertion target to the next focusable widget.
    Tab,

    /// Toggles caps-lock.
    CapsLock,

    /// Toggles one-shot shift.
    Shift,

    /// Dead key for acute (grave when shifted).
    DeadAcute,

    /// Dead key for tilde (circumflex when shifted).
    DeadTilde,
}

impl KeyCode {
    /// How activations of this key are handled.
    #[must_use]
    pub const fn role(self) -> KeyRole {
        match self {
            Self::Char(_) => KeyRole::Character,
            Self::Backspace => KeyRole::Backspace,
            Self::Tab => KeyRole::Tab,
            Self::CapsLock => KeyRole::Modifier(ModifierKey::CapsLock),
            Self::Shift => KeyRole::Modifier(ModifierKey::Shift),
            Self::DeadAcute => KeyRole::DeadKey(DeadKey::Acute),
            Self::DeadTilde => KeyRole::DeadKey(DeadKey::Tilde),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(' ') => f.write_str("Space"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Tab => f.write_str("Tab"),
            Self::CapsLock => f.write_str("CapsLock"),
            Self::Shift => f.write_str("Shift"),
            Self::DeadAcute => f.write_str("DeadAcute"),
            Self::DeadTilde => f.write_str("DeadTilde"),
        }
    }
}

/// The two accent keys of the ABNT2 layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadKey {
    /// `´` unshifted, `` ` `` shifted.
    Acute,
    /// `~` unshifted, `^` shifted.
    Tilde,
}

impl DeadKey {
    #[must_use]
    pub const fn code(self) -> KeyCode {
        match self {
            Self::Acute => KeyCode::DeadAcute,
            Self::Tilde => KeyCode::DeadTilde,
        }
    }
}

/// The two modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    /// Latching caps-lock.
    CapsLock,
    /// One-shot shift.
    Shift,
}

/// Classification of a key by what an activation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    /// Emits text into the current sink.
    Character,
    /// Arms a pending diacritic.
    DeadKey(DeadKey),
    /// Toggles a modifier flag.
    Modifier(ModifierKey),
    /// Deletes before the caret.
    Backspace,
    /// Advances focus.
    Tab,
}

impl KeyRole {
    /// Short name for structured logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::DeadKey(_) => "dead_key",
            Self::Modifier(_) => "modifier",
            Self::Backspace => "backspace",
            Self::Tab => "tab",
        }
    }
}

/// Immutable description of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    code: KeyCode,
    base: &'static str,
    shifted: &'static str,
}

impl Key {
    /// A key without a shifted form.
    #[must_use]
    pub const fn new(code: KeyCode, base: &'static str) -> Self {
        Self {
            code,
            base,
            shifted: base,
        }
    }

    /// A key with a distinct shifted glyph.
    #[must_use]
    pub const fn with_shift(code: KeyCode, base: &'static str, shifted: &'static str) -> Self {
        Self {
            code,
            base,
            shifted,
        }
    }

    #[must_use]
    pub const fn code(&self) -> KeyCode {
        self.code
    }

    #[must_use]
    pub const fn base(&self) -> &'static str {
        self.base
    }

    #[must_use]
    pub const fn shifted(&self) -> &'static str {
        self.shifted
    }

    #[must_use]
    pub const fn role(&self) -> KeyRole {
        self.code.role()
    }

    /// Whether shift changes what this key shows.
    #[must_use]
    pub fn has_shift_variant(&self) -> bool {
        self.base != self.shifted
    }

    /// Whether the base value is a single alphabetic character.
    #[must_use]
    pub fn is_letter(&self) -> bool {
        let mut chars = self.base.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    }

    /// The lowercase vowel this key types, if it types one of a, e, i, o, u.
    #[must_use]
    pub fn vowel(&self) -> Option<char> {
        if !self.is_letter() {
            return None;
        }
        self.base
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase())
            .filter(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
    }

    /// The label a host should display for this key under `mods`.
    ///
    /// Character keys show exactly what an activation would emit. Dead keys
    /// show the mark of the accent they would arm, so they follow shift
    /// only; the remaining keys never change.
    #[must_use]
    pub fn label(&self, mods: &ModifierState) -> String {
        match self.role() {
            KeyRole::Character => mods.emitted_text(self, None),
            KeyRole::DeadKey(dead) => DiacriticKind::from_dead_key(dead, mods.shift())
                .mark()
                .to_owned(),
            _ => self.base.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// ABNT2 table
// ---------------------------------------------------------------------------

const fn ch(c: char, base: &'static str) -> Key {
    Key::new(KeyCode::Char(c), base)
}

const fn chs(c: char, base: &'static str, shifted: &'static str) -> Key {
    Key::with_shift(KeyCode::Char(c), base, shifted)
}

const ROW_NUMBERS: &[Key] = &[
    chs('\'', "'", "\""),
    ch('1', "1"),
    ch('2', "2"),
    ch('3', "3"),
    ch('4', "4"),
    ch('5', "5"),
    ch('6', "6"),
    ch('7', "7"),
    ch('8', "8"),
    ch('9', "9"),
    ch('0', "0"),
    chs('-', "-", "_"),
    Key::new(KeyCode::Backspace, "<<<"),
];

const ROW_TOP: &[Key] = &[
    Key::new(KeyCode::Tab, "Tab"),
    chs('q', "q", "Q"),
    chs('w', "w", "W"),
    chs('e', "e", "E"),
    chs('r', "r", "R"),
    chs('t', "t", "T"),
    chs('y', "y", "Y"),
    chs('u', "u", "U"),
    chs('i', "i", "I"),
    chs('o', "o", "O"),
    chs('p', "p", "P"),
    Key::with_shift(KeyCode::DeadAcute, "´", "`"),
    chs('[', "[", "{"),
];

const ROW_HOME: &[Key] = &[
    Key::new(KeyCode::CapsLock, "Caps Lock"),
    chs('a', "a", "A"),
    chs('s', "s", "S"),
    chs('d', "d", "D"),
    chs('f', "f", "F"),
    chs('g', "g", "G"),
    chs('h', "h", "H"),
    chs('j', "j", "J"),
    chs('k', "k", "K"),
    chs('l', "l", "L"),
    chs('ç', "ç", "Ç"),
    Key::with_shift(KeyCode::DeadTilde, "~", "^"),
    chs(']', "]", "}"),
];

const ROW_BOTTOM: &[Key] = &[
    Key::new(KeyCode::Shift, "Shift"),
    chs('\\', "\\", "|"),
    chs('z', "z", "Z"),
    chs('x', "x", "X"),
    chs('c', "c", "C"),
    chs('v', "v", "V"),
    chs('b', "b", "B"),
    chs('n', "n", "N"),
    chs('m', "m", "M"),
    chs(',', ",", "<"),
    chs('.', ".", ">"),
    chs(';', ";", ":"),
    chs('/', "/", "?"),
];

const ROW_SPACE: &[Key] = &[ch(' ', " ")];

const ABNT2_ROWS: &[&[Key]] = &[ROW_NUMBERS, ROW_TOP, ROW_HOME, ROW_BOTTOM, ROW_SPACE];

static ABNT2: OnceLock<KeyCatalog> = OnceLock::new();

/// The set of keys on the keyboard, grouped in rows.
#[derive(Debug, Clone)]
pub struct KeyCatalog {
    keys: AHashMap<KeyCode, Key>,
    rows: Vec<Vec<KeyCode>>,
}

impl KeyCatalog {
    /// The Brazilian ABNT2 catalog, built on first use.
    #[must_use]
    pub fn abnt2() -> &'static KeyCatalog {
        ABNT2.get_or_init(|| Self::from_rows(ABNT2_ROWS))
    }

    fn from_rows(rows: &[&[Key]]) -> Self {
        let mut keys = AHashMap::with_capacity(rows.iter().map(|row| row.len()).sum());
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|key| {
                        keys.insert(key.code(), key.clone());
                        key.code()
                    })
                    .collect()
            })
            .collect();
        Self { keys, rows }
    }

    /// Look up a key by code.
    #[must_use]
    pub fn get(&self, code: KeyCode) -> Option<&Key> {
        self.keys.get(&code)
    }

    #[must_use]
    pub fn contains(&self, code: KeyCode) -> bool {
        self.keys.contains_key(&code)
    }

    /// Key codes row by row, left to right.
    #[must_use]
    pub fn rows(&self) -> &[Vec<KeyCode>] {
        &self.rows
    }

    /// All keys in layout order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.rows
            .iter()
            .flatten()
            .filter_map(|code| self.keys.get(code))
    }

    /// Keys whose label changes with shift.
    pub fn shift_variants(&self) -> impl Iterator<Item = &Key> + '_ {
        self.keys().filter(|key| key.has_shift_variant())
    }

    /// Letter keys whose label changes with caps-lock.
    pub fn letters_with_shift_variant(&self) -> impl Iterator<Item = &Key> + '_ {
        self.shift_variants().filter(|key| key.is_letter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
