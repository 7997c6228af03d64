#![forbid(unsafe_code)]

//! Dead-key composition.
//!
//! An accent key does not type anything by itself. It arms a pending
//! [`DiacriticKind`], and the next character key consumes it: vowels turn
//! into their accented form, any other key types its own value and the
//! accent is dropped.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐  ´ / ~ (shift picks ` / ^)  ┌────────────────┐
//! │ Idle │────────────────────────────▶│ Pending(kind)  │
//! └──────┘                             └────────────────┘
//!    ▲                                    │         │
//!    │   vowel: Composed(glyph)           │         │ ´ / ~ again:
//!    │   other key: Plain                 │         │ replaces kind
//!    └────────────────────────────────────┘◀────────┘
//! ```
//!
//! # Composition table
//!
//! | kind       | a | e  | i  | o | u  |
//! |------------|---|----|----|---|----|
//! | Acute      | á | é  | í  | ó | ú  |
//! | Grave      | à | è  | ì  | ò | ù  |
//! | Tilde      | ã | ~e | ~i | õ | ~u |
//! | Circumflex | â | ê  | î  | ô | û  |
//!
//! Tilde over e, i and u is typed as the two-character fallback unless
//! [`DiacriticComposer::with_precomposed_tilde`] is enabled, which emits
//! ẽ, ĩ and ũ instead.

use crate::key::{DeadKey, Key};

/// Accent waiting for the next key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiacriticKind {
    Acute,
    Grave,
    Tilde,
    Circumflex,
}

impl DiacriticKind {
    /// Accent selected by a dead key, given whether shift is held.
    #[must_use]
    pub const fn from_dead_key(dead: DeadKey, shift: bool) -> Self {
        match (dead, shift) {
            (DeadKey::Acute, false) => Self::Acute,
            (DeadKey::Acute, true) => Self::Grave,
            (DeadKey::Tilde, false) => Self::Tilde,
            (DeadKey::Tilde, true) => Self::Circumflex,
        }
    }

    /// The dead key that arms this accent.
    #[must_use]
    pub const fn dead_key(self) -> DeadKey {
        match self {
            Self::Acute | Self::Grave => DeadKey::Acute,
            Self::Tilde | Self::Circumflex => DeadKey::Tilde,
        }
    }

    /// Spacing glyph for the accent, shown on the dead key that arms it.
    #[must_use]
    pub const fn mark(self) -> &'static str {
        match self {
            Self::Acute => "´",
            Self::Grave => "`",
            Self::Tilde => "~",
            Self::Circumflex => "^",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Acute => "acute",
            Self::Grave => "grave",
            Self::Tilde => "tilde",
            Self::Circumflex => "circumflex",
        }
    }

    /// Accented form of a lowercase vowel, or `None` for anything else.
    #[must_use]
    pub const fn compose(self, vowel: char, precomposed_tilde: bool) -> Option<&'static str> {
        let glyph = match (self, vowel) {
            (Self::Acute, 'a') => "á",
            (Self::Acute, 'e') => "é",
            (Self::Acute, 'i') => "í",
            (Self::Acute, 'o') => "ó",
            (Self::Acute, 'u') => "ú",
            (Self::Grave, 'a') => "à",
            (Self::Grave, 'e') => "è",
            (Self::Grave, 'i') => "ì",
            (Self::Grave, 'o') => "ò",
            (Self::Grave, 'u') => "ù",
            (Self::Tilde, 'a') => "ã",
            (Self::Tilde, 'o') => "õ",
            (Self::Tilde, 'e') if precomposed_tilde => "ẽ",
            (Self::Tilde, 'i') if precomposed_tilde => "ĩ",
            (Self::Tilde, 'u') if precomposed_tilde => "ũ",
            (Self::Tilde, 'e') => "~e",
            (Self::Tilde, 'i') => "~i",
            (Self::Tilde, 'u') => "~u",
            (Self::Circumflex, 'a') => "â",
            (Self::Circumflex, 'e') => "ê",
            (Self::Circumflex, 'i') => "î",
            (Self::Circumflex, 'o') => "ô",
            (Self::Circumflex, 'u') => "û",
            _ => return None,
        };
        Some(glyph)
    }
}

/// Result of feeding a key to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// The key completed an accented glyph.
    Composed(&'static str),
    /// The key types its own value.
    Plain,
}

/// The Idle / Pending(kind) dead-key state machine.
#[derive(Debug, Clone, Default)]
pub struct DiacriticComposer {
    pending: Option<DiacriticKind>,
    precomposed_tilde: bool,
}

impl DiacriticComposer {
    /// Idle composer with the documented tilde fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit ẽ, ĩ, ũ instead of "~e", "~i", "~u".
    #[must_use]
    pub fn with_precomposed_tilde(mut self, enabled: bool) -> Self {
        self.precomposed_tilde = enabled;
        self
    }

    /// Arm an accent. A previously pending accent is discarded.
    pub fn arm(&mut self, dead: DeadKey, shift: bool) -> DiacriticKind {
        let kind = DiacriticKind::from_dead_key(dead, shift);
        if let Some(previous) = self.pending.replace(kind) {
            tracing::trace!(
                message = "diacritic.replaced",
                previous = previous.name(),
                kind = kind.name()
            );
        }
        kind
    }

    /// Consume the pending accent with `key`. Always returns to Idle.
    pub fn compose(&mut self, key: &Key) -> Composition {
        let Some(kind) = self.pending.take() else {
            return Composition::Plain;
        };
        match key
            .vowel()
            .and_then(|vowel| kind.compose(vowel, self.precomposed_tilde))
        {
            Some(glyph) => Composition::Composed(glyph),
            None => {
                tracing::trace!(
                    message = "diacritic.discarded",
                    kind = kind.name(),
                    key = %key.code()
                );
                Composition::Plain
            }
        }
    }

    /// Drop the pending accent without composing. Returns what was pending.
    pub fn reset(&mut self) -> Option<DiacriticKind> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<DiacriticKind> {
        self.pending
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn precomposed_tilde(&self) -> bool {
        self.precomposed_tilde
    }
}
