#![forbid(unsafe_code)]

//! Caps-lock and one-shot shift.
//!
//! Caps-lock latches until pressed again. Shift is sticky for exactly one
//! character: the keyboard releases it right after the next character key
//! (or dead key) is handled. Both flags may be set at once; in that case
//! letters are uppercased and shift is still released afterwards.
//!
//! # Case rules
//!
//! | caps | shift | letter / accented vowel | other character key |
//! |------|-------|-------------------------|---------------------|
//! | off  | off   | as typed                | base glyph          |
//! | off  | on    | uppercase               | shifted glyph       |
//! | on   | off   | uppercase               | base glyph          |
//! | on   | on    | uppercase               | shifted glyph       |

use bitflags::bitflags;

use crate::key::Key;

bitflags! {
    /// Latched modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Locks: u8 {
        /// No modifiers.
        const NONE      = 0b00;
        /// Caps-lock is latched.
        const CAPS_LOCK = 0b01;
        /// Shift applies to the next character.
        const SHIFT     = 0b10;
    }
}

impl Default for Locks {
    fn default() -> Self {
        Self::NONE
    }
}

/// Modifier state of one keyboard instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    locks: Locks,
}

impl ModifierState {
    /// Both modifiers released.
    #[must_use]
    pub const fn new() -> Self {
        Self { locks: Locks::NONE }
    }

    /// Start from an explicit flag set.
    #[must_use]
    pub const fn with_locks(locks: Locks) -> Self {
        Self { locks }
    }

    #[must_use]
    pub const fn locks(&self) -> Locks {
        self.locks
    }

    #[must_use]
    pub const fn caps_lock(&self) -> bool {
        self.locks.contains(Locks::CAPS_LOCK)
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.locks.contains(Locks::SHIFT)
    }

    /// Flip caps-lock and return the new value.
    pub fn toggle_caps_lock(&mut self) -> bool {
        self.locks.toggle(Locks::CAPS_LOCK);
        self.caps_lock()
    }

    /// Flip shift and return the new value.
    pub fn toggle_shift(&mut self) -> bool {
        self.locks.toggle(Locks::SHIFT);
        self.shift()
    }

    /// Clear shift after it has been spent. Returns true if it was set.
    pub fn release_shift(&mut self) -> bool {
        let was_set = self.shift();
        self.locks.remove(Locks::SHIFT);
        was_set
    }

    /// Case transform for letters and composed glyphs.
    #[must_use]
    pub fn effective_case(&self, text: &str) -> String {
        if self.locks.intersects(Locks::CAPS_LOCK | Locks::SHIFT) {
            text.to_uppercase()
        } else {
            text.to_owned()
        }
    }

    /// Text a character key emits under the current flags.
    ///
    /// `composed` is the accented glyph produced by a pending diacritic, if
    /// any; it is case-transformed like a letter. Does not release shift.
    #[must_use]
    pub fn emitted_text(&self, key: &Key, composed: Option<&str>) -> String {
        if let Some(glyph) = composed {
            return self.effective_case(glyph);
        }
        if key.is_letter() {
            return self.effective_case(key.base());
        }
        if self.shift() {
            key.shifted().to_owned()
        } else {
            key.base().to_owned()
        }
    }
}
