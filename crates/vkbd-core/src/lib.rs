#![forbid(unsafe_code)]

//! Core: key catalog, modifier state, and dead-key composition.
//!
//! # Role in the virtual keyboard
//! `vkbd-core` is the host-independent model. It knows which keys exist on
//! the ABNT2 layout, what each of them emits under the current modifiers,
//! and how a pending accent combines with the next vowel. Nothing here talks
//! to a host, a widget, or a text buffer.
//!
//! # Primary responsibilities
//! - **KeyCatalog**: the fixed ABNT2 table, built once per process.
//! - **ModifierState**: caps-lock and one-shot shift flags plus the case rules.
//! - **DiacriticComposer**: the Idle / Pending(kind) dead-key state machine.
//! - **KeyboardConfig**: behaviour switches, loadable from the environment.
//!
//! # How it fits in the system
//! `vkbd-input` owns one of each of these per keyboard instance and drives
//! them from `VirtualKeyboard::activate`.

pub mod config;
pub mod diacritic;
pub mod key;
pub mod modifiers;

pub use config::KeyboardConfig;
pub use diacritic::{Composition, DiacriticComposer, DiacriticKind};
pub use key::{DeadKey, Key, KeyCatalog, KeyCode, KeyRole, ModifierKey};
pub use modifiers::{Locks, ModifierState};
