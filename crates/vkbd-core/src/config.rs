#![forbid(unsafe_code)]

//! Keyboard behaviour switches.
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `VKBD_RESTORE_FOCUS` | bool | true | Re-focus the insertion target before each activation |
//! | `VKBD_PRECOMPOSED_TILDE` | bool | false | Emit ẽ, ĩ, ũ instead of "~e", "~i", "~u" |
//!
//! Booleans accept `1`/`true` and `0`/`false` (case-insensitive). Anything
//! else leaves the default in place.
//!
//! # Example
//!
//! ```
//! use vkbd_core::KeyboardConfig;
//!
//! let config = KeyboardConfig::default().with_precomposed_tilde(true);
//! assert!(config.restore_focus);
//! assert!(config.precomposed_tilde);
//! ```

/// Environment variable for [`KeyboardConfig::restore_focus`].
pub const ENV_RESTORE_FOCUS: &str = "VKBD_RESTORE_FOCUS";

/// Environment variable for [`KeyboardConfig::precomposed_tilde`].
pub const ENV_PRECOMPOSED_TILDE: &str = "VKBD_PRECOMPOSED_TILDE";

/// Configuration for one keyboard instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardConfig {
    /// Ask the host to focus the insertion target again before handling a
    /// click, since clicking a keyboard button moves host focus to the button.
    /// Default: true.
    pub restore_focus: bool,

    /// Compose tilde over e, i and u into precomposed glyphs.
    /// Default: false (the "~e" style fallback is kept).
    pub precomposed_tilde: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            restore_focus: true,
            precomposed_tilde: false,
        }
    }
}

impl KeyboardConfig {
    #[must_use]
    pub fn with_restore_focus(mut self, enabled: bool) -> Self {
        self.restore_focus = enabled;
        self
    }

    #[must_use]
    pub fn with_precomposed_tilde(mut self, enabled: bool) -> Self {
        self.precomposed_tilde = enabled;
        self
    }

    /// Load config from environment variables, starting from the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load config through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup(ENV_RESTORE_FOCUS)
            && let Some(flag) = parse_flag(&val)
        {
            config.restore_focus = flag;
        }

        if let Some(val) = lookup(ENV_PRECOMPOSED_TILDE)
            && let Some(flag) = parse_flag(&val)
        {
            config.precomposed_tilde = flag;
        }

        config
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    let val = val.trim();
    if val == "1" || val.eq_ignore_ascii_case("true") {
        Some(true)
    } else if val == "0" || val.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        tracing::warn!(message = "config.flag.invalid", value = val);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, val)| (*val).to_owned())
        }
    }

    #[test]
    fn defaults() {
        let config = KeyboardConfig::default();
        assert!(config.restore_focus);
        assert!(!config.precomposed_tilde);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(
            KeyboardConfig::from_lookup(lookup(&[])),
            KeyboardConfig::default()
        );
    }

    #[test]
    fn reads_both_flags() {
        let config = KeyboardConfig::from_lookup(lookup(&[
            (ENV_RESTORE_FOCUS, "0"),
            (ENV_PRECOMPOSED_TILDE, "TRUE"),
        ]));
        assert!(!config.restore_focus);
        assert!(config.precomposed_tilde);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = KeyboardConfig::from_lookup(lookup(&[
            (ENV_RESTORE_FOCUS, "maybe"),
            (ENV_PRECOMPOSED_TILDE, ""),
        ]));
        assert_eq!(config, KeyboardConfig::default());
    }

    #[test]
    fn builders() {
        let config = KeyboardConfig::default()
            .with_restore_focus(false)
            .with_precomposed_tilde(true);
        assert!(!config.restore_focus);
        assert!(config.precomposed_tilde);
    }
}
