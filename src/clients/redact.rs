//! Scrubbing of secret key literals from rendered error text.

use std::fmt;

use crate::config::Credentials;

/// Placeholder substituted for the JavaScript key.
pub const REDACTED_JAVASCRIPT_KEY: &str = "-- REDACTED JAVASCRIPT KEY --";

/// Placeholder substituted for the master key.
pub const REDACTED_MASTER_KEY: &str = "-- REDACTED MASTER KEY --";

/// Replaces known secret values in text.
///
/// A `Redactor` is captured by every error a [`Client`](crate::Client)
/// produces and applied when the error is rendered. A disabled redactor
/// returns text unchanged.
///
/// Replacement is a single left-to-right pass with no overlapping matches.
/// When both keys match at the same position the JavaScript key wins.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Redactor {
    rules: Vec<(String, &'static str)>,
}

impl Redactor {
    /// A redactor that leaves text untouched.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { rules: Vec::new() }
    }

    /// Builds a redactor for the given credentials.
    ///
    /// When `enabled` is `false`, or neither secret key is configured, the
    /// result behaves like [`Redactor::disabled`].
    #[must_use]
    pub fn new(credentials: &Credentials, enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let mut rules = Vec::with_capacity(2);
        if let Some(key) = credentials.javascript_key() {
            rules.push((key.as_ref().to_string(), REDACTED_JAVASCRIPT_KEY));
        }
        if let Some(key) = credentials.master_key() {
            rules.push((key.as_ref().to_string(), REDACTED_MASTER_KEY));
        }
        Self { rules }
    }

    /// Returns `true` if this redactor will rewrite anything.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Returns `text` with every secret occurrence replaced.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        if self.rules.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(ch) = rest.chars().next() {
            let hit = self
                .rules
                .iter()
                .find(|(secret, _)| rest.starts_with(secret.as_str()));
            if let Some((secret, placeholder)) = hit {
                out.push_str(placeholder);
                rest = &rest[secret.len()..];
            } else {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
        out
    }
}

impl fmt::Debug for Redactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Redactor")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
