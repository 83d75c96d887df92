//! Validated newtype wrappers for Parse credentials.
//!
//! Each wrapper rejects empty values on construction so a half-configured
//! client fails at startup instead of on its first request.

use crate::error::ConfigError;
use std::fmt;

/// A validated Parse application ID.
///
/// Sent with every request in the `X-Parse-Application-Id` header.
///
/// # Example
///
/// ```rust
/// use parse_sdk::ApplicationId;
///
/// let id = ApplicationId::new("my-app").unwrap();
/// assert_eq!(id.as_ref(), "my-app");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Creates a new validated application ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApplicationId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyApplicationId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ApplicationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Parse REST API key.
///
/// Sent with every request in the `X-Parse-REST-API-Key` header. Its `Debug`
/// output is masked.
#[derive(Clone, PartialEq, Eq)]
pub struct RestApiKey(String);

impl RestApiKey {
    /// Creates a new validated REST API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyRestApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyRestApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for RestApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RestApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RestApiKey(*****)")
    }
}

/// A secret key that is never sent as a header.
///
/// Used for the JavaScript key and the master key. Both are kept so that
/// their literal values can be scrubbed from rendered errors.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `SecretKey(*****)`.
///
/// # Example
///
/// ```rust
/// use parse_sdk::SecretKey;
///
/// let key = SecretKey::new("master-secret").unwrap();
/// assert_eq!(format!("{:?}", key), "SecretKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Creates a new validated secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecretKey`] with kind `"secret"` if the
    /// key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_kind(key, "secret")
    }

    /// Creates a validated JavaScript key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecretKey`] with kind `"JavaScript"` if
    /// the key is empty.
    pub fn javascript(key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_kind(key, "JavaScript")
    }

    /// Creates a validated master key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecretKey`] with kind `"master"` if the
    /// key is empty.
    pub fn master(key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_kind(key, "master")
    }

    fn with_kind(key: impl Into<String>, kind: &'static str) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptySecretKey { kind });
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for SecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_id_rejects_empty() {
        assert_eq!(ApplicationId::new(""), Err(ConfigError::EmptyApplicationId));
    }

    #[test]
    fn test_application_id_keeps_value() {
        let id = ApplicationId::new("abc123").unwrap();
        assert_eq!(id.as_ref(), "abc123");
    }

    #[test]
    fn test_rest_api_key_rejects_empty() {
        assert_eq!(RestApiKey::new(""), Err(ConfigError::EmptyRestApiKey));
    }

    #[test]
    fn test_rest_api_key_debug_is_masked() {
        let key = RestApiKey::new("very-secret").unwrap();
        let debug = format!("{key:?}");
        assert_eq!(debug, "RestApiKey(*****)");
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_secret_key_rejects_empty() {
        assert!(matches!(
            SecretKey::new(""),
            Err(ConfigError::EmptySecretKey { .. })
        ));
    }

    #[test]
    fn test_secret_key_error_names_the_key() {
        assert_eq!(
            SecretKey::javascript("").unwrap_err(),
            ConfigError::EmptySecretKey { kind: "JavaScript" }
        );
        assert_eq!(
            SecretKey::master("").unwrap_err(),
            ConfigError::EmptySecretKey { kind: "master" }
        );
        assert_eq!(
            SecretKey::new("").unwrap_err(),
            ConfigError::EmptySecretKey { kind: "secret" }
        );
        assert_eq!(SecretKey::master("m").unwrap(), SecretKey::new("m").unwrap());
    }

    #[test]
    fn test_secret_key_debug_is_masked() {
        let key = SecretKey::new("m4st3r").unwrap();
        assert_eq!(format!("{key:?}"), "SecretKey(*****)");
        assert_eq!(key.as_ref(), "m4st3r");
    }
}
