//! Configuration error types for the Parse SDK.
//!
//! Request-time failures live in [`crate::clients`]; this module only covers
//! errors raised while building credentials and clients.
//!
//! # Example
//!
//! ```rust
//! use parse_sdk::{ApplicationId, ConfigError};
//!
//! let result = ApplicationId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApplicationId)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the SDK.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Application ID cannot be empty.
    #[error("Application ID cannot be empty. Please provide a valid Parse application ID.")]
    EmptyApplicationId,

    /// REST API key cannot be empty.
    #[error("REST API key cannot be empty. Please provide a valid Parse REST API key.")]
    EmptyRestApiKey,

    /// A secret key (JavaScript or master) was given but is empty.
    #[error("The {kind} key cannot be empty. Leave it unset instead.")]
    EmptySecretKey {
        /// Which key was empty: "JavaScript" from [`SecretKey::javascript`],
        /// "master" from [`SecretKey::master`], "secret" from [`SecretKey::new`].
        ///
        /// [`SecretKey::javascript`]: crate::SecretKey::javascript
        /// [`SecretKey::master`]: crate::SecretKey::master
        /// [`SecretKey::new`]: crate::SecretKey::new
        kind: &'static str,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The base URL could not be parsed or cannot serve as a base.
    #[error("Invalid base URL '{url}'. Expected an absolute http(s) URL ending in '/'.")]
    InvalidBaseUrl {
        /// The URL that was provided.
        url: String,
    },

    /// The default HTTP transport could not be created.
    #[error("Failed to create HTTP transport: {reason}")]
    Transport {
        /// Why the transport could not be created.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_application_id_error_message() {
        let message = ConfigError::EmptyApplicationId.to_string();
        assert!(message.contains("Application ID cannot be empty"));
    }

    #[test]
    fn test_empty_secret_key_names_the_key() {
        let error = ConfigError::EmptySecretKey { kind: "master" };
        assert_eq!(
            error.to_string(),
            "The master key cannot be empty. Leave it unset instead."
        );
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "application_id",
        };
        let message = error.to_string();
        assert!(message.contains("application_id"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        assert!(error.to_string().contains("not a url"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyRestApiKey;
        let _: &dyn std::error::Error = &error;
    }
}
