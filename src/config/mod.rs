//! Credentials and endpoint configuration for the Parse SDK.
//!
//! # Overview
//!
//! - [`Credentials`]: the four keys identifying a Parse application
//! - [`CredentialsBuilder`]: a builder for constructing [`Credentials`]
//! - [`ApplicationId`], [`RestApiKey`], [`SecretKey`]: validated newtypes
//! - [`DEFAULT_BASE_URL`]: the hosted API endpoint
//!
//! There is no process-wide state: callers parse flags, environment or files
//! themselves and hand the values to [`Credentials::builder`].
//!
//! # Example
//!
//! ```rust
//! use parse_sdk::{ApplicationId, Credentials, RestApiKey, SecretKey};
//!
//! let credentials = Credentials::builder()
//!     .application_id(ApplicationId::new("app-id").unwrap())
//!     .rest_api_key(RestApiKey::new("rest-key").unwrap())
//!     .master_key(SecretKey::new("master-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(credentials.application_id().as_ref(), "app-id");
//! ```

mod newtypes;

pub use newtypes::{ApplicationId, RestApiKey, SecretKey};

use url::Url;

use crate::error::ConfigError;

/// The default base URL for the API.
pub const DEFAULT_BASE_URL: &str = "https://api.parse.com/1/";

/// Returns [`DEFAULT_BASE_URL`] as a parsed [`Url`].
///
/// # Panics
///
/// Panics if [`DEFAULT_BASE_URL`] does not parse. It is a constant covered by
/// this module's tests, so this cannot happen at runtime.
#[must_use]
pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid absolute URL")
}

/// Parses and validates a base URL for resource accessors.
///
/// The URL must be absolute, use `http` or `https`, carry no query string
/// and end in `/` so that object IDs resolve beneath it.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] if any of the above does not hold.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
    };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https")
        || url.query().is_some()
        || !url.path().ends_with('/')
    {
        return Err(invalid());
    }
    Ok(url)
}

/// Credentials to access a Parse application.
///
/// Only the application ID and the REST API key are sent with requests. The
/// JavaScript key and master key are retained for error redaction.
///
/// # Thread Safety
///
/// `Credentials` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct Credentials {
    application_id: ApplicationId,
    rest_api_key: RestApiKey,
    javascript_key: Option<SecretKey>,
    master_key: Option<SecretKey>,
}

impl Credentials {
    /// Creates a new builder for constructing `Credentials`.
    #[must_use]
    pub fn builder() -> CredentialsBuilder {
        CredentialsBuilder::new()
    }

    /// Returns the application ID.
    #[must_use]
    pub const fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the REST API key.
    #[must_use]
    pub const fn rest_api_key(&self) -> &RestApiKey {
        &self.rest_api_key
    }

    /// Returns the JavaScript key, if configured.
    #[must_use]
    pub const fn javascript_key(&self) -> Option<&SecretKey> {
        self.javascript_key.as_ref()
    }

    /// Returns the master key, if configured.
    #[must_use]
    pub const fn master_key(&self) -> Option<&SecretKey> {
        self.master_key.as_ref()
    }
}

// Verify Credentials is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credentials>();
};

/// Builder for constructing [`Credentials`] instances.
///
/// `application_id` and `rest_api_key` are required.
#[derive(Debug, Default)]
pub struct CredentialsBuilder {
    application_id: Option<ApplicationId>,
    rest_api_key: Option<RestApiKey>,
    javascript_key: Option<SecretKey>,
    master_key: Option<SecretKey>,
}

impl CredentialsBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application ID (required).
    #[must_use]
    pub fn application_id(mut self, id: ApplicationId) -> Self {
        self.application_id = Some(id);
        self
    }

    /// Sets the REST API key (required).
    #[must_use]
    pub fn rest_api_key(mut self, key: RestApiKey) -> Self {
        self.rest_api_key = Some(key);
        self
    }

    /// Sets the JavaScript key.
    #[must_use]
    pub fn javascript_key(mut self, key: SecretKey) -> Self {
        self.javascript_key = Some(key);
        self
    }

    /// Sets the master key.
    #[must_use]
    pub fn master_key(mut self, key: SecretKey) -> Self {
        self.master_key = Some(key);
        self
    }

    /// Builds the [`Credentials`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `application_id` or
    /// `rest_api_key` are not set.
    pub fn build(self) -> Result<Credentials, ConfigError> {
        let application_id = self
            .application_id
            .ok_or(ConfigError::MissingRequiredField {
                field: "application_id",
            })?;
        let rest_api_key = self.rest_api_key.ok_or(ConfigError::MissingRequiredField {
            field: "rest_api_key",
        })?;

        Ok(Credentials {
            application_id,
            rest_api_key,
            javascript_key: self.javascript_key,
            master_key: self.master_key,
        })
    }
}
