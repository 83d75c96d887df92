//! The Parse API client.
//!
//! This module provides [`Client`], which turns [`Request`]s into
//! authenticated wire requests, sends them through an [`HttpTransport`], and
//! classifies the responses.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::clients::errors::{
    ApiError, ApiErrorBody, InternalCause, InternalError, NetworkError, ParseError, TransportError,
};
use crate::clients::http_request::{Request, WireRequest};
use crate::clients::http_response::WireResponse;
use crate::clients::redact::Redactor;
use crate::clients::transport::{HttpTransport, ReqwestTransport};
use crate::config::{default_base_url, parse_base_url, Credentials};
use crate::error::ConfigError;
use crate::rest::ObjectClient;

/// Client for the Parse API.
///
/// A `Client` owns the application credentials, a handle to the transport
/// and the redaction flag. Nothing is written after construction, so one
/// client can serve any number of concurrent calls. Cloning is cheap.
///
/// Each call is a single round trip: no retries, no backoff.
///
/// # Example
///
/// ```rust,ignore
/// use parse_sdk::{ApplicationId, Client, Credentials, HttpMethod, Request, RestApiKey};
///
/// let credentials = Credentials::builder()
///     .application_id(ApplicationId::new("app-id").unwrap())
///     .rest_api_key(RestApiKey::new("rest-key").unwrap())
///     .build()
///     .unwrap();
///
/// let client = Client::builder().credentials(credentials).redact(true).build()?;
///
/// let request = Request::new(HttpMethod::Get)
///     .url("https://api.parse.com/1/classes/GameScore".parse()?)
///     .param("limit", "10");
/// let scores: serde_json::Value = client.execute_json(request).await?;
/// ```
#[derive(Clone)]
pub struct Client {
    credentials: Arc<Credentials>,
    http: Arc<dyn HttpTransport>,
    redactor: Arc<Redactor>,
    redact: bool,
    base_url: Url,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a new builder for constructing a `Client`.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client over the given transport, with redaction off and
    /// the default base URL.
    #[must_use]
    pub fn new(credentials: Credentials, transport: impl HttpTransport + 'static) -> Self {
        Self::from_parts(credentials, Arc::new(transport), false, default_base_url())
    }

    fn from_parts(
        credentials: Credentials,
        http: Arc<dyn HttpTransport>,
        redact: bool,
        base_url: Url,
    ) -> Self {
        let redactor = Arc::new(Redactor::new(&credentials, redact));
        Self {
            credentials: Arc::new(credentials),
            http,
            redactor,
            redact,
            base_url,
        }
    }

    /// Returns the credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns `true` if errors are redacted.
    #[must_use]
    pub const fn redact(&self) -> bool {
        self.redact
    }

    /// Returns the base URL used by [`objects`](Self::objects) and
    /// [`users`](Self::users).
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the redactor applied to this client's errors.
    #[must_use]
    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    /// Returns an accessor for the objects of a class, at
    /// `<base>/classes/<class_name>/`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUrl`] if the class name does not form a
    /// valid URL.
    pub fn objects(&self, class_name: &str) -> Result<ObjectClient, ParseError> {
        let url = self.base_url.join(&format!("classes/{class_name}/"))?;
        Ok(ObjectClient::new(self.clone(), url))
    }

    /// Returns an accessor for the built-in users collection, at
    /// `<base>/users/`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUrl`] if the base URL cannot be joined.
    pub fn users(&self) -> Result<ObjectClient, ParseError> {
        let url = self.base_url.join("users/")?;
        Ok(ObjectClient::new(self.clone(), url))
    }

    /// Builds the wire request for `request` with this client's credentials.
    ///
    /// # Errors
    ///
    /// See [`Request::into_wire`].
    pub fn build_request<B: Serialize>(
        &self,
        request: Request<B>,
    ) -> Result<WireRequest, ParseError> {
        request.into_wire(&self.credentials, &self.redactor)
    }

    /// Performs an API call and discards the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the request cannot be built, the transport
    /// fails, or the API responds with a status outside 200-399.
    pub async fn execute<B: Serialize>(&self, request: Request<B>) -> Result<(), ParseError> {
        let wire = self.build_request(request)?;
        self.send_wire(wire).await
    }

    /// Performs an API call and decodes the JSON response body into `T`.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus [`ParseError::Internal`] if a
    /// successful response body does not decode into `T`.
    pub async fn execute_json<B, T>(&self, request: Request<B>) -> Result<T, ParseError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let wire = self.build_request(request)?;
        self.send_wire_json(wire).await
    }

    /// Sends an already built wire request and discards the response body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn send_wire(&self, wire: WireRequest) -> Result<(), ParseError> {
        self.round_trip(wire).await.map(|_| ())
    }

    /// Sends an already built wire request and decodes the response body.
    ///
    /// # Errors
    ///
    /// See [`execute_json`](Self::execute_json).
    pub async fn send_wire_json<T: DeserializeOwned>(
        &self,
        wire: WireRequest,
    ) -> Result<T, ParseError> {
        let (wire, response) = self.round_trip(wire).await?;
        serde_json::from_slice(&response.body).map_err(|err| {
            InternalError::new(wire.url.clone(), InternalCause::Decode(err), &self.redactor)
                .with_request(wire)
                .with_response(response)
                .into()
        })
    }

    /// Sends the request and classifies the response.
    ///
    /// Returns the request and the successful response, or the classified
    /// failure.
    async fn round_trip(
        &self,
        wire: WireRequest,
    ) -> Result<(WireRequest, WireResponse), ParseError> {
        tracing::debug!(
            "Sending {} request to {}",
            wire.method,
            self.redactor.apply(wire.url.as_str())
        );

        let response = match self.http.send(wire.clone()).await {
            Ok(response) => response,
            Err(TransportError::Body { response, source }) => {
                return Err(InternalError::new(
                    wire.url.clone(),
                    InternalCause::BodyRead(source),
                    &self.redactor,
                )
                .with_request(wire)
                .with_response(response)
                .into());
            }
            Err(err) => return Err(NetworkError::new(err, &self.redactor).into()),
        };

        tracing::debug!(
            "Received status {} for {} request",
            response.status,
            wire.method
        );

        if response.is_success() {
            return Ok((wire, response));
        }

        match serde_json::from_slice::<ApiErrorBody>(&response.body) {
            Ok(body) => {
                tracing::warn!(
                    "Parse API rejected {} request with status {} and code {:?}",
                    wire.method,
                    response.status,
                    body.code
                );
                Err(ApiError::new(body, wire, response, &self.redactor).into())
            }
            Err(err) => Err(InternalError::new(
                wire.url.clone(),
                InternalCause::Decode(err),
                &self.redactor,
            )
            .with_request(wire)
            .with_response(response)
            .into()),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.credentials)
            .field("redact", &self.redact)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing [`Client`] instances.
///
/// `credentials` is required. Defaults:
///
/// - transport: [`ReqwestTransport`]
/// - redact: `false`
/// - base URL: [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL)
/// - user agent prefix: none
#[derive(Default)]
pub struct ClientBuilder {
    credentials: Option<Credentials>,
    transport: Option<Arc<dyn HttpTransport>>,
    redact: bool,
    base_url: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ClientBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the transport requests are sent through.
    #[must_use]
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets a shared transport.
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Enables or disables redaction of secret keys from errors.
    #[must_use]
    pub const fn redact(mut self, redact: bool) -> Self {
        self.redact = redact;
        self
    }

    /// Sets the base URL for [`Client::objects`] and [`Client::users`].
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the user agent prefix for the default transport.
    ///
    /// Ignored when a custom transport is set.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`Client`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if credentials are not set.
    /// - [`ConfigError::InvalidBaseUrl`] if the base URL is not usable.
    /// - [`ConfigError::Transport`] if the default transport cannot be created.
    pub fn build(self) -> Result<Client, ConfigError> {
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        let base_url = match self.base_url {
            Some(raw) => parse_base_url(&raw)?,
            None => default_base_url(),
        };

        let http: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => {
                if self.user_agent_prefix.is_some() {
                    tracing::debug!("User agent prefix ignored for a custom transport");
                }
                transport
            }
            None => Arc::new(
                ReqwestTransport::with_user_agent_prefix(self.user_agent_prefix.as_deref())
                    .map_err(|err| ConfigError::Transport {
                        reason: err.to_string(),
                    })?,
            ),
        };

        Ok(Client::from_parts(credentials, http, self.redact, base_url))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("credentials", &self.credentials)
            .field("custom_transport", &self.transport.is_some())
            .field("redact", &self.redact)
            .field("base_url", &self.base_url)
            .field("user_agent_prefix", &self.user_agent_prefix)
            .finish()
    }
}
