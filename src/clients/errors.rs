//! Request-time error types for the Parse SDK.
//!
//! # Error Handling
//!
//! - [`ApiError`]: the API answered with a status outside 200-399 and a
//!   well-formed error body
//! - [`InternalError`]: a local failure to build, send, or interpret a
//!   request, with whatever URL/request/response context was available
//! - [`NetworkError`]: the transport failed before any response arrived
//! - [`ParseError`]: unified error type encompassing all of the above
//!
//! Every error built by a [`Client`](crate::Client) carries that client's
//! [`Redactor`]. When redaction is enabled, neither the rendered message,
//! the `Debug` output nor the [`source`](StdError::source) chain contains
//! the JavaScript key or the master key.
//!
//! # Example
//!
//! ```rust,ignore
//! use parse_sdk::ParseError;
//!
//! match scores.delete(&id).await {
//!     Ok(()) => println!("deleted"),
//!     Err(ParseError::Api(e)) => {
//!         println!("API error {:?}: {:?}", e.code(), e.message());
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use std::error::Error as StdError;
use std::fmt::{self, Write};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::clients::http_request::WireRequest;
use crate::clients::http_response::WireResponse;
use crate::clients::redact::Redactor;

/// Boxed error used by transports.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Error returned by an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("{0}")]
    Request(#[source] BoxError),

    /// A response arrived but its body could not be read.
    #[error("failed to read response body: {source}")]
    Body {
        /// The response, with an empty body.
        response: WireResponse,
        /// The underlying read failure.
        #[source]
        source: BoxError,
    },
}

impl TransportError {
    /// Wraps any error as a request failure.
    pub fn request(err: impl Into<BoxError>) -> Self {
        Self::Request(err.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(Box::new(err))
    }
}

/// An error reported by the Parse API.
///
/// `message` and `code` come from the JSON error body and may be absent.
/// The originating request and response are always available for
/// diagnostics.
///
/// Renders as
/// `<METHOD> request for URL <url> failed with [code <n> | http status <status>] and [message <msg> | body <body> | no body]`.
pub struct ApiError {
    message: Option<String>,
    code: Option<i64>,
    request: WireRequest,
    response: WireResponse,
    redactor: Arc<Redactor>,
}

/// The JSON shape of a Parse error body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default, rename = "error")]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl ApiError {
    pub(crate) fn new(
        body: ApiErrorBody,
        request: WireRequest,
        response: WireResponse,
        redactor: &Arc<Redactor>,
    ) -> Self {
        Self {
            message: body.message.filter(|message| !message.is_empty()),
            code: body.code.filter(|code| *code != 0),
            request,
            response,
            redactor: Arc::clone(redactor),
        }
    }

    /// The error message provided by the API.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The Parse error code provided by the API.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        self.code
    }

    /// The HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.response.status
    }

    /// The request that failed.
    #[must_use]
    pub const fn request(&self) -> &WireRequest {
        &self.request
    }

    /// The response the API returned.
    #[must_use]
    pub const fn response(&self) -> &WireResponse {
        &self.response
    }

    fn render(&self) -> String {
        let mut buf = format!(
            "{} request for URL {} failed with",
            self.request.method, self.request.url
        );

        match self.code {
            Some(code) => {
                let _ = write!(buf, " code {code}");
            }
            None => {
                let _ = write!(buf, " http status {}", self.response.status_line());
            }
        }

        buf.push_str(" and");
        match &self.message {
            Some(message) => {
                let _ = write!(buf, " message {message}");
            }
            None => push_body(&mut buf, &self.response),
        }
        buf
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redactor.apply(&self.render()))
    }
}

impl StdError for ApiError {}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiError")
            .field("message", &self.message.as_deref().map(|m| self.redactor.apply(m)))
            .field("code", &self.code)
            .field("status", &self.response.status)
            .field("method", &self.request.method)
            .field("url", &self.redactor.apply(self.request.url.as_str()))
            .field("body", &self.redactor.apply(&self.response.body_text()))
            .finish_non_exhaustive()
    }
}

/// The local failure behind an [`InternalError`].
#[derive(Debug, Error)]
pub enum InternalCause {
    /// The target URL already had a query string.
    #[error("URL cannot include query, use params instead")]
    UrlHasQuery,

    /// The request body could not be JSON encoded.
    #[error("{0}")]
    Encode(#[source] serde_json::Error),

    /// A response body could not be JSON decoded.
    #[error("{0}")]
    Decode(#[source] serde_json::Error),

    /// A response body could not be read.
    #[error("{0}")]
    BodyRead(#[source] BoxError),
}

/// A local failure while processing a request.
///
/// Holds the URL, and the wire request and response when they were
/// available at the point of failure.
///
/// Renders as
/// `[<METHOD> ]request for URL <url> failed with error <cause>[ http status <status> (<code>) and [body <body> | no body]]`.
///
/// With redaction enabled, [`source`](StdError::source) returns `None` so
/// the unredacted cause is only reachable through [`cause`](Self::cause).
pub struct InternalError {
    url: Url,
    request: Option<WireRequest>,
    response: Option<WireResponse>,
    cause: InternalCause,
    redactor: Arc<Redactor>,
}

impl InternalError {
    pub(crate) fn new(url: Url, cause: InternalCause, redactor: &Arc<Redactor>) -> Self {
        Self {
            url,
            request: None,
            response: None,
            cause,
            redactor: Arc::clone(redactor),
        }
    }

    pub(crate) fn with_request(mut self, request: WireRequest) -> Self {
        self.request = Some(request);
        self
    }

    pub(crate) fn with_response(mut self, response: WireResponse) -> Self {
        self.response = Some(response);
        self
    }

    /// The URL the request targeted.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// The wire request, if it was built.
    #[must_use]
    pub const fn request(&self) -> Option<&WireRequest> {
        self.request.as_ref()
    }

    /// The response, if one was received.
    #[must_use]
    pub const fn response(&self) -> Option<&WireResponse> {
        self.response.as_ref()
    }

    /// The underlying local failure.
    #[must_use]
    pub const fn cause(&self) -> &InternalCause {
        &self.cause
    }

    fn render(&self) -> String {
        let mut buf = match &self.request {
            Some(request) => format!("{} request for URL {}", request.method, request.url),
            None => format!("request for URL {}", self.url),
        };

        let _ = write!(buf, " failed with error {}", self.cause);

        if let Some(response) = &self.response {
            let _ = write!(
                buf,
                " http status {} ({}) and",
                response.status_line(),
                response.status
            );
            push_body(&mut buf, response);
        }
        buf
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redactor.apply(&self.render()))
    }
}

impl StdError for InternalError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        if self.redactor.is_enabled() {
            return None;
        }
        Some(&self.cause)
    }
}

impl fmt::Debug for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternalError")
            .field("url", &self.redactor.apply(self.url.as_str()))
            .field("cause", &self.redactor.apply(&self.cause.to_string()))
            .field("status", &self.response.as_ref().map(|response| response.status))
            .field(
                "body",
                &self
                    .response
                    .as_ref()
                    .map(|response| self.redactor.apply(&response.body_text())),
            )
            .finish_non_exhaustive()
    }
}

/// A transport failure, rendered through the client's redactor.
///
/// With redaction enabled, [`source`](StdError::source) returns `None` so
/// the unredacted failure is only reachable through
/// [`transport_error`](Self::transport_error).
pub struct NetworkError {
    source: TransportError,
    redactor: Arc<Redactor>,
}

impl NetworkError {
    pub(crate) fn new(source: TransportError, redactor: &Arc<Redactor>) -> Self {
        Self {
            source,
            redactor: Arc::clone(redactor),
        }
    }

    /// The transport failure.
    #[must_use]
    pub const fn transport_error(&self) -> &TransportError {
        &self.source
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redactor.apply(&self.source.to_string()))
    }
}

impl StdError for NetworkError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        if self.redactor.is_enabled() {
            return None;
        }
        Some(&self.source)
    }
}

impl fmt::Debug for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkError")
            .field("error", &self.redactor.apply(&self.source.to_string()))
            .finish_non_exhaustive()
    }
}

/// Unified error type for all Parse SDK operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The request had no target URL.
    #[error("no URL provided")]
    MissingUrl,

    /// An object ID did not resolve against the accessor's base URL.
    #[error("invalid object URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The Parse API rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A local failure while building or interpreting a request.
    #[error(transparent)]
    Internal(#[from] InternalError),

    /// The transport failed.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl ParseError {
    /// Returns the API error, if the API rejected the request.
    #[must_use]
    pub const fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status of the captured response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status()),
            Self::Internal(err) => err.response().map(|response| response.status),
            _ => None,
        }
    }
}

fn push_body(buf: &mut String, response: &WireResponse) {
    if response.body.is_empty() {
        buf.push_str(" no body");
    } else {
        let _ = write!(buf, " body {}", response.body_text());
    }
}
