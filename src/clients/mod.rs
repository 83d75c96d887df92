//! HTTP client types for Parse API communication.
//!
//! This module provides the layer every API call goes through. It turns a
//! [`Request`] into an authenticated [`WireRequest`], sends it through an
//! [`HttpTransport`], and classifies the [`WireResponse`].
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Client`]: Holds credentials and a transport, performs calls
//! - [`Request`]: Method, URL, query parameters and an optional JSON body
//! - [`WireRequest`] / [`WireResponse`]: What actually crosses the transport
//! - [`HttpTransport`]: The one-method HTTP capability, with [`ReqwestTransport`] as default
//! - [`ParseError`]: API, internal and network failures
//! - [`Redactor`]: Masks secret keys in rendered errors
//!
//! # Example
//!
//! ```rust,ignore
//! use parse_sdk::{Client, HttpMethod, Request};
//!
//! let request = Request::new(HttpMethod::Get)
//!     .url("https://api.parse.com/1/classes/GameScore".parse()?)
//!     .param("where", r#"{"playerName":"Sean Plott"}"#);
//!
//! let scores: serde_json::Value = client.execute_json(request).await?;
//! ```
//!
//! # Status Classification
//!
//! - **200-399**: Success. The body is decoded only when a result is wanted.
//! - **Anything else**: The body is decoded as `{"error", "code"}` into an
//!   [`ApiError`]. A body that does not decode yields an [`InternalError`].
//!
//! Each call makes exactly one attempt.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod redact;
mod transport;

pub use errors::{
    ApiError, BoxError, InternalCause, InternalError, NetworkError, ParseError, TransportError,
};
pub use http_client::{Client, ClientBuilder};
pub use http_request::{
    encode_params, HttpMethod, Request, WireRequest, APPLICATION_ID_HEADER, REST_API_KEY_HEADER,
};
pub use http_response::WireResponse;
pub use redact::{Redactor, REDACTED_JAVASCRIPT_KEY, REDACTED_MASTER_KEY};
pub use transport::{user_agent, HttpTransport, ReqwestTransport, SDK_VERSION};
