//! The HTTP capability the client sends requests through.
//!
//! [`HttpTransport`] has a single operation. Any implementation works: the
//! bundled [`ReqwestTransport`], a test stub, or a record/replay layer.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, WireRequest};
use crate::clients::http_response::WireResponse;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends a wire request and returns the buffered response.
///
/// Implementations must return `Ok` for every response that arrives,
/// whatever its status; classification is the client's job. A response
/// whose body cannot be read is reported as [`TransportError::Body`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the response.
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

/// The default transport, backed by [`reqwest`] with rustls.
///
/// The full body is read into memory before returning, so the underlying
/// connection is released on every path.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be created (for
    /// example, TLS initialization failure).
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_user_agent_prefix(None)
    }

    /// Creates a transport whose user agent starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be created.
    pub fn with_user_agent_prefix(prefix: Option<&str>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent(prefix))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Builds the `User-Agent` header value.
#[must_use]
pub fn user_agent(prefix: Option<&str>) -> String {
    let prefix = prefix.map_or(String::new(), |prefix| format!("{prefix} | "));
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    format!("{prefix}Parse API Library v{SDK_VERSION} | Rust {rust_version}")
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        // A buffered body lets reqwest declare Content-Length instead of
        // falling back to chunked encoding.
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = builder.send().await?;
        let status = res.status().as_u16();
        let headers = parse_response_headers(res.headers());

        match res.bytes().await {
            Ok(body) => Ok(WireResponse {
                status,
                headers,
                body: body.to_vec(),
            }),
            Err(err) => Err(TransportError::Body {
                response: WireResponse {
                    status,
                    headers,
                    body: Vec::new(),
                },
                source: Box::new(err),
            }),
        }
    }
}

/// Parses response headers into a `HashMap`.
fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
