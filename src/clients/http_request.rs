//! Request types for the Parse SDK.
//!
//! A [`Request`] is the logical, caller-built description of an API call. It
//! is turned into a [`WireRequest`] (the fully authenticated HTTP request
//! handed to a transport) by [`Request::into_wire`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::clients::errors::{InternalCause, InternalError, ParseError};
use crate::clients::redact::Redactor;
use crate::config::Credentials;

/// Header carrying the application ID.
pub const APPLICATION_ID_HEADER: &str = "X-Parse-Application-Id";

/// Header carrying the REST API key.
pub const REST_API_KEY_HEADER: &str = "X-Parse-REST-API-Key";

/// HTTP methods used by the Parse API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical request against the Parse API.
///
/// The target URL must not carry a query string: query parameters go in
/// `params` and are merged into the URL exactly once when the request is
/// built. The body, if any, is JSON encoded.
///
/// # Example
///
/// ```rust
/// use parse_sdk::{HttpMethod, Request};
/// use serde_json::json;
///
/// let url = "https://api.parse.com/1/classes/GameScore".parse().unwrap();
/// let request = Request::new(HttpMethod::Post)
///     .url(url)
///     .param("where", r#"{"score":1}"#)
///     .body(json!({"score": 1337}));
///
/// assert_eq!(request.params.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Request<B = ()> {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The target URL, without a query string.
    pub url: Option<Url>,
    /// Query parameters, in caller order.
    pub params: Vec<(String, String)>,
    /// The value to JSON encode as the request body.
    pub body: Option<B>,
}

impl Request {
    /// Creates a bodyless request with no URL set.
    #[must_use]
    pub const fn new(method: HttpMethod) -> Self {
        Self {
            method,
            url: None,
            params: Vec::new(),
            body: None,
        }
    }
}

impl<B> Request<B> {
    /// Sets the target URL.
    #[must_use]
    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters.
    #[must_use]
    pub fn params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the request body, replacing the body type.
    #[must_use]
    pub fn body<T: Serialize>(self, body: T) -> Request<T> {
        Request {
            method: self.method,
            url: self.url,
            params: self.params,
            body: Some(body),
        }
    }
}

impl<B: Serialize> Request<B> {
    /// Builds the authenticated wire request for the given credentials.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingUrl`] if no URL was set.
    /// - [`ParseError::Internal`] if the URL already has a query string, or
    ///   the body cannot be JSON encoded. No network call is made in either
    ///   case.
    pub fn into_wire(
        self,
        credentials: &Credentials,
        redactor: &Arc<Redactor>,
    ) -> Result<WireRequest, ParseError> {
        let mut url = self.url.ok_or(ParseError::MissingUrl)?;

        if url.query().is_some_and(|query| !query.is_empty()) {
            return Err(InternalError::new(url, InternalCause::UrlHasQuery, redactor).into());
        }

        if self.params.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&encode_params(&self.params)));
        }

        let mut headers = HashMap::new();
        headers.insert(
            APPLICATION_ID_HEADER.to_string(),
            credentials.application_id().as_ref().to_string(),
        );
        headers.insert(
            REST_API_KEY_HEADER.to_string(),
            credentials.rest_api_key().as_ref().to_string(),
        );

        let mut request = WireRequest {
            method: self.method,
            url,
            headers,
            body: None,
        };

        // The API requires an explicit Content-Length, so the body is buffered.
        if let Some(body) = &self.body {
            match serde_json::to_vec(body) {
                Ok(bytes) => {
                    request
                        .headers
                        .insert("Content-Type".to_string(), "application/json".to_string());
                    request.body = Some(bytes);
                }
                Err(err) => {
                    return Err(InternalError::new(
                        request.url.clone(),
                        InternalCause::Encode(err),
                        redactor,
                    )
                    .with_request(request)
                    .into());
                }
            }
        }

        Ok(request)
    }
}

/// Encodes query parameters as `application/x-www-form-urlencoded`.
///
/// Parameters are stably sorted by key; values sharing a key keep the order
/// they were given in.
#[must_use]
pub fn encode_params(params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in sorted {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// A fully built, authenticated HTTP request ready for a transport.
#[derive(Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL, including the encoded query string.
    pub url: Url,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// The encoded JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl WireRequest {
    /// Returns the declared body length, if a body is present.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.body.as_ref().map(|body| body.len() as u64)
    }

    /// Returns a header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

// Header values hold credentials, so only names are printed.
impl fmt::Debug for WireRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("WireRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &names)
            .field("content_length", &self.content_length())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApplicationId, RestApiKey, SecretKey};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn credentials() -> Credentials {
        Credentials::builder()
            .application_id(ApplicationId::new("app-id").unwrap())
            .rest_api_key(RestApiKey::new("rest-key").unwrap())
            .master_key(SecretKey::new("master-key").unwrap())
            .build()
            .unwrap()
    }

    fn redactor() -> Arc<Redactor> {
        Arc::new(Redactor::disabled())
    }

    fn url(raw: &str) -> Url {
        raw.parse().unwrap()
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let result = Request::new(HttpMethod::Get).into_wire(&credentials(), &redactor());
        assert!(matches!(result, Err(ParseError::MissingUrl)));
    }

    #[test]
    fn test_url_with_query_is_rejected() {
        let result = Request::new(HttpMethod::Get)
            .url(url("https://api.parse.com/1/classes/A?limit=1"))
            .into_wire(&credentials(), &redactor());

        match result {
            Err(ParseError::Internal(err)) => {
                assert!(matches!(err.cause(), InternalCause::UrlHasQuery));
                assert!(err.request().is_none());
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_query_marker_is_not_a_query() {
        let wire = Request::new(HttpMethod::Get)
            .url(url("https://api.parse.com/1/classes/A?"))
            .into_wire(&credentials(), &redactor())
            .unwrap();
        assert_eq!(wire.url.as_str(), "https://api.parse.com/1/classes/A");
    }

    #[test]
    fn test_params_are_encoded_once() {
        let wire = Request::new(HttpMethod::Get)
            .url(url("https://api.parse.com/1/classes/A"))
            .param("where", r#"{"name":"a b"}"#)
            .param("limit", "10")
            .into_wire(&credentials(), &redactor())
            .unwrap();

        assert_eq!(
            wire.url.query(),
            Some("limit=10&where=%7B%22name%22%3A%22a+b%22%7D")
        );
    }

    #[test]
    fn test_encode_params_keeps_order_within_key() {
        let params = vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "first".to_string()),
            ("a".to_string(), "second".to_string()),
        ];
        assert_eq!(encode_params(&params), "a=first&a=second&b=2");
    }

    #[test]
    fn test_identity_headers_are_attached() {
        let wire = Request::new(HttpMethod::Delete)
            .url(url("https://api.parse.com/1/classes/A/x"))
            .into_wire(&credentials(), &redactor())
            .unwrap();

        assert_eq!(wire.headers.len(), 2);
        assert_eq!(wire.header(APPLICATION_ID_HEADER), Some("app-id"));
        assert_eq!(wire.header(REST_API_KEY_HEADER), Some("rest-key"));
        assert!(wire.body.is_none());
        assert!(wire.content_length().is_none());
    }

    #[test]
    fn test_master_key_is_not_sent() {
        let wire = Request::new(HttpMethod::Get)
            .url(url("https://api.parse.com/1/classes/A"))
            .into_wire(&credentials(), &redactor())
            .unwrap();
        assert!(wire.headers.values().all(|value| value != "master-key"));
    }

    #[test]
    fn test_body_is_json_encoded_with_length() {
        let wire = Request::new(HttpMethod::Post)
            .url(url("https://api.parse.com/1/classes/A"))
            .body(json!({"score": 1337}))
            .into_wire(&credentials(), &redactor())
            .unwrap();

        let body = wire.body.as_deref().unwrap();
        assert_eq!(body, br#"{"score":1337}"#);
        assert_eq!(wire.content_length(), Some(14));
        assert_eq!(wire.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_unencodable_body_keeps_partial_request() {
        let mut body = BTreeMap::new();
        body.insert(vec![1_u8, 2], "value");

        let result = Request::new(HttpMethod::Post)
            .url(url("https://api.parse.com/1/classes/A"))
            .body(body)
            .into_wire(&credentials(), &redactor());

        match result {
            Err(ParseError::Internal(err)) => {
                assert!(matches!(err.cause(), InternalCause::Encode(_)));
                let request = err.request().unwrap();
                assert_eq!(request.method, HttpMethod::Post);
                assert!(request.body.is_none());
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_header_values() {
        let wire = Request::new(HttpMethod::Get)
            .url(url("https://api.parse.com/1/classes/A"))
            .into_wire(&credentials(), &redactor())
            .unwrap();
        let debug = format!("{wire:?}");
        assert!(debug.contains(REST_API_KEY_HEADER));
        assert!(!debug.contains("rest-key"));
    }
}
