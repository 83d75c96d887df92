//! # Parse API Rust SDK
//!
//! A server-side Rust SDK for the Parse REST API, providing validated
//! credentials, an async HTTP client and typed object access.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Validated newtypes for application credentials via [`Credentials`]
//! - A [`Request`] builder carrying method, URL, query parameters and a JSON body
//! - An async [`Client`] that authenticates, sends and classifies each call
//! - A pluggable [`HttpTransport`] with a reqwest-backed default
//! - Typed [`ParseError`]s with optional redaction of secret keys
//! - [`ObjectClient`] for create, fetch and delete on a collection
//! - [`Object`], [`User`] and [`Acl`] data types
//!
//! ## Quick Start
//!
//! ```rust
//! use parse_sdk::{ApplicationId, Credentials, RestApiKey, SecretKey};
//!
//! let credentials = Credentials::builder()
//!     .application_id(ApplicationId::new("your-app-id").unwrap())
//!     .rest_api_key(RestApiKey::new("your-rest-key").unwrap())
//!     .master_key(SecretKey::new("your-master-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(credentials.application_id().as_ref(), "your-app-id");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use parse_sdk::{Client, ObjectId};
//! use serde_json::json;
//!
//! let client = Client::builder()
//!     .credentials(credentials)
//!     .redact(true)
//!     .build()?;
//!
//! let scores = client.objects("GameScore")?;
//! let created = scores.post(&json!({"score": 1337})).await?;
//! scores.delete(&created.id.unwrap()).await?;
//! ```
//!
//! ## Building Requests Directly
//!
//! ```rust
//! use parse_sdk::{HttpMethod, Request};
//!
//! let request = Request::new(HttpMethod::Get)
//!     .url("https://api.parse.com/1/classes/GameScore".parse().unwrap())
//!     .param("limit", "10");
//!
//! assert_eq!(request.method, HttpMethod::Get);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Credentials and transport are passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **One attempt per call**: No retries, no hidden backoff

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    ApplicationId, Credentials, CredentialsBuilder, RestApiKey, SecretKey, DEFAULT_BASE_URL,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, Client, ClientBuilder, HttpMethod, HttpTransport, InternalCause, InternalError,
    NetworkError, ParseError, Redactor, Request, ReqwestTransport, TransportError, WireRequest,
    WireResponse,
};

// Re-export object types
pub use rest::{
    Acl, AnonymousAuth, AuthData, FacebookAuth, Object, ObjectClient, ObjectId, Permissions,
    RoleName, TwitterAuth, User, PUBLIC_PERMISSION_KEY,
};
