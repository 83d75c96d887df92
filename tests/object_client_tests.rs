//! Integration tests for object access over an in-memory transport.
//!
//! The transport below behaves like a tiny Parse server: it stores posted
//! objects by ID and serves them back, so calls can be checked end to end
//! without a network.

use async_trait::async_trait;
use parse_sdk::{
    ApplicationId, Client, Credentials, HttpMethod, HttpTransport, Object, ObjectId, ParseError,
    RestApiKey, SecretKey, TransportError, User, WireRequest, WireResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

const TIMESTAMP: &str = "2011-08-20T02:06:57.931Z";

/// Stores objects by ID, keyed on the last path segment.
#[derive(Default)]
struct EchoStore {
    objects: Mutex<HashMap<String, Map<String, Value>>>,
    next_id: Mutex<u32>,
}

impl EchoStore {
    fn json(status: u16, value: &Value) -> WireResponse {
        WireResponse::new(status, serde_json::to_vec(value).unwrap())
    }

    fn not_found() -> WireResponse {
        Self::json(404, &json!({"error": "object not found for get", "code": 101}))
    }
}

#[async_trait]
impl HttpTransport for EchoStore {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let last_segment = request
            .url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        let response = match request.method {
            HttpMethod::Post => {
                let body: Map<String, Value> =
                    serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
                let mut next_id = self.next_id.lock().unwrap();
                *next_id += 1;
                let id = format!("obj{next_id}");
                self.objects.lock().unwrap().insert(id.clone(), body);
                Self::json(201, &json!({"objectId": id, "createdAt": TIMESTAMP}))
            }
            HttpMethod::Get => match self.objects.lock().unwrap().get(&last_segment) {
                Some(stored) => {
                    let mut object = stored.clone();
                    object.insert("objectId".to_string(), json!(last_segment));
                    object.insert("createdAt".to_string(), json!(TIMESTAMP));
                    object.insert("updatedAt".to_string(), json!(TIMESTAMP));
                    Self::json(200, &Value::Object(object))
                }
                None => Self::not_found(),
            },
            HttpMethod::Delete => match self.objects.lock().unwrap().remove(&last_segment) {
                Some(_) => WireResponse::new(200, Vec::new()),
                None => Self::not_found(),
            },
            HttpMethod::Put => WireResponse::new(405, Vec::new()),
        };
        Ok(response)
    }
}

fn credentials() -> Credentials {
    Credentials::builder()
        .application_id(ApplicationId::new("app-id").unwrap())
        .rest_api_key(RestApiKey::new("rest-key").unwrap())
        .javascript_key(SecretKey::new("JS-SECRET").unwrap())
        .master_key(SecretKey::new("MASTER-SECRET").unwrap())
        .build()
        .unwrap()
}

fn client(redact: bool) -> Client {
    Client::builder()
        .credentials(credentials())
        .transport(EchoStore::default())
        .redact(redact)
        .build()
        .unwrap()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GameScore {
    #[serde(flatten)]
    object: Object,
    score: i64,
    player_name: String,
}

// ============================================================================
// Round Trips
// ============================================================================

#[tokio::test]
async fn test_post_then_get_round_trip() {
    let scores = client(false).objects("GameScore").unwrap();

    let created = scores
        .post(&json!({"score": 1337, "playerName": "Sean Plott"}))
        .await
        .unwrap();
    let id = created.id.clone().unwrap();
    assert!(created.created_at.is_some());

    let fetched: GameScore = scores.get(&id).await.unwrap();
    assert_eq!(fetched.object.id, Some(id));
    assert!(fetched.object.created_at.is_some());
    assert!(fetched.object.updated_at.is_some());
    assert_eq!(fetched.score, 1337);
    assert_eq!(fetched.player_name, "Sean Plott");
}

#[tokio::test]
async fn test_post_typed_value_skips_empty_envelope() {
    let scores = client(false).objects("GameScore").unwrap();
    let score = GameScore {
        object: Object::default(),
        score: 7,
        player_name: "Alice".to_string(),
    };

    let created = scores.post(&score).await.unwrap();
    let fetched: Value = scores.get(&created.id.unwrap()).await.unwrap();

    assert_eq!(fetched["score"], 7);
    assert_eq!(fetched["playerName"], "Alice");
}

#[tokio::test]
async fn test_users_collection() {
    let users = client(false).users().unwrap();

    let created = users
        .post(&User {
            username: Some("cooldude6".to_string()),
            ..User::default()
        })
        .await
        .unwrap();

    let user: User = users.get(&created.id.unwrap()).await.unwrap();
    assert_eq!(user.username.as_deref(), Some("cooldude6"));
    assert!(user.email.is_none());
}

#[tokio::test]
async fn test_delete_then_get_reports_not_found() {
    let scores = client(false).objects("GameScore").unwrap();
    let created = scores.post(&json!({"score": 1})).await.unwrap();
    let id = created.id.unwrap();

    scores.delete(&id).await.unwrap();

    let result: Result<Value, _> = scores.get(&id).await;
    let err = result.unwrap_err();
    let api = err.as_api_error().unwrap();
    assert_eq!(api.code(), Some(101));
    assert_eq!(api.message(), Some("object not found for get"));
    assert_eq!(api.status(), 404);
}

#[tokio::test]
async fn test_delete_with_empty_success_body() {
    let scores = client(false).objects("GameScore").unwrap();
    let created = scores.post(&json!({"score": 1})).await.unwrap();

    assert!(scores.delete(&created.id.unwrap()).await.is_ok());
}

#[tokio::test]
async fn test_missing_object_error_message() {
    let scores = client(false).objects("GameScore").unwrap();

    let err = scores.delete(&ObjectId::new("abc123")).await.unwrap_err();

    assert!(matches!(err, ParseError::Api(_)));
    assert_eq!(
        err.to_string(),
        "DELETE request for URL https://api.parse.com/1/classes/GameScore/abc123 \
         failed with code 101 and message object not found for get"
    );
}

// ============================================================================
// Redaction
// ============================================================================

/// Echoes the credentials back in an error body.
struct LeakyServer;

#[async_trait]
impl HttpTransport for LeakyServer {
    async fn send(&self, _request: WireRequest) -> Result<WireResponse, TransportError> {
        Ok(WireResponse::new(
            403,
            r#"{"error":"keys JS-SECRET and MASTER-SECRET rejected","code":119}"#,
        ))
    }
}

fn leaky_client(redact: bool) -> Client {
    Client::builder()
        .credentials(credentials())
        .transport(LeakyServer)
        .redact(redact)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_redaction_masks_both_secret_keys() {
    let scores = leaky_client(true).objects("GameScore").unwrap();

    let err = scores.delete(&ObjectId::new("abc123")).await.unwrap_err();
    let rendered = err.to_string();

    assert!(!rendered.contains("JS-SECRET"));
    assert!(!rendered.contains("MASTER-SECRET"));
    assert!(rendered.contains("-- REDACTED JAVASCRIPT KEY --"));
    assert!(rendered.contains("-- REDACTED MASTER KEY --"));
}

#[tokio::test]
async fn test_without_redaction_keys_are_rendered() {
    let scores = leaky_client(false).objects("GameScore").unwrap();

    let err = scores.delete(&ObjectId::new("abc123")).await.unwrap_err();
    let rendered = err.to_string();

    assert!(rendered.contains("JS-SECRET"));
    assert!(rendered.contains("MASTER-SECRET"));
    assert!(!rendered.contains("REDACTED"));
}

#[tokio::test]
async fn test_redaction_leaves_accessors_untouched() {
    let scores = leaky_client(true).objects("GameScore").unwrap();

    let err = scores.delete(&ObjectId::new("abc123")).await.unwrap_err();
    let api = err.as_api_error().unwrap();

    // Only the rendered text is masked.
    assert_eq!(
        api.message(),
        Some("keys JS-SECRET and MASTER-SECRET rejected")
    );
}

/// Fails the way a broken connection does, mentioning a secret key.
enum FailingServer {
    Connect,
    BodyRead,
}

#[async_trait]
impl HttpTransport for FailingServer {
    async fn send(&self, _request: WireRequest) -> Result<WireResponse, TransportError> {
        Err(match self {
            Self::Connect => TransportError::request("dial failed for key MASTER-SECRET"),
            Self::BodyRead => TransportError::Body {
                response: WireResponse::new(200, Vec::new()),
                source: "reset near JS-SECRET".into(),
            },
        })
    }
}

/// Collects the rendered error and every rendered source below it.
fn error_chain(err: &ParseError) -> Vec<String> {
    let mut links = vec![err.to_string()];
    let mut next = std::error::Error::source(err);
    while let Some(source) = next {
        links.push(source.to_string());
        next = source.source();
    }
    links
}

#[tokio::test]
async fn test_redaction_covers_source_chain_and_debug() {
    for (server, secret) in [
        (FailingServer::Connect, "MASTER-SECRET"),
        (FailingServer::BodyRead, "JS-SECRET"),
    ] {
        let client = Client::builder()
            .credentials(credentials())
            .transport(server)
            .redact(true)
            .build()
            .unwrap();
        let scores = client.objects("GameScore").unwrap();

        let err = scores.delete(&ObjectId::new("abc123")).await.unwrap_err();

        for link in error_chain(&err) {
            assert!(!link.contains(secret), "leaked in chain: {link}");
        }
        let debug = format!("{err:?}");
        assert!(!debug.contains(secret), "leaked in debug: {debug}");
        assert!(debug.contains("REDACTED"));
    }
}

#[tokio::test]
async fn test_unredacted_network_error_keeps_source_chain() {
    let client = Client::builder()
        .credentials(credentials())
        .transport(FailingServer::Connect)
        .build()
        .unwrap();
    let scores = client.objects("GameScore").unwrap();

    let err = scores.delete(&ObjectId::new("abc123")).await.unwrap_err();

    let links = error_chain(&err);
    assert!(links.len() > 1);
    assert!(links[1].contains("MASTER-SECRET"));
}
