//! Accessor for a single collection of objects.
//!
//! This module provides [`ObjectClient`], which performs create, fetch and
//! delete calls against one collection URL through a [`Client`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::clients::{Client, HttpMethod, ParseError, Request};
use crate::rest::types::{Object, ObjectId};

/// Operations on one collection, such as `classes/GameScore/` or `users/`.
///
/// Obtain one with [`Client::objects`] or [`Client::users`]. The base URL
/// always ends in `/`, so an object ID joins as its last path segment.
///
/// # Thread Safety
///
/// `ObjectClient` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use parse_sdk::{Client, ObjectId};
/// use serde_json::{json, Value};
///
/// let scores = client.objects("GameScore")?;
///
/// let created = scores.post(&json!({"score": 1337, "playerName": "Sean Plott"})).await?;
/// let id = created.id.unwrap();
///
/// let score: Value = scores.get(&id).await?;
/// scores.delete(&id).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ObjectClient {
    client: Client,
    base_url: Url,
}

// Verify ObjectClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ObjectClient>();
};

impl ObjectClient {
    /// Creates an accessor for the collection at `base_url`.
    #[must_use]
    pub const fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Returns the collection URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the client calls are made through.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Creates an object from `value` and returns the envelope assigned by
    /// the server.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Internal`] if `value` cannot be encoded or the
    /// response cannot be decoded, [`ParseError::Api`] if the server rejects
    /// the object, and [`ParseError::Network`] if the request fails.
    pub async fn post<T: Serialize + ?Sized>(&self, value: &T) -> Result<Object, ParseError> {
        let request = Request::new(HttpMethod::Post)
            .url(self.base_url.clone())
            .body(value);
        self.client.execute_json(request).await
    }

    /// Fetches the object with the given ID and decodes it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUrl`] if `id` does not form a valid URL,
    /// without sending anything. Otherwise as [`post`](Self::post).
    pub async fn get<T: DeserializeOwned>(&self, id: &ObjectId) -> Result<T, ParseError> {
        let url = self.object_url(id)?;
        tracing::debug!(
            "Fetching object {} from {}",
            id,
            self.client.redactor().apply(self.base_url.as_str())
        );
        self.client
            .execute_json(Request::new(HttpMethod::Get).url(url))
            .await
    }

    /// Deletes the object with the given ID.
    ///
    /// The response body is ignored.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), except that a successful response is never
    /// decoded.
    pub async fn delete(&self, id: &ObjectId) -> Result<(), ParseError> {
        let url = self.object_url(id)?;
        self.client
            .execute(Request::new(HttpMethod::Delete).url(url))
            .await
    }

    fn object_url(&self, id: &ObjectId) -> Result<Url, ParseError> {
        Ok(self.base_url.join(id.as_ref())?)
    }
}
