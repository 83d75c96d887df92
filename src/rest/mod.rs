//! Typed access to Parse objects.
//!
//! This module provides:
//!
//! - **[`ObjectClient`]**: Create, fetch and delete calls against one collection
//! - **[`Object`]** and **[`User`]**: The envelopes returned by the API
//! - **[`AuthData`]**: Third-party identities linked to a user
//! - **[`Acl`]**: Per-object access control lists
//!
//! # Example
//!
//! ```rust,ignore
//! use parse_sdk::{ObjectId, User};
//!
//! let users = client.users()?;
//! let user: User = users.get(&ObjectId::new("g7y9tkhB7O")).await?;
//! println!("{:?}", user.username);
//! ```

mod acl;
mod object_client;
mod types;

pub use acl::{Acl, Permissions, PUBLIC_PERMISSION_KEY};
pub use object_client::ObjectClient;
pub use types::{
    AnonymousAuth, AuthData, FacebookAuth, Object, ObjectId, RoleName, TwitterAuth, User,
};
