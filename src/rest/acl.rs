//! Access control lists.
//!
//! An [`Acl`] maps a scope key to a pair of [`Permissions`]. A scope key is
//! the public wildcard [`PUBLIC_PERMISSION_KEY`], a user's object ID, or a
//! role name prefixed with `role:`.
//!
//! `Acl` dereferences to its map, so entries are added and removed with the
//! usual `HashMap` methods.
//!
//! # Example
//!
//! ```rust
//! use parse_sdk::{Acl, Permissions, RoleName, PUBLIC_PERMISSION_KEY};
//!
//! let mut acl = Acl::new();
//! acl.insert(PUBLIC_PERMISSION_KEY.to_string(), Permissions::read_only());
//! acl.insert(Acl::role_key(&RoleName::new("Moderators")), Permissions::read_write());
//!
//! assert_eq!(acl.public(), Some(&Permissions::read_only()));
//! assert!(acl.for_role_name(&RoleName::new("Moderators")).unwrap().write);
//! ```

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::rest::types::{ObjectId, RoleName};

/// The key used by the API to represent public permissions.
pub const PUBLIC_PERMISSION_KEY: &str = "*";

const ROLE_PREFIX: &str = "role:";

/// Read and write permissions for one scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// Whether the scope may read.
    #[serde(default, skip_serializing_if = "is_false")]
    pub read: bool,

    /// Whether the scope may write.
    #[serde(default, skip_serializing_if = "is_false")]
    pub write: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl Permissions {
    /// Read access only.
    #[must_use]
    pub const fn read_only() -> Self {
        Self {
            read: true,
            write: false,
        }
    }

    /// Read and write access.
    #[must_use]
    pub const fn read_write() -> Self {
        Self {
            read: true,
            write: true,
        }
    }
}

/// An access control list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Acl(HashMap<String, Permissions>);

impl Acl {
    /// Creates an empty ACL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope key for a role.
    #[must_use]
    pub fn role_key(role_name: &RoleName) -> String {
        format!("{ROLE_PREFIX}{role_name}")
    }

    /// Permissions for the public.
    #[must_use]
    pub fn public(&self) -> Option<&Permissions> {
        self.0.get(PUBLIC_PERMISSION_KEY)
    }

    /// Permissions for a specific user, if explicitly set.
    #[must_use]
    pub fn for_user_id(&self, user_id: &ObjectId) -> Option<&Permissions> {
        self.0.get(user_id.as_ref())
    }

    /// Permissions for a specific role, if explicitly set.
    #[must_use]
    pub fn for_role_name(&self, role_name: &RoleName) -> Option<&Permissions> {
        self.0.get(&Self::role_key(role_name))
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn into_inner(self) -> HashMap<String, Permissions> {
        self.0
    }
}

impl Deref for Acl {
    type Target = HashMap<String, Permissions>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Acl {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<HashMap<String, Permissions>> for Acl {
    fn from(map: HashMap<String, Permissions>) -> Self {
        Self(map)
    }
}
