//! User credential record
//!
//! Users are created once at registration and never returned over HTTP;
//! the record stores only what login needs. Plaintext passwords never
//! reach this type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granted to a user at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// A stored user record (collection `users`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique login identifier; uniqueness is enforced by the store
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Build a new record with a generated id and the default `USER` role
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash,
            role: Role::default(),
        }
    }
}
