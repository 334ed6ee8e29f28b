//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use hiroba_shared::protocol::Payload;
use uuid::Uuid;

/// Connection identifier value object.
///
/// Assigned by the server to every accepted socket; unique among live
/// connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a new random ConnectionId (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ConnectionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name value object.
///
/// Any string is accepted, including the empty string. Names are not
/// required to be unique across connections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Build a display name from a raw `join` payload.
    ///
    /// Strings are taken as-is, a missing payload becomes the empty string,
    /// and any other value keeps the JSON text it was sent with.
    pub fn from_payload(payload: &Payload) -> Self {
        if payload.is_null() {
            return Self(String::new());
        }
        match payload.parse::<String>() {
            Ok(name) => Self(name),
            Err(_) => Self(payload.as_str().to_string()),
        }
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
