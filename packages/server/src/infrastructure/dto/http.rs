//! HTTP API response DTOs.

use serde::Serialize;

use crate::usecase::PresenceSnapshot;

/// Response of `GET /api/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceDto {
    /// Display names of joined connections, in join order
    pub users: Vec<String>,
    /// Open connections, joined or not
    pub connections: usize,
}

impl From<PresenceSnapshot> for PresenceDto {
    fn from(snapshot: PresenceSnapshot) -> Self {
        Self {
            users: snapshot.users,
            connections: snapshot.connections,
        }
    }
}
