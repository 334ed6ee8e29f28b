//! UseCase: 在室状況の取得

use crate::domain::MessagePusher;

use super::Relay;

/// Point-in-time view of the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceSnapshot {
    /// Display names of joined connections, in join order
    pub users: Vec<String>,
    /// Open connections, joined or not
    pub connections: usize,
}

impl<P: MessagePusher> Relay<P> {
    pub fn snapshot(&self) -> PresenceSnapshot {
        PresenceSnapshot {
            users: self.registry.display_names(),
            connections: self.message_pusher.client_count(),
        }
    }
}
