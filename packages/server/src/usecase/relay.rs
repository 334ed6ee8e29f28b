//! Relay: state owned by the dispatcher.
//!
//! The use cases are implemented as methods on `Relay` in their own modules:
//!
//! - `connect_client`: `on_connect`
//! - `join`: `on_join`
//! - `send_message`: `on_chat_message`
//! - `disconnect_client`: `on_disconnect`
//! - `get_presence`: `snapshot`

use hiroba_shared::protocol::ServerEvent;

use crate::domain::{ConnectionRegistry, MessagePusher};

/// Presence registry plus outbound channels.
///
/// Only the dispatcher task touches a `Relay`, one command at a time.
pub struct Relay<P: MessagePusher> {
    pub(super) registry: ConnectionRegistry,
    pub(super) message_pusher: P,
}

impl<P: MessagePusher> Relay<P> {
    pub fn new(message_pusher: P) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            message_pusher,
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Encode an event and push it to every open connection.
    pub(super) fn broadcast(&self, event: ServerEvent) -> usize {
        match event.encode() {
            Ok(frame) => self.message_pusher.broadcast(&frame),
            Err(e) => {
                tracing::error!("Failed to encode {:?}: {}", event, e);
                0
            }
        }
    }
}
