//! Domain layer for the relay.
//!
//! This module contains the presence registry and the outbound messaging
//! seam, independent of the WebSocket transport.

pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod value_object;

pub use error::MessagePushError;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use value_object::{ConnectionId, DisplayName};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
