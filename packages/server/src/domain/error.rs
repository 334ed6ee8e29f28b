//! Domain layer error definitions.

use thiserror::Error;

use super::ConnectionId;

/// Errors raised while pushing a frame to a connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// The connection's writer has gone away
    #[error("channel to connection '{0}' is closed")]
    ChannelClosed(ConnectionId),
}
