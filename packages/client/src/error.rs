//! Error types for the CLI client.

use hiroba_shared::protocol::ProtocolError;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not open the WebSocket
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The connection dropped while the session was running
    #[error("Connection lost")]
    ConnectionLost,

    /// An event could not be encoded
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Reconnection gave up
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}
