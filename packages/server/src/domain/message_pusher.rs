//! MessagePusher trait 定義
//!
//! 接続中のクライアントへフレームを送る仕組みの抽象化です。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! Relay の dispatcher だけが呼び出すため、メソッドは同期的で、
//! 登録・解除は `&mut self` を取ります。

use tokio::sync::mpsc;

use super::ConnectionId;

/// Outbound channel of one connection; the connection's writer task drains it.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Outbound messaging seam used by the relay
#[cfg_attr(test, mockall::automock)]
pub trait MessagePusher: Send {
    /// Make a connection eligible to receive broadcasts
    fn register_client(&mut self, connection_id: ConnectionId, sender: PusherChannel);

    /// Stop sending to a connection
    fn unregister_client(&mut self, connection_id: &ConnectionId);

    /// Send `content` to every registered connection (fire-and-forget).
    ///
    /// # Returns
    ///
    /// The number of connections the frame was handed to.
    fn broadcast(&self, content: &str) -> usize;

    /// Number of registered connections
    fn client_count(&self) -> usize;
}
