//! UseCase: クライアント接続処理
//!
//! 接続しただけではレジストリは変化しません。ブロードキャストの
//! 宛先として登録されるだけです。

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

use super::Relay;

impl<P: MessagePusher> Relay<P> {
    /// Register a new connection as a broadcast recipient
    pub fn on_connect(&mut self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher.register_client(connection_id, sender);
        tracing::debug!(
            "Connection '{}' is eligible for broadcasts ({} open)",
            connection_id,
            self.message_pusher.client_count()
        );
    }
}
