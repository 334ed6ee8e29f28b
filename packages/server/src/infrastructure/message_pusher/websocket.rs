//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - 全クライアントへのブロードキャスト
//!
//! ## 設計ノート
//!
//! WebSocket の生成と writer タスクは UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は writer タスクにつながる sender を受け取り、フレームの送信だけを担当します。

use std::collections::HashMap;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// dispatcher が所有するため、ロックを持ちません。
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: ConnectionId, Value: その接続の writer タスクへの sender
    clients: HashMap<ConnectionId, PusherChannel>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        connection_id: &ConnectionId,
        sender: &PusherChannel,
        content: &str,
    ) -> Result<(), MessagePushError> {
        sender
            .send(content.to_string())
            .map_err(|_| MessagePushError::ChannelClosed(*connection_id))
    }
}

impl MessagePusher for WebSocketMessagePusher {
    fn register_client(&mut self, connection_id: ConnectionId, sender: PusherChannel) {
        self.clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    fn unregister_client(&mut self, connection_id: &ConnectionId) {
        if self.clients.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    fn broadcast(&self, content: &str) -> usize {
        let mut delivered = 0;

        for (connection_id, sender) in &self.clients {
            // ブロードキャストでは一部の送信失敗を許容
            match Self::push(connection_id, sender, content) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to push message: {}", e),
            }
        }

        tracing::debug!(
            "Broadcasted message to {}/{} connections",
            delivered,
            self.clients.len()
        );
        delivered
    }

    fn client_count(&self) -> usize {
        self.clients.len()
    }
}
