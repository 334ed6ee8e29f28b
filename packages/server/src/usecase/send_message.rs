//! UseCase: チャットメッセージ送信処理
//!
//! ペイロードは検証も保存もせず、そのまま全接続へ中継します。
//! join していない接続からのメッセージも中継されます。

use hiroba_shared::protocol::{Payload, ServerEvent};

use crate::domain::{ConnectionId, MessagePusher};

use super::Relay;

impl<P: MessagePusher> Relay<P> {
    /// Broadcast a chat payload unchanged to every connection, the sender included.
    ///
    /// # Returns
    ///
    /// The number of connections the frame was handed to
    pub fn on_chat_message(&mut self, connection_id: ConnectionId, payload: Payload) -> usize {
        tracing::debug!("Relaying chat message from '{}'", connection_id);
        self.broadcast(ServerEvent::ChatMessage(payload))
    }
}
