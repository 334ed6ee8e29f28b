//! UseCase: クライアント切断処理
//!
//! 切断理由（close フレーム、ネットワーク断、タイムアウト）は区別しません。
//! join していない接続の切断でも `user left` は送信されます。

use hiroba_shared::protocol::ServerEvent;

use crate::domain::{ConnectionId, MessagePusher};

use super::Relay;

impl<P: MessagePusher> Relay<P> {
    /// Drop a connection's registration and broadcast `user left` with the
    /// remaining display names to the remaining connections.
    ///
    /// # Returns
    ///
    /// The display-name list that was broadcast
    pub fn on_disconnect(&mut self, connection_id: ConnectionId) -> Vec<String> {
        self.message_pusher.unregister_client(&connection_id);

        match self.registry.remove(&connection_id) {
            Some(name) => tracing::info!("Connection '{}' ('{}') left", connection_id, name),
            None => tracing::debug!("Connection '{}' left without joining", connection_id),
        }

        let users = self.registry.display_names();
        self.broadcast(ServerEvent::UserLeft(users.clone()));
        users
    }
}
