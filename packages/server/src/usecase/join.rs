//! UseCase: 参加（join）処理
//!
//! 名前の検証は行いません。空文字や他の接続と重複する名前も受け付けます。
//! 同じ接続からの再 join は名前を上書きします。

use hiroba_shared::protocol::{Payload, ServerEvent};

use crate::domain::{ConnectionId, DisplayName, MessagePusher};

use super::Relay;

impl<P: MessagePusher> Relay<P> {
    /// Register a display name and broadcast `user joined` to everyone,
    /// the sender included.
    ///
    /// # Returns
    ///
    /// The display-name list that was broadcast
    pub fn on_join(&mut self, connection_id: ConnectionId, payload: Payload) -> Vec<String> {
        let name = DisplayName::from_payload(&payload);

        match self.registry.join(connection_id, name.clone()) {
            Some(previous) => tracing::info!(
                "Connection '{}' renamed '{}' -> '{}'",
                connection_id,
                previous,
                name
            ),
            None => tracing::info!("Connection '{}' joined as '{}'", connection_id, name),
        }

        let users = self.registry.display_names();
        self.broadcast(ServerEvent::UserJoined(users.clone()));
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::MockMessagePusher, infrastructure::message_pusher::WebSocketMessagePusher};
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    fn payload(value: Value) -> Payload {
        Payload::from_value(&value).unwrap()
    }

    fn expect_user_joined(pusher: &mut MockMessagePusher, users: Vec<&'static str>) {
        let expected = ServerEvent::UserJoined(users.into_iter().map(String::from).collect());
        pusher
            .expect_broadcast()
            .withf(move |frame| ServerEvent::decode(frame).ok().as_ref() == Some(&expected))
            .times(1)
            .return_const(1usize);
    }

    #[test]
    fn test_join_broadcasts_user_list() {
        // テスト項目: join すると現在の参加者一覧がブロードキャストされる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        expect_user_joined(&mut pusher, vec!["alice"]);
        let mut relay = Relay::new(pusher);

        // when (操作):
        let users = relay.on_join(ConnectionId::generate(), payload(json!("alice")));

        // then (期待する結果):
        assert_eq!(users, vec!["alice"]);
    }

    #[test]
    fn test_join_list_size_matches_registered_connections() {
        // テスト項目: ブロードキャストされる一覧の長さは登録済み接続数と一致する
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(3).return_const(0usize);
        let mut relay = Relay::new(pusher);

        // when (操作):
        let sizes: Vec<usize> = ["a", "b", "c"]
            .into_iter()
            .map(|name| relay.on_join(ConnectionId::generate(), payload(json!(name))).len())
            .collect();

        // then (期待する結果):
        assert_eq!(sizes, vec![1, 2, 3]);
        assert_eq!(relay.registry().len(), 3);
    }

    #[test]
    fn test_rejoin_overwrites_name() {
        // テスト項目: 同じ接続から 2 回 join すると名前が上書きされ、重複しない
        // given (前提条件):
        let id = ConnectionId::generate();
        let mut pusher = MockMessagePusher::new();
        expect_user_joined(&mut pusher, vec!["alice"]);
        expect_user_joined(&mut pusher, vec!["alicia"]);
        let mut relay = Relay::new(pusher);
        relay.on_join(id, payload(json!("alice")));

        // when (操作):
        let users = relay.on_join(id, payload(json!("alicia")));

        // then (期待する結果):
        assert_eq!(users, vec!["alicia"]);
    }

    #[test]
    fn test_join_accepts_empty_and_duplicate_names() {
        // テスト項目: 空文字や重複した名前でも join できる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(3).return_const(0usize);
        let mut relay = Relay::new(pusher);

        // when (操作):
        relay.on_join(ConnectionId::generate(), payload(json!("")));
        relay.on_join(ConnectionId::generate(), payload(json!("bob")));
        let users = relay.on_join(ConnectionId::generate(), payload(json!("bob")));

        // then (期待する結果):
        assert_eq!(users, vec!["", "bob", "bob"]);
    }

    #[test]
    fn test_join_without_payload_registers_empty_name() {
        // テスト項目: ペイロード無しの join は空文字の名前として登録される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        expect_user_joined(&mut pusher, vec![""]);
        let mut relay = Relay::new(pusher);

        // when (操作):
        let users = relay.on_join(ConnectionId::generate(), Payload::null());

        // then (期待する結果):
        assert_eq!(users, vec![""]);
    }

    #[tokio::test]
    async fn test_join_reaches_unjoined_connections_and_sender() {
        // テスト項目: user joined は送信者と、まだ join していない接続の両方に届く
        // given (前提条件):
        let mut relay = Relay::new(WebSocketMessagePusher::new());
        let sender_id = ConnectionId::generate();
        let (sender_tx, mut sender_rx) = mpsc::unbounded_channel();
        let (lurker_tx, mut lurker_rx) = mpsc::unbounded_channel();
        relay.on_connect(sender_id, sender_tx);
        relay.on_connect(ConnectionId::generate(), lurker_tx);

        // when (操作):
        relay.on_join(sender_id, payload(json!("alice")));

        // then (期待する結果):
        let expected = ServerEvent::UserJoined(vec!["alice".to_string()]);
        for rx in [&mut sender_rx, &mut lurker_rx] {
            let frame = rx.recv().await.unwrap();
            assert_eq!(ServerEvent::decode(&frame).unwrap(), expected);
        }
    }
}
