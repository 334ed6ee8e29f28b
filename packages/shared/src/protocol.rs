//! WebSocket event protocol.
//!
//! Every text frame carries one JSON envelope:
//!
//! ```text
//! {"event": "join", "data": "alice"}
//! {"event": "chat message", "data": {"text": "hi"}}
//! {"event": "user joined", "data": ["alice", "bob"]}
//! ```
//!
//! `data` may be omitted, in which case it is read as `null`. Payloads are
//! kept as raw JSON text, so numbers, nesting depth and formatting survive
//! the relay unchanged.

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::value::RawValue;
use thiserror::Error;

/// Event name: client registers a display name
pub const EVENT_JOIN: &str = "join";
/// Event name: chat payload (both directions)
pub const EVENT_CHAT_MESSAGE: &str = "chat message";
/// Event name: presence list after a join
pub const EVENT_USER_JOINED: &str = "user joined";
/// Event name: presence list after a disconnect
pub const EVENT_USER_LEFT: &str = "user left";

/// Errors raised while encoding or decoding envelopes
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not a JSON envelope
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The envelope names an event this side does not handle
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    /// The envelope payload has the wrong shape for its event
    #[error("invalid payload for '{event}': {reason}")]
    InvalidPayload { event: String, reason: String },
}

/// An event's `data`, held as the exact JSON text that was received
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Box<RawValue>);

impl Payload {
    pub fn null() -> Self {
        Self(RawValue::NULL.to_owned())
    }

    /// Serialize `value` into a payload
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self, ProtocolError> {
        Ok(Self(serde_json::value::to_raw_value(value)?))
    }

    /// Wrap JSON text without re-encoding it. Fails if `json` is not valid JSON.
    pub fn from_json(json: impl Into<String>) -> Result<Self, ProtocolError> {
        Ok(Self(RawValue::from_string(json.into())?))
    }

    /// The JSON text as received
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    pub fn is_null(&self) -> bool {
        self.as_str() == "null"
    }

    /// Deserialize the payload into a concrete type
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.as_str())
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::null()
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Payload {}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw wire envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: Payload,
}

impl Envelope {
    pub fn new(event: impl Into<String>, data: Payload) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

/// Events sent from a client to the relay
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Register a display name. The payload is kept raw; the relay accepts
    /// anything the client sends.
    Join(Payload),
    /// Opaque chat payload, relayed verbatim
    ChatMessage(Payload),
}

impl ClientEvent {
    /// Build a `join` event for the given display name
    pub fn join(username: &str) -> Result<Self, ProtocolError> {
        Ok(Self::Join(Payload::from_value(username)?))
    }

    /// Build a `chat message` event carrying a plain string
    pub fn chat_text(text: &str) -> Result<Self, ProtocolError> {
        Ok(Self::ChatMessage(Payload::from_value(text)?))
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(text)?;
        Self::try_from(envelope)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(&Envelope::from(self.clone()))?)
    }
}

impl TryFrom<Envelope> for ClientEvent {
    type Error = ProtocolError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        match envelope.event.as_str() {
            EVENT_JOIN => Ok(Self::Join(envelope.data)),
            EVENT_CHAT_MESSAGE => Ok(Self::ChatMessage(envelope.data)),
            _ => Err(ProtocolError::UnknownEvent(envelope.event)),
        }
    }
}

impl From<ClientEvent> for Envelope {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::Join(data) => Envelope::new(EVENT_JOIN, data),
            ClientEvent::ChatMessage(data) => Envelope::new(EVENT_CHAT_MESSAGE, data),
        }
    }
}

/// Events broadcast from the relay to every client
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Current display names after a join
    UserJoined(Vec<String>),
    /// A chat payload exactly as it was received
    ChatMessage(Payload),
    /// Remaining display names after a disconnect
    UserLeft(Vec<String>),
}

impl ServerEvent {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(text)?;
        Self::try_from(envelope)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        let envelope = match self {
            Self::UserJoined(users) => Envelope::new(EVENT_USER_JOINED, Payload::from_value(users)?),
            Self::ChatMessage(data) => Envelope::new(EVENT_CHAT_MESSAGE, data.clone()),
            Self::UserLeft(users) => Envelope::new(EVENT_USER_LEFT, Payload::from_value(users)?),
        };
        Ok(serde_json::to_string(&envelope)?)
    }
}

impl TryFrom<Envelope> for ServerEvent {
    type Error = ProtocolError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        match envelope.event.as_str() {
            EVENT_USER_JOINED => Ok(Self::UserJoined(user_list(&envelope.event, &envelope.data)?)),
            EVENT_USER_LEFT => Ok(Self::UserLeft(user_list(&envelope.event, &envelope.data)?)),
            EVENT_CHAT_MESSAGE => Ok(Self::ChatMessage(envelope.data)),
            _ => Err(ProtocolError::UnknownEvent(envelope.event)),
        }
    }
}

fn user_list(event: &str, data: &Payload) -> Result<Vec<String>, ProtocolError> {
    data.parse().map_err(|e| ProtocolError::InvalidPayload {
        event: event.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn payload(value: Value) -> Payload {
        Payload::from_value(&value).unwrap()
    }

    #[test]
    fn test_decode_join() {
        // テスト項目: join イベントをデコードできる
        // given (前提条件):
        let text = r#"{"event":"join","data":"alice"}"#;

        // when (操作):
        let event = ClientEvent::decode(text).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::join("alice").unwrap());
    }

    #[test]
    fn test_decode_chat_message_keeps_structured_payload() {
        // テスト項目: chat message のペイロードは構造を保ったまま取り出される
        // given (前提条件):
        let text = r#"{"event":"chat message","data":{"user":"alice","text":"hi","tags":[1,2]}}"#;

        // when (操作):
        let event = ClientEvent::decode(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::ChatMessage(payload(json!({"user": "alice", "text": "hi", "tags": [1, 2]})))
        );
    }

    #[test]
    fn test_decode_missing_data_is_null() {
        // テスト項目: data が省略された場合は null として扱われる
        // given (前提条件):
        let text = r#"{"event":"chat message"}"#;

        // when (操作):
        let event = ClientEvent::decode(text).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::ChatMessage(Payload::null()));
    }

    #[test]
    fn test_decode_unknown_event() {
        // テスト項目: 未知のイベント名はエラーになる
        // given (前提条件):
        let text = r#"{"event":"typing","data":true}"#;

        // when (操作):
        let result = ClientEvent::decode(text);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::UnknownEvent(name)) if name == "typing"));
    }

    #[test]
    fn test_decode_not_json() {
        // テスト項目: JSON でないフレームはエラーになる
        // given (前提条件):
        let text = "hello";

        // when (操作):
        let result = ClientEvent::decode(text);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_client_does_not_accept_server_events() {
        // テスト項目: サーバー側イベント名をクライアントイベントとして受け付けない
        // given (前提条件):
        let text = r#"{"event":"user joined","data":["alice"]}"#;

        // when (操作):
        let result = ClientEvent::decode(text);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::UnknownEvent(_))));
    }

    #[test]
    fn test_encode_user_joined() {
        // テスト項目: user joined は名前の配列として送信される
        // given (前提条件):
        let event = ServerEvent::UserJoined(vec!["alice".to_string(), "bob".to_string()]);

        // when (操作):
        let text = event.encode().unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"event": "user joined", "data": ["alice", "bob"]}));
    }

    #[test]
    fn test_encode_user_left_empty_list() {
        // テスト項目: 最後の参加者が抜けた場合は空配列が送信される
        // given (前提条件):
        let event = ServerEvent::UserLeft(vec![]);

        // when (操作):
        let text = event.encode().unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"event": "user left", "data": []}));
    }

    #[test]
    fn test_decode_user_list_with_wrong_shape() {
        // テスト項目: user left の data が配列でない場合は InvalidPayload になる
        // given (前提条件):
        let text = r#"{"event":"user left","data":"bob"}"#;

        // when (操作):
        let result = ServerEvent::decode(text);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidPayload { event, .. }) if event == EVENT_USER_LEFT
        ));
    }

    #[test]
    fn test_chat_text_encodes_as_string_payload() {
        // テスト項目: CLI クライアントの送信メッセージは文字列ペイロードになる
        // given (前提条件):
        let event = ClientEvent::chat_text("hi").unwrap();

        // when (操作):
        let text = event.encode().unwrap();

        // then (期待する結果):
        assert_eq!(text, r#"{"event":"chat message","data":"hi"}"#);
    }

    #[test]
    fn test_chat_payload_keeps_big_numbers_byte_identical() {
        // テスト項目: f64 に収まらない数値を含むペイロードも文字列として完全に一致したまま中継される
        // given (前提条件):
        let text = r#"{"event":"chat message","data":{"id":12345678901234567890123,"x":1e400}}"#;

        // when (操作):
        let event = ClientEvent::decode(text).unwrap();
        let ClientEvent::ChatMessage(data) = event else {
            panic!("expected chat message, got {:?}", event);
        };
        let relayed = ServerEvent::ChatMessage(data).encode().unwrap();

        // then (期待する結果):
        assert_eq!(relayed, text);
    }

    #[test]
    fn test_chat_payload_keeps_formatting() {
        // テスト項目: ペイロード内の空白やキー順は書き換えられない
        // given (前提条件):
        let text = r#"{"event":"chat message","data":{ "b" : 1.50, "a" : [ ] }}"#;

        // when (操作):
        let event = ClientEvent::decode(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::ChatMessage(Payload::from_json(r#"{ "b" : 1.50, "a" : [ ] }"#).unwrap())
        );
    }

    #[test]
    fn test_chat_payload_deeply_nested() {
        // テスト項目: 深くネストしたペイロードもデコードできる
        // given (前提条件):
        let nested = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let text = format!(r#"{{"event":"chat message","data":{}}}"#, nested);

        // when (操作):
        let event = ClientEvent::decode(&text).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::ChatMessage(Payload::from_json(nested).unwrap()));
    }

    #[test]
    fn test_payload_parse() {
        // テスト項目: ペイロードは必要なときに型付きの値へ変換できる
        // given (前提条件):
        let data = Payload::from_json(r#"["alice","bob"]"#).unwrap();

        // when (操作):
        let users: Vec<String> = data.parse().unwrap();

        // then (期待する結果):
        assert_eq!(users, vec!["alice", "bob"]);
        assert!(!data.is_null());
        assert!(Payload::null().is_null());
    }
}
