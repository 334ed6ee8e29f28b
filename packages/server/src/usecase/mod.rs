//! UseCase 層
//!
//! Relay のビジネスロジックを実装するレイヤー。
//! UI 層は `RelayHandle` 経由でコマンドを送り、dispatcher タスクが
//! `Relay` の各ユースケースを 1 件ずつ順番に実行します。

pub mod connect_client;
pub mod disconnect_client;
pub mod dispatcher;
pub mod error;
pub mod get_presence;
pub mod join;
pub mod relay;
pub mod send_message;

pub use dispatcher::{ConnectionGuard, RelayCommand, RelayHandle, spawn_relay};
pub use error::RelayError;
pub use get_presence::PresenceSnapshot;
pub use relay::Relay;
