//! UseCase 層のエラー定義

use thiserror::Error;

/// Errors returned by `RelayHandle` queries
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The dispatcher task has stopped
    #[error("relay dispatcher is not running")]
    DispatcherStopped,
}
