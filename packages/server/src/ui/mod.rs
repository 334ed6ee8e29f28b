//! UI layer: HTTP and WebSocket surface of the relay.

pub mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use error::ServerError;
pub use server::Server;
