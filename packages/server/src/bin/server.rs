//! Chat relay server with presence broadcast.
//!
//! Accepts WebSocket connections on `/ws`, keeps the list of joined display
//! names and broadcasts `user joined`, `chat message` and `user left` events to
//! every connected client. Everything else is served from the static
//! directory, falling back to `index.html`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! PORT=8080 cargo run --bin hiroba-server -- --static-dir ./front/dist
//! ```

use clap::Parser;
use hiroba_server::{
    config::ServerConfig,
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::Server,
    usecase::{Relay, spawn_relay},
};
use hiroba_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::parse();

    // 1. Relay dispatcher (owns the registry and the outbound channels)
    let relay = Relay::new(WebSocketMessagePusher::new());
    let (relay_handle, dispatcher) = spawn_relay(relay);

    // 2. Server
    let server = Server::new(relay_handle, config.static_dir.clone());
    if let Err(e) = server.run(&config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    dispatcher.abort();
}
