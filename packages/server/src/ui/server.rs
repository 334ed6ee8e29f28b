//! Server execution logic.

use std::{future::Future, path::PathBuf, sync::Arc};

use axum::{Router, http::Method, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::usecase::RelayHandle;

use super::{
    error::ServerError,
    handler::{get_presence, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Entry document served for every path that matches no asset
const INDEX_FILE: &str = "index.html";

/// Relay HTTP/WebSocket server
///
/// # Example
///
/// ```ignore
/// let (relay, _dispatcher) = spawn_relay(Relay::new(WebSocketMessagePusher::new()));
/// let server = Server::new(relay, "static/dist".into());
/// server.run("0.0.0.0:3000").await?;
/// ```
pub struct Server {
    relay: RelayHandle,
    static_dir: PathBuf,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `relay` - Handle to the running relay dispatcher
    /// * `static_dir` - Directory of the pre-built single-page application
    pub fn new(relay: RelayHandle, static_dir: PathBuf) -> Self {
        Self { relay, static_dir }
    }

    /// Build the router: socket endpoint, API, then the SPA as fallback.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            relay: self.relay.clone(),
        });

        let spa = ServeDir::new(&self.static_dir)
            .fallback(ServeFile::new(self.static_dir.join(INDEX_FILE)));

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/users", get(get_presence))
            // 静的ファイル（未マッチのパスは index.html）
            .fallback_service(spa)
            .layer(cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `bind_addr` (e.g. "0.0.0.0:3000") and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, bind_addr: &str) -> Result<(), ServerError> {
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.to_string(),
                source,
            })?;

        tracing::info!("Serving static files from {}", self.static_dir.display());
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!("Server running on port {}", local_addr.port());
        tracing::info!("Connect to: ws://{}/ws", local_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Cross-origin requests are allowed from any origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
}
