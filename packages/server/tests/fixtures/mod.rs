//! Shared fixtures for integration tests.
//!
//! Starts the relay in-process on an ephemeral port and provides a small
//! WebSocket client speaking the event envelope.

#![allow(dead_code)]

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::Server,
    usecase::{Relay, spawn_relay},
};
use hiroba_shared::protocol::{ClientEvent, ServerEvent};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Directory with a tiny pre-built SPA
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/static")
}

/// In-process relay server bound to 127.0.0.1 on a random port
pub struct TestServer {
    addr: SocketAddr,
    server: JoinHandle<()>,
    dispatcher: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let (relay, dispatcher) = spawn_relay(Relay::new(WebSocketMessagePusher::new()));
        let server = Server::new(relay, static_dir());
        let server = tokio::spawn(async move {
            server
                .serve(listener, std::future::pending::<()>())
                .await
                .expect("Server failed");
        });

        TestServer {
            addr,
            server,
            dispatcher,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.abort();
        self.dispatcher.abort();
    }
}

/// WebSocket test client
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _response) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    pub async fn send(&mut self, event: ClientEvent) {
        let text = event.encode().expect("Failed to encode event");
        self.send_raw(&text).await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::text(text))
            .await
            .expect("Failed to send frame");
    }

    pub async fn join(&mut self, username: &str) {
        let event = ClientEvent::join(username).expect("Failed to build join event");
        self.send(event).await;
    }

    /// Next server event, skipping control frames
    pub async fn recv(&mut self) -> ServerEvent {
        let text = self.recv_text().await;
        ServerEvent::decode(&text).expect("Invalid server event")
    }

    /// Next text frame exactly as sent by the server
    pub async fn recv_text(&mut self) -> String {
        loop {
            let message = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for event")
                .expect("Connection closed")
                .expect("WebSocket error");

            if let Message::Text(text) = message {
                return text.as_str().to_string();
            }
        }
    }

    /// Assert no event arrives within `window`
    pub async fn expect_silence(&mut self, window: Duration) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(window, self.stream.next()).await
        {
            panic!("Unexpected event: {}", text.as_str());
        }
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.expect("Failed to close");
    }
}

pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
