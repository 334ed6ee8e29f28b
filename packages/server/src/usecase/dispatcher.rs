//! Single-task dispatcher for relay commands.
//!
//! Connection tasks never touch the registry. They send `RelayCommand`s over
//! an unbounded channel; one dispatcher task owns the `Relay` and applies the
//! commands one at a time in arrival order.

use hiroba_shared::protocol::Payload;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

use super::{PresenceSnapshot, Relay, RelayError};

/// Commands accepted by the dispatcher
#[derive(Debug)]
pub enum RelayCommand {
    Connect {
        connection_id: ConnectionId,
        sender: PusherChannel,
    },
    Join {
        connection_id: ConnectionId,
        payload: Payload,
    },
    ChatMessage {
        connection_id: ConnectionId,
        payload: Payload,
    },
    Disconnect {
        connection_id: ConnectionId,
    },
    Snapshot {
        reply: oneshot::Sender<PresenceSnapshot>,
    },
}

/// Cloneable sending side of the dispatcher
#[derive(Debug, Clone)]
pub struct RelayHandle {
    commands: mpsc::UnboundedSender<RelayCommand>,
}

impl RelayHandle {
    pub fn connect(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.send(RelayCommand::Connect {
            connection_id,
            sender,
        });
    }

    pub fn join(&self, connection_id: ConnectionId, payload: Payload) {
        self.send(RelayCommand::Join {
            connection_id,
            payload,
        });
    }

    pub fn chat_message(&self, connection_id: ConnectionId, payload: Payload) {
        self.send(RelayCommand::ChatMessage {
            connection_id,
            payload,
        });
    }

    pub fn disconnect(&self, connection_id: ConnectionId) {
        self.send(RelayCommand::Disconnect { connection_id });
    }

    /// Ask the dispatcher for the current presence.
    ///
    /// The reply is ordered after every command already queued.
    pub async fn snapshot(&self) -> Result<PresenceSnapshot, RelayError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(RelayCommand::Snapshot { reply })
            .map_err(|_| RelayError::DispatcherStopped)?;
        response.await.map_err(|_| RelayError::DispatcherStopped)
    }

    /// Create a guard that disconnects `connection_id` when dropped
    pub fn guard(&self, connection_id: ConnectionId) -> ConnectionGuard {
        ConnectionGuard {
            relay: self.clone(),
            connection_id,
        }
    }

    fn send(&self, command: RelayCommand) {
        if let Err(e) = self.commands.send(command) {
            tracing::warn!("Relay dispatcher is gone, dropping {:?}", e.0);
        }
    }
}

/// Sends `Disconnect` exactly once when the connection's handler exits,
/// whatever the reason (close frame, I/O error, task abort, shutdown).
#[derive(Debug)]
pub struct ConnectionGuard {
    relay: RelayHandle,
    connection_id: ConnectionId,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        tracing::info!("Client disconnected: {}", self.connection_id);
        self.relay.disconnect(self.connection_id);
    }
}

/// Spawn the dispatcher task that owns `relay`.
///
/// The task ends once every `RelayHandle` has been dropped.
pub fn spawn_relay<P>(relay: Relay<P>) -> (RelayHandle, JoinHandle<()>)
where
    P: MessagePusher + 'static,
{
    let (commands, receiver) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_dispatcher(relay, receiver));
    (RelayHandle { commands }, task)
}

async fn run_dispatcher<P: MessagePusher>(
    mut relay: Relay<P>,
    mut receiver: mpsc::UnboundedReceiver<RelayCommand>,
) {
    tracing::debug!("Relay dispatcher started");

    while let Some(command) = receiver.recv().await {
        apply(&mut relay, command);
    }

    tracing::debug!("Relay dispatcher stopped");
}

fn apply<P: MessagePusher>(relay: &mut Relay<P>, command: RelayCommand) {
    match command {
        RelayCommand::Connect {
            connection_id,
            sender,
        } => relay.on_connect(connection_id, sender),
        RelayCommand::Join {
            connection_id,
            payload,
        } => {
            relay.on_join(connection_id, payload);
        }
        RelayCommand::ChatMessage {
            connection_id,
            payload,
        } => {
            relay.on_chat_message(connection_id, payload);
        }
        RelayCommand::Disconnect { connection_id } => {
            relay.on_disconnect(connection_id);
        }
        RelayCommand::Snapshot { reply } => {
            // 問い合わせ側が先に諦めた場合は何もしない
            let _ = reply.send(relay.snapshot());
        }
    }
}
