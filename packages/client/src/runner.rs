//! Client execution logic with reconnection support.

use std::time::Duration;

use tokio::sync::mpsc;

use super::{error::ClientError, session::run_client_session, ui::spawn_readline};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the chat client, reconnecting (and re-joining) on connection loss.
///
/// # Errors
///
/// Returns `ClientError::ReconnectExhausted` after `MAX_RECONNECT_ATTEMPTS`
/// consecutive failures.
pub async fn run_client(url: String, username: String) -> Result<(), ClientError> {
    // The readline thread outlives individual sessions
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    spawn_readline(username.clone(), input_tx);

    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            username,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &username, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);

                // A session that got connected starts the count over
                if matches!(e, ClientError::ConnectionLost) {
                    reconnect_count = 0;
                }
                reconnect_count += 1;

                if reconnect_count >= MAX_RECONNECT_ATTEMPTS {
                    return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
