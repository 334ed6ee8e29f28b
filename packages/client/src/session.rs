//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use hiroba_shared::{
    protocol::{ClientEvent, ServerEvent},
    time::{Clock, SystemClock},
};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one connection: join, then relay typed lines and print events.
///
/// # Returns
///
/// * `Ok(())` - the user closed the input (Ctrl+C / Ctrl+D)
/// * `Err(ClientError::ConnectionError)` - the socket could not be opened
/// * `Err(ClientError::ConnectionLost)` - the socket dropped mid-session
pub async fn run_client_session(
    url: &str,
    username: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        username
    );

    let (mut write, mut read) = ws_stream.split();
    let formatter = MessageFormatter::new(SystemClock, username);

    let join = ClientEvent::join(username)?.encode()?;
    write
        .send(Message::text(join))
        .await
        .map_err(|_| ClientError::ConnectionLost)?;

    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    print!("{}", render(&formatter, text.as_str()));
                    redisplay_prompt(username);
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost);
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost);
                }
                Some(Ok(_)) => {}
            },
            line = input.recv() => match line {
                Some(line) => {
                    let frame = ClientEvent::chat_text(&line)?.encode()?;
                    if let Err(e) = write.send(Message::text(frame)).await {
                        tracing::warn!("Failed to send message: {}", e);
                        return Err(ClientError::ConnectionLost);
                    }
                }
                None => {
                    // 入力が閉じられた（Ctrl+C / Ctrl+D）
                    let _ = write.close().await;
                    return Ok(());
                }
            },
        }
    }
}

/// Turn a server frame into display text
fn render<C: Clock>(formatter: &MessageFormatter<C>, text: &str) -> String {
    match ServerEvent::decode(text) {
        Ok(ServerEvent::UserJoined(users)) => formatter.format_user_joined(&users),
        Ok(ServerEvent::UserLeft(users)) => formatter.format_user_left(&users),
        Ok(ServerEvent::ChatMessage(payload)) => formatter.format_chat_message(&payload),
        Err(e) => {
            tracing::debug!("Unrecognised frame: {}", e);
            formatter.format_raw_message(text)
        }
    }
}
