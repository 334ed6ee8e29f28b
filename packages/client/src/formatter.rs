//! Message formatting utilities for client display.

use hiroba_shared::{
    protocol::Payload,
    time::{Clock, format_jst_clock},
};
use serde_json::Value;

/// Shown for participants who joined with an empty name
const ANONYMOUS: &str = "(anonymous)";

/// Message formatter for client display
///
/// Every line is stamped with the JST time of day at which it was received.
pub struct MessageFormatter<C: Clock> {
    clock: C,
    username: String,
}

impl<C: Clock> MessageFormatter<C> {
    /// # Arguments
    ///
    /// * `clock` - Source of receive timestamps
    /// * `username` - This client's display name (marked with "(me)")
    pub fn new(clock: C, username: impl Into<String>) -> Self {
        Self {
            clock,
            username: username.into(),
        }
    }

    /// Format a `user joined` event showing the current participants
    pub fn format_user_joined(&self, users: &[String]) -> String {
        format!(
            "\n[{}] + someone joined. {}\n",
            self.stamp(),
            self.format_online(users)
        )
    }

    /// Format a `user left` event showing the remaining participants
    pub fn format_user_left(&self, users: &[String]) -> String {
        format!(
            "\n[{}] - someone left. {}\n",
            self.stamp(),
            self.format_online(users)
        )
    }

    /// Format a chat payload.
    ///
    /// Strings are shown as-is. Objects shaped like `{"user": .., "text": ..}`
    /// are shown as `@user: text`. Anything else is shown as the JSON text
    /// that was received.
    pub fn format_chat_message(&self, payload: &Payload) -> String {
        let body = match payload.parse::<Value>() {
            Ok(Value::String(text)) => text,
            Ok(Value::Object(fields)) => match (
                fields.get("user").and_then(Value::as_str),
                fields.get("text").and_then(Value::as_str),
            ) {
                (Some(user), Some(text)) => format!("@{}: {}", display(user), text),
                _ => payload.to_string(),
            },
            _ => payload.to_string(),
        };
        format!("\n[{}] {}\n", self.stamp(), body)
    }

    /// Format a raw text frame (when parsing fails)
    pub fn format_raw_message(&self, text: &str) -> String {
        format!("\n[{}] ← Received: {}\n", self.stamp(), text)
    }

    fn format_online(&self, users: &[String]) -> String {
        if users.is_empty() {
            return "Online (0): nobody".to_string();
        }

        let listed: Vec<String> = users
            .iter()
            .map(|user| {
                if *user == self.username {
                    format!("{} (me)", display(user))
                } else {
                    display(user).to_string()
                }
            })
            .collect();
        format!("Online ({}): {}", users.len(), listed.join(", "))
    }

    fn stamp(&self) -> String {
        format_jst_clock(self.clock.now_millis())
    }
}

fn display(name: &str) -> &str {
    if name.is_empty() { ANONYMOUS } else { name }
}
