//! Presence and broadcast relay for a WebSocket chat.
//!
//! Tracks which connections have joined under which display name and
//! broadcasts `user joined`, `chat message` and `user left` events to every
//! open socket. Also serves a pre-built single-page application.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
