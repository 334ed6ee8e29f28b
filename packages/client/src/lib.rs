//! Interactive CLI client for the Hiroba chat relay.
//!
//! Joins under a display name, prints presence and chat events, and sends
//! every line typed at the prompt as a `chat message`.

pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use formatter::MessageFormatter;
pub use runner::run_client;
