//! Code shared between the Hiroba relay server and the CLI client.
//!
//! - `protocol`: JSON event envelope exchanged over the WebSocket
//! - `logger`: tracing subscriber setup
//! - `time`: timestamp helpers used for display

pub mod logger;
pub mod protocol;
pub mod time;
