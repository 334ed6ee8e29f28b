//! Data Transfer Objects (DTOs) for the HTTP API.
//!
//! WebSocket frames use the shared event envelope in `hiroba_shared::protocol`.

pub mod http;
