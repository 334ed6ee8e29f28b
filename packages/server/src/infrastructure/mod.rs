//! Infrastructure layer
//!
//! Concrete implementations of the seams the domain layer defines, and the
//! DTOs the UI layer serializes.

pub mod dto;
pub mod message_pusher;
