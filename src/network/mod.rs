//! Network Module
//!
//! TCP session handling.
//!
//! ## Architecture
//! - Single blocking channel, one request/response in flight
//! - Liveness handshake at construction
//! - Frame boundaries located by the protocol codec

mod channel;

pub use channel::{Channel, SessionChannel};
