//! Error types for kvwire
//!
//! Provides a unified error type for all client operations.
//!
//! Command rejections by the store are deliberately NOT an error variant on
//! the write path: they come back as `CommandResult { success: false, .. }`
//! so callers can inspect and recover. Only read-path rejections surface as
//! [`KvWireError::StoreCommand`].

use thiserror::Error;

/// Result type alias using KvWireError
pub type Result<T> = std::result::Result<T, KvWireError>;

/// Unified error type for kvwire operations
#[derive(Debug, Error)]
pub enum KvWireError {
    // -------------------------------------------------------------------------
    // Connection Errors (fatal, surfaced at construction)
    // -------------------------------------------------------------------------
    #[error("unable to establish TCP connection to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TCP connection to {addr} established, but no PONG reply to the liveness ping: {detail}")]
    NoServerRunning { addr: String, detail: String },

    // -------------------------------------------------------------------------
    // Transport Errors (surfaced per call, never retried)
    // -------------------------------------------------------------------------
    #[error("communication with the store failed: {0}")]
    Communication(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("protocol decode error: {0}")]
    ProtocolDecode(String),

    /// The store rejected a read-path command (`-ERR ...` reply).
    #[error("store rejected command: {0}")]
    StoreCommand(String),

    // -------------------------------------------------------------------------
    // Entity Errors
    // -------------------------------------------------------------------------
    /// Stored value could not be deserialized into the requested type.
    /// Carries the offending raw value for diagnostics.
    #[error("unable to decode entity from stored value {raw:?}: {reason}")]
    EntityDecode { raw: String, reason: String },

    #[error("unable to encode entity: {0}")]
    EntityEncode(String),

    // -------------------------------------------------------------------------
    // I/O Errors (export file sink)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
