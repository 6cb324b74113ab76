//! # kvwire
//!
//! A synchronous client for RESP-speaking key-value stores with:
//! - A byte-exact wire codec (arrays of bulk strings out, type-dispatched
//!   replies back)
//! - A single blocking session channel with a liveness handshake
//! - A command executor classifying every mutating command's outcome
//! - A derived data-modeling layer: secondary indexes that stay consistent
//!   across re-indexing, bidirectional relationship maps, and
//!   prefix-searchable autocomplete sets
//! - A file-sink export mode emitting the identical encoded commands for
//!   offline bulk loading
//!
//! ## Architecture Overview
//!
//! ```text
//! caller
//!   │
//!   ▼
//! ┌─────────────────────────────┐
//! │   Relational/Index Layer    │  indexes · two-way maps · autocomplete
//! └──────────────┬──────────────┘
//!                │
//! ┌──────────────▼──────────────┐
//! │      Command Executor       │  encode → exchange → decode → classify
//! └──────────────┬──────────────┘
//!                │
//! ┌──────────────▼──────────────┐
//! │       Session Channel       │  TCP, one request/response in flight
//! └─────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use kvwire::{Client, Config};
//!
//! # fn main() -> kvwire::Result<()> {
//! let config = Config::builder().host("127.0.0.1").port(6379).build();
//! let client = Client::connect(&config)?;
//!
//! let result = client.set("z", "26")?;
//! assert!(result.success);
//!
//! client.add_index("index:lead:firstname", "dhanya", "k50")?;
//! let hits = client.set_intersect(&["index:lead:education:mba", "index:lead:status:loggedin"])?;
//! # let _ = hits;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod client;
pub mod export;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::{AutocompleteItem, Client, CommandResult};
pub use config::Config;
pub use error::{KvWireError, Result};
pub use export::ExportFile;
pub use network::{Channel, SessionChannel};
pub use protocol::{Command, Reply};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
