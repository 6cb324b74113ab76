//! Protocol Module
//!
//! Defines the wire protocol spoken with the store.
//!
//! ## Protocol Format (RESP dialect)
//!
//! ### Request Format
//! Always an array of bulk strings:
//! ```text
//! *<count>\r\n($<len>\r\n<bytes>\r\n)*
//! ```
//!
//! ### Response Format
//! Dispatched on the first byte:
//! - `+` simple string
//! - `-` error
//! - `:` integer
//! - `$` bulk string (`$-1` = null)
//! - `*` array of bulk strings / integers
//!
//! The codec is stateless: commands encode to byte buffers, response buffers
//! decode to a [`Reply`]. The session channel owns all transport I/O.

mod codec;
mod command;
mod reply;

pub use codec::{
    decode_reply, encode_command, encode_to_vec, frame_len, patch_range_upper_bound,
    MAX_BULK_SIZE, RANGE_BOUND_MAX_BYTE, RANGE_BOUND_PLACEHOLDER,
};
pub use command::Command;
pub use reply::Reply;
