//! Command result classification
//!
//! Relevant only for mutating commands (`set`, `sadd`, `zadd`, transaction
//! control, index/map maintenance). Read queries return typed values through
//! the decode path and never produce a `CommandResult`.

use crate::protocol::Reply;

/// Outcome of one mutating command
///
/// Created fresh per executed command; immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// False when the store rejected the command
    pub success: bool,

    /// The store's error line when `success` is false, exactly as sent
    /// (payload after the `-` marker, terminal `\r\n` trimmed)
    pub error_message: Option<String>,

    /// Count from an integer reply. `None` means the reply carried no count
    /// at all, which is distinct from an affected count of zero.
    pub records_affected: Option<i64>,
}

impl CommandResult {
    /// Classify a decoded reply
    pub(crate) fn from_reply(reply: &Reply) -> Self {
        match reply {
            Reply::Error(message) => Self {
                success: false,
                error_message: Some(message.clone()),
                records_affected: None,
            },
            Reply::Integer(count) => Self {
                success: true,
                error_message: None,
                records_affected: Some(*count),
            },
            _ => Self {
                success: true,
                error_message: None,
                records_affected: None,
            },
        }
    }
}
