//! Reply definitions
//!
//! A decoded store response. The set of reply kinds is fixed by the protocol
//! (one kind per leading marker byte), so this is a closed enum rather than
//! an open reader hierarchy.

/// A decoded response from the store
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Simple string: `+OK\r\n`
    Simple(String),

    /// Error: `-ERR message\r\n` (payload after the marker, `\r\n` trimmed)
    Error(String),

    /// Integer: `:1000\r\n`
    Integer(i64),

    /// Bulk string: `$5\r\nhello\r\n`; `$-1\r\n` (null) decodes to `None`
    Bulk(Option<String>),

    /// Array of bulk strings and integers: `*2\r\n$1\r\na\r\n:3\r\n`.
    /// Integers are stringified; a null element (`$-1`) decodes to `None`.
    Array(Vec<Option<String>>),
}

impl Reply {
    /// Short kind name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Simple(_) => "simple string",
            Reply::Error(_) => "error",
            Reply::Integer(_) => "integer",
            Reply::Bulk(_) => "bulk string",
            Reply::Array(_) => "array",
        }
    }

    /// True if this reply is a store-side rejection
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// The bulk payload, if this is a bulk reply
    pub fn as_bulk(&self) -> Option<&Option<String>> {
        match self {
            Reply::Bulk(value) => Some(value),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer reply
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Consume an array reply, dropping null elements
    pub fn into_members(self) -> Option<Vec<String>> {
        match self {
            Reply::Array(elements) => Some(elements.into_iter().flatten().collect()),
            _ => None,
        }
    }
}
