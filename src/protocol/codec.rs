//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! Requests are always arrays of bulk strings:
//! ```text
//! *<count>\r\n  then per argument:  $<len>\r\n<bytes>\r\n
//! ```
//! `<len>` is the exact byte length of the argument; empty arguments encode
//! as `$0\r\n\r\n`.
//!
//! ### Response Format
//! One of, dispatched on the first byte:
//! ```text
//! +<line>\r\n                simple string
//! -<line>\r\n                error
//! :<int>\r\n                 integer
//! $<len>\r\n<bytes>\r\n      bulk string ($-1\r\n = null)
//! *<count>\r\n<elements>     array of bulk strings / integers
//! ```
//!
//! Decoding threads an explicit cursor through pure functions and bounds-
//! checks every index derived from a parsed length; malformed or truncated
//! buffers fail with [`KvWireError::ProtocolDecode`].

use bytes::{BufMut, BytesMut};

use super::{Command, Reply};
use crate::error::{KvWireError, Result};

const CRLF: &[u8] = b"\r\n";

/// Maximum accepted bulk-string payload (16 MB). A parsed length beyond this
/// is treated as a malformed frame rather than an allocation request.
pub const MAX_BULK_SIZE: usize = 16 * 1024 * 1024;

/// Byte written in place of the range-query upper-bound terminator before
/// [`patch_range_upper_bound`] runs.
pub const RANGE_BOUND_PLACEHOLDER: u8 = b' ';

/// Maximal single byte, terminating an exclusive prefix-range upper bound.
pub const RANGE_BOUND_MAX_BYTE: u8 = 0xFF;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command as an array of bulk strings
///
/// Pure transformation; always succeeds for any argument list.
pub fn encode_command(command: &Command, buf: &mut BytesMut) {
    buf.put_u8(b'*');
    buf.put_slice(command.parts().len().to_string().as_bytes());
    buf.put_slice(CRLF);

    for arg in command.parts() {
        buf.put_u8(b'$');
        buf.put_slice(arg.len().to_string().as_bytes());
        buf.put_slice(CRLF);
        buf.put_slice(arg.as_bytes());
        buf.put_slice(CRLF);
    }
}

/// Encode a command into a fresh byte vector
pub fn encode_to_vec(command: &Command) -> Vec<u8> {
    let mut buf = BytesMut::new();
    encode_command(command, &mut buf);
    buf.to_vec()
}

/// Rewrite the placeholder terminator of an encoded prefix-range upper bound
/// to the maximal byte.
///
/// A lexicographic prefix search needs an exclusive upper bound of
/// `<prefix>` followed by 0xFF, which is not printable. The bound is first
/// encoded with a trailing space so the bulk length prefix counts the final
/// byte, then this helper patches the last content byte of the buffer
/// (position `len - 3`, just before the closing `\r\n`) from 0x20 to 0xFF.
///
/// The buffer must end with a bulk string whose final content byte is the
/// placeholder space.
pub fn patch_range_upper_bound(buf: &mut BytesMut) {
    assert!(buf.len() >= 3, "buffer does not hold an encoded command");
    let last_content = buf.len() - 3;
    debug_assert_eq!(buf[last_content], RANGE_BOUND_PLACEHOLDER);
    buf[last_content] = RANGE_BOUND_MAX_BYTE;
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a raw response buffer into a typed reply
///
/// The buffer must start at a marker byte and contain at least one complete
/// frame; trailing bytes beyond the first frame are ignored.
pub fn decode_reply(buf: &[u8]) -> Result<Reply> {
    match buf.first().copied() {
        None => Err(decode_err("empty response buffer")),
        Some(b'+') => {
            let (line, _) = read_line(buf, 1)?;
            Ok(Reply::Simple(to_utf8(line)?))
        }
        Some(b'-') => {
            let (line, _) = read_line(buf, 1)?;
            Ok(Reply::Error(to_utf8(line)?))
        }
        Some(b':') => {
            let (n, _) = read_integer_line(buf, 1)?;
            Ok(Reply::Integer(n))
        }
        Some(b'$') => {
            let (value, _) = read_bulk(buf, 0)?;
            Ok(Reply::Bulk(value))
        }
        Some(b'*') => decode_array(buf),
        Some(other) => Err(decode_err(format!(
            "unexpected response marker: 0x{:02x}",
            other
        ))),
    }
}

/// Decode an array reply: `*<count>\r\n` then `count` bulk-string or integer
/// elements. Integers are stringified; null elements decode to `None`.
fn decode_array(buf: &[u8]) -> Result<Reply> {
    let (count, mut pos) = read_integer_line(buf, 1)?;

    // A null array (*-1) carries no elements; treat like an empty one.
    if count < 0 {
        return Ok(Reply::Array(Vec::new()));
    }

    let mut elements = Vec::with_capacity(count as usize);
    for _ in 0..count {
        match buf.get(pos).copied() {
            Some(b'$') => {
                let (value, next) = read_bulk(buf, pos)?;
                elements.push(value);
                pos = next;
            }
            Some(b':') => {
                let (n, next) = read_integer_line(buf, pos + 1)?;
                elements.push(Some(n.to_string()));
                pos = next;
            }
            Some(other) => {
                return Err(decode_err(format!(
                    "unsupported array element marker: 0x{:02x}",
                    other
                )))
            }
            None => return Err(decode_err("truncated array: missing elements")),
        }
    }

    Ok(Reply::Array(elements))
}

/// Read a `$<len>\r\n<bytes>\r\n` bulk string starting at the `$` marker.
/// Returns the payload (`None` for `$-1`) and the position past the frame.
fn read_bulk(buf: &[u8], pos: usize) -> Result<(Option<String>, usize)> {
    if buf.get(pos) != Some(&b'$') {
        return Err(decode_err("expected bulk string marker"));
    }
    let (len, data_start) = read_integer_line(buf, pos + 1)?;

    if len == -1 {
        return Ok((None, data_start));
    }
    if len < 0 {
        return Err(decode_err(format!("invalid bulk string length {}", len)));
    }
    let len = len as usize;
    if len > MAX_BULK_SIZE {
        return Err(decode_err(format!(
            "bulk string of {} bytes exceeds maximum {}",
            len, MAX_BULK_SIZE
        )));
    }

    let data_end = data_start + len;
    if buf.len() < data_end + 2 {
        return Err(decode_err("truncated bulk string payload"));
    }
    if &buf[data_end..data_end + 2] != CRLF {
        return Err(decode_err("bulk string payload not terminated by CRLF"));
    }

    let value = to_utf8(&buf[data_start..data_end])?;
    Ok((Some(value), data_end + 2))
}

/// Read the line content from `pos` up to the next CRLF.
/// Returns the content bytes and the position past the CRLF.
fn read_line(buf: &[u8], pos: usize) -> Result<(&[u8], usize)> {
    let end = find_crlf(buf, pos).ok_or_else(|| decode_err("unterminated line"))?;
    Ok((&buf[pos..end], end + 2))
}

/// Read a decimal integer line (`<int>\r\n`) starting at `pos`.
fn read_integer_line(buf: &[u8], pos: usize) -> Result<(i64, usize)> {
    let (digits, next) = read_line(buf, pos)?;
    Ok((parse_decimal(digits)?, next))
}

/// Parse an optionally-signed decimal integer from raw digits
fn parse_decimal(digits: &[u8]) -> Result<i64> {
    let text =
        std::str::from_utf8(digits).map_err(|_| decode_err("non-ASCII bytes in decimal field"))?;
    text.parse::<i64>()
        .map_err(|_| decode_err(format!("invalid decimal field {:?}", text)))
}

/// Position of the first `\r\n` at or after `from`
fn find_crlf(buf: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i + 1 < buf.len() {
        if buf[i] == b'\r' && buf[i + 1] == b'\n' {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn to_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| decode_err("response payload is not valid UTF-8"))
}

fn decode_err(msg: impl Into<String>) -> KvWireError {
    KvWireError::ProtocolDecode(msg.into())
}

// =============================================================================
// Frame Boundary Detection
// =============================================================================

/// Length in bytes of the first complete frame in `buf`, or `None` if more
/// data is needed.
///
/// Used by the session channel to read exactly one full response from the
/// stream before handing it to [`decode_reply`]. Malformed markers or length
/// fields fail immediately rather than waiting for more bytes.
pub fn frame_len(buf: &[u8]) -> Result<Option<usize>> {
    frame_end(buf, 0)
}

/// Position past the frame starting at `pos`, or `None` if incomplete
fn frame_end(buf: &[u8], pos: usize) -> Result<Option<usize>> {
    match buf.get(pos).copied() {
        None => Ok(None),
        Some(b'+') | Some(b'-') | Some(b':') => Ok(find_crlf(buf, pos + 1).map(|i| i + 2)),
        Some(b'$') => {
            let Some(crlf) = find_crlf(buf, pos + 1) else {
                return Ok(None);
            };
            let len = parse_decimal(&buf[pos + 1..crlf])?;
            if len == -1 {
                return Ok(Some(crlf + 2));
            }
            if len < 0 || len as usize > MAX_BULK_SIZE {
                return Err(decode_err(format!("invalid bulk string length {}", len)));
            }
            let end = crlf + 2 + len as usize + 2;
            Ok((buf.len() >= end).then_some(end))
        }
        Some(b'*') => {
            let Some(crlf) = find_crlf(buf, pos + 1) else {
                return Ok(None);
            };
            let count = parse_decimal(&buf[pos + 1..crlf])?;
            let mut cursor = crlf + 2;
            if count < 0 {
                return Ok(Some(cursor));
            }
            for _ in 0..count {
                match frame_end(buf, cursor)? {
                    Some(end) => cursor = end,
                    None => return Ok(None),
                }
            }
            Ok(Some(cursor))
        }
        Some(other) => Err(decode_err(format!(
            "unexpected response marker: 0x{:02x}",
            other
        ))),
    }
}
