//! Codec Tests
//!
//! Tests for command encoding, reply decoding and frame boundary detection.

use bytes::BytesMut;
use kvwire::protocol::{
    decode_reply, encode_command, encode_to_vec, frame_len, patch_range_upper_bound,
};
use kvwire::{Command, KvWireError, Reply};

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_set() {
    let encoded = encode_to_vec(&Command::set("z", "26"));
    assert_eq!(encoded, b"*3\r\n$3\r\nset\r\n$1\r\nz\r\n$2\r\n26\r\n");
}

#[test]
fn test_encode_header_counts_arguments() {
    let cmd = Command::new("sadd").arg("key").args(["m1", "m2", "m3"]);
    let encoded = encode_to_vec(&cmd);
    assert!(encoded.starts_with(b"*5\r\n"));
}

#[test]
fn test_encode_declared_lengths_match_byte_lengths() {
    // Multi-byte UTF-8 argument: declared length must count bytes, not chars
    let cmd = Command::set("key", "héllo");
    let encoded = encode_to_vec(&cmd);
    let expected = b"*3\r\n$3\r\nset\r\n$3\r\nkey\r\n$6\r\nh\xc3\xa9llo\r\n";
    assert_eq!(encoded, expected);
}

#[test]
fn test_encode_empty_argument() {
    let encoded = encode_to_vec(&Command::set("key", ""));
    assert_eq!(encoded, b"*3\r\n$3\r\nset\r\n$3\r\nkey\r\n$0\r\n\r\n");
}

#[test]
fn test_encode_single_element_command() {
    let encoded = encode_to_vec(&Command::ping());
    assert_eq!(encoded, b"*1\r\n$4\r\nping\r\n");
}

#[test]
fn test_patch_range_upper_bound() {
    // The upper bound carries a placeholder space; after the patch the last
    // content byte is 0xFF and the declared length still matches.
    let mut buf = BytesMut::new();
    encode_command(&Command::zrangebylex("names", "[mo", "[mo "), &mut buf);
    patch_range_upper_bound(&mut buf);

    let expected: &[u8] =
        b"*4\r\n$11\r\nzrangebylex\r\n$5\r\nnames\r\n$3\r\n[mo\r\n$4\r\n[mo\xff\r\n";
    assert_eq!(&buf[..], expected);
}

// =============================================================================
// Reply Decoding Tests
// =============================================================================

#[test]
fn test_decode_bulk_string() {
    let reply = decode_reply(b"$5\r\nhello\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(Some("hello".to_string())));
}

#[test]
fn test_decode_empty_bulk_string() {
    let reply = decode_reply(b"$0\r\n\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(Some(String::new())));
}

#[test]
fn test_decode_null_bulk_string() {
    let reply = decode_reply(b"$-1\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(None));
}

#[test]
fn test_decode_simple_string() {
    let reply = decode_reply(b"+OK\r\n").unwrap();
    assert_eq!(reply, Reply::Simple("OK".to_string()));
}

#[test]
fn test_decode_error_trims_terminator() {
    let reply = decode_reply(b"-ERR bad value\r\n").unwrap();
    assert_eq!(reply, Reply::Error("ERR bad value".to_string()));
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode_reply(b":1000\r\n").unwrap(), Reply::Integer(1000));
    assert_eq!(decode_reply(b":0\r\n").unwrap(), Reply::Integer(0));
    assert_eq!(decode_reply(b":-5\r\n").unwrap(), Reply::Integer(-5));
}

#[test]
fn test_decode_array() {
    let reply = decode_reply(b"*2\r\n$1\r\na\r\n$1\r\nb\r\n").unwrap();
    assert_eq!(
        reply,
        Reply::Array(vec![Some("a".to_string()), Some("b".to_string())])
    );
}

#[test]
fn test_decode_array_with_integers_and_nulls() {
    let reply = decode_reply(b"*3\r\n$1\r\na\r\n:3\r\n$-1\r\n").unwrap();
    assert_eq!(
        reply,
        Reply::Array(vec![Some("a".to_string()), Some("3".to_string()), None])
    );
}

#[test]
fn test_decode_empty_array() {
    assert_eq!(decode_reply(b"*0\r\n").unwrap(), Reply::Array(vec![]));
}

#[test]
fn test_decode_null_array() {
    assert_eq!(decode_reply(b"*-1\r\n").unwrap(), Reply::Array(vec![]));
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_decode_empty_buffer() {
    let result = decode_reply(b"");
    assert!(matches!(result, Err(KvWireError::ProtocolDecode(_))));
}

#[test]
fn test_decode_unknown_marker() {
    let result = decode_reply(b"@5\r\nhello\r\n");
    assert!(matches!(result, Err(KvWireError::ProtocolDecode(_))));
}

#[test]
fn test_decode_truncated_bulk_payload() {
    // Declared length runs past the end of the buffer
    let result = decode_reply(b"$5\r\nhel");
    assert!(matches!(result, Err(KvWireError::ProtocolDecode(_))));
}

#[test]
fn test_decode_bulk_missing_terminator() {
    let result = decode_reply(b"$5\r\nhelloXX");
    assert!(matches!(result, Err(KvWireError::ProtocolDecode(_))));
}

#[test]
fn test_decode_truncated_array() {
    // Header promises two elements, buffer holds one
    let result = decode_reply(b"*2\r\n$1\r\na\r\n");
    assert!(matches!(result, Err(KvWireError::ProtocolDecode(_))));
}

#[test]
fn test_decode_non_numeric_length() {
    let result = decode_reply(b"$abc\r\nhello\r\n");
    assert!(matches!(result, Err(KvWireError::ProtocolDecode(_))));
}

#[test]
fn test_decode_oversized_bulk_length() {
    // A parsed length beyond the accepted maximum must fail, not allocate
    let result = decode_reply(b"$99999999999\r\n");
    assert!(matches!(result, Err(KvWireError::ProtocolDecode(_))));
}

#[test]
fn test_decode_unterminated_line() {
    let result = decode_reply(b"+OK");
    assert!(matches!(result, Err(KvWireError::ProtocolDecode(_))));
}

// =============================================================================
// Frame Boundary Tests
// =============================================================================

#[test]
fn test_frame_len_complete_simple() {
    assert_eq!(frame_len(b"+OK\r\n").unwrap(), Some(5));
}

#[test]
fn test_frame_len_incomplete_line() {
    assert_eq!(frame_len(b"+OK").unwrap(), None);
    assert_eq!(frame_len(b"").unwrap(), None);
}

#[test]
fn test_frame_len_bulk_waits_for_payload() {
    assert_eq!(frame_len(b"$5\r\nhel").unwrap(), None);
    assert_eq!(frame_len(b"$5\r\nhello\r\n").unwrap(), Some(11));
}

#[test]
fn test_frame_len_null_bulk() {
    assert_eq!(frame_len(b"$-1\r\n").unwrap(), Some(5));
}

#[test]
fn test_frame_len_array_spans_elements() {
    let full = b"*2\r\n$1\r\na\r\n$1\r\nb\r\n";
    assert_eq!(frame_len(&full[..10]).unwrap(), None);
    assert_eq!(frame_len(full).unwrap(), Some(full.len()));
}

#[test]
fn test_frame_len_ignores_trailing_bytes() {
    assert_eq!(frame_len(b"+OK\r\n:1\r\n").unwrap(), Some(5));
}

#[test]
fn test_frame_len_rejects_bad_marker() {
    assert!(frame_len(b"@nope\r\n").is_err());
}
