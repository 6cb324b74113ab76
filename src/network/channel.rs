//! Session channel
//!
//! Owns the byte-level request/response exchange with the store. The codec
//! never touches the transport; the channel never interprets reply payloads
//! beyond locating the frame boundary.

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::{KvWireError, Result};
use crate::protocol::{self, Command};

/// Byte-level request/response transport
///
/// Synchronous and blocking: one full response per request, no pipelining.
/// Implementations are not safe for concurrent invocation; the client
/// serializes access to its channel.
pub trait Channel {
    /// Send one encoded request and read back one complete response
    fn send(&mut self, request: &[u8]) -> Result<Vec<u8>>;
}

/// TCP transport with a liveness handshake at construction
///
/// Construction distinguishes "never connected" ([`KvWireError::Connection`])
/// from "connected but the peer does not speak the protocol"
/// ([`KvWireError::NoServerRunning`]). I/O failures after construction
/// surface per call as [`KvWireError::Communication`].
pub struct SessionChannel {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging and error messages
    peer_addr: String,
}

impl SessionChannel {
    /// Connect to the store and verify it speaks the protocol
    pub fn connect(config: &Config) -> Result<Self> {
        let addr = config.address();
        let stream = TcpStream::connect(&addr).map_err(|e| KvWireError::Connection {
            addr: addr.clone(),
            source: e,
        })?;

        Self::configure(&stream, config).map_err(|e| KvWireError::Connection {
            addr: addr.clone(),
            source: e,
        })?;

        let read_stream = stream.try_clone().map_err(|e| KvWireError::Connection {
            addr: addr.clone(),
            source: e,
        })?;

        let mut channel = Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            peer_addr: addr,
        };

        channel.handshake()?;
        tracing::debug!("session established with {}", channel.peer_addr);
        Ok(channel)
    }

    /// Disable Nagle's algorithm and apply the round-trip deadlines
    fn configure(stream: &TcpStream, config: &Config) -> std::io::Result<()> {
        stream.set_nodelay(true)?;
        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }
        Ok(())
    }

    /// Liveness handshake: the peer must answer `ping` with a reply
    /// containing `PONG` before the channel is considered usable.
    fn handshake(&mut self) -> Result<()> {
        let ping = protocol::encode_to_vec(&Command::ping());
        let reply = self
            .exchange(&ping)
            .map_err(|e| KvWireError::NoServerRunning {
                addr: self.peer_addr.clone(),
                detail: e.to_string(),
            })?;

        if !reply.windows(4).any(|w| w == b"PONG") {
            return Err(KvWireError::NoServerRunning {
                addr: self.peer_addr.clone(),
                detail: format!(
                    "unexpected handshake reply: {:?}",
                    String::from_utf8_lossy(&reply)
                ),
            });
        }
        Ok(())
    }

    /// Write one request, then read until the codec reports one whole frame
    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.writer
            .write_all(request)
            .map_err(KvWireError::Communication)?;
        self.writer.flush().map_err(KvWireError::Communication)?;

        let mut response = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            if let Some(len) = protocol::frame_len(&response)? {
                response.truncate(len);
                return Ok(response);
            }

            let n = self
                .reader
                .read(&mut chunk)
                .map_err(KvWireError::Communication)?;
            if n == 0 {
                return Err(KvWireError::Communication(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "connection closed mid-response",
                )));
            }
            response.extend_from_slice(&chunk[..n]);
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Channel for SessionChannel {
    fn send(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        tracing::trace!("sending {} bytes to {}", request.len(), self.peer_addr);
        self.exchange(request)
    }
}
