//! Shared test plumbing: a scripted in-memory channel standing in for the
//! TCP session, so the full command pipeline (encode → exchange → decode →
//! classify) runs without a server.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use kvwire::protocol::encode_to_vec;
use kvwire::{Channel, Command, Config, Result};

/// Shared log of the raw requests a client sent, inspectable after the
/// channel has moved into the client
#[derive(Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<Vec<u8>>>>);

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all recorded requests
    pub fn take(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// Channel that records every request and plays back scripted responses in
/// order. When the script runs dry it answers `+OK\r\n`.
pub struct ScriptedChannel {
    log: RequestLog,
    replies: VecDeque<Vec<u8>>,
}

impl ScriptedChannel {
    pub fn new(log: RequestLog) -> Self {
        Self {
            log,
            replies: VecDeque::new(),
        }
    }

    /// Queue one raw response
    pub fn reply(mut self, raw: &str) -> Self {
        self.replies.push_back(raw.as_bytes().to_vec());
        self
    }
}

impl Channel for ScriptedChannel {
    fn send(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.log.0.lock().unwrap().push(request.to_vec());
        Ok(self
            .replies
            .pop_front()
            .unwrap_or_else(|| b"+OK\r\n".to_vec()))
    }
}

/// The exact bytes the codec puts on the wire for `command`
pub fn wire(command: &Command) -> Vec<u8> {
    encode_to_vec(command)
}

/// Config with no prefix and default timeouts
pub fn config() -> Config {
    Config::default()
}

/// Config with a key prefix
pub fn config_with_prefix(prefix: &str) -> Config {
    Config::builder().key_prefix(prefix).build()
}
