//! Client Module
//!
//! The public operation surface over the command executor: plain key-value
//! and set commands, typed JSON entities, the transaction bracket, and the
//! derived data-modeling operations (secondary indexes, two-way maps,
//! autocomplete; see the submodules).

mod autocomplete;
mod executor;
mod index;
mod result;
mod twoway;

pub use autocomplete::AutocompleteItem;
pub use result::CommandResult;

pub(crate) use twoway::directed_members;

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{KvWireError, Result};
use crate::network::{Channel, SessionChannel};
use crate::protocol::{Command, Reply};

/// Applies the configured tenant prefix to every caller-supplied key and
/// index name. One component owns the prefix so call sites never assemble
/// prefixed keys by hand.
pub(crate) struct Keyspace {
    prefix: String,
}

impl Keyspace {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    pub(crate) fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    pub(crate) fn keys(&self, keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| self.key(k)).collect()
    }
}

/// Synchronous store client
///
/// Generic over the transport so the whole command pipeline can run against
/// a scripted channel in tests; [`Client::connect`] builds the TCP-backed
/// client. Calls serialize on an internal mutex, so methods take `&self`
/// and the client may be shared across threads, but a transaction bracket
/// spans several calls, and callers sharing one client must coordinate
/// around a bracket themselves.
pub struct Client<C: Channel = SessionChannel> {
    channel: Mutex<C>,
    keyspace: Keyspace,
}

impl Client<SessionChannel> {
    /// Connect to the store described by `config`
    pub fn connect(config: &Config) -> Result<Self> {
        let channel = SessionChannel::connect(config)?;
        Ok(Self::with_channel(channel, config))
    }
}

impl<C: Channel> Client<C> {
    /// Build a client over an already-established channel
    pub fn with_channel(channel: C, config: &Config) -> Self {
        Self {
            channel: Mutex::new(channel),
            keyspace: Keyspace::new(&config.key_prefix),
        }
    }

    // =========================================================================
    // Plain key-value commands
    // =========================================================================

    /// `set key value`
    pub fn set(&self, key: &str, value: &str) -> Result<CommandResult> {
        self.execute(&Command::set(&self.keyspace.key(key), value))
    }

    /// `get key`; `None` when the key does not exist
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let reply = self.query(&Command::get(&self.keyspace.key(key)))?;
        expect_bulk(reply)
    }

    /// `sadd key member...`: add members to the set at `key`, creating it
    /// if absent. Members already present are ignored by the store.
    pub fn set_add(&self, key: &str, members: &[&str]) -> Result<CommandResult> {
        self.execute(&Command::sadd(
            &self.keyspace.key(key),
            members.iter().copied(),
        ))
    }

    /// `zadd key score member`: one member at a time
    pub fn sorted_set_add(&self, key: &str, score: i64, member: &str) -> Result<CommandResult> {
        self.execute(&Command::zadd(&self.keyspace.key(key), score, member))
    }

    /// `sinter set...`: members common to all given sets. Typically used
    /// on index sets to simulate a relational join.
    pub fn set_intersect(&self, sets: &[&str]) -> Result<Vec<String>> {
        let reply = self.query(&Command::sinter(self.keyspace.keys(sets)))?;
        expect_members(reply)
    }

    /// `sunion set...`: members present in any of the given sets
    pub fn set_union(&self, sets: &[&str]) -> Result<Vec<String>> {
        let reply = self.query(&Command::sunion(self.keyspace.keys(sets)))?;
        expect_members(reply)
    }

    // =========================================================================
    // Typed entities (JSON)
    // =========================================================================

    /// Serialize `entity` as JSON and store it at `key`
    pub fn set_entity<T: Serialize>(&self, key: &str, entity: &T) -> Result<CommandResult> {
        let json =
            serde_json::to_string(entity).map_err(|e| KvWireError::EntityEncode(e.to_string()))?;
        self.execute(&Command::set(&self.keyspace.key(key), &json))
    }

    /// Fetch and deserialize the entity at `key`; `None` when the key does
    /// not exist. A stored value that does not decode as `T` fails with
    /// [`KvWireError::EntityDecode`] carrying the raw value.
    pub fn get_entity<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                KvWireError::EntityDecode {
                    raw,
                    reason: e.to_string(),
                }
            }),
        }
    }

    /// `mget` over several keys, deserializing each stored value.
    ///
    /// The result maps the caller-supplied key (without prefix) to its
    /// entity; keys the store holds no value for are absent from the map.
    pub fn get_entities<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<HashMap<String, T>> {
        let reply = self.query(&Command::mget(self.keyspace.keys(keys)))?;
        let Reply::Array(values) = reply else {
            return Err(unexpected_reply("array", &reply));
        };
        if values.len() != keys.len() {
            return Err(KvWireError::ProtocolDecode(format!(
                "mget returned {} values for {} keys",
                values.len(),
                keys.len()
            )));
        }

        let mut entities = HashMap::new();
        for (key, value) in keys.iter().zip(values) {
            if let Some(raw) = value {
                let entity =
                    serde_json::from_str(&raw).map_err(|e| KvWireError::EntityDecode {
                        raw,
                        reason: e.to_string(),
                    })?;
                entities.insert((*key).to_string(), entity);
            }
        }
        Ok(entities)
    }

    // =========================================================================
    // Transaction bracket
    // =========================================================================

    /// Open a transaction bracket. Subsequent commands are queued by the
    /// store, not executed, until [`run_transaction`](Self::run_transaction)
    /// or [`cancel_transaction`](Self::cancel_transaction).
    pub fn start_transaction(&self) -> Result<()> {
        self.execute(&Command::multi()).map(drop)
    }

    /// Commit the bracket: queued commands execute atomically and in order.
    ///
    /// The returned result classifies the aggregate reply only; per-command
    /// outcomes inside the bracket are not split out.
    pub fn run_transaction(&self) -> Result<CommandResult> {
        self.execute(&Command::exec())
    }

    /// Discard the bracket's queued commands
    pub fn cancel_transaction(&self) -> Result<()> {
        self.execute(&Command::discard()).map(drop)
    }

    // =========================================================================
    // Internal plumbing
    // =========================================================================

    pub(crate) fn execute(&self, command: &Command) -> Result<CommandResult> {
        executor::execute(&mut *self.channel.lock(), command)
    }

    pub(crate) fn query(&self, command: &Command) -> Result<Reply> {
        executor::query(&mut *self.channel.lock(), command)
    }

    pub(crate) fn query_raw(&self, request: &[u8]) -> Result<Reply> {
        executor::query_raw(&mut *self.channel.lock(), request)
    }

    pub(crate) fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    /// Run `f` with the channel locked for the whole scope. The composite
    /// relational operations use this so their transaction bracket cannot
    /// be interleaved by other callers of the same client.
    pub(crate) fn with_channel_locked<R>(&self, f: impl FnOnce(&mut C) -> Result<R>) -> Result<R> {
        f(&mut *self.channel.lock())
    }
}

pub(crate) fn expect_bulk(reply: Reply) -> Result<Option<String>> {
    match reply {
        Reply::Bulk(value) => Ok(value),
        other => Err(unexpected_reply("bulk string", &other)),
    }
}

pub(crate) fn expect_members(reply: Reply) -> Result<Vec<String>> {
    let kind = reply.kind();
    reply
        .into_members()
        .ok_or_else(|| KvWireError::ProtocolDecode(format!("expected array reply, got {}", kind)))
}

pub(crate) fn unexpected_reply(expected: &str, got: &Reply) -> KvWireError {
    KvWireError::ProtocolDecode(format!("expected {} reply, got {}", expected, got.kind()))
}
