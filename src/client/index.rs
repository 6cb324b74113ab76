//! Secondary index maintenance
//!
//! An index entry `(name, leaf, reference)` is materialized two ways: set
//! membership of the reference in `name:leaf`, and a hash `ih:<name>`
//! mapping reference → its current leaf, so the previous leaf can be found
//! and retracted on re-indexing. Within one index name a reference maps to
//! at most one leaf at any time; the transaction bracket keeps observers
//! from ever seeing a reference under two leaves, or under none.
//!
//! This is not a unique index: many references may share one leaf (many
//! leads named "dhanya"), but one reference has one first name.

use super::{executor, expect_bulk, Client};
use crate::error::Result;
use crate::network::Channel;
use crate::protocol::Command;

/// Delimiter between index name and leaf in the membership key
const NAME_LEAF_DELIMITER: char = ':';

/// Namespace of the hash tying references to their current leaf
const INDEX_HASH_NAMESPACE: &str = "ih:";

impl<C: Channel> Client<C> {
    /// Index `key_reference` under `index_name:index_leaf`, retracting any
    /// previous leaf this reference was indexed under.
    ///
    /// All writes run in one transaction bracket. Idempotent: repeating a
    /// call with identical arguments only issues redundant writes.
    pub fn add_index(
        &self,
        index_name: &str,
        index_leaf: &str,
        key_reference: &str,
    ) -> Result<()> {
        let hash_key = self.hash_key(index_name);
        let new_member_key = self.member_key(index_name, index_leaf);

        self.with_channel_locked(|channel| {
            // Which leaf is this reference currently indexed under?
            let old_leaf =
                expect_bulk(executor::query(channel, &Command::hget(&hash_key, key_reference))?)?;

            executor::begin(channel)?;
            if let Some(old_leaf) = old_leaf.as_deref() {
                if old_leaf != index_leaf {
                    let old_member_key = self.member_key(index_name, old_leaf);
                    executor::queue(channel, &Command::hdel(&hash_key, key_reference))?;
                    executor::queue(channel, &Command::srem(&old_member_key, key_reference))?;
                }
            }
            executor::queue(channel, &Command::hset(&hash_key, key_reference, index_leaf))?;
            executor::queue(channel, &Command::sadd(&new_member_key, [key_reference]))?;
            executor::commit(channel)
        })
    }

    /// Remove the index entry for the given name, leaf and reference.
    ///
    /// No existence check: removing a non-member is a harmless no-op per
    /// the store's own removal semantics.
    pub fn remove_index(
        &self,
        index_name: &str,
        index_leaf: &str,
        key_reference: &str,
    ) -> Result<()> {
        let hash_key = self.hash_key(index_name);
        let member_key = self.member_key(index_name, index_leaf);

        self.with_channel_locked(|channel| {
            executor::begin(channel)?;
            executor::queue(channel, &Command::srem(&member_key, key_reference))?;
            executor::queue(channel, &Command::hdel(&hash_key, key_reference))?;
            executor::commit(channel)
        })
    }

    /// Membership set key for one leaf of an index
    fn member_key(&self, index_name: &str, leaf: &str) -> String {
        self.keyspace()
            .key(&format!("{}{}{}", index_name, NAME_LEAF_DELIMITER, leaf))
    }

    /// Hash key holding the reference → leaf mapping for an index
    fn hash_key(&self, index_name: &str) -> String {
        self.keyspace()
            .key(&format!("{}{}", INDEX_HASH_NAMESPACE, index_name))
    }
}
