//! Bidirectional relationship maps
//!
//! A pair `(a, b)` under key `k` is stored as two zero-scored members `a:b`
//! and `b:a` of one sorted collection, so either side can be range-scanned.
//! Add and remove each run inside a transaction bracket: both directions
//! appear and disappear together, never one without the other.

use super::{executor, Client};
use crate::error::Result;
use crate::network::Channel;
use crate::protocol::Command;

/// Delimiter between the two ids of a directed member
const PAIR_DELIMITER: char = ':';

/// Both directed members for each pair, in wire order
pub(crate) fn directed_members(pairs: &[(&str, &str)]) -> Vec<String> {
    pairs
        .iter()
        .flat_map(|(a, b)| {
            [
                format!("{}{}{}", a, PAIR_DELIMITER, b),
                format!("{}{}{}", b, PAIR_DELIMITER, a),
            ]
        })
        .collect()
}

impl<C: Channel> Client<C> {
    /// Establish two-way mappings: for each pair `(a, b)`, members `a:b`
    /// and `b:a` are added to the sorted collection at `key`.
    pub fn two_way_map_add(&self, key: &str, pairs: &[(&str, &str)]) -> Result<()> {
        let key = self.keyspace().key(key);
        let members = directed_members(pairs);

        self.with_channel_locked(|channel| {
            executor::begin(channel)?;
            executor::queue(channel, &Command::zadd_zero_scored(&key, members))?;
            executor::commit(channel)
        })
    }

    /// Reverse [`two_way_map_add`](Self::two_way_map_add): both directed
    /// members of each pair are removed together.
    pub fn two_way_map_remove(&self, key: &str, pairs: &[(&str, &str)]) -> Result<()> {
        let key = self.keyspace().key(key);
        let members = directed_members(pairs);

        self.with_channel_locked(|channel| {
            executor::begin(channel)?;
            executor::queue(channel, &Command::zrem(&key, members))?;
            executor::commit(channel)
        })
    }
}
