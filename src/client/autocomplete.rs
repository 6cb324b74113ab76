//! Prefix-searchable autocomplete sets
//!
//! Values are stored as zero-scored members `lowercase(value):value:id` of
//! a sorted collection, so lexicographic range queries double as
//! case-insensitive prefix search. The normalized field exists purely for
//! ordering and is discarded on decode.

use bytes::BytesMut;

use super::{expect_members, Client, CommandResult};
use crate::error::Result;
use crate::network::Channel;
use crate::protocol::{self, Command};

/// Field delimiter inside a composite member.
///
/// The 3-way split on decode takes the first two fields as normalized and
/// original value and everything after the second delimiter as the id, so a
/// `value` containing the delimiter breaks retrieval.
const MEMBER_DELIMITER: char = ':';

/// One searchable value with its record id
///
/// Autocomplete results usually need an id alongside each matching value;
/// this packages the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteItem {
    /// The value searched on, in its original casing
    pub value: String,

    /// The id associated with the value
    pub id: String,
}

impl AutocompleteItem {
    pub fn new(value: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            id: id.into(),
        }
    }

    /// Composite member form `lowercase(value):value:id`
    pub(crate) fn to_member(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.value.to_lowercase(),
            self.value,
            self.id,
            sep = MEMBER_DELIMITER
        )
    }

    /// Split a composite member back into value and id
    pub(crate) fn from_member(member: &str) -> Option<Self> {
        let mut fields = member.splitn(3, MEMBER_DELIMITER);
        let _normalized = fields.next()?;
        let value = fields.next()?;
        let id = fields.next()?;
        Some(Self::new(value, id))
    }
}

impl<C: Channel> Client<C> {
    /// Add items to a prefix-searchable index
    pub fn autocomplete_add(
        &self,
        index: &str,
        items: &[AutocompleteItem],
    ) -> Result<CommandResult> {
        let key = self.keyspace().key(index);
        let members = items.iter().map(AutocompleteItem::to_member);
        self.execute(&Command::zadd_zero_scored(&key, members))
    }

    /// Case-insensitive prefix search over an autocomplete index
    pub fn autocomplete_search(&self, index: &str, search: &str) -> Result<Vec<AutocompleteItem>> {
        let key = self.keyspace().key(index);
        let needle = search.to_lowercase();
        let lower = format!("[{}", needle);
        // The exclusive upper bound is the prefix plus the maximal byte,
        // which is not printable: encode with a trailing placeholder, then
        // patch the final content byte.
        let upper = format!("[{} ", needle);

        let mut request = BytesMut::new();
        protocol::encode_command(&Command::zrangebylex(&key, &lower, &upper), &mut request);
        protocol::patch_range_upper_bound(&mut request);

        let members = expect_members(self.query_raw(&request)?)?;
        let mut items = Vec::with_capacity(members.len());
        for member in members {
            match AutocompleteItem::from_member(&member) {
                Some(item) => items.push(item),
                None => tracing::warn!("skipping malformed autocomplete member {:?}", member),
            }
        }
        Ok(items)
    }
}
