//! Export file sink
//!
//! Serializes the same encoded commands to a file instead of a socket, for
//! offline bulk-load script generation. The encode step is byte-identical
//! to the session path; only the sink differs. The file is opened in append
//! mode per write, so an export can be built up across several helpers or
//! runs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::client::{directed_members, AutocompleteItem};
use crate::error::{KvWireError, Result};
use crate::protocol::{self, Command};

/// Appends encoded commands to a bulk-load file
///
/// No key prefixing happens here: export files are addressed to whatever
/// store instance later replays them.
pub struct ExportFile {
    path: PathBuf,
}

impl ExportFile {
    /// Export to `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `set key value`
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.append(&Command::set(key, value))
    }

    /// `sadd key member...`
    pub fn set_add(&self, key: &str, members: &[&str]) -> Result<()> {
        self.append(&Command::sadd(key, members.iter().copied()))
    }

    /// `set key <json>` with the entity serialized the way the client
    /// stores it
    pub fn set_entity<T: Serialize>(&self, key: &str, entity: &T) -> Result<()> {
        let json =
            serde_json::to_string(entity).map_err(|e| KvWireError::EntityEncode(e.to_string()))?;
        self.append(&Command::set(key, &json))
    }

    /// Autocomplete members in their composite form, at score zero
    pub fn autocomplete_add(&self, index: &str, items: &[AutocompleteItem]) -> Result<()> {
        self.append(&Command::zadd_zero_scored(
            index,
            items.iter().map(AutocompleteItem::to_member),
        ))
    }

    /// Both directed members of each pair, at score zero
    pub fn two_way_map_add(&self, key: &str, pairs: &[(&str, &str)]) -> Result<()> {
        self.append(&Command::zadd_zero_scored(key, directed_members(pairs)))
    }

    fn append(&self, command: &Command) -> Result<()> {
        let bytes = protocol::encode_to_vec(command);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&bytes)?;
        tracing::trace!(
            "appended {} ({} bytes) to {}",
            command.verb(),
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }
}
