//! Command executor
//!
//! The single path for every command round-trip: encode, exchange over the
//! channel, decode, classify. Mutating commands go through [`execute`] and
//! get a [`CommandResult`]; read-only commands go through [`query`] and get
//! a typed [`Reply`], with a store rejection surfaced as an error.

use super::CommandResult;
use crate::error::{KvWireError, Result};
use crate::network::Channel;
use crate::protocol::{self, Command, Reply};

/// Run a mutating command and classify the outcome.
///
/// A store-side rejection lands in the result (`success == false`), not in
/// `Err`, deliberately recoverable and inspectable by the caller.
pub(crate) fn execute<C: Channel>(channel: &mut C, command: &Command) -> Result<CommandResult> {
    let reply = exchange(channel, &protocol::encode_to_vec(command))?;
    let result = CommandResult::from_reply(&reply);
    if !result.success {
        tracing::debug!(
            "store rejected {}: {:?}",
            command.verb(),
            result.error_message
        );
    }
    Ok(result)
}

/// Run a read-only command. A store rejection is an error on this path,
/// since there is no result object to carry it.
pub(crate) fn query<C: Channel>(channel: &mut C, command: &Command) -> Result<Reply> {
    query_raw(channel, &protocol::encode_to_vec(command))
}

/// Like [`query`] but over pre-encoded request bytes. Used by the prefix
/// search, whose upper bound byte is patched after encoding.
pub(crate) fn query_raw<C: Channel>(channel: &mut C, request: &[u8]) -> Result<Reply> {
    match exchange(channel, request)? {
        Reply::Error(message) => Err(KvWireError::StoreCommand(message)),
        reply => Ok(reply),
    }
}

fn exchange<C: Channel>(channel: &mut C, request: &[u8]) -> Result<Reply> {
    let raw = channel.send(request)?;
    protocol::decode_reply(&raw)
}

// =============================================================================
// Transaction bracket plumbing
// =============================================================================
//
// Inside a bracket the store only acknowledges queueing; the true effects
// are known after commit. These helpers keep the composite relational
// operations honest: a rejection at queue time poisons the bracket, so the
// queue is discarded and the rejection surfaces instead of half a bracket
// committing.

/// Open a transaction bracket
pub(crate) fn begin<C: Channel>(channel: &mut C) -> Result<()> {
    check(execute(channel, &Command::multi())?)
}

/// Queue one command inside an open bracket, discarding the bracket if the
/// store rejects the command at queue time
pub(crate) fn queue<C: Channel>(channel: &mut C, command: &Command) -> Result<()> {
    let result = execute(channel, command)?;
    if !result.success {
        let _ = execute(channel, &Command::discard());
    }
    check(result)
}

/// Commit the open bracket. The aggregate reply is classified as a whole;
/// per-command sub-results are not split out.
pub(crate) fn commit<C: Channel>(channel: &mut C) -> Result<()> {
    check(execute(channel, &Command::exec())?)
}

fn check(result: CommandResult) -> Result<()> {
    if result.success {
        Ok(())
    } else {
        Err(KvWireError::StoreCommand(
            result.error_message.unwrap_or_default(),
        ))
    }
}
