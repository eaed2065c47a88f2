// SPDX-License-Identifier: MIT OR Apache-2.0
//! Thin bridge from the `/tools:reset` chat command to the [`SessionStore`].

use crate::store::SessionStore;
use std::collections::BTreeSet;
use tap_error::EngineError;

const RESET_COMMAND: &str = "/tools:reset";

/// Result of dispatching a chat message through [`handle_reset_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Reply text to send back to the chat, if any.
    pub reply: Option<String>,
    /// Whether the dispatcher should stop and not try further handlers.
    pub stop_propagation: bool,
}

impl CommandOutcome {
    fn not_matched() -> Self {
        Self {
            reply: None,
            stop_propagation: false,
        }
    }

    fn handled(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            stop_propagation: true,
        }
    }

    fn silently_ignored() -> Self {
        Self {
            reply: None,
            stop_propagation: true,
        }
    }
}

/// Dispatch a chat message body against the `/tools:reset` command.
///
/// Returns a non-stopping, reply-less outcome if `body` does not
/// normalize to the reset command, so this can sit ahead of other
/// handlers in a dispatch chain. Unauthorized senders are silently
/// ignored. A matched command with no active session replies with an
/// explanation rather than mutating anything.
///
/// # Errors
/// Propagates storage errors from the underlying [`SessionStore::reset`].
pub async fn handle_reset_command(
    body: &str,
    sender: &str,
    authorized_senders: &BTreeSet<String>,
    session_key: Option<&str>,
    store: &SessionStore,
) -> Result<CommandOutcome, EngineError> {
    if body.trim() != RESET_COMMAND {
        return Ok(CommandOutcome::not_matched());
    }
    if !authorized_senders.contains(sender) {
        return Ok(CommandOutcome::silently_ignored());
    }
    let Some(session_key) = session_key else {
        return Ok(CommandOutcome::handled(
            "Cannot reset tool overrides: no active session.",
        ));
    };

    let had_overrides = store.reset(session_key).await?;
    Ok(CommandOutcome::handled(if had_overrides {
        "Tool overrides cleared. Tools restored to config baseline."
    } else {
        "No tool overrides were active."
    }))
}
