// SPDX-License-Identifier: MIT OR Apache-2.0
//! tap-store
//!
//! The Session Override Store — the only stateful component of the
//! tool-access policy engine — and the `/tools:reset` command handler
//! built on top of it.
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// The `/tools:reset` chat command handler.
pub mod reset;
/// Per-session override persistence.
pub mod store;

pub use reset::{handle_reset_command, CommandOutcome};
pub use store::SessionStore;
