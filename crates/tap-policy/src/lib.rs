// SPDX-License-Identifier: MIT OR Apache-2.0
//! tap-policy
//!
//! Profile resolution, group expansion, the allowlist safety filter, and
//! the pipeline executor that narrows a tool list through an ordered stack
//! of allow/deny layers.
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Rewrites group references into member tool ids.
pub mod expand;
/// Applies a single expanded policy to a tool list.
pub mod filter;
/// Groups runtime plugin tools by plugin id.
pub mod groups;
/// Runs the ordered pipeline of policy steps.
pub mod pipeline;
/// Resolves built-in and named profiles to policies.
pub mod resolve;
/// Strips allowlists that would silently disable every core tool.
pub mod safety;

pub use expand::expand;
pub use filter::filter;
pub use groups::plugin_groups;
pub use pipeline::run;
pub use resolve::{resolve_builtin, resolve_named};
pub use safety::{strip_plugin_only_allowlist, SafetyOutcome};

