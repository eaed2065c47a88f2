// SPDX-License-Identifier: MIT OR Apache-2.0
//! tap-core
//!
//! The stable data model for the tool-access policy engine: the catalog's
//! [`Tool`] shape, the [`Policy`]/[`PolicyEntry`] representation that every
//! layer in the pipeline operates on, named-profile configuration, pipeline
//! steps, diagnostics, and the session override record.
//!
//! This crate has no behavior of its own — resolution, expansion, and
//! filtering live in `tap-catalog` and `tap-policy`. If a type here grows an
//! algorithm beyond a constructor or a cheap accessor, it has drifted out of
//! scope for this crate.
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Diagnostic warnings emitted by a pipeline run.
pub mod diagnostic;
/// Named and built-in profile configuration.
pub mod profile;
/// Policy and policy-entry types.
pub mod policy;
/// Per-session override record.
pub mod session;
/// Tool catalog entries and sections.
pub mod tool;

pub use diagnostic::Warning;
pub use policy::{Policy, PolicyEntry};
pub use profile::{BuiltinProfile, NamedProfile, ResolutionTrace};
pub use session::{PromptListingMode, SessionOverrideRecord};
pub use tool::{Section, Tool};

/// A single pipeline layer: an optional policy, a diagnostic label, and
/// whether the allowlist safety filter applies to this step.
///
/// `policy` absent means the step is a no-op placeholder (e.g. a provider
/// override that was never configured); the executor skips it without
/// touching the working set.
#[derive(Debug, Clone, Default)]
pub struct PipelineStep {
    /// The allow/deny policy for this layer, if any.
    pub policy: Option<Policy>,
    /// Human-readable label used in diagnostic messages (e.g.
    /// `"tools.profile (coding)"`).
    pub label: String,
    /// Whether the plugin-only-allowlist safety filter runs before this
    /// step's policy is applied.
    pub strip_plugin_only_allowlist: bool,
}

impl PipelineStep {
    /// Construct a step with the safety filter enabled.
    #[must_use]
    pub fn new(label: impl Into<String>, policy: Option<Policy>) -> Self {
        Self {
            policy,
            label: label.into(),
            strip_plugin_only_allowlist: true,
        }
    }

    /// Construct a no-op step (useful for unconfigured layers).
    #[must_use]
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            policy: None,
            label: label.into(),
            strip_plugin_only_allowlist: false,
        }
    }
}

/// Context describing the named profile a pipeline run was evaluated under,
/// used only to decide whether to emit the headline-tool-loss warning.
#[derive(Debug, Clone)]
pub struct NamedProfileContext {
    /// The profile's name, as it appears in warning messages.
    pub profile_name: String,
    /// Tools the profile advertises as its signature capability.
    pub headline_tools: Vec<String>,
}
