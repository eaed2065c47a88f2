// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in and named profile types.

use crate::policy::Policy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The fixed set of built-in profiles. `Full` always resolves to an
/// unrestricted policy (no allow, no deny).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinProfile {
    /// A small, curated allowlist of safe tools.
    Minimal,
    /// Tools relevant to coding tasks.
    Coding,
    /// Tools relevant to messaging/communication tasks.
    Messaging,
    /// No restriction.
    Full,
}

impl BuiltinProfile {
    /// All built-in profiles.
    pub const ALL: [BuiltinProfile; 4] = [
        BuiltinProfile::Minimal,
        BuiltinProfile::Coding,
        BuiltinProfile::Messaging,
        BuiltinProfile::Full,
    ];

    /// The lowercase name used in configuration (`"minimal"`, `"coding"`, …).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinProfile::Minimal => "minimal",
            BuiltinProfile::Coding => "coding",
            BuiltinProfile::Messaging => "messaging",
            BuiltinProfile::Full => "full",
        }
    }

    /// Parse a profile name, case-sensitive (names are already normalized
    /// by callers via [`crate`]'s normalizer conventions upstream).
    #[must_use]
    pub fn from_name(name: &str) -> Option<BuiltinProfile> {
        BuiltinProfile::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// A user-defined profile: an optional `extends` parent plus its own
/// allow/deny contributions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NamedProfile {
    /// Parent profile name (named or built-in) this profile extends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// This profile's own allowlist contribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
    /// This profile's own denylist contribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny: Option<Vec<String>>,
}

/// The chain of profile names visited while resolving a named profile,
/// together with the merged, deny-filtered effective sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionTrace {
    /// Ordered chain of profile names visited, starting with the requested
    /// profile.
    pub resolved_from: Vec<String>,
    /// The merged allowlist after deny-filtering.
    pub effective_allow: Vec<String>,
    /// The merged denylist.
    pub effective_deny: Vec<String>,
}

impl ResolutionTrace {
    /// Convert the trace's effective sets into a [`Policy`].
    #[must_use]
    pub fn to_policy(&self) -> Policy {
        Policy {
            allow: if self.effective_allow.is_empty() {
                None
            } else {
                Some(self.effective_allow.clone())
            },
            deny: if self.effective_deny.is_empty() {
                None
            } else {
                Some(self.effective_deny.clone())
            },
        }
    }
}
