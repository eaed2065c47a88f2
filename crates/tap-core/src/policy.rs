// SPDX-License-Identifier: MIT OR Apache-2.0
//! Policy and policy-entry types.

use serde::{Deserialize, Serialize};

/// An allow/deny policy. `allow: None` means "unrestricted allow" (every
/// tool passes the allow check); `deny: None` behaves like an empty deny
/// list. A policy with both fields `None` is the identity — applying it
/// leaves the working set untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Ordered allowlist entries (tool ids or group references), or `None`
    /// for "no restriction".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
    /// Ordered denylist entries (tool ids or group references).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny: Option<Vec<String>>,
}

impl Policy {
    /// The identity policy: no allow restriction, no deny entries.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Construct a policy with only an allowlist.
    #[must_use]
    pub fn allow_only(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allow: Some(entries.into_iter().map(Into::into).collect()),
            deny: None,
        }
    }

    /// Construct a policy with only a denylist.
    #[must_use]
    pub fn deny_only(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allow: None,
            deny: Some(entries.into_iter().map(Into::into).collect()),
        }
    }

    /// A policy has no effect when both lists are absent.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.allow.is_none() && self.deny.is_none()
    }

    /// Whether this policy carries any content at all (used by the
    /// pipeline executor to decide whether to bother filtering).
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.is_identity()
    }
}

/// A single parsed policy reference, classified by what it resolves to.
///
/// Parsing a raw string into this enum is purely syntactic (it looks at the
/// `group:` prefix shape); whether a `Tool`/`SectionGroup`/`PluginGroup`
/// reference actually names something real is a separate, catalog-aware
/// check performed by the safety filter and the expander.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyEntry {
    /// A canonical tool id (after normalization).
    Tool(String),
    /// `group:<section_id>`.
    SectionGroup(String),
    /// `group:openclaw`.
    OpenclawGroup,
    /// `group:plugin:<plugin_id>`.
    PluginGroup(String),
    /// Anything else — kept verbatim so it can be reported as "unknown".
    Unknown(String),
}

impl PolicyEntry {
    /// Parse a raw, already-normalized entry string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "group:openclaw" {
            return PolicyEntry::OpenclawGroup;
        }
        if let Some(plugin_id) = raw.strip_prefix("group:plugin:") {
            if !plugin_id.is_empty() {
                return PolicyEntry::PluginGroup(plugin_id.to_string());
            }
            return PolicyEntry::Unknown(raw.to_string());
        }
        if let Some(section_id) = raw.strip_prefix("group:") {
            if !section_id.is_empty() {
                return PolicyEntry::SectionGroup(section_id.to_string());
            }
            return PolicyEntry::Unknown(raw.to_string());
        }
        if raw.is_empty() {
            return PolicyEntry::Unknown(raw.to_string());
        }
        PolicyEntry::Tool(raw.to_string())
    }

    /// The raw string this entry was parsed from (reconstructed for
    /// tool/unknown variants; the canonical group spelling for groups).
    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            PolicyEntry::Tool(id) => id.clone(),
            PolicyEntry::SectionGroup(id) => format!("group:{id}"),
            PolicyEntry::OpenclawGroup => "group:openclaw".to_string(),
            PolicyEntry::PluginGroup(id) => format!("group:plugin:{id}"),
            PolicyEntry::Unknown(raw) => raw.clone(),
        }
    }

    /// Whether this entry is any form of group reference.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(
            self,
            PolicyEntry::SectionGroup(_) | PolicyEntry::OpenclawGroup | PolicyEntry::PluginGroup(_)
        )
    }
}
