// SPDX-License-Identifier: MIT OR Apache-2.0
//! Neutralizes allowlists that would silently disable every core tool.

use std::collections::{BTreeMap, BTreeSet};
use tap_catalog::{normalize, Catalog};
use tap_core::{Policy, PolicyEntry};

/// Outcome of running the safety filter over a single step's policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyOutcome {
    /// The (possibly adjusted) policy.
    pub policy: Policy,
    /// Allowlist entries that matched no core tool, section/openclaw group,
    /// or plugin group.
    pub unknown_entries: Vec<String>,
    /// Whether the allowlist was stripped entirely.
    pub stripped: bool,
}

/// Classify every allowlist entry and, if it names only plugins that
/// haven't loaded and no core tool, drop the allowlist so the agent keeps
/// access to core tools.
///
/// `deny` is never touched.
#[must_use]
pub fn strip_plugin_only_allowlist(
    policy: &Policy,
    catalog: &Catalog,
    plugin_groups: &BTreeMap<String, Vec<String>>,
) -> SafetyOutcome {
    let Some(allow) = &policy.allow else {
        return SafetyOutcome {
            policy: policy.clone(),
            unknown_entries: Vec::new(),
            stripped: false,
        };
    };

    let mut recognized_core_entry = false;
    let mut has_plugin_group_entry = false;
    let mut unknown_entries = Vec::new();

    for raw in allow {
        let normalized = normalize(raw);
        let entry = PolicyEntry::parse(&normalized);
        match &entry {
            PolicyEntry::Tool(id) => {
                if catalog.is_known(id) {
                    recognized_core_entry = true;
                } else {
                    unknown_entries.push(raw.clone());
                    if plugin_groups.values().any(|members| members.contains(id)) {
                        has_plugin_group_entry = true;
                    }
                }
            }
            PolicyEntry::SectionGroup(_) | PolicyEntry::OpenclawGroup => {
                if catalog.group_expansion(&entry.raw()).is_some() {
                    recognized_core_entry = true;
                } else {
                    unknown_entries.push(raw.clone());
                }
            }
            PolicyEntry::PluginGroup(_) => {
                if plugin_groups.contains_key(&entry.raw()) {
                    has_plugin_group_entry = true;
                } else {
                    unknown_entries.push(raw.clone());
                    has_plugin_group_entry = true;
                }
            }
            PolicyEntry::Unknown(_) => unknown_entries.push(raw.clone()),
        }
    }

    if !recognized_core_entry && has_plugin_group_entry {
        return SafetyOutcome {
            policy: Policy {
                allow: None,
                deny: policy.deny.clone(),
            },
            unknown_entries,
            stripped: true,
        };
    }

    SafetyOutcome {
        policy: policy.clone(),
        unknown_entries,
        stripped: false,
    }
}

/// Every distinct core tool id, used by callers that want a `core_tool_names`
/// snapshot independent of the catalog API.
#[must_use]
pub fn core_tool_names(catalog: &Catalog) -> BTreeSet<String> {
    catalog.core_tool_ids()
}
