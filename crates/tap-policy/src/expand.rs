// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rewrites group references in a [`Policy`] into their member tool ids.

use std::collections::{BTreeMap, HashSet};
use tap_catalog::Catalog;
use tap_core::{Policy, PolicyEntry};

/// Expand every group reference in `policy` into its member tool ids.
///
/// Order is preserved; duplicates introduced by overlapping group
/// expansions are removed. Entries that don't name a known group (section,
/// openclaw, or plugin) pass through unchanged — they simply won't match
/// any tool downstream.
#[must_use]
pub fn expand(
    policy: &Policy,
    catalog: &Catalog,
    plugin_groups: &BTreeMap<String, Vec<String>>,
) -> Policy {
    Policy {
        allow: policy
            .allow
            .as_ref()
            .map(|entries| expand_list(entries, catalog, plugin_groups)),
        deny: policy
            .deny
            .as_ref()
            .map(|entries| expand_list(entries, catalog, plugin_groups)),
    }
}

fn expand_list(
    entries: &[String],
    catalog: &Catalog,
    plugin_groups: &BTreeMap<String, Vec<String>>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for raw in entries {
        let members = expand_one(raw, catalog, plugin_groups);
        for m in members {
            if seen.insert(m.clone()) {
                out.push(m);
            }
        }
    }
    out
}

fn expand_one(
    raw: &str,
    catalog: &Catalog,
    plugin_groups: &BTreeMap<String, Vec<String>>,
) -> Vec<String> {
    let entry = PolicyEntry::parse(raw);
    match &entry {
        PolicyEntry::PluginGroup(_) => plugin_groups
            .get(&entry.raw())
            .cloned()
            .unwrap_or_default(),
        PolicyEntry::SectionGroup(_) | PolicyEntry::OpenclawGroup => {
            catalog.group_expansion(&entry.raw()).unwrap_or_default()
        }
        PolicyEntry::Tool(id) => vec![id.clone()],
        PolicyEntry::Unknown(raw) => vec![raw.clone()],
    }
}
