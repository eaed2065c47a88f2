// SPDX-License-Identifier: MIT OR Apache-2.0
//! The static tool catalog.

use crate::normalize::normalize;
use std::collections::{BTreeMap, BTreeSet};
use tap_core::{Section, Tool};

/// Immutable registry of tool definitions, keyed by normalized id.
///
/// Constructed once at startup and passed explicitly into resolvers — there
/// is no hidden global catalog, which keeps tests free to build alternate
/// catalogs.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: BTreeMap<String, Tool>,
}

impl Catalog {
    /// Build a catalog from a list of tools.
    ///
    /// # Panics
    ///
    /// Panics if two tools share the same normalized id — catalog
    /// construction happens once at startup from static data, so a
    /// collision is a programming error, not a runtime condition to
    /// recover from.
    #[must_use]
    pub fn new(tools: impl IntoIterator<Item = Tool>) -> Self {
        let mut map = BTreeMap::new();
        for tool in tools {
            let id = normalize(&tool.id);
            assert!(!id.is_empty(), "tool id must not be empty");
            let prev = map.insert(id.clone(), tool);
            assert!(prev.is_none(), "duplicate tool id '{id}' in catalog");
        }
        Self { tools: map }
    }

    /// Sections that have at least one tool, in catalog display order.
    #[must_use]
    pub fn list_sections(&self) -> Vec<(Section, Vec<&Tool>)> {
        Section::ALL
            .into_iter()
            .filter_map(|section| {
                let tools: Vec<&Tool> = self
                    .tools
                    .values()
                    .filter(|t| t.section == section)
                    .collect();
                if tools.is_empty() {
                    None
                } else {
                    Some((section, tools))
                }
            })
            .collect()
    }

    /// Built-in profile ids a tool belongs to; empty if the tool is unknown.
    #[must_use]
    pub fn profiles_for(&self, tool_id: &str) -> BTreeSet<String> {
        self.tools
            .get(&normalize(tool_id))
            .map(|t| t.profiles.clone())
            .unwrap_or_default()
    }

    /// Whether `tool_id` (after normalization) names a catalog tool.
    #[must_use]
    pub fn is_known(&self, tool_id: &str) -> bool {
        self.tools.contains_key(&normalize(tool_id))
    }

    /// Every catalog tool id.
    #[must_use]
    pub fn core_tool_ids(&self) -> BTreeSet<String> {
        self.tools.keys().cloned().collect()
    }

    /// Look up a tool by id (normalized).
    #[must_use]
    pub fn get(&self, tool_id: &str) -> Option<&Tool> {
        self.tools.get(&normalize(tool_id))
    }

    /// Expand a `group:<section_id>` or `group:openclaw` reference into its
    /// member tool ids. Returns `None` for anything else, including
    /// `group:plugin:*` (those are computed at runtime by the plugin group
    /// builder, not known to the static catalog).
    #[must_use]
    pub fn group_expansion(&self, group_ref: &str) -> Option<Vec<String>> {
        if group_ref == "group:openclaw" {
            let ids: Vec<String> = self
                .tools
                .values()
                .filter(|t| t.include_in_openclaw_group)
                .map(|t| t.id.clone())
                .collect();
            return Some(ids);
        }
        let section_id = group_ref.strip_prefix("group:")?;
        if section_id.is_empty() || section_id.starts_with("plugin:") {
            return None;
        }
        let section = Section::from_id(section_id)?;
        let ids: Vec<String> = self
            .tools
            .values()
            .filter(|t| t.section == section)
            .map(|t| t.id.clone())
            .collect();
        Some(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new([
            Tool::core("read", "Read", "Read a file", Section::Files)
                .with_profiles(["minimal", "coding"]),
            Tool::core("write", "Write", "Write a file", Section::Files).with_profiles(["coding"]),
            Tool::core("exec", "Exec", "Run a command", Section::Runtime)
                .with_profiles(["coding"])
                .in_openclaw_group(),
            Tool::core("message", "Message", "Send a message", Section::Messaging)
                .with_profiles(["messaging"])
                .in_openclaw_group(),
            Tool::core("session_status", "Session Status", "Inspect session", Section::Sessions),
        ])
    }

    #[test]
    #[should_panic(expected = "duplicate tool id")]
    fn rejects_duplicate_ids() {
        Catalog::new([
            Tool::core("read", "Read", "d", Section::Files),
            Tool::core("Read", "Read again", "d", Section::Files),
        ]);
    }

    #[test]
    fn list_sections_elides_empty() {
        let cat = sample_catalog();
        let sections: Vec<Section> = cat.list_sections().into_iter().map(|(s, _)| s).collect();
        assert!(sections.contains(&Section::Files));
        assert!(!sections.contains(&Section::Media));
    }

    #[test]
    fn profiles_for_known_and_unknown() {
        let cat = sample_catalog();
        assert!(cat.profiles_for("read").contains("coding"));
        assert!(cat.profiles_for("nonexistent").is_empty());
    }

    #[test]
    fn is_known_normalizes() {
        let cat = sample_catalog();
        assert!(cat.is_known("  Read  "));
        assert!(cat.is_known("bash")); // alias for exec
        assert!(!cat.is_known("bogus"));
    }

    #[test]
    fn core_tool_ids_contains_all() {
        let cat = sample_catalog();
        let ids = cat.core_tool_ids();
        assert_eq!(ids.len(), 5);
        assert!(ids.contains("exec"));
    }

    #[test]
    fn group_expansion_section() {
        let cat = sample_catalog();
        let ids = cat.group_expansion("group:files").unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"read".to_string()));
        assert!(ids.contains(&"write".to_string()));
    }

    #[test]
    fn group_expansion_openclaw() {
        let cat = sample_catalog();
        let ids = cat.group_expansion("group:openclaw").unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"exec".to_string()));
        assert!(ids.contains(&"message".to_string()));
    }

    #[test]
    fn group_expansion_unknown_section_is_none() {
        let cat = sample_catalog();
        assert!(cat.group_expansion("group:nonexistent").is_none());
    }

    #[test]
    fn group_expansion_plugin_is_none() {
        let cat = sample_catalog();
        assert!(cat.group_expansion("group:plugin:brave").is_none());
    }

    #[test]
    fn group_expansion_non_group_is_none() {
        let cat = sample_catalog();
        assert!(cat.group_expansion("exec").is_none());
    }
}
