// SPDX-License-Identifier: MIT OR Apache-2.0
//! Catalog entries: sections and tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A closed, ordered list of catalog sections.
///
/// Order matters: [`crate::tool::Section::ALL`] defines the order
/// `list_sections` returns sections in, which is the order tools are
/// presented to an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// File read/write/search tools.
    Files,
    /// Shell/process execution tools.
    Runtime,
    /// Web search/fetch tools.
    Web,
    /// Long-term memory read/write tools.
    Memory,
    /// Session introspection and control tools.
    Sessions,
    /// UI/presentation tools.
    Ui,
    /// Messaging/notification tools.
    Messaging,
    /// Workflow/automation tools.
    Automation,
    /// Graph/node manipulation tools.
    Nodes,
    /// Sub-agent spawning and coordination tools.
    Agents,
    /// Image/audio/video tools.
    Media,
}

impl Section {
    /// All sections, in catalog display order.
    pub const ALL: [Section; 11] = [
        Section::Files,
        Section::Runtime,
        Section::Web,
        Section::Memory,
        Section::Sessions,
        Section::Ui,
        Section::Messaging,
        Section::Automation,
        Section::Nodes,
        Section::Agents,
        Section::Media,
    ];

    /// The lowercase `section_id` used in `group:<section_id>` references.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Section::Files => "files",
            Section::Runtime => "runtime",
            Section::Web => "web",
            Section::Memory => "memory",
            Section::Sessions => "sessions",
            Section::Ui => "ui",
            Section::Messaging => "messaging",
            Section::Automation => "automation",
            Section::Nodes => "nodes",
            Section::Agents => "agents",
            Section::Media => "media",
        }
    }

    /// Parse a `section_id` back into a [`Section`].
    #[must_use]
    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// A built-in or plugin-contributed tool definition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Tool {
    /// Unique, lowercase snake_case identifier (e.g. `"read"`, `"exec"`).
    pub id: String,
    /// Short human-readable label.
    pub label: String,
    /// Longer description shown in tool listings.
    pub description: String,
    /// The section this tool belongs to.
    pub section: Section,
    /// Built-in profile ids this tool belongs to (e.g. `"coding"`).
    pub profiles: BTreeSet<String>,
    /// Whether this tool is a member of the curated `group:openclaw` set.
    pub include_in_openclaw_group: bool,
    /// Plugin id that contributed this tool, or `None` for a core tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_id: Option<String>,
}

impl Tool {
    /// Construct a core (non-plugin) tool.
    #[must_use]
    pub fn core(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        section: Section,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            section,
            profiles: BTreeSet::new(),
            include_in_openclaw_group: false,
            plugin_id: None,
        }
    }

    /// Construct a tool contributed by a plugin.
    #[must_use]
    pub fn plugin(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        section: Section,
        plugin_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            section,
            profiles: BTreeSet::new(),
            include_in_openclaw_group: false,
            plugin_id: Some(plugin_id.into()),
        }
    }

    /// Mark this tool as belonging to the given built-in profiles.
    #[must_use]
    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = profiles.into_iter().map(Into::into).collect();
        self
    }

    /// Mark this tool as a member of `group:openclaw`.
    #[must_use]
    pub fn in_openclaw_group(mut self) -> Self {
        self.include_in_openclaw_group = true;
        self
    }
}
