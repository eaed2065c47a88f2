// SPDX-License-Identifier: MIT OR Apache-2.0
//! The per-session override record persisted by the Session Override Store.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How tools should be listed to the model: full descriptions, names only,
/// or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PromptListingMode {
    /// Include full tool descriptions in the prompt.
    Full,
    /// Include only tool names.
    Names,
    /// Do not list tools in the prompt at all.
    Off,
}

/// Per-session overrides layered on top of the seven-step default pipeline.
///
/// Any field may be absent; `Default` is the all-absent record, which has
/// no effect on the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionOverrideRecord {
    /// Named or built-in profile the session has switched to.
    #[serde(rename = "toolsProfileOverride", default, skip_serializing_if = "Option::is_none")]
    pub profile_override: Option<String>,
    /// Session-scoped allowlist override.
    #[serde(rename = "toolsAllowOverride", default, skip_serializing_if = "Option::is_none")]
    pub allow_override: Option<Vec<String>>,
    /// Session-scoped denylist override.
    #[serde(rename = "toolsDenyOverride", default, skip_serializing_if = "Option::is_none")]
    pub deny_override: Option<Vec<String>>,
    /// Session-scoped prompt-listing mode override.
    #[serde(rename = "toolsPromptListingOverride", default, skip_serializing_if = "Option::is_none")]
    pub prompt_listing_override: Option<PromptListingMode>,
}

impl SessionOverrideRecord {
    /// Whether any of the four fields is set.
    #[must_use]
    pub fn has_overrides(&self) -> bool {
        self.profile_override.is_some()
            || self.allow_override.is_some()
            || self.deny_override.is_some()
            || self.prompt_listing_override.is_some()
    }

    /// Clear all four fields in place.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
