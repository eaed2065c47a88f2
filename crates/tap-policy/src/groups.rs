// SPDX-License-Identifier: MIT OR Apache-2.0
//! Groups runtime plugin tools by plugin id so `group:plugin:<id>` expands.

use std::collections::BTreeMap;

/// Build the `"group:plugin:<id>" -> [tool names]` map from the current
/// tool list.
///
/// `tool_meta` returns a tool's plugin id, or `None` for a core tool — core
/// tools never contribute to a plugin group.
#[must_use]
pub fn plugin_groups<T>(
    tools: &[T],
    tool_meta: impl Fn(&T) -> (String, Option<String>),
) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for tool in tools {
        let (name, plugin_id) = tool_meta(tool);
        if let Some(plugin_id) = plugin_id {
            groups
                .entry(format!("group:plugin:{plugin_id}"))
                .or_default()
                .push(name);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_plugin_tools_by_id() {
        let tools = vec![
            ("search_web".to_string(), Some("brave".to_string())),
            ("search_news".to_string(), Some("brave".to_string())),
            ("exec".to_string(), None),
        ];
        let groups = plugin_groups(&tools, |(name, pid)| (name.clone(), pid.clone()));
        assert_eq!(
            groups.get("group:plugin:brave"),
            Some(&vec!["search_web".to_string(), "search_news".to_string()])
        );
        assert!(!groups.contains_key("group:plugin:exec"));
    }

    #[test]
    fn no_plugin_tools_yields_empty_map() {
        let tools = vec![("exec".to_string(), None::<String>)];
        let groups = plugin_groups(&tools, |(name, pid)| (name.clone(), pid.clone()));
        assert!(groups.is_empty());
    }
}
