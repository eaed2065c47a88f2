// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runs an ordered sequence of policy steps against a tool list.

use crate::expand::expand;
use crate::filter::filter;
use crate::groups::plugin_groups;
use crate::safety::strip_plugin_only_allowlist;
use tap_catalog::{normalize, Catalog};
use tap_core::{NamedProfileContext, PipelineStep, Warning};
use tracing::{debug, warn};

/// Run `steps` in order against `tools`, narrowing the working set at every
/// step and collecting diagnostic warnings.
///
/// `tool_meta` maps a tool to its `(normalized name, plugin id)`; core tools
/// yield `None` for the plugin id.
pub fn run<T: Clone>(
    tools: Vec<T>,
    steps: &[PipelineStep],
    tool_meta: impl Fn(&T) -> (String, Option<String>),
    named_profile_context: Option<&NamedProfileContext>,
    catalog: &Catalog,
) -> (Vec<T>, Vec<Warning>) {
    let mut warnings = Vec::new();
    let groups = plugin_groups(&tools, &tool_meta);
    let mut working = tools;

    for step in steps {
        let Some(policy) = &step.policy else {
            continue;
        };

        let before = working.len();
        let effective_policy = if step.strip_plugin_only_allowlist {
            let outcome = strip_plugin_only_allowlist(policy, catalog, &groups);
            if !outcome.unknown_entries.is_empty() {
                let csv = outcome.unknown_entries.join(", ");
                let remediation = if outcome.stripped {
                    "Ignoring allowlist; falling back to all core tools."
                } else {
                    "These entries won't match any tool."
                };
                warnings.push(Warning::for_step(
                    step.label.clone(),
                    format!(
                        "tools: {} allowlist contains unknown entries ({csv}). {remediation}",
                        step.label
                    ),
                ));
            } else if outcome.stripped {
                warnings.push(Warning::for_step(
                    step.label.clone(),
                    format!(
                        "tools: {} allowlist names only unloaded plugins. Ignoring allowlist; falling back to all core tools.",
                        step.label
                    ),
                ));
            }
            outcome.policy
        } else {
            policy.clone()
        };

        let expanded = expand(&effective_policy, catalog, &groups);
        if expanded.has_content() {
            working = filter(working, &expanded, |t| tool_meta(t).0);
        }

        debug!(
            step = %step.label,
            before,
            after = working.len(),
            "pipeline step applied"
        );
    }

    if let Some(ctx) = named_profile_context {
        if let Some(w) = degenerate_outcome_warning(&working, ctx, &tool_meta) {
            warnings.push(w);
        }
    }

    for w in &warnings {
        warn!(label = w.label.as_deref().unwrap_or("<global>"), "{}", w.message);
    }

    (working, warnings)
}

fn degenerate_outcome_warning<T>(
    working: &[T],
    ctx: &NamedProfileContext,
    tool_meta: &impl Fn(&T) -> (String, Option<String>),
) -> Option<Warning> {
    if working.is_empty() {
        return Some(Warning::global(format!(
            "Named profile \"{}\" resulted in zero tools after policy filtering.",
            ctx.profile_name
        )));
    }
    if working.len() == 1 {
        let (name, _) = tool_meta(&working[0]);
        if normalize(&name) == "session_status" {
            return Some(Warning::global(format!(
                "Named profile \"{}\" resulted in only session_status after policy filtering.",
                ctx.profile_name
            )));
        }
    }
    if !ctx.headline_tools.is_empty() {
        let surviving: Vec<String> = working.iter().map(|t| normalize(&tool_meta(t).0)).collect();
        let none_survive = ctx
            .headline_tools
            .iter()
            .all(|h| !surviving.contains(&normalize(h)));
        if none_survive {
            return Some(Warning::global(format!(
                "Named profile \"{}\" requested headline tools [{}], but none remain after filtering. Effective tools: {}.",
                ctx.profile_name,
                ctx.headline_tools.join(", "),
                surviving.join(", ")
            )));
        }
    }
    None
}
