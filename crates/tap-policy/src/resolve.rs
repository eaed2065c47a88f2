// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolves a profile name — built-in or named — to a [`Policy`].

use std::collections::{BTreeMap, HashSet};
use tap_catalog::{normalize, Catalog};
use tap_core::{BuiltinProfile, NamedProfile, Policy, ResolutionTrace};

/// Maximum number of `extends` hops walked before resolution terminates.
const MAX_CHAIN_DEPTH: usize = 5;

/// Resolve a built-in profile to its derived policy.
///
/// Returns `None` for `full` (unrestricted) and for any name that isn't a
/// built-in.
#[must_use]
pub fn resolve_builtin(catalog: &Catalog, name: &str) -> Option<Policy> {
    let profile = BuiltinProfile::from_name(name)?;
    if profile == BuiltinProfile::Full {
        return None;
    }
    let allow: Vec<String> = catalog
        .core_tool_ids()
        .into_iter()
        .filter(|id| catalog.profiles_for(id).contains(profile.name()))
        .collect();
    Some(Policy::allow_only(allow))
}

/// Resolve a named profile, following its `extends` chain.
///
/// Terminates on a cycle, on a chain exceeding [`MAX_CHAIN_DEPTH`], or when a
/// parent names a built-in or an undeclared profile. Returns `None` if the
/// effective policy carries no content.
#[must_use]
pub fn resolve_named(
    catalog: &Catalog,
    name: &str,
    named_profiles: &BTreeMap<String, NamedProfile>,
) -> Option<(Policy, ResolutionTrace)> {
    let mut chain = vec![name.to_string()];
    let mut visited: HashSet<String> = HashSet::from([name.to_string()]);
    let mut all_allow: Vec<String> = Vec::new();
    let mut all_deny: Vec<String> = Vec::new();

    let mut current_name = name.to_string();
    loop {
        let Some(profile) = named_profiles.get(&current_name) else {
            break;
        };
        if let Some(allow) = &profile.allow {
            all_allow.extend(allow.iter().map(|s| normalize(s)));
        }
        if let Some(deny) = &profile.deny {
            all_deny.extend(deny.iter().map(|s| normalize(s)));
        }

        let Some(parent) = &profile.extends else {
            break;
        };
        let parent = normalize(parent);

        if visited.contains(&parent) || chain.len() >= MAX_CHAIN_DEPTH {
            break;
        }

        if let Some(builtin_policy) = resolve_builtin(catalog, &parent) {
            if let Some(allow) = builtin_policy.allow {
                all_allow.extend(allow);
            }
            if let Some(deny) = builtin_policy.deny {
                all_deny.extend(deny);
            }
            break;
        }
        if BuiltinProfile::from_name(&parent).is_some() {
            // Resolved to `full` (unrestricted) — nothing to merge, stop.
            break;
        }

        chain.push(parent.clone());
        visited.insert(parent.clone());
        current_name = parent;
    }

    let deny_set: HashSet<String> = all_deny.iter().cloned().collect();
    let effective_deny = dedup(&all_deny);
    let effective_allow: Vec<String> = dedup(&all_allow)
        .into_iter()
        .filter(|t| !deny_set.contains(t))
        .collect();

    if effective_allow.is_empty() && effective_deny.is_empty() {
        return None;
    }

    let trace = ResolutionTrace {
        resolved_from: chain,
        effective_allow,
        effective_deny,
    };
    let policy = trace.to_policy();
    Some((policy, trace))
}

fn dedup(entries: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for e in entries {
        if seen.insert(e.clone()) {
            out.push(e.clone());
        }
    }
    out
}
