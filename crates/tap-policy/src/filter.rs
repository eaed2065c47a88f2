// SPDX-License-Identifier: MIT OR Apache-2.0
//! Applies a single expanded policy to a tool list.

use tap_catalog::normalize;
use tap_core::Policy;

/// Filter `tools` against `policy`, preserving input order.
///
/// A tool with normalized name `n` survives iff `policy.allow` is absent or
/// contains `n`, and `n` is not in `policy.deny`. Pure and idempotent:
/// applying the same policy twice yields the same result.
#[must_use]
pub fn filter<T>(tools: Vec<T>, policy: &Policy, name_of: impl Fn(&T) -> String) -> Vec<T> {
    if policy.is_identity() {
        return tools;
    }
    tools
        .into_iter()
        .filter(|tool| {
            let n = normalize(&name_of(tool));
            let allowed = policy.allow.as_ref().is_none_or(|a| a.contains(&n));
            let denied = policy.deny.as_ref().is_some_and(|d| d.contains(&n));
            allowed && !denied
        })
        .collect()
}
