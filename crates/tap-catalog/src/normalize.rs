// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonicalizes tool names: trim, lowercase, alias.

/// Closed set of name aliases. Checked after trimming and lowercasing.
const ALIASES: &[(&str, &str)] = &[("bash", "exec"), ("apply-patch", "apply_patch")];

/// Canonicalize a single tool name reference.
///
/// Trims whitespace, lowercases, then applies the alias map. An
/// all-whitespace input normalizes to the empty string; callers must drop
/// empty results rather than treat them as a tool reference.
#[must_use]
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim().to_lowercase();
    for (from, to) in ALIASES {
        if trimmed == *from {
            return (*to).to_string();
        }
    }
    trimmed
}

/// Normalize a list of names, dropping any that normalize to empty.
#[must_use]
pub fn normalize_list<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| normalize(n.as_ref()))
        .filter(|n| !n.is_empty())
        .collect()
}
