// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for the tool-access
//! policy engine.
//!
//! This crate owns [`PolicyEngineConfig`] — the on-disk shape behind the
//! Session Override Store path, the authorized-sender list, and the named
//! profile table — together with TOML loading, environment overlay, and
//! advisory validation.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tap_core::{BuiltinProfile, NamedProfile};
use tap_error::{EngineError, ErrorCode};

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level configuration issues that do not prevent startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No senders are authorized to issue `/tools:reset`.
    NoAuthorizedSenders,
    /// A named profile's `extends` chain is unusually deep.
    DeepExtendsChain {
        /// Profile the chain starts from.
        profile: String,
        /// Number of hops walked before the check gave up.
        depth: usize,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::NoAuthorizedSenders => {
                write!(f, "no authorized_senders configured; /tools:reset will always be ignored")
            }
            ConfigWarning::DeepExtendsChain { profile, depth } => {
                write!(f, "named profile '{profile}' has an unusually deep extends chain ({depth} hops)")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config type
// ---------------------------------------------------------------------------

/// Top-level runtime configuration for the policy engine.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PolicyEngineConfig {
    /// Filesystem root for the Session Override Store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,

    /// Sender ids allowed to issue `/tools:reset`.
    #[serde(default)]
    pub authorized_senders: BTreeSet<String>,

    /// Log level override (e.g. `"debug"`, `"info"`, `"warn"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Named profile definitions, keyed by profile name.
    #[serde(default)]
    pub named_profiles: BTreeMap<String, NamedProfile>,
}

impl Default for PolicyEngineConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            authorized_senders: BTreeSet::new(),
            log_level: Some("info".into()),
            named_profiles: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Chain depth beyond which [`validate_config`] warns, independent of the
/// resolver's own depth-5 termination bound.
const DEEP_CHAIN_THRESHOLD: usize = 3;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a [`PolicyEngineConfig`] from an optional TOML file path.
///
/// `None` yields [`PolicyEngineConfig::default()`]. Environment overrides
/// from [`apply_env_overrides`] are applied in both cases.
pub fn load_config(path: Option<&Path>) -> Result<PolicyEngineConfig, EngineError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|e| {
                EngineError::new(ErrorCode::ConfigNotFound, format!("config file not found: {}", p.display()))
                    .with_context("path", p.display().to_string())
                    .with_source(e)
            })?;
            parse_toml(&content)?
        }
        None => PolicyEngineConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into a [`PolicyEngineConfig`].
pub fn parse_toml(content: &str) -> Result<PolicyEngineConfig, EngineError> {
    toml::from_str::<PolicyEngineConfig>(content).map_err(|e| {
        EngineError::new(ErrorCode::ConfigParseFailed, "failed to parse config").with_source(e)
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `TAP_STORE_PATH`
/// - `TAP_LOG_LEVEL`
/// - `TAP_AUTHORIZED_SENDERS` (comma-separated)
pub fn apply_env_overrides(config: &mut PolicyEngineConfig) {
    if let Ok(val) = std::env::var("TAP_STORE_PATH") {
        config.store_path = Some(val);
    }
    if let Ok(val) = std::env::var("TAP_LOG_LEVEL") {
        config.log_level = Some(val);
    }
    if let Ok(val) = std::env::var("TAP_AUTHORIZED_SENDERS") {
        config.authorized_senders = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (invalid `log_level`, an empty `store_path`, a named
/// profile's `extends` target that names neither a declared named profile
/// nor a built-in) are returned as `Err`; soft issues come back as
/// warnings.
pub fn validate_config(config: &PolicyEngineConfig) -> Result<Vec<ConfigWarning>, EngineError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level
        && !VALID_LOG_LEVELS.contains(&level.as_str())
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    if let Some(ref path) = config.store_path
        && path.trim().is_empty()
    {
        errors.push("store_path must not be empty when set".into());
    }

    for name in config.named_profiles.keys() {
        match walk_extends_chain(name, &config.named_profiles) {
            Ok(depth) if depth > DEEP_CHAIN_THRESHOLD => {
                warnings.push(ConfigWarning::DeepExtendsChain {
                    profile: name.clone(),
                    depth,
                });
            }
            Ok(_) => {}
            Err(undeclared) => {
                errors.push(format!(
                    "named profile '{name}' extends undeclared profile '{undeclared}'"
                ));
            }
        }
    }

    if config.authorized_senders.is_empty() {
        warnings.push(ConfigWarning::NoAuthorizedSenders);
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(EngineError::new(ErrorCode::ConfigInvalid, "config validation failed")
            .with_context("reasons", errors))
    }
}

/// Walk a named profile's `extends` chain, mirroring the resolver's
/// termination rules (cycle or depth-5 bound), and report the first
/// `extends` target that names neither a declared profile nor a built-in.
fn walk_extends_chain(
    start: &str,
    named_profiles: &BTreeMap<String, NamedProfile>,
) -> Result<usize, String> {
    let mut visited = HashSet::from([start.to_string()]);
    let mut current = start.to_string();
    let mut depth = 0;

    loop {
        let Some(profile) = named_profiles.get(&current) else {
            break;
        };
        let Some(parent) = &profile.extends else {
            break;
        };
        if BuiltinProfile::from_name(parent).is_some() {
            depth += 1;
            break;
        }
        if !named_profiles.contains_key(parent) {
            return Err(parent.clone());
        }
        if visited.contains(parent) || depth + 1 >= 5 {
            break;
        }
        visited.insert(parent.clone());
        current = parent.clone();
        depth += 1;
    }
    Ok(depth)
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations. Values in `overlay` take precedence over
/// `base`. Named-profile tables are combined; on name collisions the
/// overlay entry wins.
pub fn merge_configs(base: PolicyEngineConfig, overlay: PolicyEngineConfig) -> PolicyEngineConfig {
    let mut named_profiles = base.named_profiles;
    named_profiles.extend(overlay.named_profiles);
    let authorized_senders = if overlay.authorized_senders.is_empty() {
        base.authorized_senders
    } else {
        overlay.authorized_senders
    };
    PolicyEngineConfig {
        store_path: overlay.store_path.or(base.store_path),
        authorized_senders,
        log_level: overlay.log_level.or(base.log_level),
        named_profiles,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
