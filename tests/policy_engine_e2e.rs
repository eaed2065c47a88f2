// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end tests assembling the whole tool-access policy engine:
//! catalog, profile resolution, the pipeline, config loading, and the
//! session override store together, the way a host application would.

use std::collections::BTreeMap;

use tap_catalog::Catalog;
use tap_config::{parse_toml, validate_config};
use tap_core::{NamedProfile, NamedProfileContext, PipelineStep, Policy, Section, Tool};
use tap_store::{handle_reset_command, SessionStore};

fn s(v: &str) -> String {
    v.to_string()
}

fn catalog() -> Catalog {
    Catalog::new([
        Tool::core("read", "Read", "Read a file", Section::Files).with_profiles(["coding"]),
        Tool::core("write", "Write", "Write a file", Section::Files).with_profiles(["coding"]),
        Tool::core("exec", "Exec", "Run a command", Section::Runtime)
            .with_profiles(["coding"])
            .in_openclaw_group(),
        Tool::core("message", "Message", "Send a message", Section::Messaging)
            .with_profiles(["messaging"])
            .in_openclaw_group(),
        Tool::core("session_status", "Session Status", "Inspect session", Section::Sessions),
        Tool::plugin("search_web", "Search Web", "Search the web", Section::Web, "brave"),
    ])
}

// ===================================================================
// 1. Built-in profile resolution feeds the pipeline
// ===================================================================

#[test]
fn coding_profile_filters_to_coding_tools() {
    let catalog = catalog();
    let policy = tap_policy::resolve_builtin(&catalog, tap_core::BuiltinProfile::Coding.name());
    let steps = vec![PipelineStep::new("tools.profile (coding)", policy)];
    let tools = vec![s("read"), s("write"), s("exec"), s("message")];
    let (out, warnings) = tap_policy::run(tools, &steps, |t| (t.clone(), None), None, &catalog);
    assert_eq!(out, vec![s("read"), s("write"), s("exec")]);
    assert!(warnings.is_empty());
}

// ===================================================================
// 2. Named profile with extends + deny narrows the builtin it extends
// ===================================================================

#[test]
fn named_profile_extending_builtin_narrows_via_pipeline() {
    let catalog = catalog();
    let mut profiles = BTreeMap::new();
    profiles.insert(
        s("support"),
        NamedProfile {
            extends: Some(s("coding")),
            allow: None,
            deny: Some(vec![s("write")]),
        },
    );
    let (policy, trace) = tap_policy::resolve_named(&catalog, "support", &profiles).unwrap();
    assert_eq!(trace.resolved_from, vec![s("support"), s("coding")]);

    let steps = vec![PipelineStep::new("tools.profile (support)", Some(policy))];
    let tools = vec![s("read"), s("write"), s("exec")];
    let ctx = NamedProfileContext {
        profile_name: s("support"),
        headline_tools: vec![s("exec")],
    };
    let (out, warnings) = tap_policy::run(tools, &steps, |t| (t.clone(), None), Some(&ctx), &catalog);
    assert_eq!(out, vec![s("read"), s("exec")]);
    assert!(warnings.is_empty());
}

// ===================================================================
// 3. Group expansion + safety filter together
// ===================================================================

#[test]
fn plugin_group_reference_expands_and_survives_safety_filter() {
    let catalog = catalog();
    let tools = vec![s("exec"), s("search_web")];
    let steps = vec![PipelineStep::new(
        "tools.allow",
        Some(Policy::allow_only(["group:plugin:brave"])),
    )];
    let (out, warnings) = tap_policy::run(
        tools,
        &steps,
        |t| {
            if t == "search_web" {
                (t.clone(), Some(s("brave")))
            } else {
                (t.clone(), None)
            }
        },
        None,
        &catalog,
    );
    assert_eq!(out, vec![s("exec"), s("search_web")]);
    assert!(warnings.iter().any(|w| w.message.contains("Ignoring allowlist")));
}

// ===================================================================
// 4. Config loading feeds named profiles into resolution
// ===================================================================

#[test]
fn config_named_profiles_resolve_through_the_pipeline() {
    let toml_str = r#"
        store_path = "/var/lib/agent/overrides"
        authorized_senders = ["ops-bot"]

        [named_profiles.research]
        allow = ["group:messaging", "exec"]

        [named_profiles.support]
        extends = "research"
        deny = ["exec"]
    "#;
    let config = parse_toml(toml_str).unwrap();
    validate_config(&config).expect("config should validate");

    let catalog = catalog();
    let (policy, _) = tap_policy::resolve_named(&catalog, "support", &config.named_profiles).unwrap();
    let steps = vec![PipelineStep::new("tools.profile (support)", Some(policy))];
    let tools = vec![s("message"), s("exec"), s("read")];
    let (out, _) = tap_policy::run(tools, &steps, |t| (t.clone(), None), None, &catalog);
    assert_eq!(out, vec![s("message")]);
}

// ===================================================================
// 5. Reset command round-trips through the store
// ===================================================================

#[tokio::test]
async fn reset_command_clears_overrides_written_by_a_prior_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let authorized = std::collections::BTreeSet::from([s("ops-bot")]);

    store
        .update("session-xyz", |r| {
            r.profile_override = Some(s("coding"));
            r.allow_override = Some(vec![s("read")]);
        })
        .await
        .unwrap();

    let outcome = handle_reset_command(
        "/tools:reset",
        "ops-bot",
        &authorized,
        Some("session-xyz"),
        &store,
    )
    .await
    .unwrap();
    assert_eq!(
        outcome.reply.as_deref(),
        Some("Tool overrides cleared. Tools restored to config baseline.")
    );
    assert!(store.read("session-xyz").unwrap().profile_override.is_none());
}

// ===================================================================
// 6. Degenerate-outcome warning surfaces when a named profile filters
//    everything away
// ===================================================================

#[test]
fn named_profile_losing_headline_tools_warns() {
    let catalog = catalog();
    let policy = Policy::allow_only(["read", "exec"]);
    let steps = vec![PipelineStep::new("tools.profile (marketing)", Some(policy))];
    let tools = vec![s("read"), s("exec"), s("session_status")];
    let ctx = NamedProfileContext {
        profile_name: s("marketing"),
        headline_tools: vec![s("message"), s("search_web")],
    };
    let (_, warnings) = tap_policy::run(tools, &steps, |t| (t.clone(), None), Some(&ctx), &catalog);
    assert!(warnings.iter().any(|w| w.message.contains("headline tools")));
}
