// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property tests for the universally-quantified pipeline invariants.

use proptest::prelude::*;
use tap_catalog::Catalog;
use tap_core::{PipelineStep, Policy, Section, Tool};
use tap_policy::run;

const TOOL_NAMES: [&str; 6] = ["read", "write", "exec", "grep", "message", "session_status"];

fn catalog() -> Catalog {
    Catalog::new([
        Tool::core("read", "Read", "d", Section::Files),
        Tool::core("write", "Write", "d", Section::Files),
        Tool::core("exec", "Exec", "d", Section::Runtime),
        Tool::core("grep", "Grep", "d", Section::Files),
        Tool::core("message", "Message", "d", Section::Messaging),
        Tool::core("session_status", "Session Status", "d", Section::Sessions),
    ])
}

fn tool_subset() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(proptest::sample::select(&TOOL_NAMES[..]), 0..TOOL_NAMES.len())
        .prop_map(|v| v.into_iter().map(str::to_string).collect())
}

fn policy_strategy() -> impl Strategy<Value = Policy> {
    (
        proptest::option::of(tool_subset()),
        proptest::option::of(tool_subset()),
    )
        .prop_map(|(allow, deny)| Policy { allow, deny })
}

proptest! {
    #[test]
    fn monotone_narrowing(tools in tool_subset(), policy in policy_strategy()) {
        let step = PipelineStep::new("step", Some(policy));
        let catalog = catalog();
        let (out, _) = run(tools.clone(), &[step], |t| (t.clone(), None), None, &catalog);
        prop_assert!(out.len() <= tools.len());
        for t in &out {
            prop_assert!(tools.contains(t));
        }
    }

    #[test]
    fn idempotent_under_same_pipeline(tools in tool_subset(), policy in policy_strategy()) {
        let step = PipelineStep::new("step", Some(policy));
        let catalog = catalog();
        let (once, _) = run(tools, &[step.clone()], |t| (t.clone(), None), None, &catalog);
        let (twice, _) = run(once.clone(), &[step], |t| (t.clone(), None), None, &catalog);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn deny_dominates(tools in tool_subset(), denied in proptest::sample::select(&TOOL_NAMES[..])) {
        let policy = Policy::deny_only([denied]);
        let step = PipelineStep::new("step", Some(policy));
        let catalog = catalog();
        let (out, _) = run(tools, &[step], |t| (t.clone(), None), None, &catalog);
        prop_assert!(!out.contains(&denied.to_string()));
    }

    #[test]
    fn order_preserved(tools in tool_subset(), policy in policy_strategy()) {
        let step = PipelineStep::new("step", Some(policy));
        let catalog = catalog();
        let (out, _) = run(tools.clone(), &[step], |t| (t.clone(), None), None, &catalog);
        let mut last_idx = None;
        for t in &out {
            let idx = tools.iter().position(|x| x == t).unwrap();
            if let Some(last) = last_idx {
                prop_assert!(idx > last);
            }
            last_idx = Some(idx);
        }
    }

    #[test]
    fn second_narrower_step_never_widens(
        tools in tool_subset(),
        first_allow in tool_subset(),
        second_allow in tool_subset(),
    ) {
        let catalog = catalog();
        let steps = vec![
            PipelineStep::new("first", Some(Policy::allow_only(first_allow.clone()))),
            PipelineStep::new("second", Some(Policy::allow_only(second_allow))),
        ];
        let (after_both, _) = run(tools.clone(), &steps, |t| (t.clone(), None), None, &catalog);
        let (after_first, _) = run(
            tools,
            &steps[..1],
            |t| (t.clone(), None),
            None,
            &catalog,
        );
        for t in &after_both {
            prop_assert!(after_first.contains(t));
        }
    }
}

#[test]
fn normalize_is_idempotent_and_aliases() {
    assert_eq!(tap_catalog::normalize("bash"), "exec");
    assert_eq!(tap_catalog::normalize("apply-patch"), "apply_patch");
    for n in ["bash", "  Read ", "group:openclaw"] {
        let once = tap_catalog::normalize(n);
        let twice = tap_catalog::normalize(&once);
        assert_eq!(once, twice);
    }
}
